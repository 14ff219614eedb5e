use dioxus::prelude::*;
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use crate::hooks::use_editor;
use crate::scene::ScreenPoint;

pub const CANVAS_ID: &str = "viewport-canvas";

#[component]
pub fn ThreeJsCanvas() -> Element {
    let ctx = use_editor();
    let mut editor = ctx.editor;
    let mut canvas_ref = use_signal(|| None::<HtmlCanvasElement>);

    // Attach the renderer once the canvas is mounted
    use_effect(move || {
        if canvas_ref.read().is_some() {
            #[cfg(target_arch = "wasm32")]
            editor.peek().scene().attach(CANVAS_ID);
        }
    });

    use_drop(move || {
        #[cfg(target_arch = "wasm32")]
        editor.peek().scene().detach();
    });

    let on_pick = move |event: MouseEvent| {
        let offset = event.element_coordinates();
        let size = canvas_ref
            .read()
            .as_ref()
            .map(|canvas| (canvas.client_width() as f64, canvas.client_height() as f64));
        let Some(point) = size.and_then(|(width, height)| ScreenPoint::from_pixels(offset.x, offset.y, width, height)) else {
            return;
        };
        if let Some(activation) = editor.write().pick(point) {
            debug!("Opened {:?} from the viewport", activation.entity);
        }
    };

    rsx! {
        div {
            class: "drawing-canvas-container",
            style: "width: 100%; height: 100%; display: flex; flex-direction: column; position: relative;",

            canvas {
                id: CANVAS_ID,
                style: "flex: 1; cursor: default; background: #212530; display: block; width: 100%; height: 100%;",
                onclick: on_pick,
                onmounted: move |event| {
                    if let Some(element) = event.data().downcast::<web_sys::Element>() {
                        if let Ok(canvas) = element.clone().dyn_into::<HtmlCanvasElement>() {
                            canvas_ref.set(Some(canvas));
                        }
                    }
                }
            }
            button {
                class: "reset-camera-button",
                onclick: move |_| {
                    #[cfg(target_arch = "wasm32")]
                    editor.peek().scene().reset_camera();
                },
                "Reset Camera"
            }
        }
    }
}
