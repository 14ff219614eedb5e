use dioxus::prelude::*;
use tracing::debug;

use crate::components::layout::{ResultsView, StatusLine};
use crate::hooks::use_editor;

#[component]
pub fn PostprocessingPanel() -> Element {
    let ctx = use_editor();
    let mut editor = ctx.editor;
    let client = ctx.client;

    let mut scale = use_signal(|| editor.peek().config().default_deformation_scale.to_string());

    let (solving, has_result, overlay_visible, preview, status) = {
        let state = editor.read();
        (
            state.is_solving(),
            state.overlay().has_result(),
            state.overlay().is_visible(),
            state.preview_scale(),
            state.status().calculation.clone(),
        )
    };

    let calculate = move |_: MouseEvent| {
        let started = editor.write().begin_solve(&scale());
        let Ok((ticket, request)) = started else {
            return;
        };
        let client = client.read().clone();
        spawn(async move {
            let outcome = client.calculate(&request).await;
            if !editor.write().finish_solve(ticket, outcome) {
                debug!("Superseded solve response dropped");
            }
        });
    };

    rsx! {
        div { class: "panel postprocessing-panel",
            section { class: "panel-section",
                h3 { "Analysis" }
                label {
                    "Deformation scale"
                    input {
                        r#type: "number",
                        min: "0",
                        step: "any",
                        value: "{scale}",
                        oninput: move |evt| scale.set(evt.value()),
                    }
                }
                button {
                    class: "primary-button",
                    disabled: solving,
                    onclick: calculate,
                    if solving { "Calculating..." } else { "Calculate" }
                }
                StatusLine { message: status }
            }

            section { class: "panel-section",
                h3 { "Deformed Shape" }
                button {
                    disabled: !has_result,
                    onclick: move |_| {
                        editor.write().toggle_deformed_shape();
                    },
                    if overlay_visible { "Hide Deformed Shape" } else { "Show Deformed Shape" }
                }
                label {
                    "Preview"
                    input {
                        r#type: "range",
                        min: "0",
                        max: "2",
                        step: "0.1",
                        value: "{preview}",
                        disabled: has_result,
                        oninput: move |evt| {
                            let value = evt.value().parse::<f64>().unwrap_or(0.0);
                            if let Err(err) = editor.write().preview_deformation(value) {
                                debug!("Preview rejected: {}", err);
                            }
                        },
                    }
                }
            }

            ResultsView {}
        }
    }
}
