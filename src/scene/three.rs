//! three.js backend, driven through the functions `viewport.js` puts on `window`

use std::cell::Cell;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;

use super::{PrimitiveHandle, PrimitiveSpec, SceneBackend, ScreenPoint};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "initViewport", catch)]
    fn init_viewport(canvas_id: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = "spawnPrimitive", catch)]
    fn spawn_primitive(handle: u32, spec: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = "updatePrimitive", catch)]
    fn update_primitive(handle: u32, spec: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = "removePrimitive", catch)]
    fn remove_primitive(handle: u32) -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = "pickPrimitives", catch)]
    fn pick_primitives(x: f64, y: f64, candidates: Vec<u32>) -> Result<Vec<u32>, JsValue>;

    #[wasm_bindgen(js_name = "resetCamera", catch)]
    fn reset_camera() -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = "cleanupViewport", catch)]
    fn cleanup_viewport() -> Result<(), JsValue>;
}

const GLUE: [&str; 7] = [
    "initViewport",
    "spawnPrimitive",
    "updatePrimitive",
    "removePrimitive",
    "pickPrimitives",
    "resetCamera",
    "cleanupViewport",
];

/// Scene rendered by three.js. Handles are allocated on this side; the glue
/// keeps a handle -> mesh map and tolerates calls before the canvas exists.
#[derive(Debug, Default)]
pub struct ThreeScene {
    next_handle: u32,
    /// Set once the glue script has been seen on `window`
    ready: Cell<bool>,
}

impl ThreeScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-checked until the inline script has run
    pub fn is_available(&self) -> bool {
        if !self.ready.get() && glue_available() {
            self.ready.set(true);
        }
        self.ready.get()
    }

    /// Attach the renderer to the canvas with the given id
    pub fn attach(&self, canvas_id: &str) {
        if self.is_available() {
            report("initViewport", init_viewport(canvas_id));
        } else {
            warn!("Viewport glue not found on window; 3D view disabled");
        }
    }

    pub fn reset_camera(&self) {
        if self.is_available() {
            report("resetCamera", reset_camera());
        }
    }

    pub fn detach(&self) {
        if self.is_available() {
            report("cleanupViewport", cleanup_viewport());
        }
    }

    fn to_js(spec: &PrimitiveSpec) -> Option<JsValue> {
        match serde_wasm_bindgen::to_value(spec) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("Failed to convert primitive spec: {}", err);
                None
            }
        }
    }
}

fn glue_available() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    GLUE.iter().all(|name| {
        js_sys::Reflect::get(&window, &JsValue::from_str(name))
            .map(|value| value.is_function())
            .unwrap_or(false)
    })
}

fn report(call: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        warn!("{} failed: {:?}", call, err);
    }
}

impl SceneBackend for ThreeScene {
    fn spawn(&mut self, spec: &PrimitiveSpec) -> PrimitiveHandle {
        let handle = PrimitiveHandle(self.next_handle);
        self.next_handle += 1;
        if self.is_available() {
            if let Some(value) = Self::to_js(spec) {
                report("spawnPrimitive", spawn_primitive(handle.0, value));
            }
        }
        handle
    }

    fn update(&mut self, handle: PrimitiveHandle, spec: &PrimitiveSpec) {
        if self.is_available() {
            if let Some(value) = Self::to_js(spec) {
                report("updatePrimitive", update_primitive(handle.0, value));
            }
        }
    }

    fn remove(&mut self, handle: PrimitiveHandle) {
        if self.is_available() {
            report("removePrimitive", remove_primitive(handle.0));
        }
    }

    fn pick(&self, point: ScreenPoint, candidates: &[PrimitiveHandle]) -> Vec<PrimitiveHandle> {
        if !self.is_available() {
            return Vec::new();
        }
        let ids: Vec<u32> = candidates.iter().map(|handle| handle.0).collect();
        match pick_primitives(point.x, point.y, ids) {
            Ok(hits) => {
                debug!("pickPrimitives returned {} hits", hits.len());
                hits.into_iter().map(PrimitiveHandle).collect()
            }
            Err(err) => {
                warn!("pickPrimitives failed: {:?}", err);
                Vec::new()
            }
        }
    }
}
