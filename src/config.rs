use serde::{Deserialize, Serialize};

/// How entity ids are numbered
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// Counter per kind that bulk clears never reset; ids are never reused.
    #[default]
    Monotonic,
    /// Next id is the current list length, so numbering restarts after a clear.
    ListLength,
}

/// Sizes used when building scene primitives (scene units)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneStyle {
    pub node_radius: f64,
    pub cylinder_radius: f64,
    /// Overlay segment radius relative to `cylinder_radius`
    pub overlay_radius_factor: f64,
    /// Scale applied to the entity being edited
    pub highlight_factor: f64,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            node_radius: 0.2,
            cylinder_radius: 0.1,
            overlay_radius_factor: 0.8,
            highlight_factor: 1.2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Solver endpoint; a path is resolved against the page origin in the browser
    pub solver_endpoint: String,
    pub id_policy: IdPolicy,
    pub default_deformation_scale: f64,
    pub style: SceneStyle,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            solver_endpoint: "/calculate".to_string(),
            id_policy: IdPolicy::default(),
            default_deformation_scale: 1.0,
            style: SceneStyle::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn with_solver_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.solver_endpoint = endpoint.into();
        self
    }

    /// Absolute solver URL. reqwest needs a base for relative paths in the browser.
    pub fn solver_url(&self) -> String {
        if self.solver_endpoint.starts_with("http://") || self.solver_endpoint.starts_with("https://") {
            return self.solver_endpoint.clone();
        }
        match page_origin() {
            Some(origin) => format!("{}{}", origin.trim_end_matches('/'), self.solver_endpoint),
            None => self.solver_endpoint.clone(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn page_origin() -> Option<String> {
    web_sys::window().and_then(|win| win.location().origin().ok())
}

#[cfg(not(target_arch = "wasm32"))]
fn page_origin() -> Option<String> {
    None
}
