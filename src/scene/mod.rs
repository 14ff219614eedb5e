//! Scene primitives and the backends that render them
//!
//! Every geometry entity maps to exactly one primitive. The rendering engine
//! sits behind [`SceneBackend`]: three.js in the browser, [`memory::MemoryScene`]
//! everywhere else.

pub mod math;
pub mod memory;
pub mod overlay;
pub mod sync;
#[cfg(target_arch = "wasm32")]
pub mod three;

use serde::Serialize;

use crate::types::{ElementId, NodeId};

pub use overlay::DeformationOverlay;
pub use sync::SceneSync;

#[cfg(target_arch = "wasm32")]
pub type ViewportScene = three::ThreeScene;
#[cfg(not(target_arch = "wasm32"))]
pub type ViewportScene = memory::MemoryScene;

/// Backend-issued reference to a live primitive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PrimitiveHandle(pub u32);

/// 0xRRGGBB
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Color(pub u32);

pub mod palette {
    use super::Color;

    pub const NODE_DEFAULT: Color = Color(0x4CAF50);
    pub const NODE_PENDING: Color = Color(0xFF0000);
    pub const NODE_LOADED: Color = Color(0xFFA500);
    pub const ELEMENT_DEFAULT: Color = Color(0xFFFFFF);
    pub const ELEMENT_PROPERTIED: Color = Color(0x00FF00);
    /// Entity open in a property form
    pub const ACTIVE: Color = Color(0x00BFFF);
    pub const OVERLAY: Color = Color(0x00BFFF);
}

/// Canonical geometry; cylinders are built along +Y and centred on the origin
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Sphere { radius: f64 },
    Cylinder { radius: f64, length: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Transform {
    pub position: [f64; 3],
    /// Quaternion as [x, y, z, w]
    pub rotation: [f64; 4],
    /// Uniform scale
    pub scale: f64,
}

impl Transform {
    pub fn at(position: [f64; 3]) -> Self {
        Self {
            position,
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: 1.0,
        }
    }
}

/// What a primitive stands for
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrimitiveTag {
    Node { id: NodeId },
    Element { id: ElementId },
    OverlaySegment { element_index: usize },
    OverlayNode { index: usize },
}

impl PrimitiveTag {
    pub fn is_overlay(&self) -> bool {
        matches!(self, PrimitiveTag::OverlaySegment { .. } | PrimitiveTag::OverlayNode { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PrimitiveSpec {
    pub tag: PrimitiveTag,
    pub shape: Shape,
    pub transform: Transform,
    pub color: Color,
}

/// Point on the viewport in normalized device coordinates (-1..1, +y up)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// From a pixel offset inside a viewport of the given size
    pub fn from_pixels(offset_x: f64, offset_y: f64, width: f64, height: f64) -> Option<Self> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Self {
            x: (offset_x / width) * 2.0 - 1.0,
            y: -(offset_y / height) * 2.0 + 1.0,
        })
    }
}

/// Capabilities consumed from the rendering engine
pub trait SceneBackend {
    fn spawn(&mut self, spec: &PrimitiveSpec) -> PrimitiveHandle;

    /// Replace shape, transform and color of a live primitive
    fn update(&mut self, handle: PrimitiveHandle, spec: &PrimitiveSpec);

    fn remove(&mut self, handle: PrimitiveHandle);

    /// Primitives among `candidates` hit by the ray through `point`, nearest first
    fn pick(&self, point: ScreenPoint, candidates: &[PrimitiveHandle]) -> Vec<PrimitiveHandle>;
}
