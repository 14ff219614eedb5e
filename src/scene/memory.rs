//! Headless scene backend
//!
//! Keeps primitive specs in memory and picks with an orthographic camera
//! looking down -Z. Used off the browser and in tests.

use nalgebra::{Point3, Vector2};
use std::collections::BTreeMap;

use super::math::span_endpoints;
use super::{PrimitiveHandle, PrimitiveSpec, SceneBackend, ScreenPoint, Shape};

#[derive(Debug, Clone)]
pub struct MemoryScene {
    next_handle: u32,
    primitives: BTreeMap<PrimitiveHandle, PrimitiveSpec>,
    updates: usize,
    /// Half-width of the visible square in world units
    view_extent: f64,
}

impl Default for MemoryScene {
    fn default() -> Self {
        Self {
            next_handle: 0,
            primitives: BTreeMap::new(),
            updates: 0,
            view_extent: 10.0,
        }
    }
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_view_extent(mut self, extent: f64) -> Self {
        self.view_extent = extent;
        self
    }

    pub fn get(&self, handle: PrimitiveHandle) -> Option<&PrimitiveSpec> {
        self.primitives.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn primitives(&self) -> impl Iterator<Item = (PrimitiveHandle, &PrimitiveSpec)> {
        self.primitives.iter().map(|(handle, spec)| (*handle, spec))
    }

    pub fn count_where(&self, predicate: impl Fn(&PrimitiveSpec) -> bool) -> usize {
        self.primitives.values().filter(|spec| predicate(spec)).count()
    }

    /// Number of `update` calls received so far
    pub fn update_count(&self) -> usize {
        self.updates
    }

    /// Height of the first surface hit by the vertical ray through `at`
    fn hit_depth(spec: &PrimitiveSpec, at: Vector2<f64>) -> Option<f64> {
        let scale = spec.transform.scale;
        match spec.shape {
            Shape::Sphere { radius } => {
                let [x, y, z] = spec.transform.position;
                let r = radius * scale;
                let d2 = (at - Vector2::new(x, y)).norm_squared();
                (d2 <= r * r).then(|| z + (r * r - d2).sqrt())
            }
            Shape::Cylinder { radius, length } => {
                let (a, b) = span_endpoints(&spec.transform, length * scale);
                let r = radius * scale;
                let (t, distance) = closest_on_segment(at, &a, &b);
                (distance <= r).then(|| a.z + t * (b.z - a.z) + r)
            }
        }
    }
}

/// Parameter and planar distance of the point on `a -> b` (projected to XY) closest to `p`
fn closest_on_segment(p: Vector2<f64>, a: &Point3<f64>, b: &Point3<f64>) -> (f64, f64) {
    let a2 = Vector2::new(a.x, a.y);
    let ab = Vector2::new(b.x, b.y) - a2;
    let len2 = ab.norm_squared();
    let t = if len2 > 0.0 {
        ((p - a2).dot(&ab) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (t, (p - (a2 + ab * t)).norm())
}

impl SceneBackend for MemoryScene {
    fn spawn(&mut self, spec: &PrimitiveSpec) -> PrimitiveHandle {
        let handle = PrimitiveHandle(self.next_handle);
        self.next_handle += 1;
        self.primitives.insert(handle, spec.clone());
        handle
    }

    fn update(&mut self, handle: PrimitiveHandle, spec: &PrimitiveSpec) {
        if let Some(existing) = self.primitives.get_mut(&handle) {
            *existing = spec.clone();
            self.updates += 1;
        }
    }

    fn remove(&mut self, handle: PrimitiveHandle) {
        self.primitives.remove(&handle);
    }

    fn pick(&self, point: ScreenPoint, candidates: &[PrimitiveHandle]) -> Vec<PrimitiveHandle> {
        let at = Vector2::new(point.x, point.y) * self.view_extent;
        let mut hits: Vec<(f64, PrimitiveHandle)> = candidates
            .iter()
            .filter_map(|handle| {
                let spec = self.primitives.get(handle)?;
                Self::hit_depth(spec, at).map(|depth| (depth, *handle))
            })
            .collect();
        // camera sits on +Z
        hits.sort_by(|a, b| b.0.total_cmp(&a.0));
        hits.into_iter().map(|(_, handle)| handle).collect()
    }
}
