//! Solver deformed-shape overlay

use nalgebra::Point3;
use tracing::debug;

use super::math::span;
use super::{palette, PrimitiveHandle, PrimitiveSpec, PrimitiveTag, SceneBackend, Shape, Transform};
use crate::config::SceneStyle;
use crate::solver_client::DeformedShape;

/// Primitives drawn for the last solver result.
///
/// Only handles recorded here are ever removed, so the undeformed model is
/// untouched by teardown.
#[derive(Debug)]
pub struct DeformationOverlay {
    style: SceneStyle,
    shapes: Option<Vec<DeformedShape>>,
    visible: bool,
    handles: Vec<PrimitiveHandle>,
}

impl DeformationOverlay {
    pub fn new(style: SceneStyle) -> Self {
        Self {
            style,
            shapes: None,
            visible: false,
            handles: Vec::new(),
        }
    }

    pub fn has_result(&self) -> bool {
        self.shapes.is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn handle_count(&self) -> usize {
        self.handles.len()
    }

    /// Replace the current result and show it
    pub fn set_result<S: SceneBackend>(&mut self, scene: &mut S, shapes: Vec<DeformedShape>) {
        self.shapes = Some(shapes);
        self.visible = true;
        self.rebuild(scene);
    }

    /// Flip visibility; `None` when there is nothing to show
    pub fn toggle<S: SceneBackend>(&mut self, scene: &mut S) -> Option<bool> {
        if self.shapes.is_none() {
            return None;
        }
        self.set_visible(scene, !self.visible);
        Some(self.visible)
    }

    pub fn set_visible<S: SceneBackend>(&mut self, scene: &mut S, visible: bool) {
        self.visible = visible;
        self.rebuild(scene);
    }

    /// Drop the result and its primitives
    pub fn clear<S: SceneBackend>(&mut self, scene: &mut S) {
        self.shapes = None;
        self.visible = false;
        self.teardown(scene);
    }

    fn rebuild<S: SceneBackend>(&mut self, scene: &mut S) {
        self.teardown(scene);
        if !self.visible {
            return;
        }
        let Some(shapes) = &self.shapes else {
            return;
        };

        let specs: Vec<PrimitiveSpec> = shapes
            .iter()
            .filter(|shape| shape.shape_data.len() >= 2)
            .flat_map(|shape| self.shape_specs(shape))
            .collect();
        self.handles = specs.iter().map(|spec| scene.spawn(spec)).collect();
        debug!("Deformed shape overlay: {} primitives", self.handles.len());
    }

    fn shape_specs(&self, shape: &DeformedShape) -> Vec<PrimitiveSpec> {
        let radius = self.style.cylinder_radius * self.style.overlay_radius_factor;
        let segments = shape.shape_data.windows(2).map(|pair| {
            let (transform, length) = span(&point(pair[0]), &point(pair[1]));
            PrimitiveSpec {
                tag: PrimitiveTag::OverlaySegment {
                    element_index: shape.element_index,
                },
                shape: Shape::Cylinder { radius, length },
                transform,
                color: palette::OVERLAY,
            }
        });
        let nodes = shape.deformed_nodes.iter().enumerate().map(|(index, position)| PrimitiveSpec {
            tag: PrimitiveTag::OverlayNode { index },
            shape: Shape::Sphere {
                radius: self.style.node_radius,
            },
            transform: Transform::at(*position),
            color: palette::OVERLAY,
        });
        segments.chain(nodes).collect()
    }

    fn teardown<S: SceneBackend>(&mut self, scene: &mut S) {
        for handle in self.handles.drain(..) {
            scene.remove(handle);
        }
    }
}

fn point([x, y, z]: [f64; 3]) -> Point3<f64> {
    Point3::new(x, y, z)
}
