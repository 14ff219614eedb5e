//! Keeps one primitive per geometry entity, styled after store and selection state

use nalgebra::Point3;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use tracing::{debug, warn};

use super::math::{preview_offset, span};
use super::{palette, Color, PrimitiveHandle, PrimitiveSpec, PrimitiveTag, SceneBackend, ScreenPoint, Shape, Transform};
use crate::config::SceneStyle;
use crate::geometry::GeometryStore;
use crate::selection::SelectionController;
use crate::types::{Element, ElementId, EntityRef, Node, NodeId};

/// Color and scale of a node sphere.
/// Editing highlight > pending connection > has loading/BC > default.
pub fn node_appearance(active: bool, pending: bool, loaded: bool, highlight: f64) -> (Color, f64) {
    if active {
        (palette::ACTIVE, highlight)
    } else if pending {
        (palette::NODE_PENDING, 1.0)
    } else if loaded {
        (palette::NODE_LOADED, 1.0)
    } else {
        (palette::NODE_DEFAULT, 1.0)
    }
}

/// Color and radius factor of an element cylinder
pub fn element_appearance(active: bool, propertied: bool, highlight: f64) -> (Color, f64) {
    if active {
        (palette::ACTIVE, highlight)
    } else if propertied {
        (palette::ELEMENT_PROPERTIED, 1.0)
    } else {
        (palette::ELEMENT_DEFAULT, 1.0)
    }
}

#[derive(Debug, Clone)]
struct Mirror {
    handle: PrimitiveHandle,
    spec: PrimitiveSpec,
}

#[derive(Debug)]
pub struct SceneSync {
    style: SceneStyle,
    nodes: HashMap<NodeId, Mirror>,
    elements: HashMap<ElementId, Mirror>,
    owners: HashMap<PrimitiveHandle, EntityRef>,
    preview_scale: f64,
}

impl SceneSync {
    pub fn new(style: SceneStyle) -> Self {
        Self {
            style,
            nodes: HashMap::new(),
            elements: HashMap::new(),
            owners: HashMap::new(),
            preview_scale: 0.0,
        }
    }

    pub fn preview_scale(&self) -> f64 {
        self.preview_scale
    }

    /// Takes effect on the next [`SceneSync::sync`]; 0 shows the undeformed model
    pub fn set_preview_scale(&mut self, scale: f64) {
        self.preview_scale = scale;
    }

    pub fn node_handle(&self, id: &NodeId) -> Option<PrimitiveHandle> {
        self.nodes.get(id).map(|mirror| mirror.handle)
    }

    pub fn element_handle(&self, id: &ElementId) -> Option<PrimitiveHandle> {
        self.elements.get(id).map(|mirror| mirror.handle)
    }

    pub fn primitive_count(&self) -> usize {
        self.nodes.len() + self.elements.len()
    }

    /// Spawn, restyle and remove primitives until they match the store
    pub fn sync<S: SceneBackend>(
        &mut self,
        scene: &mut S,
        store: &GeometryStore,
        selection: &SelectionController,
    ) {
        let positions = self.displayed_positions(store);

        let wanted_nodes: Vec<(NodeId, PrimitiveSpec)> = store
            .nodes()
            .iter()
            .map(|node| (node.id.clone(), self.node_spec(node, &positions, store, selection)))
            .collect();
        let wanted_elements: Vec<(ElementId, PrimitiveSpec)> = store
            .elements()
            .iter()
            .filter_map(|element| {
                let spec = self.element_spec(element, &positions, store, selection);
                if spec.is_none() {
                    warn!("Element {} references a missing node; not rendered", element.id);
                }
                spec.map(|spec| (element.id.clone(), spec))
            })
            .collect();

        reconcile(scene, &mut self.nodes, &mut self.owners, wanted_nodes, |id| {
            EntityRef::Node(id.clone())
        });
        reconcile(scene, &mut self.elements, &mut self.owners, wanted_elements, |id| {
            EntityRef::Element(id.clone())
        });
    }

    /// Entity under `point`, nearest first; overlay primitives are never candidates
    pub fn pick<S: SceneBackend>(&self, scene: &S, point: ScreenPoint) -> Option<EntityRef> {
        let candidates: Vec<PrimitiveHandle> = self.owners.keys().copied().collect();
        let hit = scene
            .pick(point, &candidates)
            .into_iter()
            .find_map(|handle| self.owners.get(&handle).cloned());
        debug!("Pick at ({:.3}, {:.3}): {:?}", point.x, point.y, hit);
        hit
    }

    /// Node positions as drawn: stored positions, or the preview displacement
    /// applied to element reference positions
    fn displayed_positions(&self, store: &GeometryStore) -> HashMap<NodeId, Point3<f64>> {
        let mut positions: HashMap<NodeId, Point3<f64>> = store
            .nodes()
            .iter()
            .map(|node| (node.id.clone(), node.position()))
            .collect();

        if self.preview_scale != 0.0 {
            for element in store.elements() {
                for (id, reference) in element.node_ids.iter().zip(element.reference.iter()) {
                    if let Some(position) = positions.get_mut(id) {
                        position.y = reference.y + preview_offset(reference, self.preview_scale);
                    }
                }
            }
        }
        positions
    }

    fn node_spec(
        &self,
        node: &Node,
        positions: &HashMap<NodeId, Point3<f64>>,
        store: &GeometryStore,
        selection: &SelectionController,
    ) -> PrimitiveSpec {
        let (color, scale) = node_appearance(
            selection.is_active_node(&node.id),
            selection.is_pending(&node.id),
            store.has_loading_bc(&node.id),
            self.style.highlight_factor,
        );
        let position = positions.get(&node.id).copied().unwrap_or_else(|| node.position());
        PrimitiveSpec {
            tag: PrimitiveTag::Node { id: node.id.clone() },
            shape: Shape::Sphere { radius: self.style.node_radius },
            transform: Transform {
                scale,
                ..Transform::at([position.x, position.y, position.z])
            },
            color,
        }
    }

    fn element_spec(
        &self,
        element: &Element,
        positions: &HashMap<NodeId, Point3<f64>>,
        store: &GeometryStore,
        selection: &SelectionController,
    ) -> Option<PrimitiveSpec> {
        let start = positions.get(element.start())?;
        let end = positions.get(element.end())?;
        let (transform, length) = span(start, end);
        let (color, thickness) = element_appearance(
            selection.is_active_element(&element.id),
            store.has_element_properties(&element.id),
            self.style.highlight_factor,
        );
        Some(PrimitiveSpec {
            tag: PrimitiveTag::Element { id: element.id.clone() },
            shape: Shape::Cylinder {
                radius: self.style.cylinder_radius * thickness,
                length,
            },
            transform,
            color,
        })
    }
}

fn reconcile<K, S, F>(
    scene: &mut S,
    mirrors: &mut HashMap<K, Mirror>,
    owners: &mut HashMap<PrimitiveHandle, EntityRef>,
    wanted: Vec<(K, PrimitiveSpec)>,
    owner: F,
) where
    K: Eq + Hash + Clone,
    S: SceneBackend,
    F: Fn(&K) -> EntityRef,
{
    let live: HashSet<K> = wanted.iter().map(|(key, _)| key.clone()).collect();

    let stale: Vec<K> = mirrors.keys().filter(|key| !live.contains(*key)).cloned().collect();
    for key in stale {
        if let Some(mirror) = mirrors.remove(&key) {
            scene.remove(mirror.handle);
            owners.remove(&mirror.handle);
        }
    }

    for (key, spec) in wanted {
        match mirrors.get_mut(&key) {
            Some(mirror) if mirror.spec == spec => {}
            Some(mirror) => {
                scene.update(mirror.handle, &spec);
                mirror.spec = spec;
            }
            None => {
                let handle = scene.spawn(&spec);
                owners.insert(handle, owner(&key));
                mirrors.insert(key, Mirror { handle, spec });
            }
        }
    }
}
