//! Geometry store - the authoritative node/element model

use std::collections::HashMap;
use tracing::{debug, info};

use crate::config::IdPolicy;
use crate::error::{EditorError, EditorResult};
use crate::types::{Element, ElementId, ElementProperties, LoadingBc, Node, NodeId};

/// Nodes, elements and the records attached to them
#[derive(Debug, Clone, Default)]
pub struct GeometryStore {
    nodes: Vec<Node>,
    elements: Vec<Element>,
    loading: HashMap<NodeId, LoadingBc>,
    properties: HashMap<ElementId, ElementProperties>,
    policy: IdPolicy,
    node_counter: usize,
    element_counter: usize,
}

impl GeometryStore {
    pub fn new(policy: IdPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    fn next_index(policy: IdPolicy, counter: &mut usize, len: usize) -> usize {
        match policy {
            IdPolicy::Monotonic => {
                let index = *counter;
                *counter += 1;
                index
            }
            IdPolicy::ListLength => len,
        }
    }

    // ========================
    // Nodes
    // ========================

    pub fn add_node(&mut self, x: f64, y: f64, z: f64) -> NodeId {
        let index = Self::next_index(self.policy, &mut self.node_counter, self.nodes.len());
        let id = NodeId::from_index(index);
        self.nodes.push(Node { id: id.clone(), x, y, z });
        info!("Node {} added at ({}, {}, {})", id, x, y, z);
        id
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Remove every node, element, record and cached reference position
    pub fn clear_nodes(&mut self) {
        info!(
            "Clearing {} nodes and {} elements",
            self.nodes.len(),
            self.elements.len()
        );
        self.nodes.clear();
        self.elements.clear();
        self.loading.clear();
        self.properties.clear();
    }

    // ========================
    // Elements
    // ========================

    /// Connect two existing, distinct nodes. The reference positions are the
    /// node positions at this moment.
    pub fn create_element(&mut self, start: &NodeId, end: &NodeId) -> EditorResult<ElementId> {
        if start == end {
            return Err(EditorError::DegenerateElement(start.clone()));
        }
        let start_pos = self
            .node(start)
            .ok_or_else(|| EditorError::NodeNotFound(start.clone()))?
            .position();
        let end_pos = self
            .node(end)
            .ok_or_else(|| EditorError::NodeNotFound(end.clone()))?
            .position();

        let index = Self::next_index(self.policy, &mut self.element_counter, self.elements.len());
        let id = ElementId::from_index(index);
        self.elements.push(Element {
            id: id.clone(),
            node_ids: [start.clone(), end.clone()],
            reference: [start_pos, end_pos],
        });
        info!("Element {} created between {} and {}", id, start, end);
        Ok(id)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|element| &element.id == id)
    }

    pub fn contains_element(&self, id: &ElementId) -> bool {
        self.element(id).is_some()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Remove elements, their properties and reference positions; nodes stay
    pub fn clear_elements(&mut self) {
        info!("Clearing {} elements", self.elements.len());
        self.elements.clear();
        self.properties.clear();
    }

    // ========================
    // Records
    // ========================

    /// Replace the node's record; an empty record removes it
    pub fn set_loading_bc(&mut self, id: &NodeId, record: LoadingBc) -> EditorResult<()> {
        if !self.contains_node(id) {
            return Err(EditorError::NodeNotFound(id.clone()));
        }
        if record.is_empty() {
            debug!("Loading/BC cleared for {}", id);
            self.loading.remove(id);
        } else {
            debug!("Loading/BC for {}: {:?}", id, record);
            self.loading.insert(id.clone(), record);
        }
        Ok(())
    }

    pub fn loading_bc(&self, id: &NodeId) -> Option<&LoadingBc> {
        self.loading.get(id)
    }

    pub fn has_loading_bc(&self, id: &NodeId) -> bool {
        self.loading.contains_key(id)
    }

    /// Replace the element's record; an empty record removes it
    pub fn set_element_properties(
        &mut self,
        id: &ElementId,
        record: ElementProperties,
    ) -> EditorResult<()> {
        if !self.contains_element(id) {
            return Err(EditorError::ElementNotFound(id.clone()));
        }
        if record.is_empty() {
            debug!("Properties cleared for {}", id);
            self.properties.remove(id);
        } else {
            debug!("Properties for {}: {:?}", id, record);
            self.properties.insert(id.clone(), record);
        }
        Ok(())
    }

    pub fn element_properties(&self, id: &ElementId) -> Option<&ElementProperties> {
        self.properties.get(id)
    }

    pub fn has_element_properties(&self, id: &ElementId) -> bool {
        self.properties.contains_key(id)
    }
}
