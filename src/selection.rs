//! Selection state: nodes pending connection and the entity being edited

use tracing::debug;

use crate::types::{ElementId, EntityRef, NodeId};

/// Number of nodes an element connects
pub const NODES_PER_ELEMENT: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingState {
    Idle,
    OnePending,
    /// Element creation is enabled
    TwoPending,
}

/// Outcome of clicking a node in the geometry list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingChange {
    Added,
    Removed,
    /// Two other nodes are already pending
    Ignored,
}

/// Ordered set of nodes waiting to be connected; order is connection order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PendingSelection {
    nodes: Vec<NodeId>,
}

impl PendingSelection {
    pub fn toggle(&mut self, id: &NodeId) -> PendingChange {
        if let Some(index) = self.nodes.iter().position(|pending| pending == id) {
            self.nodes.remove(index);
            debug!("Node {} deselected", id);
            PendingChange::Removed
        } else if self.nodes.len() < NODES_PER_ELEMENT {
            self.nodes.push(id.clone());
            debug!("Node {} selected", id);
            PendingChange::Added
        } else {
            debug!("Node {} ignored: two nodes already pending", id);
            PendingChange::Ignored
        }
    }

    pub fn state(&self) -> PendingState {
        match self.nodes.len() {
            0 => PendingState::Idle,
            1 => PendingState::OnePending,
            _ => PendingState::TwoPending,
        }
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The pair in selection order, when exactly two are pending
    pub fn pair(&self) -> Option<(&NodeId, &NodeId)> {
        match self.nodes.as_slice() {
            [start, end] => Some((start, end)),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

/// Node and element currently open in the property forms
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActiveSelection {
    node: Option<NodeId>,
    element: Option<ElementId>,
}

impl ActiveSelection {
    /// Returns the node that lost its editing highlight, if any
    pub fn set_node(&mut self, id: NodeId) -> Option<NodeId> {
        self.node.replace(id)
    }

    /// Returns the element that lost its editing highlight, if any
    pub fn set_element(&mut self, id: ElementId) -> Option<ElementId> {
        self.element.replace(id)
    }

    pub fn node(&self) -> Option<&NodeId> {
        self.node.as_ref()
    }

    pub fn element(&self) -> Option<&ElementId> {
        self.element.as_ref()
    }

    pub fn is_active(&self, entity: &EntityRef) -> bool {
        match entity {
            EntityRef::Node(id) => self.node.as_ref() == Some(id),
            EntityRef::Element(id) => self.element.as_ref() == Some(id),
        }
    }

    pub fn clear_element(&mut self) {
        self.element = None;
    }

    pub fn clear(&mut self) {
        self.node = None;
        self.element = None;
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionController {
    pub pending: PendingSelection,
    pub active: ActiveSelection,
}

impl SelectionController {
    pub fn is_pending(&self, id: &NodeId) -> bool {
        self.pending.contains(id)
    }

    pub fn is_active_node(&self, id: &NodeId) -> bool {
        self.active.node() == Some(id)
    }

    pub fn is_active_element(&self, id: &ElementId) -> bool {
        self.active.element() == Some(id)
    }

    pub fn reset(&mut self) {
        self.pending.clear();
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: usize) -> NodeId {
        NodeId::from_index(n)
    }

    #[test]
    fn test_pending_state_machine() {
        let mut pending = PendingSelection::default();
        assert_eq!(pending.state(), PendingState::Idle);

        assert_eq!(pending.toggle(&id(0)), PendingChange::Added);
        assert_eq!(pending.state(), PendingState::OnePending);

        assert_eq!(pending.toggle(&id(1)), PendingChange::Added);
        assert_eq!(pending.state(), PendingState::TwoPending);
        assert_eq!(pending.pair(), Some((&id(0), &id(1))));
    }

    #[test]
    fn test_third_node_is_ignored() {
        let mut pending = PendingSelection::default();
        pending.toggle(&id(0));
        pending.toggle(&id(1));

        assert_eq!(pending.toggle(&id(2)), PendingChange::Ignored);
        assert!(!pending.contains(&id(2)));
        assert_eq!(pending.len(), 2);
    }

    #[test]
    fn test_toggle_off_keeps_order_of_rest() {
        let mut pending = PendingSelection::default();
        pending.toggle(&id(4));
        pending.toggle(&id(2));

        assert_eq!(pending.toggle(&id(4)), PendingChange::Removed);
        assert_eq!(pending.state(), PendingState::OnePending);

        pending.toggle(&id(7));
        assert_eq!(pending.pair(), Some((&id(2), &id(7))));
    }

    #[test]
    fn test_active_replaces_previous() {
        let mut active = ActiveSelection::default();
        assert_eq!(active.set_node(id(0)), None);
        assert_eq!(active.set_node(id(1)), Some(id(0)));
        assert!(active.is_active(&EntityRef::Node(id(1))));
        assert!(!active.is_active(&EntityRef::Node(id(0))));

        let element = ElementId::from_index(0);
        active.set_element(element.clone());
        assert!(active.is_active(&EntityRef::Element(element)));

        active.clear();
        assert_eq!(active.node(), None);
        assert_eq!(active.element(), None);
    }
}
