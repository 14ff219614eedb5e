//! Workflow tabs

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    Geometry,
    NodeElementType,
    Postprocessing,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Geometry, Tab::NodeElementType, Tab::Postprocessing];

    pub fn id(self) -> &'static str {
        match self {
            Tab::Geometry => "geometry",
            Tab::NodeElementType => "node-element-type",
            Tab::Postprocessing => "postprocessing",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Geometry => "Geometry",
            Tab::NodeElementType => "Node & Element Type",
            Tab::Postprocessing => "Postprocessing",
        }
    }

    /// Target of the tab's "All set" button
    pub fn next(self) -> Option<Tab> {
        match self {
            Tab::Geometry => Some(Tab::NodeElementType),
            Tab::NodeElementType => Some(Tab::Postprocessing),
            Tab::Postprocessing => None,
        }
    }

    /// Whether 3D picks open entities in the property forms
    pub fn allows_pick(self) -> bool {
        self == Tab::NodeElementType
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TabController {
    active: Tab,
}

impl TabController {
    pub fn active(&self) -> Tab {
        self.active
    }

    /// Show `tab`. Returns true when the active-entity highlight must be cleared.
    pub fn select(&mut self, tab: Tab) -> bool {
        self.active = tab;
        tab != Tab::NodeElementType
    }
}
