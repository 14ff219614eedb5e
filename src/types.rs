use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ========================
// Identities
// ========================

/// Stable identity of a node, rendered as `node-<n>`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(format!("node-{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable identity of an element, rendered as `element-<n>`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(format!("element-{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Either kind of geometry entity
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Node(NodeId),
    Element(ElementId),
}

// ========================
// Geometry
// ========================

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Node {
    pub fn position(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    /// List text, e.g. `node-0: (0, 0, 0)`
    pub fn label(&self) -> String {
        format!("{}: ({}, {}, {})", self.id, self.x, self.y, self.z)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub id: ElementId,
    /// Start and end node; order defines the local x axis
    pub node_ids: [NodeId; 2],
    /// Endpoint positions captured when the element was created
    pub reference: [Point3<f64>; 2],
}

impl Element {
    pub fn start(&self) -> &NodeId {
        &self.node_ids[0]
    }

    pub fn end(&self) -> &NodeId {
        &self.node_ids[1]
    }

    /// List text, e.g. `element-0: node-0 to node-1`
    pub fn label(&self) -> String {
        format!("{}: {} to {}", self.id, self.start(), self.end())
    }
}

// ========================
// Loading / boundary conditions
// ========================

/// Prescribed displacements/rotations and applied forces/moments at a node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LoadingField {
    #[serde(rename = "u_x")]
    Ux,
    #[serde(rename = "u_y")]
    Uy,
    #[serde(rename = "u_z")]
    Uz,
    #[serde(rename = "theta_x")]
    ThetaX,
    #[serde(rename = "theta_y")]
    ThetaY,
    #[serde(rename = "theta_z")]
    ThetaZ,
    #[serde(rename = "F_x")]
    Fx,
    #[serde(rename = "F_y")]
    Fy,
    #[serde(rename = "F_z")]
    Fz,
    #[serde(rename = "M_x")]
    Mx,
    #[serde(rename = "M_y")]
    My,
    #[serde(rename = "M_z")]
    Mz,
}

impl LoadingField {
    pub const ALL: [LoadingField; 12] = [
        LoadingField::Ux,
        LoadingField::Uy,
        LoadingField::Uz,
        LoadingField::ThetaX,
        LoadingField::ThetaY,
        LoadingField::ThetaZ,
        LoadingField::Fx,
        LoadingField::Fy,
        LoadingField::Fz,
        LoadingField::Mx,
        LoadingField::My,
        LoadingField::Mz,
    ];

    /// Wire and form key
    pub fn key(self) -> &'static str {
        match self {
            LoadingField::Ux => "u_x",
            LoadingField::Uy => "u_y",
            LoadingField::Uz => "u_z",
            LoadingField::ThetaX => "theta_x",
            LoadingField::ThetaY => "theta_y",
            LoadingField::ThetaZ => "theta_z",
            LoadingField::Fx => "F_x",
            LoadingField::Fy => "F_y",
            LoadingField::Fz => "F_z",
            LoadingField::Mx => "M_x",
            LoadingField::My => "M_y",
            LoadingField::Mz => "M_z",
        }
    }
}

/// Set fields only; an empty record means nothing is applied to the node
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadingBc(BTreeMap<LoadingField, f64>);

impl LoadingBc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: LoadingField, value: f64) -> Self {
        self.0.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: LoadingField, value: f64) {
        self.0.insert(field, value);
    }

    pub fn get(&self, field: LoadingField) -> Option<f64> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LoadingField, f64)> + '_ {
        self.0.iter().map(|(field, value)| (*field, *value))
    }
}

// ========================
// Element properties
// ========================

/// Material, section and orientation parameters of an element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PropertyField {
    E,
    A,
    J,
    Iy,
    Iz,
    #[serde(rename = "nu")]
    Nu,
    #[serde(rename = "local_z")]
    LocalZ,
}

impl PropertyField {
    pub const ALL: [PropertyField; 7] = [
        PropertyField::E,
        PropertyField::A,
        PropertyField::J,
        PropertyField::Iy,
        PropertyField::Iz,
        PropertyField::Nu,
        PropertyField::LocalZ,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PropertyField::E => "E",
            PropertyField::A => "A",
            PropertyField::J => "J",
            PropertyField::Iy => "Iy",
            PropertyField::Iz => "Iz",
            PropertyField::Nu => "nu",
            PropertyField::LocalZ => "local_z",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PropertyField::E => "E (elastic modulus)",
            PropertyField::A => "A (area)",
            PropertyField::J => "J (torsion constant)",
            PropertyField::Iy => "Iy",
            PropertyField::Iz => "Iz",
            PropertyField::Nu => "ν (Poisson's ratio)",
            PropertyField::LocalZ => "local z (x,y,z)",
        }
    }

    pub fn is_vector(self) -> bool {
        matches!(self, PropertyField::LocalZ)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Scalar(f64),
    Vector([f64; 3]),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Scalar(value) => write!(f, "{value}"),
            PropertyValue::Vector([x, y, z]) => write!(f, "{x},{y},{z}"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementProperties(BTreeMap<PropertyField, PropertyValue>);

impl ElementProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: PropertyField, value: PropertyValue) -> Self {
        self.0.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: PropertyField, value: PropertyValue) {
        self.0.insert(field, value);
    }

    pub fn get(&self, field: PropertyField) -> Option<PropertyValue> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PropertyField, PropertyValue)> + '_ {
        self.0.iter().map(|(field, value)| (*field, *value))
    }
}
