pub mod layout;
pub mod visualization;
