//! Browser front end for building 3D frame models and sending them to a solver

pub mod components;
pub mod config;
pub mod editor;
pub mod error;
pub mod forms;
pub mod geometry;
pub mod hooks;
pub mod pages;
pub mod scene;
pub mod selection;
pub mod solver_client;
pub mod tabs;
pub mod types;

pub use config::EditorConfig;
pub use editor::Editor;
pub use error::{EditorError, EditorResult, FormError};
