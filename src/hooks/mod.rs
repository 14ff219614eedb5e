pub mod use_editor;

pub use use_editor::{use_editor, use_editor_provider, EditorContext};
