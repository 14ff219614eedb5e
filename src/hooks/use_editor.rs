use dioxus::prelude::*;

use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::scene::ViewportScene;
use crate::solver_client::SolveClient;

/// Shared editor state for every panel of the workbench
#[derive(Clone, Copy)]
pub struct EditorContext {
    pub editor: Signal<Editor<ViewportScene>>,
    pub client: Signal<SolveClient>,
}

/// Create the editor state and provide it to the component tree
pub fn use_editor_provider() -> EditorContext {
    let editor = use_signal(|| Editor::new(EditorConfig::default(), ViewportScene::default()));
    let client = use_signal(|| SolveClient::new(editor.peek().config().solver_url()));

    use_context_provider(|| EditorContext { editor, client })
}

pub fn use_editor() -> EditorContext {
    use_context::<EditorContext>()
}
