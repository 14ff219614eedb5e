use dioxus::prelude::*;

use crate::editor::StatusMessage;

#[component]
pub fn StatusLine(message: Option<StatusMessage>) -> Element {
    let Some(message) = message else {
        return rsx! {};
    };
    let class = format!("status-message {}", message.kind.class());
    let text = message.text;
    rsx! {
        div { class: "{class}", "{text}" }
    }
}
