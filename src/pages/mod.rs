use dioxus::prelude::*;

use crate::components::layout::ContentArea;
use crate::hooks::use_editor_provider;

#[component]
pub fn Workbench() -> Element {
    use_editor_provider();

    rsx! {
        div { class: "app-layout",
            ContentArea {}
        }
    }
}
