use dioxus::prelude::*;

use crate::components::layout::{GeometryPanel, NodeTypePanel, PostprocessingPanel};
use crate::components::visualization::ThreeJsCanvas;
use crate::hooks::use_editor;
use crate::tabs::Tab;

#[component]
pub fn ContentArea() -> Element {
    let ctx = use_editor();
    let mut editor = ctx.editor;

    let active = editor.read().active_tab();
    let tabs: Vec<(Tab, &'static str, &'static str, bool)> = Tab::ALL
        .iter()
        .map(|tab| (*tab, tab.id(), tab.title(), *tab == active))
        .collect();

    rsx! {
        main { class: "content-area",
            header { class: "content-header",
                h2 { "Frame Editor" }
            }
            div { class: "content-body",
                aside { class: "side-panel",
                    nav { class: "tab-bar",
                        for (tab, id, title, is_active) in tabs {
                            button {
                                key: "{id}",
                                id: "{id}-tab",
                                class: if is_active { "tab-button active" } else { "tab-button" },
                                onclick: move |_| editor.write().select_tab(tab),
                                "{title}"
                            }
                        }
                    }
                    div { class: "tab-content",
                        {match active {
                            Tab::Geometry => rsx! { GeometryPanel {} },
                            Tab::NodeElementType => rsx! { NodeTypePanel {} },
                            Tab::Postprocessing => rsx! { PostprocessingPanel {} },
                        }}
                    }
                }
                div { class: "viewport-container",
                    div { class: "canvas-wrapper",
                        ThreeJsCanvas {}
                    }
                }
            }
        }
    }
}
