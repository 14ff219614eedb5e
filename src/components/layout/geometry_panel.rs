use dioxus::prelude::*;

use crate::components::layout::StatusLine;
use crate::hooks::use_editor;
use crate::types::NodeId;

#[component]
pub fn GeometryPanel() -> Element {
    let ctx = use_editor();
    let mut editor = ctx.editor;

    let mut x = use_signal(|| "0".to_string());
    let mut y = use_signal(|| "0".to_string());
    let mut z = use_signal(|| "0".to_string());

    let (nodes, elements, can_create, status) = {
        let state = editor.read();
        let store = state.store();
        let nodes: Vec<(String, NodeId, String, bool)> = store
            .nodes()
            .iter()
            .map(|node| {
                let pending = state.selection().is_pending(&node.id);
                (node.id.to_string(), node.id.clone(), node.label(), pending)
            })
            .collect();
        let elements: Vec<(String, String)> = store
            .elements()
            .iter()
            .map(|element| (element.id.to_string(), element.label()))
            .collect();
        (nodes, elements, state.can_create_element(), state.status().geometry.clone())
    };

    rsx! {
        div { class: "panel geometry-panel",
            section { class: "panel-section",
                h3 { "Add Node" }
                div { class: "coordinate-inputs",
                    label { "X" input { r#type: "number", step: "any", value: "{x}", oninput: move |evt| x.set(evt.value()) } }
                    label { "Y" input { r#type: "number", step: "any", value: "{y}", oninput: move |evt| y.set(evt.value()) } }
                    label { "Z" input { r#type: "number", step: "any", value: "{z}", oninput: move |evt| z.set(evt.value()) } }
                }
                button {
                    class: "primary-button",
                    onclick: move |_| {
                        let _ = editor.write().add_node_from_fields(&x(), &y(), &z());
                    },
                    "Add Node"
                }
                StatusLine { message: status }
            }

            section { class: "panel-section",
                h3 { "Nodes" }
                p { class: "hint", "Click two nodes to connect them" }
                ul { class: "entity-list",
                    for (key, id, label, pending) in nodes {
                        li {
                            key: "{key}",
                            class: if pending { "entity-item pending" } else { "entity-item" },
                            onclick: move |_| {
                                let _ = editor.write().toggle_pending(&id);
                            },
                            "{label}"
                        }
                    }
                }
                div { class: "button-row",
                    button {
                        disabled: !can_create,
                        onclick: move |_| {
                            let _ = editor.write().create_element();
                        },
                        "Create Element"
                    }
                    button {
                        class: "danger-button",
                        onclick: move |_| editor.write().clear_nodes(),
                        "Clear Nodes"
                    }
                }
            }

            section { class: "panel-section",
                h3 { "Elements" }
                ul { class: "entity-list",
                    for (id, label) in elements {
                        li { key: "{id}", class: "entity-item", "{label}" }
                    }
                }
                button {
                    class: "danger-button",
                    onclick: move |_| editor.write().clear_elements(),
                    "Clear Elements"
                }
            }

            button {
                class: "all-set-button",
                onclick: move |_| {
                    editor.write().advance_tab();
                },
                "All set"
            }
        }
    }
}
