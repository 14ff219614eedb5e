use dioxus::prelude::*;
use tracing::warn;

use crate::components::layout::StatusLine;
use crate::hooks::use_editor;
use crate::types::{ElementId, LoadingField, NodeId, PropertyField};

/// Loading/BC and element property forms
#[component]
pub fn NodeTypePanel() -> Element {
    let ctx = use_editor();
    let mut editor = ctx.editor;

    let (nodes, elements, active_node, active_element, loading_status, property_status, loading_inputs, property_inputs) = {
        let state = editor.read();
        let nodes: Vec<(String, String)> = state
            .store()
            .nodes()
            .iter()
            .map(|node| (node.id.to_string(), node.label()))
            .collect();
        let elements: Vec<(String, String)> = state
            .store()
            .elements()
            .iter()
            .map(|element| (element.id.to_string(), element.label()))
            .collect();
        let loading_inputs: Vec<(&'static str, String)> = LoadingField::ALL
            .iter()
            .map(|field| (field.key(), state.loading_form().get(field.key()).to_string()))
            .collect();
        let property_inputs: Vec<(&'static str, &'static str, String)> = PropertyField::ALL
            .iter()
            .map(|field| (field.key(), field.label(), state.property_form().get(field.key()).to_string()))
            .collect();
        (
            nodes,
            elements,
            state.selection().active.node().cloned(),
            state.selection().active.element().cloned(),
            state.status().loading_bc.clone(),
            state.status().element_props.clone(),
            loading_inputs,
            property_inputs,
        )
    };
    let selected_node = active_node.as_ref().map(NodeId::to_string).unwrap_or_default();
    let selected_element = active_element.as_ref().map(ElementId::to_string).unwrap_or_default();

    rsx! {
        div { class: "panel node-type-panel",
            section { class: "panel-section",
                h3 { "Node Loading / Boundary Conditions" }
                select {
                    value: "{selected_node}",
                    onchange: move |evt| {
                        let value = evt.value();
                        if value.is_empty() {
                            return;
                        }
                        if let Err(err) = editor.write().activate_node(&NodeId::new(value)) {
                            warn!("Cannot open node: {}", err);
                        }
                    },
                    option { value: "", "Select a node" }
                    for (id, label) in nodes {
                        option { key: "{id}", value: "{id}", "{label}" }
                    }
                }
                div { class: "form-grid",
                    for (key, text) in loading_inputs {
                        label { key: "{key}",
                            "{key}"
                            input {
                                r#type: "text",
                                value: "{text}",
                                disabled: active_node.is_none(),
                                oninput: move |evt| editor.write().edit_loading_field(key, evt.value()),
                            }
                        }
                    }
                }
                button {
                    class: "primary-button",
                    disabled: active_node.is_none(),
                    onclick: move |_| {
                        let node = editor.read().selection().active.node().cloned();
                        if let Some(node) = node {
                            let values = editor.read().loading_form().clone();
                            let _ = editor.write().save_loading_bc(&node, &values);
                        }
                    },
                    "Save Loading/BC"
                }
                StatusLine { message: loading_status }
            }

            section { class: "panel-section",
                h3 { "Element Properties" }
                select {
                    value: "{selected_element}",
                    onchange: move |evt| {
                        let value = evt.value();
                        if value.is_empty() {
                            return;
                        }
                        if let Err(err) = editor.write().activate_element(&ElementId::new(value)) {
                            warn!("Cannot open element: {}", err);
                        }
                    },
                    option { value: "", "Select an element" }
                    for (id, label) in elements {
                        option { key: "{id}", value: "{id}", "{label}" }
                    }
                }
                div { class: "form-grid",
                    for (key, label, text) in property_inputs {
                        label { key: "{key}",
                            "{label}"
                            input {
                                r#type: "text",
                                value: "{text}",
                                placeholder: if key == "local_z" { "x,y,z" } else { "" },
                                disabled: active_element.is_none(),
                                oninput: move |evt| editor.write().edit_property_field(key, evt.value()),
                            }
                        }
                    }
                }
                button {
                    class: "primary-button",
                    disabled: active_element.is_none(),
                    onclick: move |_| {
                        let element = editor.read().selection().active.element().cloned();
                        if let Some(element) = element {
                            let values = editor.read().property_form().clone();
                            let _ = editor.write().save_element_properties(&element, &values);
                        }
                    },
                    "Save Properties"
                }
                StatusLine { message: property_status }
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
