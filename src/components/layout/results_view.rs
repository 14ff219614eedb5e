use dioxus::prelude::*;

use crate::hooks::use_editor;
use crate::solver_client::{format_exponential, ResultRow};

fn table_rows(rows: &[ResultRow]) -> Vec<(usize, String, String, String)> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| (index, row.node.to_string(), row.dof.clone(), format_exponential(row.value, 4)))
        .collect()
}

#[component]
fn ResultTable(title: &'static str, value_header: &'static str, rows: Vec<(usize, String, String, String)>) -> Element {
    if rows.is_empty() {
        return rsx! {};
    }
    rsx! {
        h4 { "{title}" }
        table { class: "results-table",
            thead {
                tr {
                    th { "Node" }
                    th { "DOF" }
                    th { "{value_header}" }
                }
            }
            tbody {
                for (index, node, dof, value) in rows {
                    tr { key: "{index}",
                        td { "{node}" }
                        td { "{dof}" }
                        td { "{value}" }
                    }
                }
            }
        }
    }
}

/// Summary and tables of the last solver result
#[component]
pub fn ResultsView() -> Element {
    let ctx = use_editor();

    let summary = ctx.editor.read().results().map(|results| {
        (
            results.node_count,
            results.element_count,
            table_rows(results.displacements()),
            table_rows(results.reactions()),
        )
    });
    let Some((node_count, element_count, displacements, reactions)) = summary else {
        return rsx! {};
    };

    rsx! {
        div { class: "results-container",
            h3 { "Results" }
            p { "Nodes: {node_count}, Elements: {element_count}" }
            ResultTable { title: "Displacements", value_header: "Value", rows: displacements }
            ResultTable { title: "Reactions", value_header: "Force/Moment", rows: reactions }
        }
    }
}
