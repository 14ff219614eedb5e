pub mod content_area;
pub mod geometry_panel;
pub mod node_type_panel;
pub mod postprocessing_panel;
pub mod results_view;
pub mod status_line;

pub use content_area::ContentArea;
pub use geometry_panel::GeometryPanel;
pub use node_type_panel::NodeTypePanel;
pub use postprocessing_panel::PostprocessingPanel;
pub use results_view::ResultsView;
pub use status_line::StatusLine;
