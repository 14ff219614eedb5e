//! Editor state: store, selection, scene and solve bookkeeping in one owned value
//!
//! Every operation that changes what is drawn ends by reconciling the scene.

use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};
use crate::forms::{parse_coordinates, parse_deformation_scale, FieldValues, FormBinding};
use crate::geometry::GeometryStore;
use crate::scene::{DeformationOverlay, SceneBackend, SceneSync, ScreenPoint};
use crate::selection::{PendingChange, PendingState, SelectionController};
use crate::solver_client::{SolveError, SolveRequest, SolveResults, SolveTicket, SolveTracker};
use crate::tabs::{Tab, TabController};
use crate::types::{ElementId, ElementProperties, EntityRef, LoadingBc, NodeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusKind {
    pub fn class(self) -> &'static str {
        match self {
            StatusKind::Info => "status-info",
            StatusKind::Success => "status-success",
            StatusKind::Error => "status-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: StatusKind::Info }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: StatusKind::Success }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: StatusKind::Error }
    }
}

/// One message slot per panel
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusBoard {
    pub geometry: Option<StatusMessage>,
    pub loading_bc: Option<StatusMessage>,
    pub element_props: Option<StatusMessage>,
    pub calculation: Option<StatusMessage>,
}

/// Entity opened for editing and the form text to show for it
#[derive(Clone, Debug, PartialEq)]
pub struct Activation {
    pub entity: EntityRef,
    pub fields: FieldValues,
}

pub struct Editor<S: SceneBackend> {
    config: EditorConfig,
    store: GeometryStore,
    selection: SelectionController,
    scene: S,
    sync: SceneSync,
    overlay: DeformationOverlay,
    tabs: TabController,
    tracker: SolveTracker,
    results: Option<SolveResults>,
    status: StatusBoard,
    /// Text of the loading/BC inputs for the active node
    loading_form: FieldValues,
    /// Text of the property inputs for the active element
    property_form: FieldValues,
}

impl<S: SceneBackend> Editor<S> {
    pub fn new(config: EditorConfig, scene: S) -> Self {
        Self {
            store: GeometryStore::new(config.id_policy),
            selection: SelectionController::default(),
            sync: SceneSync::new(config.style.clone()),
            overlay: DeformationOverlay::new(config.style.clone()),
            tabs: TabController::default(),
            tracker: SolveTracker::default(),
            results: None,
            status: StatusBoard::default(),
            loading_form: LoadingBc::blank(),
            property_form: ElementProperties::blank(),
            scene,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &GeometryStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_sync(&self) -> &SceneSync {
        &self.sync
    }

    pub fn overlay(&self) -> &DeformationOverlay {
        &self.overlay
    }

    pub fn active_tab(&self) -> Tab {
        self.tabs.active()
    }

    pub fn results(&self) -> Option<&SolveResults> {
        self.results.as_ref()
    }

    pub fn status(&self) -> &StatusBoard {
        &self.status
    }

    pub fn is_solving(&self) -> bool {
        self.tracker.is_busy()
    }

    pub fn preview_scale(&self) -> f64 {
        self.sync.preview_scale()
    }

    /// Blank unless a node is open for editing
    pub fn loading_form(&self) -> &FieldValues {
        &self.loading_form
    }

    /// Blank unless an element is open for editing
    pub fn property_form(&self) -> &FieldValues {
        &self.property_form
    }

    pub fn edit_loading_field(&mut self, key: &'static str, value: impl Into<String>) {
        if self.selection.active.node().is_some() {
            self.loading_form.set(key, value);
        }
    }

    pub fn edit_property_field(&mut self, key: &'static str, value: impl Into<String>) {
        if self.selection.active.element().is_some() {
            self.property_form.set(key, value);
        }
    }

    /// Bring the scene in line with store and selection
    pub fn resync(&mut self) {
        self.sync.sync(&mut self.scene, &self.store, &self.selection);
    }

    // ========================
    // Geometry
    // ========================

    pub fn add_node(&mut self, x: f64, y: f64, z: f64) -> NodeId {
        let id = self.store.add_node(x, y, z);
        self.status.geometry = None;
        self.resync();
        id
    }

    /// Coordinate entry; all three fields are required
    pub fn add_node_from_fields(&mut self, x: &str, y: &str, z: &str) -> EditorResult<NodeId> {
        match parse_coordinates(x, y, z) {
            Ok([x, y, z]) => Ok(self.add_node(x, y, z)),
            Err(err) => {
                warn!("Rejected node coordinates: {}", err);
                self.status.geometry = Some(StatusMessage::error(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Click on a node in the geometry list
    pub fn toggle_pending(&mut self, id: &NodeId) -> EditorResult<PendingChange> {
        if !self.store.contains_node(id) {
            return Err(EditorError::NodeNotFound(id.clone()));
        }
        let change = self.selection.pending.toggle(id);
        if change != PendingChange::Ignored {
            self.resync();
        }
        Ok(change)
    }

    pub fn can_create_element(&self) -> bool {
        self.selection.pending.state() == PendingState::TwoPending
    }

    /// Connect the two pending nodes in selection order
    pub fn create_element(&mut self) -> EditorResult<ElementId> {
        let (start, end) = match self.selection.pending.pair() {
            Some((start, end)) => (start.clone(), end.clone()),
            None => return Err(EditorError::SelectionIncomplete(self.selection.pending.len())),
        };
        let id = self.store.create_element(&start, &end)?;
        self.selection.pending.clear();
        self.status.geometry = Some(StatusMessage::success(format!("Created {}", id)));
        self.resync();
        Ok(id)
    }

    /// Remove every node, element and record, and any loaded result
    pub fn clear_nodes(&mut self) {
        self.store.clear_nodes();
        self.selection.reset();
        self.loading_form = LoadingBc::blank();
        self.property_form = ElementProperties::blank();
        self.tracker.cancel();
        self.overlay.clear(&mut self.scene);
        self.results = None;
        self.sync.set_preview_scale(0.0);
        self.status = StatusBoard::default();
        self.resync();
    }

    pub fn clear_elements(&mut self) {
        self.store.clear_elements();
        self.selection.active.clear_element();
        self.property_form = ElementProperties::blank();
        self.status.element_props = None;
        self.resync();
    }

    // ========================
    // Property forms
    // ========================

    /// Open a node in the loading/BC form
    pub fn activate_node(&mut self, id: &NodeId) -> EditorResult<FieldValues> {
        if !self.store.contains_node(id) {
            return Err(EditorError::NodeNotFound(id.clone()));
        }
        self.selection.active.set_node(id.clone());
        self.loading_form = LoadingBc::populate(self.store.loading_bc(id));
        self.status.loading_bc = None;
        self.resync();
        Ok(self.loading_form.clone())
    }

    /// Parse and store the loading/BC form; all blank removes the record
    pub fn save_loading_bc(&mut self, id: &NodeId, values: &FieldValues) -> EditorResult<()> {
        let result = LoadingBc::read(values)
            .map_err(EditorError::from)
            .and_then(|record| {
                let cleared = record.is_empty();
                self.store.set_loading_bc(id, record).map(|_| cleared)
            });

        match result {
            Ok(cleared) => {
                let text = if cleared {
                    format!("Cleared values for node {}", id)
                } else {
                    format!("Values saved for node {}", id)
                };
                info!("{}", text);
                self.status.loading_bc = Some(StatusMessage::success(text));
                self.resync();
                Ok(())
            }
            Err(err) => {
                warn!("Loading/BC for {} rejected: {}", id, err);
                self.status.loading_bc = Some(StatusMessage::error(err.to_string()));
                Err(err)
            }
        }
    }

    /// Open an element in the property form
    pub fn activate_element(&mut self, id: &ElementId) -> EditorResult<FieldValues> {
        if !self.store.contains_element(id) {
            return Err(EditorError::ElementNotFound(id.clone()));
        }
        self.selection.active.set_element(id.clone());
        self.property_form = ElementProperties::populate(self.store.element_properties(id));
        self.status.element_props = None;
        self.resync();
        Ok(self.property_form.clone())
    }

    /// Parse and store the property form; all blank removes the record
    pub fn save_element_properties(&mut self, id: &ElementId, values: &FieldValues) -> EditorResult<()> {
        let result = ElementProperties::read(values)
            .map_err(EditorError::from)
            .and_then(|record| {
                let cleared = record.is_empty();
                self.store.set_element_properties(id, record).map(|_| cleared)
            });

        match result {
            Ok(cleared) => {
                let text = if cleared {
                    format!("Cleared properties for element {}", id)
                } else {
                    format!("Properties saved for element {}", id)
                };
                info!("{}", text);
                self.status.element_props = Some(StatusMessage::success(text));
                self.resync();
                Ok(())
            }
            Err(err) => {
                warn!("Properties for {} rejected: {}", id, err);
                self.status.element_props = Some(StatusMessage::error(err.to_string()));
                Err(err)
            }
        }
    }

    /// Open whatever lies under `point`; only while the node/element type tab is shown
    pub fn pick(&mut self, point: ScreenPoint) -> Option<Activation> {
        if !self.tabs.active().allows_pick() {
            debug!("Pick ignored on tab {}", self.tabs.active().id());
            return None;
        }
        let entity = self.sync.pick(&self.scene, point)?;
        let fields = match &entity {
            EntityRef::Node(id) => self.activate_node(id),
            EntityRef::Element(id) => self.activate_element(id),
        }
        .ok()?;
        Some(Activation { entity, fields })
    }

    // ========================
    // Tabs
    // ========================

    pub fn select_tab(&mut self, tab: Tab) {
        if self.tabs.select(tab) {
            self.selection.active.clear();
            self.loading_form = LoadingBc::blank();
            self.property_form = ElementProperties::blank();
        }
        self.resync();
    }

    /// "All set": move to the next tab, if any
    pub fn advance_tab(&mut self) -> Option<Tab> {
        let next = self.tabs.active().next()?;
        self.select_tab(next);
        Some(next)
    }

    // ========================
    // Solve
    // ========================

    /// Validate and snapshot the model. The caller sends the request and
    /// hands the outcome to [`Editor::finish_solve`] with the same ticket.
    pub fn begin_solve(&mut self, scale_text: &str) -> EditorResult<(SolveTicket, SolveRequest)> {
        let checked = parse_deformation_scale(scale_text)
            .map_err(EditorError::from)
            .and_then(|scale| {
                if self.store.node_count() == 0 {
                    Err(EditorError::EmptyModel)
                } else {
                    Ok(scale)
                }
            });
        let scale = match checked {
            Ok(scale) => scale,
            Err(err) => {
                warn!("Solve not sent: {}", err);
                self.status.calculation = Some(StatusMessage::error(err.to_string()));
                return Err(err);
            }
        };

        let request = SolveRequest::from_store(&self.store, scale);
        let ticket = self.tracker.begin();
        info!(
            "Submitting {} nodes and {} elements (scale {})",
            request.nodes.len(),
            request.elements.len(),
            scale
        );
        self.status.calculation = Some(StatusMessage::info("Sending data to server..."));
        Ok((ticket, request))
    }

    /// Apply a solve outcome. Returns false when a newer submission superseded it.
    pub fn finish_solve(&mut self, ticket: SolveTicket, outcome: Result<SolveResults, SolveError>) -> bool {
        if !self.tracker.complete(ticket) {
            return false;
        }
        match outcome {
            Ok(results) => {
                info!(
                    "Calculation completed: {} nodes, {} elements, {} deformed shapes",
                    results.node_count,
                    results.element_count,
                    results.deformed_shapes().len()
                );
                self.sync.set_preview_scale(0.0);
                match &results.deformed_shapes {
                    Some(shapes) => self.overlay.set_result(&mut self.scene, shapes.clone()),
                    None => debug!("No deformed shapes in response, overlay left as is"),
                }
                self.results = Some(results);
                self.status.calculation = Some(StatusMessage::success("Calculation completed successfully!"));
                self.resync();
            }
            Err(err) => {
                warn!("Calculation failed: {}", err);
                self.status.calculation = Some(StatusMessage::error(format!("Error: {}", err)));
            }
        }
        true
    }

    /// Show or hide the solver overlay; `None` when no result is loaded
    pub fn toggle_deformed_shape(&mut self) -> Option<bool> {
        self.overlay.toggle(&mut self.scene)
    }

    /// Synthetic preview displacement; 0 restores the undeformed positions
    pub fn preview_deformation(&mut self, scale: f64) -> EditorResult<()> {
        if self.overlay.has_result() {
            let err = EditorError::PreviewUnavailable;
            self.status.calculation = Some(StatusMessage::error(err.to_string()));
            return Err(err);
        }
        self.sync.set_preview_scale(scale);
        self.resync();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::memory::MemoryScene;
    use crate::scene::{palette, PrimitiveTag, Shape};
    use crate::solver_client::DeformedShape;
    use crate::types::{LoadingField, PropertyField};
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn editor() -> Editor<MemoryScene> {
        Editor::new(EditorConfig::default(), MemoryScene::new())
    }

    fn two_node_element(editor: &mut Editor<MemoryScene>) -> (NodeId, NodeId, ElementId) {
        let a = editor.add_node(0.0, 0.0, 0.0);
        let b = editor.add_node(1.0, 0.0, 0.0);
        editor.toggle_pending(&a).unwrap();
        editor.toggle_pending(&b).unwrap();
        let element = editor.create_element().unwrap();
        (a, b, element)
    }

    fn node_color(editor: &Editor<MemoryScene>, id: &NodeId) -> crate::scene::Color {
        let handle = editor.scene_sync().node_handle(id).unwrap();
        editor.scene().get(handle).unwrap().color
    }

    fn element_color(editor: &Editor<MemoryScene>, id: &ElementId) -> crate::scene::Color {
        let handle = editor.scene_sync().element_handle(id).unwrap();
        editor.scene().get(handle).unwrap().color
    }

    fn shaped_results() -> SolveResults {
        SolveResults {
            node_count: 2,
            element_count: 1,
            analysis_results: None,
            deformed_shapes: Some(vec![DeformedShape {
                element_index: 0,
                shape_data: vec![[0.0, 0.0, 0.0], [1.0, 0.2, 0.0]],
                deformed_nodes: vec![],
            }]),
        }
    }

    fn overlay_segments(editor: &Editor<MemoryScene>) -> Vec<crate::scene::PrimitiveSpec> {
        editor
            .scene()
            .primitives()
            .filter(|(_, spec)| matches!(spec.tag, PrimitiveTag::OverlaySegment { .. }))
            .map(|(_, spec)| spec.clone())
            .collect()
    }

    #[test]
    fn test_create_element_from_two_pending_nodes() {
        let mut editor = editor();
        let (a, b, element) = two_node_element(&mut editor);

        let created = editor.store().element(&element).unwrap();
        assert_eq!(created.node_ids, [a, b]);
        assert_eq!(created.reference, [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)]);
        assert!(editor.selection().pending.is_empty());
        assert_eq!(editor.scene().len(), 3);
    }

    #[test]
    fn test_create_element_needs_two_pending() {
        let mut editor = editor();
        let a = editor.add_node(0.0, 0.0, 0.0);
        editor.add_node(1.0, 0.0, 0.0);
        assert_eq!(editor.create_element(), Err(EditorError::SelectionIncomplete(0)));

        editor.toggle_pending(&a).unwrap();
        assert!(!editor.can_create_element());
        assert_eq!(editor.create_element(), Err(EditorError::SelectionIncomplete(1)));
        assert_eq!(editor.store().element_count(), 0);
        assert!(editor.selection().pending.contains(&a));
    }

    #[test]
    fn test_element_follows_selection_order() {
        let mut editor = editor();
        let a = editor.add_node(0.0, 0.0, 0.0);
        let b = editor.add_node(1.0, 0.0, 0.0);
        let c = editor.add_node(2.0, 0.0, 0.0);
        editor.toggle_pending(&c).unwrap();
        editor.toggle_pending(&a).unwrap();
        assert_eq!(editor.toggle_pending(&b).unwrap(), PendingChange::Ignored);

        let element = editor.create_element().unwrap();
        assert_eq!(editor.store().element(&element).unwrap().node_ids, [c, a]);
    }

    #[test]
    fn test_pending_node_shown_red() {
        let mut editor = editor();
        let a = editor.add_node(0.0, 0.0, 0.0);
        editor.toggle_pending(&a).unwrap();
        assert_eq!(node_color(&editor, &a), palette::NODE_PENDING);
        editor.toggle_pending(&a).unwrap();
        assert_eq!(node_color(&editor, &a), palette::NODE_DEFAULT);
    }

    #[test]
    fn test_blank_save_equals_never_saved() {
        let mut editor = editor();
        let (a, _, element) = two_node_element(&mut editor);

        editor
            .save_loading_bc(&a, &LoadingBc::blank().with("F_y", "-10"))
            .unwrap();
        editor.select_tab(Tab::Geometry);
        assert_eq!(node_color(&editor, &a), palette::NODE_LOADED);

        editor.save_loading_bc(&a, &LoadingBc::blank()).unwrap();
        assert!(editor.store().loading_bc(&a).is_none());
        assert_eq!(node_color(&editor, &a), palette::NODE_DEFAULT);
        assert_eq!(
            editor.status().loading_bc.as_ref().unwrap().text,
            "Cleared values for node node-0"
        );

        editor
            .save_element_properties(&element, &ElementProperties::blank())
            .unwrap();
        assert!(editor.store().element_properties(&element).is_none());
        assert_eq!(element_color(&editor, &element), palette::ELEMENT_DEFAULT);
    }

    #[test]
    fn test_invalid_local_z_applies_nothing() {
        let mut editor = editor();
        let (_, _, element) = two_node_element(&mut editor);

        for bad in ["1,2", "1,a,3"] {
            let values = ElementProperties::blank().with("E", "200e9").with("local_z", bad);
            let err = editor.save_element_properties(&element, &values).unwrap_err();
            assert!(matches!(err, EditorError::Form(_)));
            assert!(editor.store().element_properties(&element).is_none());
            assert_eq!(
                editor.status().element_props.as_ref().map(|status| status.kind),
                Some(StatusKind::Error)
            );
        }
        assert_eq!(element_color(&editor, &element), palette::ELEMENT_DEFAULT);
    }

    #[test]
    fn test_saved_properties_reload_into_form() {
        let mut editor = editor();
        let (_, _, element) = two_node_element(&mut editor);
        let values = ElementProperties::blank()
            .with("E", "200000000000")
            .with("A", "0.01")
            .with("local_z", "0,0,1");
        editor.save_element_properties(&element, &values).unwrap();
        assert_eq!(
            editor.status().element_props.as_ref().unwrap().text,
            "Properties saved for element element-0"
        );

        let fields = editor.activate_element(&element).unwrap();
        assert_eq!(fields, values);
        assert_eq!(element_color(&editor, &element), palette::ACTIVE);
        assert!(editor.store().element_properties(&element).unwrap().get(PropertyField::Iy).is_none());
    }

    #[test]
    fn test_clear_elements_keeps_nodes() {
        let mut editor = editor();
        let (a, b, element) = two_node_element(&mut editor);
        editor.activate_element(&element).unwrap();

        editor.clear_elements();
        assert_eq!(editor.store().element_count(), 0);
        assert_eq!(editor.store().node_count(), 2);
        assert_eq!(editor.store().node(&a).unwrap().position(), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(editor.store().node(&b).unwrap().position(), Point3::new(1.0, 0.0, 0.0));
        assert!(editor.selection().active.element().is_none());
        assert_eq!(editor.scene().len(), 2);
    }

    #[test]
    fn test_clear_nodes_drops_everything() {
        let mut editor = editor();
        let (a, _, element) = two_node_element(&mut editor);
        editor.save_loading_bc(&a, &LoadingBc::blank().with("u_x", "0")).unwrap();
        editor
            .save_element_properties(&element, &ElementProperties::blank().with("E", "1"))
            .unwrap();

        editor.clear_nodes();
        assert_eq!(editor.store().node_count(), 0);
        assert_eq!(editor.store().element_count(), 0);
        assert!(editor.store().loading_bc(&a).is_none());
        assert!(editor.store().element_properties(&element).is_none());
        assert!(editor.scene().is_empty());

        // monotonic ids survive the clear
        assert_eq!(editor.add_node(0.0, 0.0, 0.0).as_str(), "node-2");
    }

    #[test]
    fn test_node_count_tracks_adds_and_clear() {
        let mut editor = editor();
        for i in 0..5 {
            editor.add_node(i as f64, 0.0, 0.0);
        }
        assert_eq!(editor.store().node_count(), 5);
        editor.clear_nodes();
        editor.add_node(0.0, 0.0, 0.0);
        editor.add_node(1.0, 0.0, 0.0);
        assert_eq!(editor.store().node_count(), 2);
    }

    #[test]
    fn test_bad_coordinates_report_in_geometry_status() {
        let mut editor = editor();
        assert!(editor.add_node_from_fields("1", "abc", "0").is_err());
        assert_eq!(editor.store().node_count(), 0);
        assert_eq!(
            editor.status().geometry.as_ref().map(|status| status.kind),
            Some(StatusKind::Error)
        );
        let id = editor.add_node_from_fields("1", "2", "3").unwrap();
        assert_eq!(editor.store().node(&id).unwrap().position(), Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_pick_only_on_type_tab() {
        let mut editor = editor();
        let a = editor.add_node(0.0, 0.0, 0.0);

        assert_eq!(editor.pick(ScreenPoint::new(0.0, 0.0)), None);

        editor.select_tab(Tab::NodeElementType);
        let activation = editor.pick(ScreenPoint::new(0.0, 0.0)).unwrap();
        assert_eq!(activation.entity, EntityRef::Node(a.clone()));
        assert!(activation.fields.is_blank());
        assert_eq!(node_color(&editor, &a), palette::ACTIVE);

        editor.select_tab(Tab::Postprocessing);
        assert!(editor.selection().active.node().is_none());
        assert_eq!(node_color(&editor, &a), palette::NODE_DEFAULT);
    }

    #[test]
    fn test_switching_tab_keeps_pending_red() {
        let mut editor = editor();
        let a = editor.add_node(0.0, 0.0, 0.0);
        editor.toggle_pending(&a).unwrap();
        editor.select_tab(Tab::NodeElementType);
        editor.activate_node(&a).unwrap();
        editor.select_tab(Tab::Geometry);
        assert_eq!(node_color(&editor, &a), palette::NODE_PENDING);
    }

    #[test]
    fn test_all_set_advances() {
        let mut editor = editor();
        assert_eq!(editor.advance_tab(), Some(Tab::NodeElementType));
        assert_eq!(editor.advance_tab(), Some(Tab::Postprocessing));
        assert_eq!(editor.advance_tab(), None);
        assert_eq!(editor.active_tab(), Tab::Postprocessing);
    }

    #[test]
    fn test_solve_rejects_bad_scale_and_empty_model() {
        let mut editor = editor();
        assert_eq!(editor.begin_solve("2.0").unwrap_err(), EditorError::EmptyModel);
        assert_eq!(
            editor.status().calculation.as_ref().unwrap().text,
            "No nodes to calculate. Please add nodes first."
        );

        editor.add_node(0.0, 0.0, 0.0);
        assert!(matches!(editor.begin_solve("-1"), Err(EditorError::Form(_))));
        assert!(!editor.is_solving());
    }

    #[test]
    fn test_solve_result_shows_overlay_and_toggles() {
        let mut editor = editor();
        let (_, b, _) = two_node_element(&mut editor);
        editor.save_loading_bc(&b, &LoadingBc::blank().with("F_y", "-1")).unwrap();

        let (ticket, request) = editor.begin_solve("2.0").unwrap();
        assert_relative_eq!(request.deformation_scale, 2.0);
        assert_eq!(request.nodes[1].loading_bc.get(LoadingField::Fy), Some(-1.0));
        assert!(editor.is_solving());

        let results = SolveResults {
            node_count: 2,
            element_count: 1,
            analysis_results: None,
            deformed_shapes: Some(vec![DeformedShape {
                element_index: 0,
                shape_data: vec![[0.0, 0.0, 0.0], [1.0, 0.2, 0.0]],
                deformed_nodes: vec![],
            }]),
        };
        assert!(editor.finish_solve(ticket, Ok(results)));
        assert!(!editor.is_solving());
        assert!(editor.overlay().is_visible());

        let shown = overlay_segments(&editor);
        assert_eq!(shown.len(), 1);
        match shown[0].shape {
            Shape::Cylinder { length, .. } => assert_relative_eq!(length, 1.04f64.sqrt(), epsilon = 1e-12),
            other => panic!("expected cylinder, got {other:?}"),
        }
        assert_eq!(shown[0].transform.position, [0.5, 0.1, 0.0]);

        assert_eq!(editor.toggle_deformed_shape(), Some(false));
        assert!(overlay_segments(&editor).is_empty());
        assert_eq!(editor.scene().len(), 3);

        assert_eq!(editor.toggle_deformed_shape(), Some(true));
        assert_eq!(overlay_segments(&editor), shown);
    }

    #[test]
    fn test_stale_and_failed_solves_keep_previous_results() {
        let mut editor = editor();
        editor.add_node(0.0, 0.0, 0.0);

        let (first, _) = editor.begin_solve("1").unwrap();
        let (second, _) = editor.begin_solve("1").unwrap();
        assert!(editor.finish_solve(second, Ok(SolveResults { node_count: 1, ..SolveResults::default() })));
        assert!(!editor.finish_solve(first, Ok(SolveResults::default())));
        assert_eq!(editor.results().unwrap().node_count, 1);

        let (third, _) = editor.begin_solve("1").unwrap();
        let failure = SolveError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert!(editor.finish_solve(third, Err(failure)));
        assert_eq!(editor.results().unwrap().node_count, 1);
        assert_eq!(
            editor.status().calculation.as_ref().unwrap().text,
            "Error: Server responded with status: 500"
        );
    }

    #[test]
    fn test_preview_only_without_result() {
        let mut editor = editor();
        let (_, b, _) = two_node_element(&mut editor);

        editor.preview_deformation(1.0).unwrap();
        let handle = editor.scene_sync().node_handle(&b).unwrap();
        assert_relative_eq!(editor.scene().get(handle).unwrap().transform.position[1], 0.5, epsilon = 1e-12);

        editor.preview_deformation(0.0).unwrap();
        assert_eq!(editor.scene().get(handle).unwrap().transform.position, [1.0, 0.0, 0.0]);

        let (ticket, _) = editor.begin_solve("1").unwrap();
        editor.finish_solve(ticket, Ok(shaped_results()));
        assert_eq!(editor.preview_deformation(1.0), Err(EditorError::PreviewUnavailable));
        assert_eq!(
            editor.status().calculation.as_ref().map(|status| status.kind),
            Some(StatusKind::Error)
        );
        assert_relative_eq!(editor.preview_scale(), 0.0);
    }

    #[test]
    fn test_result_without_shapes_keeps_overlay() {
        let mut editor = editor();
        two_node_element(&mut editor);

        let (ticket, _) = editor.begin_solve("1").unwrap();
        editor.finish_solve(ticket, Ok(shaped_results()));
        let shown = overlay_segments(&editor);
        assert_eq!(shown.len(), 1);

        let bare = SolveResults { node_count: 2, element_count: 1, ..SolveResults::default() };
        let (ticket, _) = editor.begin_solve("1").unwrap();
        assert!(editor.finish_solve(ticket, Ok(bare)));
        assert!(editor.results().unwrap().deformed_shapes.is_none());
        assert!(editor.overlay().is_visible());
        assert_eq!(overlay_segments(&editor), shown);
    }

    #[test]
    fn test_first_result_without_shapes_leaves_overlay_off() {
        let mut editor = editor();
        let (_, b, _) = two_node_element(&mut editor);

        let (ticket, _) = editor.begin_solve("1").unwrap();
        assert!(editor.finish_solve(ticket, Ok(SolveResults::default())));
        assert!(editor.results().is_some());
        assert!(!editor.overlay().has_result());
        assert!(!editor.overlay().is_visible());
        assert_eq!(editor.toggle_deformed_shape(), None);
        assert_eq!(editor.scene().len(), 3);

        editor.preview_deformation(1.0).unwrap();
        let handle = editor.scene_sync().node_handle(&b).unwrap();
        assert_relative_eq!(editor.scene().get(handle).unwrap().transform.position[1], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_preview_scale_resets_on_result_and_clear() {
        let mut editor = editor();
        two_node_element(&mut editor);

        editor.preview_deformation(1.5).unwrap();
        assert_relative_eq!(editor.preview_scale(), 1.5);
        let (ticket, _) = editor.begin_solve("1").unwrap();
        editor.finish_solve(ticket, Ok(SolveResults::default()));
        assert_relative_eq!(editor.preview_scale(), 0.0);

        editor.preview_deformation(0.7).unwrap();
        editor.clear_nodes();
        assert_relative_eq!(editor.preview_scale(), 0.0);
    }

    #[test]
    fn test_open_forms_blank_when_entity_closes() {
        let mut editor = editor();
        let (a, _, element) = two_node_element(&mut editor);
        editor.save_loading_bc(&a, &LoadingBc::blank().with("F_x", "5")).unwrap();
        editor
            .save_element_properties(&element, &ElementProperties::blank().with("E", "210"))
            .unwrap();

        editor.select_tab(Tab::NodeElementType);
        editor.activate_node(&a).unwrap();
        editor.activate_element(&element).unwrap();
        assert_eq!(editor.loading_form().get("F_x"), "5");
        assert_eq!(editor.property_form().get("E"), "210");

        editor.clear_elements();
        assert!(editor.property_form().is_blank());
        assert_eq!(editor.loading_form().get("F_x"), "5");

        editor.select_tab(Tab::Postprocessing);
        assert!(editor.loading_form().is_blank());

        editor.select_tab(Tab::NodeElementType);
        editor.activate_node(&a).unwrap();
        editor.edit_loading_field("F_y", "3");
        assert_eq!(editor.loading_form().get("F_y"), "3");

        editor.clear_nodes();
        assert!(editor.loading_form().is_blank());
        assert!(editor.property_form().is_blank());

        editor.edit_loading_field("F_x", "9");
        editor.edit_property_field("E", "9");
        assert!(editor.loading_form().is_blank());
        assert!(editor.property_form().is_blank());
    }

    #[test]
    fn test_clear_nodes_abandons_pending_solve() {
        let mut editor = editor();
        two_node_element(&mut editor);

        let (ticket, _) = editor.begin_solve("1").unwrap();
        editor.clear_nodes();
        assert!(!editor.is_solving());

        assert!(!editor.finish_solve(ticket, Ok(shaped_results())));
        assert!(editor.results().is_none());
        assert!(!editor.overlay().has_result());
        assert!(editor.scene().is_empty());
    }
}
