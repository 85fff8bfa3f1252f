/// Page contract and viewer tuning for the web front-end.
///
/// Element ids match `index.html`; anything the host page must provide is
/// named here so the wiring code never embeds string literals.
// DOM element ids
pub const VIEWER_CONTAINER_ID: &str = "viewer";
pub const TITLE_ID: &str = "tour-title";
pub const CAPTION_ID: &str = "room-caption";
pub const HELP_OVERLAY_ID: &str = "help-overlay";
pub const TOUR_CONFIG_ID: &str = "tour-config"; // optional <script type="application/json">

// Viewer sizing (CSS lengths)
pub const VIEWER_WIDTH: &str = "100%";
pub const VIEWER_HEIGHT: &str = "70vh";

// Globals registered by the viewer's UMD bundles
pub const PSV_NAMESPACE: &str = "PhotoSphereViewer";
pub const MARKERS_PLUGIN_CLASS: &str = "MarkersPlugin";

// Viewer events
pub const READY_EVENT: &str = "ready";
pub const SELECT_MARKER_EVENT: &str = "select-marker";

// Glyph for markers that define neither image nor html
pub const DEFAULT_MARKER_HTML: &str = "&#9679;";

// Marker id reported for keyboard "back to start" navigation
pub const HOME_SELECTION_ID: &str = "key:home";
