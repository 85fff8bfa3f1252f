use crate::graph::RoomId;

/// Failures raised while building a tour or reacting to viewer events.
#[derive(Debug, thiserror::Error)]
pub enum TourError {
    #[error("tour defines no rooms")]
    EmptyTour,

    #[error("room `{0}` is defined more than once")]
    DuplicateRoom(RoomId),

    #[error("start room `{0}` is not defined")]
    UnknownStartRoom(RoomId),

    #[error("room `{room}` defines marker `{marker}` more than once")]
    DuplicateMarker { room: RoomId, marker: String },

    #[error("marker `{marker}` in room `{room}` targets unknown room `{target}`")]
    DanglingTarget {
        room: RoomId,
        marker: String,
        target: RoomId,
    },

    #[error("invalid angle `{0}` (expected e.g. `30deg`, `0.5rad`, `0.25turn` or radians)")]
    InvalidAngle(String),

    #[error("invalid tour config: {0}")]
    Config(#[from] serde_json::Error),

    /// The viewer delivered a selection whose target is not part of the graph.
    #[error("selected marker targets unknown room `{0}`")]
    UnknownRoom(RoomId),

    #[error("markers plugin is not installed on the viewer")]
    MarkersPluginMissing,
}
