//! Static room graph: which panorama each room shows and which hotspots it carries.
//!
//! A `RoomGraph` is validated once when built and never changes afterwards, so
//! every navigation target held by a marker is known to resolve.

use crate::angle::SphericalPosition;
use crate::error::TourError;
use fnv::{FnvHashMap, FnvHashSet};
use std::borrow::Borrow;
use std::collections::VecDeque;
use std::fmt;

/// Unique room name, e.g. `"Cucina"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RoomId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoomId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for RoomId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MarkerVisual {
    /// Thumbnail image drawn at the marker position.
    Image(String),
    /// Inline HTML glyph.
    Html(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerSize {
    pub width: u32,
    pub height: u32,
}

/// Hotspot placed on a room's panorama.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub id: String,
    pub position: SphericalPosition,
    pub visual: Option<MarkerVisual>,
    pub tooltip: Option<String>,
    pub size: Option<MarkerSize>,
    /// Room entered when the marker is selected; `None` marks a decorative marker.
    pub target: Option<RoomId>,
}

impl Marker {
    pub fn new(id: impl Into<String>, position: SphericalPosition) -> Self {
        Self {
            id: id.into(),
            position,
            visual: None,
            tooltip: None,
            size: None,
            target: None,
        }
    }

    pub fn with_image(mut self, asset: impl Into<String>) -> Self {
        self.visual = Some(MarkerVisual::Image(asset.into()));
        self
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.visual = Some(MarkerVisual::Html(html.into()));
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Some(MarkerSize { width, height });
        self
    }

    pub fn with_target(mut self, room: impl Into<RoomId>) -> Self {
        self.target = Some(room.into());
        self
    }

    pub fn is_navigation(&self) -> bool {
        self.target.is_some()
    }

    /// The payload a viewer reports when this marker is clicked.
    pub fn selection(&self) -> MarkerSelection {
        MarkerSelection {
            marker_id: self.id.clone(),
            target: self.target.as_ref().map(|t| t.as_str().to_string()),
        }
    }
}

/// Marker-selected event as delivered by the rendering service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerSelection {
    pub marker_id: String,
    pub target: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub image: String,
    pub caption: Option<String>,
    pub description: Option<String>,
    pub markers: Vec<Marker>,
}

impl Room {
    pub fn new(id: impl Into<RoomId>, image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image: image.into(),
            caption: None,
            description: None,
            markers: Vec::new(),
        }
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Caption shown above the viewer; falls back to the room name.
    pub fn label(&self) -> &str {
        self.caption.as_deref().unwrap_or(self.id.as_str())
    }

    pub fn marker(&self, id: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }
}

/// Markers within `fov / 2` of `look`, nearest first, with their angular distance.
pub fn markers_in_view<'a>(
    markers: &'a [Marker],
    look: &SphericalPosition,
    fov: f32,
) -> Vec<(&'a Marker, f32)> {
    let mut seen: Vec<(&Marker, f32)> = markers
        .iter()
        .map(|m| (m, look.angular_distance(&m.position)))
        .filter(|(_, d)| *d <= fov * 0.5)
        .collect();
    seen.sort_by(|a, b| a.1.total_cmp(&b.1));
    seen
}

pub struct RoomGraph {
    rooms: Vec<Room>,
    index: FnvHashMap<RoomId, usize>,
    start: usize,
}

impl RoomGraph {
    /// Build and validate a graph. Rooms keep the order they are given in.
    pub fn new(
        start: impl Into<RoomId>,
        rooms: impl IntoIterator<Item = Room>,
    ) -> Result<Self, TourError> {
        let start = start.into();
        let rooms: Vec<Room> = rooms.into_iter().collect();
        if rooms.is_empty() {
            return Err(TourError::EmptyTour);
        }

        let mut index = FnvHashMap::default();
        for (i, room) in rooms.iter().enumerate() {
            if index.insert(room.id.clone(), i).is_some() {
                return Err(TourError::DuplicateRoom(room.id.clone()));
            }
        }
        let start = *index
            .get(&start)
            .ok_or_else(|| TourError::UnknownStartRoom(start.clone()))?;

        for room in &rooms {
            let mut seen = FnvHashSet::default();
            for marker in &room.markers {
                if !seen.insert(marker.id.as_str()) {
                    return Err(TourError::DuplicateMarker {
                        room: room.id.clone(),
                        marker: marker.id.clone(),
                    });
                }
                if let Some(target) = &marker.target {
                    if !index.contains_key(target) {
                        return Err(TourError::DanglingTarget {
                            room: room.id.clone(),
                            marker: marker.id.clone(),
                            target: target.clone(),
                        });
                    }
                }
            }
        }

        let graph = Self {
            rooms,
            index,
            start,
        };
        for orphan in graph.unreachable_from_start() {
            log::warn!("[graph] room `{}` cannot be reached from `{}`", orphan, graph.start());
        }
        Ok(graph)
    }

    pub fn start(&self) -> &RoomId {
        &self.rooms[self.start].id
    }

    pub fn start_room(&self) -> &Room {
        &self.rooms[self.start]
    }

    pub fn get(&self, name: &str) -> Option<&Room> {
        self.index_of(name).map(|i| &self.rooms[i])
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub(crate) fn start_index(&self) -> usize {
        self.start
    }

    pub(crate) fn room_at(&self, index: usize) -> &Room {
        &self.rooms[index]
    }

    /// Rooms that no chain of markers leads to from the start room, in graph order.
    pub fn unreachable_from_start(&self) -> Vec<&RoomId> {
        let mut visited = vec![false; self.rooms.len()];
        let mut queue = VecDeque::from([self.start]);
        visited[self.start] = true;
        while let Some(i) = queue.pop_front() {
            for target in self.rooms[i].markers.iter().filter_map(|m| m.target.as_ref()) {
                if let Some(j) = self.index_of(target.as_str()) {
                    if !visited[j] {
                        visited[j] = true;
                        queue.push_back(j);
                    }
                }
            }
        }
        self.rooms
            .iter()
            .zip(visited)
            .filter(|(_, seen)| !seen)
            .map(|(room, _)| &room.id)
            .collect()
    }
}
