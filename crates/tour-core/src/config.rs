//! Tour files and the marker wire format.
//!
//! The JSON shapes here are the ones the panorama viewer's marker plugin
//! accepts (`{id, position: {yaw, pitch}, image?, html?, tooltip?, size?,
//! data?: {target}}`), so the same `MarkerConfig` is used to read tour files
//! and to hand marker lists to the viewer.

use crate::angle::{parse_angle, SphericalPosition};
use crate::constants::DEFAULT_MARKER_SWAP_DELAY_MS;
use crate::error::TourError;
use crate::graph::{Marker, MarkerSize, MarkerVisual, Room, RoomGraph, RoomId};
use crate::navigation::{NavigationController, NavigationOptions};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Angle as written in JSON: radians, or text such as `"-90deg"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AngleValue {
    Radians(f32),
    Text(String),
}

impl AngleValue {
    pub fn radians(&self) -> Result<f32, TourError> {
        match self {
            AngleValue::Radians(r) if r.is_finite() => Ok(*r),
            AngleValue::Radians(r) => Err(TourError::InvalidAngle(r.to_string())),
            AngleValue::Text(t) => parse_angle(t),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionConfig {
    pub yaw: AngleValue,
    pub pitch: AngleValue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeConfig {
    pub width: u32,
    pub height: u32,
}

/// Free-form payload carried by a marker; only `target` is interpreted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerConfig {
    pub id: String,
    pub position: PositionConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<MarkerData>,
}

impl MarkerConfig {
    pub fn to_marker(&self) -> Result<Marker, TourError> {
        let position = SphericalPosition::new(
            self.position.yaw.radians()?,
            self.position.pitch.radians()?,
        );
        let visual = match (&self.image, &self.html) {
            (Some(image), html) => {
                if html.is_some() {
                    log::warn!("[config] marker `{}` has both image and html; using image", self.id);
                }
                Some(MarkerVisual::Image(image.clone()))
            }
            (None, Some(html)) => Some(MarkerVisual::Html(html.clone())),
            (None, None) => None,
        };
        Ok(Marker {
            id: self.id.clone(),
            position,
            visual,
            tooltip: self.tooltip.clone(),
            size: self.size.map(|s| MarkerSize {
                width: s.width,
                height: s.height,
            }),
            target: self
                .data
                .as_ref()
                .and_then(|d| d.target.as_deref())
                .map(RoomId::from),
        })
    }
}

impl From<&Marker> for MarkerConfig {
    fn from(marker: &Marker) -> Self {
        let (image, html) = match &marker.visual {
            Some(MarkerVisual::Image(i)) => (Some(i.clone()), None),
            Some(MarkerVisual::Html(h)) => (None, Some(h.clone())),
            None => (None, None),
        };
        Self {
            id: marker.id.clone(),
            position: PositionConfig {
                yaw: AngleValue::Radians(marker.position.yaw()),
                pitch: AngleValue::Radians(marker.position.pitch()),
            },
            image,
            html,
            tooltip: marker.tooltip.clone(),
            size: marker.size.map(|s| SizeConfig {
                width: s.width,
                height: s.height,
            }),
            data: marker.target.as_ref().map(|t| MarkerData {
                target: Some(t.as_str().to_string()),
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomConfig {
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub markers: Vec<MarkerConfig>,
}

/// The `rooms` object of a tour file, in file order. Repeated names are kept
/// so graph construction can reject them instead of the last one winning.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoomEntries(pub Vec<(String, RoomConfig)>);

impl RoomEntries {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RoomConfig)> {
        self.0.iter().map(|(name, rc)| (name.as_str(), rc))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First room declared under `name`.
    pub fn get(&self, name: &str) -> Option<&RoomConfig> {
        self.iter().find(|(n, _)| *n == name).map(|(_, rc)| rc)
    }
}

impl Serialize for RoomEntries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, rc) in &self.0 {
            map.serialize_entry(name, rc)?;
        }
        map.end()
    }
}

struct RoomEntriesVisitor;

impl<'de> Visitor<'de> for RoomEntriesVisitor {
    type Value = RoomEntries;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of rooms keyed by name")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(entry) = access.next_entry::<String, RoomConfig>()? {
            entries.push(entry);
        }
        Ok(RoomEntries(entries))
    }
}

impl<'de> Deserialize<'de> for RoomEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RoomEntriesVisitor)
    }
}

fn default_swap_delay_ms() -> u64 {
    DEFAULT_MARKER_SWAP_DELAY_MS
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub start: String,
    #[serde(default = "default_swap_delay_ms")]
    pub marker_swap_delay_ms: u64,
    /// Decorative markers appended to every room, e.g. a floor logo.
    #[serde(default)]
    pub overlays: Vec<MarkerConfig>,
    pub rooms: RoomEntries,
}

impl TourConfig {
    pub fn from_json(text: &str) -> Result<Self, TourError> {
        Ok(serde_json::from_str(text)?)
    }

    /// The bundled demo apartment.
    pub fn apartment() -> Result<Self, TourError> {
        Self::from_json(crate::APARTMENT_JSON)
    }

    pub fn options(&self) -> NavigationOptions {
        NavigationOptions {
            marker_swap_delay: Duration::from_millis(self.marker_swap_delay_ms),
        }
    }

    pub fn build_graph(&self) -> Result<RoomGraph, TourError> {
        let overlays = self
            .overlays
            .iter()
            .map(MarkerConfig::to_marker)
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(m) = overlays.iter().find(|m| m.is_navigation()) {
            log::warn!("[config] overlay marker `{}` carries a target", m.id);
        }

        let mut rooms = Vec::with_capacity(self.rooms.len());
        for (name, rc) in self.rooms.iter() {
            let mut markers = rc
                .markers
                .iter()
                .map(MarkerConfig::to_marker)
                .collect::<Result<Vec<_>, _>>()?;
            markers.extend(overlays.iter().cloned());
            rooms.push(Room {
                id: RoomId::from(name),
                image: rc.image.clone(),
                caption: rc.caption.clone(),
                description: rc.description.clone(),
                markers,
            });
        }
        RoomGraph::new(self.start.as_str(), rooms)
    }

    pub fn build_controller(&self) -> Result<NavigationController, TourError> {
        Ok(NavigationController::new(self.build_graph()?, self.options()))
    }
}
