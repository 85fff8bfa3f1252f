use std::time::Duration;
use tour_core::{markers_in_view, Marker, MarkerVisual, Room, SphericalPosition, Viewer};

/// Text stand-in for the panorama viewer. Keeps the marker list it was last
/// given, so hotspots lag the current room exactly like the real overlay.
#[derive(Default)]
pub struct TerminalViewer {
    image: Option<String>,
    markers: Vec<Marker>,
    look: SphericalPosition,
}

impl TerminalViewer {
    pub fn shown_markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn look(&self) -> SphericalPosition {
        self.look
    }

    pub fn turn_to(&mut self, look: SphericalPosition) {
        self.look = look;
    }

    /// Navigation markers in display order.
    pub fn hotspots(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(|m| m.is_navigation())
    }

    pub fn print_view(&self, fov: f32) {
        let look = self.look;
        println!(
            "looking at yaw {:.0}° pitch {:.0}°",
            look.yaw().to_degrees(),
            look.pitch().to_degrees()
        );
        let seen = markers_in_view(&self.markers, &look, fov);
        if seen.is_empty() {
            println!("  nothing in view");
        }
        for (marker, distance) in seen {
            println!("  {:<16} {:>4.0}° off  {}", marker.id, distance.to_degrees(), describe(marker));
        }
    }
}

fn describe(marker: &Marker) -> String {
    let mut text = match (&marker.target, &marker.tooltip) {
        (Some(target), Some(tip)) => format!("{} -> {}", tip, target),
        (Some(target), None) => format!("-> {}", target),
        (None, Some(tip)) => tip.clone(),
        (None, None) => String::new(),
    };
    if let Some(MarkerVisual::Image(image)) = &marker.visual {
        text.push_str(&format!(" [{}]", image));
    }
    text
}

impl Viewer for TerminalViewer {
    fn set_caption(&mut self, room: &Room) {
        println!("\n== {} ==", room.label());
        if let Some(d) = &room.description {
            println!("{}", d);
        }
    }

    fn show_panorama(&mut self, room: &Room, transition: Duration) {
        if self.image.as_deref() == Some(room.image.as_str()) {
            return;
        }
        if transition.is_zero() {
            println!("[panorama] {}", room.image);
        } else {
            println!("[panorama] {} (fading for {:?})", room.image, transition);
        }
        self.image = Some(room.image.clone());
    }

    fn replace_markers(&mut self, markers: &[Marker]) {
        self.markers = markers.to_vec();
        println!("[markers]");
        for (i, m) in self.hotspots().enumerate() {
            println!("  {}. {:<16} {}", i + 1, m.id, describe(m));
        }
        for m in self.markers.iter().filter(|m| !m.is_navigation()) {
            println!("  -  {:<16} {}", m.id, describe(m));
        }
    }
}
