//! Binds a `NavigationController` to the rendering service.
//!
//! The viewer itself (sphere projection, textures, marker overlay) lives
//! outside this crate; front-ends implement `Viewer` for whatever drives it.

use crate::error::TourError;
use crate::graph::{Marker, MarkerSelection, Room};
use crate::navigation::{NavigationController, Selection, SwapTicket};
use std::time::Duration;

/// Operations the tour needs from a panorama viewer with a marker overlay.
pub trait Viewer {
    /// Update the room label/description shown next to the viewer.
    fn set_caption(&mut self, room: &Room);
    /// Load `room`'s panorama, blending over `transition`.
    fn show_panorama(&mut self, room: &Room, transition: Duration);
    /// Replace the whole marker overlay.
    fn replace_markers(&mut self, markers: &[Marker]);
}

pub struct TourSession<V: Viewer> {
    controller: NavigationController,
    viewer: V,
}

impl<V: Viewer> TourSession<V> {
    /// Render the start room and begin listening for selections.
    pub fn mount(controller: NavigationController, mut viewer: V) -> Self {
        let room = controller.current();
        log::info!("[session] mounted in `{}`", room.id);
        viewer.set_caption(room);
        viewer.show_panorama(room, Duration::ZERO);
        viewer.replace_markers(&room.markers);
        Self { controller, viewer }
    }

    pub fn controller(&self) -> &NavigationController {
        &self.controller
    }

    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut V {
        &mut self.viewer
    }

    pub fn on_marker_selected(
        &mut self,
        selection: &MarkerSelection,
    ) -> Result<Selection, TourError> {
        let outcome = self.controller.select(selection)?;
        if let Selection::Navigated(t) = &outcome {
            if t.changed_room() {
                let room = self.controller.current();
                self.viewer.set_caption(room);
                self.viewer.show_panorama(room, t.delay);
            }
        }
        Ok(outcome)
    }

    /// Drive the deferred swap from a frame loop. Returns true when markers were replaced.
    pub fn tick(&mut self, dt: Duration) -> bool {
        match self.controller.tick(dt) {
            Some(swap) => {
                log::debug!("[session] markers -> `{}`", swap.room.id);
                self.viewer.replace_markers(&swap.room.markers);
                true
            }
            None => false,
        }
    }

    /// Drive the deferred swap from an external timer.
    pub fn fire(&mut self, ticket: SwapTicket) -> bool {
        match self.controller.fire(ticket) {
            Some(swap) => {
                log::debug!("[session] markers -> `{}`", swap.room.id);
                self.viewer.replace_markers(&swap.room.markers);
                true
            }
            None => false,
        }
    }

    /// Tear down: drops any pending swap and hands the viewer back.
    pub fn unmount(mut self) -> V {
        self.controller.cancel_pending();
        log::info!("[session] unmounted from `{}`", self.controller.current_room());
        self.viewer
    }
}
