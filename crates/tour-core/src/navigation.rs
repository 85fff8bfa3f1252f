//! Current-room state machine.
//!
//! Selecting a navigation marker moves the current room immediately. The
//! viewer's marker overlay is replaced later, once the panorama transition has
//! had time to finish: the controller schedules that replacement as a
//! `PendingSwap` identified by a `SwapTicket`. A newer transition cancels the
//! older swap, so a stale marker list is never applied.

use crate::constants::DEFAULT_MARKER_SWAP_DELAY_MS;
use crate::error::TourError;
use crate::graph::{MarkerSelection, Room, RoomGraph, RoomId};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct NavigationOptions {
    /// Time between entering a room and replacing the marker overlay.
    pub marker_swap_delay: Duration,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            marker_swap_delay: Duration::from_millis(DEFAULT_MARKER_SWAP_DELAY_MS),
        }
    }
}

/// Cancellation handle for one scheduled marker swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SwapTicket(u64);

impl SwapTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSwap {
    pub ticket: SwapTicket,
    pub remaining: Duration,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: RoomId,
    pub to: RoomId,
    pub ticket: SwapTicket,
    pub delay: Duration,
    /// Swap cancelled because this transition started before it fired.
    pub superseded: Option<SwapTicket>,
}

impl Transition {
    pub fn changed_room(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// The marker carries no target; nothing changed.
    Decorative,
    Navigated(Transition),
}

/// Marker list that is now due to replace the viewer overlay.
#[derive(Debug)]
pub struct MarkerSwap<'a> {
    pub ticket: SwapTicket,
    pub room: &'a Room,
}

pub struct NavigationController {
    graph: RoomGraph,
    current: usize,
    pending: Option<PendingSwap>,
    next_ticket: u64,
    options: NavigationOptions,
}

impl NavigationController {
    pub fn new(graph: RoomGraph, options: NavigationOptions) -> Self {
        let current = graph.start_index();
        Self {
            graph,
            current,
            pending: None,
            next_ticket: 0,
            options,
        }
    }

    pub fn graph(&self) -> &RoomGraph {
        &self.graph
    }

    pub fn options(&self) -> &NavigationOptions {
        &self.options
    }

    pub fn current_room(&self) -> &RoomId {
        &self.current().id
    }

    pub fn current(&self) -> &Room {
        self.graph.room_at(self.current)
    }

    pub fn pending(&self) -> Option<&PendingSwap> {
        self.pending.as_ref()
    }

    /// React to a marker-selected event from the viewer.
    pub fn select(&mut self, selection: &MarkerSelection) -> Result<Selection, TourError> {
        let Some(target) = selection.target.as_deref() else {
            log::debug!("[nav] decorative marker `{}` selected", selection.marker_id);
            return Ok(Selection::Decorative);
        };
        let to = self
            .graph
            .index_of(target)
            .ok_or_else(|| TourError::UnknownRoom(RoomId::from(target)))?;

        let from = std::mem::replace(&mut self.current, to);
        let superseded = self.cancel_pending();
        let ticket = SwapTicket(self.next_ticket);
        self.next_ticket += 1;
        let delay = self.options.marker_swap_delay;
        self.pending = Some(PendingSwap {
            ticket,
            remaining: delay,
        });

        let transition = Transition {
            from: self.graph.room_at(from).id.clone(),
            to: self.graph.room_at(to).id.clone(),
            ticket,
            delay,
            superseded,
        };
        log::info!(
            "[nav] `{}` -> `{}` via `{}` (markers in {:?})",
            transition.from,
            transition.to,
            selection.marker_id,
            delay
        );
        Ok(Selection::Navigated(transition))
    }

    /// Advance the pending swap by `dt`; returns it once due.
    pub fn tick(&mut self, dt: Duration) -> Option<MarkerSwap<'_>> {
        let pending = self.pending.as_mut()?;
        pending.remaining = pending.remaining.saturating_sub(dt);
        if !pending.remaining.is_zero() {
            return None;
        }
        let ticket = pending.ticket;
        self.pending = None;
        Some(self.swap(ticket))
    }

    /// Timer callback path: completes the swap for `ticket` unless it was cancelled.
    pub fn fire(&mut self, ticket: SwapTicket) -> Option<MarkerSwap<'_>> {
        if self.pending.as_ref().map(|p| p.ticket) != Some(ticket) {
            log::debug!("[nav] ignoring stale swap #{}", ticket.id());
            return None;
        }
        self.pending = None;
        Some(self.swap(ticket))
    }

    pub fn cancel_pending(&mut self) -> Option<SwapTicket> {
        let ticket = self.pending.take().map(|p| p.ticket)?;
        log::debug!("[nav] cancelled swap #{}", ticket.id());
        Some(ticket)
    }

    fn swap(&self, ticket: SwapTicket) -> MarkerSwap<'_> {
        MarkerSwap {
            ticket,
            room: self.current(),
        }
    }
}
