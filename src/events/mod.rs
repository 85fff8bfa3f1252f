pub mod keyboard;
pub mod keys;
pub mod lifecycle;
pub mod markers;

use crate::psv::PanoramaView;
use crate::timer::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use tour_core::TourSession;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Shared state captured by every event closure.
#[derive(Clone)]
pub struct TourWiring {
    /// `None` once the page is hidden and the session torn down.
    pub session: Rc<RefCell<Option<TourSession<PanoramaView>>>>,
    /// Deferred marker swap; replacing it clears the previous browser timeout.
    pub pending_swap: Rc<RefCell<Option<Timeout>>>,
    pub document: web::Document,
}

impl TourWiring {
    pub fn new(session: TourSession<PanoramaView>, document: web::Document) -> Self {
        Self {
            session: Rc::new(RefCell::new(Some(session))),
            pending_swap: Rc::new(RefCell::new(None)),
            document,
        }
    }
}

pub fn wire_all(w: &TourWiring, plugin: &crate::psv::MarkersPlugin) {
    markers::wire_marker_selection(w, plugin);
    keyboard::wire_global_keydown(w);
    wire_unmount(w);
}

// Tear the session down when the page goes away so no swap fires into a dead viewer.
fn wire_unmount(w: &TourWiring) {
    let Some(window) = web::window() else {
        return;
    };
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PageTransitionEvent| {
        if !lifecycle::should_unmount(ev.persisted()) {
            log::info!("[tour] page cached, keeping session");
            return;
        }
        w.pending_swap.borrow_mut().take();
        if let Some(session) = w.session.borrow_mut().take() {
            let view = session.unmount();
            view.sphere().destroy();
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    closure.forget();
}
