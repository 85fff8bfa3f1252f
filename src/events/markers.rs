use super::TourWiring;
use crate::psv::MarkersPlugin;
use crate::timer::Timeout;
use instant::Instant;
use tour_core::{MarkerSelection, Selection};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

fn get(obj: &JsValue, key: &str) -> Option<JsValue> {
    js_sys::Reflect::get(obj, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

/// Read `{ marker: { id, data: { target } } }` from a `select-marker` event.
pub fn selection_from_event(ev: &JsValue) -> Option<MarkerSelection> {
    let marker = get(ev, "marker")?;
    let marker_id = get(&marker, "id")?.as_string()?;
    let target = get(&marker, "data")
        .and_then(|data| get(&data, "target"))
        .and_then(|t| t.as_string());
    Some(MarkerSelection { marker_id, target })
}

pub fn wire_marker_selection(w: &TourWiring, plugin: &MarkersPlugin) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: JsValue| match selection_from_event(&ev) {
        Some(selection) => handle_selection(&w, &selection),
        None => log::warn!("[markers] select-marker event without a marker id"),
    }) as Box<dyn FnMut(_)>);
    plugin.add_marker_listener(
        crate::constants::SELECT_MARKER_EVENT,
        closure.as_ref().unchecked_ref(),
    );
    closure.forget();
}

/// Run a selection through the session and schedule the deferred marker swap.
pub fn handle_selection(w: &TourWiring, selection: &MarkerSelection) {
    let outcome = {
        let mut session = w.session.borrow_mut();
        let Some(session) = session.as_mut() else {
            log::warn!("[markers] `{}` selected after the tour was unmounted", selection.marker_id);
            return;
        };
        session.on_marker_selected(selection)
    };
    let transition = match outcome {
        Ok(Selection::Navigated(t)) => t,
        Ok(Selection::Decorative) => return,
        Err(e) => {
            log::error!("[markers] {}", e);
            return;
        }
    };
    if let Some(old) = transition.superseded {
        log::info!("[timer] swap #{} superseded", old.id());
    }

    let started = Instant::now();
    let session = w.session.clone();
    let ticket = transition.ticket;
    let room = transition.to.clone();
    let scheduled = Timeout::schedule(transition.delay, move || {
        let fired = session
            .borrow_mut()
            .as_mut()
            .map(|s| s.fire(ticket))
            .unwrap_or(false);
        if fired {
            log::info!("[timer] markers for `{}` after {:?}", room, started.elapsed());
        }
    });
    match scheduled {
        // dropping the previous timeout clears it
        Ok(timeout) => *w.pending_swap.borrow_mut() = Some(timeout),
        Err(e) => {
            log::error!("[timer] cannot schedule marker swap: {:?}", e);
            w.pending_swap.borrow_mut().take();
            if let Some(s) = w.session.borrow_mut().as_mut() {
                s.fire(ticket);
            }
        }
    }
}
