use super::keys::{action_for_key, KeyAction};
use super::markers::handle_selection;
use super::TourWiring;
use crate::constants::HOME_SELECTION_ID;
use crate::overlay;
use tour_core::MarkerSelection;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Resolve a navigation key to the selection it stands for, if any.
fn selection_for(w: &TourWiring, action: KeyAction) -> Option<MarkerSelection> {
    let session = w.session.borrow();
    let session = session.as_ref()?;
    match action {
        KeyAction::ReturnToStart => Some(MarkerSelection {
            marker_id: HOME_SELECTION_ID.to_string(),
            target: Some(session.controller().graph().start().to_string()),
        }),
        KeyAction::Hotspot(n) => session
            .viewer()
            .shown_markers()
            .iter()
            .filter(|m| m.is_navigation())
            .nth(n)
            .map(|m| m.selection()),
        _ => None,
    }
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, w: &TourWiring) {
    let key = ev.key();
    let Some(action) = action_for_key(&key) else {
        return;
    };
    match action {
        KeyAction::ToggleHelp => {
            overlay::toggle_help(&w.document);
            ev.prevent_default();
        }
        KeyAction::ToggleFullscreen => {
            if let Some(s) = w.session.borrow().as_ref() {
                s.viewer().sphere().toggle_fullscreen();
            }
            ev.prevent_default();
        }
        KeyAction::ExitFullscreen => {
            if let Some(s) = w.session.borrow().as_ref() {
                s.viewer().sphere().exit_fullscreen();
            }
        }
        KeyAction::ReturnToStart | KeyAction::Hotspot(_) => {
            // borrow released before the session is mutated
            match selection_for(w, action) {
                Some(selection) => {
                    log::info!("[keys] {:?} -> {:?}", action, selection.target);
                    handle_selection(w, &selection);
                }
                None => log::debug!("[keys] {:?} has nothing to select", action),
            }
        }
    }
}

pub fn wire_global_keydown(w: &TourWiring) {
    if let Some(window) = web::window() {
        let w = w.clone();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &w);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
