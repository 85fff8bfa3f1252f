use crate::caption;
use crate::constants::{CAPTION_ID, HELP_OVERLAY_ID, TITLE_ID};
use crate::dom;
use tour_core::Room;
use web_sys as web;

pub fn set_title(document: &web::Document, title: &str) {
    dom::set_text(document, TITLE_ID, title);
    document.set_title(title);
}

/// Update the room label shown above the viewer
pub fn set_caption(document: &web::Document, room: &Room) {
    let html = caption::caption_html(room.label(), room.description.as_deref());
    dom::set_inner_html(document, CAPTION_ID, &html);
}

pub fn show_error(document: &web::Document, message: &str) {
    dom::set_inner_html(document, CAPTION_ID, &caption::error_html(message));
}

/// Show or hide the shortcut list; `index.html` styles `.hidden`.
pub fn toggle_help(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HELP_OVERLAY_ID) {
        _ = el.class_list().toggle("hidden");
    }
}
