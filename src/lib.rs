#![cfg(target_arch = "wasm32")]
use tour_core::{NavigationController, TourConfig, TourError, TourSession};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod caption;
mod constants;
mod dom;
mod events;
mod overlay;
mod psv;
mod timer;

use constants::{READY_EVENT, TOUR_CONFIG_ID};

/// Inline `<script id="tour-config">` wins over the bundled apartment.
fn load_tour(document: &web::Document) -> anyhow::Result<TourConfig> {
    match dom::script_text(document, TOUR_CONFIG_ID) {
        Some(text) => {
            log::info!("[tour] using inline #{}", TOUR_CONFIG_ID);
            Ok(TourConfig::from_json(&text)?)
        }
        None => Ok(TourConfig::apartment()?),
    }
}

// Runs once the viewer reports ready: find the markers plugin and mount the session.
fn on_ready(
    controller: NavigationController,
    sphere: psv::PhotoSphere,
    document: web::Document,
) -> anyhow::Result<()> {
    let class = psv::markers_plugin_class()?;
    let plugin = psv::find_markers_plugin(&sphere, &class).ok_or(TourError::MarkersPluginMissing)?;

    let loaded_image = controller.current().image.clone();
    let view = psv::PanoramaView::new(sphere, plugin.clone(), document.clone(), &loaded_image);
    let session = TourSession::mount(controller, view);

    let wiring = events::TourWiring::new(session, document);
    events::wire_all(&wiring, &plugin);
    log::info!("[tour] ready");
    Ok(())
}

fn wire_ready(sphere: &psv::PhotoSphere, controller: NavigationController, document: web::Document) {
    let mut parts = Some((controller, sphere.clone(), document));
    let closure = Closure::wrap(Box::new(move || {
        let Some((controller, sphere, document)) = parts.take() else {
            return;
        };
        if let Err(e) = on_ready(controller, sphere, document.clone()) {
            log::error!("ready error: {:?}", e);
            overlay::show_error(&document, &format!("{e:#}"));
        }
    }) as Box<dyn FnMut()>);
    sphere.add_listener(READY_EVENT, closure.as_ref().unchecked_ref());
    closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tour-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
            if let Some(document) = dom::window_document() {
                overlay::show_error(&document, &format!("{e:#}"));
            }
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    if document.get_element_by_id(constants::VIEWER_CONTAINER_ID).is_none() {
        anyhow::bail!("missing #{}", constants::VIEWER_CONTAINER_ID);
    }

    let config = load_tour(&document)?;
    let controller = config.build_controller()?;
    if let Some(title) = &config.title {
        overlay::set_title(&document, title);
    }
    overlay::set_caption(&document, controller.current());

    let sphere = psv::create_viewer(controller.current())?;
    wire_ready(&sphere, controller, document);
    Ok(())
}
