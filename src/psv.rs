//! Bindings to Photo Sphere Viewer and its markers plugin, plus the `Viewer`
//! implementation the tour session drives.
//!
//! The viewer is loaded by the host page as UMD bundles that register under
//! the `PhotoSphereViewer` global; nothing here renders on its own.

use crate::constants::{
    DEFAULT_MARKER_HTML, MARKERS_PLUGIN_CLASS, PSV_NAMESPACE, VIEWER_CONTAINER_ID, VIEWER_HEIGHT,
    VIEWER_WIDTH,
};
use crate::overlay;
use std::time::Duration;
use tour_core::{Marker, MarkerConfig, Room, Viewer};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = PhotoSphereViewer, js_name = Viewer)]
    #[derive(Clone)]
    pub type PhotoSphere;

    #[wasm_bindgen(catch, constructor, js_namespace = PhotoSphereViewer, js_class = "Viewer")]
    pub fn new(config: &JsValue) -> Result<PhotoSphere, JsValue>;

    #[wasm_bindgen(method, js_name = getPlugin)]
    pub fn get_plugin(this: &PhotoSphere, plugin: &JsValue) -> JsValue;

    #[wasm_bindgen(method, js_name = setPanorama)]
    pub fn set_panorama(this: &PhotoSphere, path: &str, options: &JsValue) -> js_sys::Promise;

    #[wasm_bindgen(method, js_name = addEventListener)]
    pub fn add_listener(this: &PhotoSphere, event: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method, js_name = toggleFullscreen)]
    pub fn toggle_fullscreen(this: &PhotoSphere);

    #[wasm_bindgen(method, js_name = exitFullscreen)]
    pub fn exit_fullscreen(this: &PhotoSphere);

    #[wasm_bindgen(method)]
    pub fn destroy(this: &PhotoSphere);

    #[derive(Clone)]
    pub type MarkersPlugin;

    #[wasm_bindgen(method, js_name = setMarkers)]
    pub fn set_markers(this: &MarkersPlugin, markers: &JsValue);

    #[wasm_bindgen(method, js_name = addEventListener)]
    pub fn add_marker_listener(this: &MarkersPlugin, event: &str, listener: &js_sys::Function);
}

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// `PhotoSphereViewer.MarkersPlugin`, the class handed to `plugins` and `getPlugin`.
pub fn markers_plugin_class() -> anyhow::Result<JsValue> {
    let namespace = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(PSV_NAMESPACE))
        .map_err(js_err)?;
    if namespace.is_undefined() {
        anyhow::bail!("`{}` global not found; is the viewer bundle loaded?", PSV_NAMESPACE);
    }
    let class = js_sys::Reflect::get(&namespace, &JsValue::from_str(MARKERS_PLUGIN_CLASS))
        .map_err(js_err)?;
    if !class.is_function() {
        anyhow::bail!("`{}.{}` is not loaded", PSV_NAMESPACE, MARKERS_PLUGIN_CLASS);
    }
    Ok(class)
}

/// `getPlugin` result, or `None` when the plugin was not installed.
pub fn find_markers_plugin(sphere: &PhotoSphere, class: &JsValue) -> Option<MarkersPlugin> {
    let plugin = sphere.get_plugin(class);
    if plugin.is_undefined() || plugin.is_null() {
        None
    } else {
        Some(plugin.unchecked_into())
    }
}

/// Marker list in the plugin's config shape.
pub fn markers_to_js(markers: &[Marker]) -> anyhow::Result<JsValue> {
    let configs: Vec<MarkerConfig> = markers
        .iter()
        .map(|m| {
            let mut c = MarkerConfig::from(m);
            if c.image.is_none() && c.html.is_none() {
                c.html = Some(DEFAULT_MARKER_HTML.to_string());
            }
            c
        })
        .collect();
    let text = serde_json::to_string(&configs)?;
    js_sys::JSON::parse(&text).map_err(js_err)
}

/// Build the viewer for `room`, with the markers plugin preloaded with its hotspots.
pub fn create_viewer(room: &Room) -> anyhow::Result<PhotoSphere> {
    let config = serde_json::json!({
        "container": VIEWER_CONTAINER_ID,
        "panorama": room.image,
        "width": VIEWER_WIDTH,
        "height": VIEWER_HEIGHT,
    });
    let config = js_sys::JSON::parse(&config.to_string()).map_err(js_err)?;

    let plugin_options = js_sys::Object::new();
    js_sys::Reflect::set(
        &plugin_options,
        &JsValue::from_str("markers"),
        &markers_to_js(&room.markers)?,
    )
    .map_err(js_err)?;
    let plugin_entry = js_sys::Array::of2(&markers_plugin_class()?, &plugin_options);
    js_sys::Reflect::set(
        &config,
        &JsValue::from_str("plugins"),
        &js_sys::Array::of1(&plugin_entry),
    )
    .map_err(js_err)?;

    log::info!("[viewer] creating viewer on #{} with `{}`", VIEWER_CONTAINER_ID, room.image);
    PhotoSphere::new(&config).map_err(js_err)
}

/// Live viewer instance as seen by the tour session.
pub struct PanoramaView {
    sphere: PhotoSphere,
    markers: MarkersPlugin,
    document: web::Document,
    shown_image: Option<String>,
    shown_markers: Vec<Marker>,
}

impl PanoramaView {
    /// `loaded_image` is the panorama the viewer was constructed with.
    pub fn new(
        sphere: PhotoSphere,
        markers: MarkersPlugin,
        document: web::Document,
        loaded_image: &str,
    ) -> Self {
        Self {
            sphere,
            markers,
            document,
            shown_image: Some(loaded_image.to_string()),
            shown_markers: Vec::new(),
        }
    }

    pub fn sphere(&self) -> &PhotoSphere {
        &self.sphere
    }

    /// Markers currently drawn, which lag the current room during a transition.
    pub fn shown_markers(&self) -> &[Marker] {
        &self.shown_markers
    }
}

impl Viewer for PanoramaView {
    fn set_caption(&mut self, room: &Room) {
        overlay::set_caption(&self.document, room);
    }

    fn show_panorama(&mut self, room: &Room, transition: Duration) {
        if self.shown_image.as_deref() == Some(room.image.as_str()) {
            return;
        }
        let options = js_sys::Object::new();
        let ms = transition.as_millis() as f64;
        _ = js_sys::Reflect::set(
            &options,
            &JsValue::from_str("transition"),
            &JsValue::from_f64(ms),
        );
        let promise = self.sphere.set_panorama(&room.image, &options);
        let image = room.image.clone();
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::error!("[viewer] failed to load `{}`: {:?}", image, e);
            }
        });
        self.shown_image = Some(room.image.clone());
    }

    fn replace_markers(&mut self, markers: &[Marker]) {
        match markers_to_js(markers) {
            Ok(list) => {
                self.markers.set_markers(&list);
                self.shown_markers = markers.to_vec();
            }
            Err(e) => log::error!("[viewer] cannot convert markers: {:?}", e),
        }
    }
}
