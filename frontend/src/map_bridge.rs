//! Bindings to `assets/map_bridge.js`, which owns the Leaflet map.

use coastal_shared::sites::{CoastalSite, COASTAL_SITES, SITE_ZOOM};
use coastal_shared::BoundingBox;
use wasm_bindgen::prelude::*;
use yew::html::Scope;

use crate::{Model, Msg};

pub const MAP_CONTAINER_ID: &str = "coastal-map";

const INITIAL_CENTER: (f64, f64) = (20.5937, 78.9629);
const INITIAL_ZOOM: u8 = 5;

#[wasm_bindgen(module = "/assets/map_bridge.js")]
extern "C" {
    #[wasm_bindgen(js_name = initMap)]
    fn init_map(
        container_id: &str,
        lat: f64,
        lon: f64,
        zoom: u8,
        on_bounds: &Closure<dyn Fn(f64, f64, f64, f64)>,
    );

    #[wasm_bindgen(js_name = addSiteMarkers)]
    fn add_site_markers(sites_json: &str, on_select: &Closure<dyn Fn(String)>);

    #[wasm_bindgen(js_name = flyTo)]
    fn fly_to_js(lat: f64, lon: f64, zoom: u8);

    #[wasm_bindgen(js_name = showMask)]
    fn show_mask_js(url: &str, south: f64, west: f64, north: f64, east: f64);

    #[wasm_bindgen(js_name = clearMask)]
    pub fn clear_mask();
}

/// Keeps the JS callbacks alive for as long as the map exists.
pub struct MapHandle {
    _on_bounds: Closure<dyn Fn(f64, f64, f64, f64)>,
    _on_select: Closure<dyn Fn(String)>,
}

pub fn mount(link: &Scope<Model>) -> MapHandle {
    let bounds_link = link.clone();
    let on_bounds = Closure::<dyn Fn(f64, f64, f64, f64)>::new(move |south, west, north, east| {
        bounds_link.send_message(Msg::BoundsChanged(BoundingBox::new(south, west, north, east)));
    });

    let select_link = link.clone();
    let on_select = Closure::<dyn Fn(String)>::new(move |name: String| {
        select_link.send_message(Msg::SelectSite(name));
    });

    init_map(
        MAP_CONTAINER_ID,
        INITIAL_CENTER.0,
        INITIAL_CENTER.1,
        INITIAL_ZOOM,
        &on_bounds,
    );
    match serde_json::to_string(&COASTAL_SITES[..]) {
        Ok(sites_json) => add_site_markers(&sites_json, &on_select),
        Err(e) => log::warn!("Could not serialize site markers: {}", e),
    }

    MapHandle {
        _on_bounds: on_bounds,
        _on_select: on_select,
    }
}

pub fn fly_to(site: &CoastalSite) {
    fly_to_js(site.lat, site.lon, SITE_ZOOM);
}

pub fn show_mask(url: &str, bbox: BoundingBox) {
    show_mask_js(url, bbox.south, bbox.west, bbox.north, bbox.east);
}
