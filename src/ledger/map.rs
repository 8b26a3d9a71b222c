//! Farm map view and batch lookup locations.

use serde::Serialize;

const MAPBOX_STATIC: &str = "https://api.mapbox.com/styles/v1/mapbox/streets-v11/static";
const OSM_EMBED: &str = "https://www.openstreetmap.org/export/embed.html";
const BBOX_DELTA: f64 = 0.01;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    /// Only present when a Mapbox token is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_image_url: Option<String>,
    pub embed_url: String,
}

pub fn farm_map(
    latitude: f64,
    longitude: f64,
    address: &str,
    mapbox_token: Option<&str>,
) -> MapView {
    let static_image_url = mapbox_token.filter(|t| !t.is_empty()).map(|token| {
        format!(
            "{MAPBOX_STATIC}/pin-s-l+000({longitude},{latitude})/{longitude},{latitude},13/300x200?access_token={}",
            urlencoding::encode(token)
        )
    });

    let embed_url = format!(
        "{OSM_EMBED}?bbox={:.6},{:.6},{:.6},{:.6}&layer=mapnik&marker={latitude},{longitude}",
        longitude - BBOX_DELTA,
        latitude - BBOX_DELTA,
        longitude + BBOX_DELTA,
        latitude + BBOX_DELTA,
    );

    MapView {
        latitude,
        longitude,
        address: address.to_string(),
        static_image_url,
        embed_url,
    }
}

/// Transactions page location for a scanned or typed batch id
pub fn lookup_location(batch_id: &str) -> String {
    format!("/transactions?batchId={}", urlencoding::encode(batch_id))
}
