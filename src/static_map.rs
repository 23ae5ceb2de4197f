//! Static map image URLs for a route geometry.

use reqwest::Url;

use crate::error::ConfigError;
use crate::polyline::EncodedPolyline;
use crate::route::Coordinate;

pub const DEFAULT_STATIC_MAP_URL: &str = "https://maps.googleapis.com/maps/api/staticmap";

#[derive(Debug, Clone)]
pub struct StaticMapConfig {
    pub base_url: Url,
    pub api_key: String,
    /// `<width>x<height>` in pixels.
    pub size: String,
    pub zoom: u8,
    pub maptype: String,
}

impl StaticMapConfig {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| ConfigError::invalid("GOOGLE_STATIC_MAPS_API", err.to_string()))?;

        Ok(Self {
            base_url,
            api_key: api_key.into(),
            size: "1600x1600".to_string(),
            zoom: 12,
            maptype: "roadmap".to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct StaticMap {
    config: StaticMapConfig,
    origin: Coordinate,
    destination: Coordinate,
}

impl StaticMap {
    pub fn new(config: StaticMapConfig, origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            config,
            origin,
            destination,
        }
    }

    /// Map with the route drawn, origin marked `H` and destination `O`.
    /// Without a polyline only the two markers are drawn.
    pub fn url_for(&self, polyline: Option<&EncodedPolyline>) -> Url {
        self.build(polyline, &self.config.api_key)
    }

    /// Same URL with the API key masked, for logs.
    pub fn redacted_url_for(&self, polyline: Option<&EncodedPolyline>) -> Url {
        self.build(polyline, "REDACTED")
    }

    fn build(&self, polyline: Option<&EncodedPolyline>, key: &str) -> Url {
        let mut url = self.config.base_url.clone();
        let mut query = url.query_pairs_mut();
        query
            .append_pair("size", &self.config.size)
            .append_pair("zoom", &self.config.zoom.to_string())
            .append_pair("maptype", &self.config.maptype);
        if let Some(polyline) = polyline {
            query.append_pair("path", &format!("enc:{}", polyline.as_str()));
        }
        query
            .append_pair("markers", &marker("blue", 'H', self.origin))
            .append_pair("markers", &marker("red", 'O', self.destination))
            .append_pair("key", key);
        drop(query);
        url
    }
}

fn marker(color: &str, label: char, at: Coordinate) -> String {
    format!(
        "color:{}|label:{}|{},{}",
        color, label, at.latitude, at.longitude
    )
}
