//! Wire types for the catalog provider's responses.

use serde::Deserialize;

/// A track as the catalog reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogTrack {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<CatalogArtist>,
    pub album: Option<CatalogAlbum>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub popularity: Option<i32>,
}

impl CatalogTrack {
    /// Artist names in catalog order.
    pub fn artist_names(&self) -> Vec<String> {
        self.artists.iter().map(|a| a.name.clone()).collect()
    }

    /// Album name, empty when the catalog omitted the album.
    pub fn album_name(&self) -> String {
        self.album.as_ref().map(|a| a.name.clone()).unwrap_or_default()
    }

    /// First (largest) album image URL, if any.
    pub fn album_image(&self) -> Option<String> {
        self.album
            .as_ref()
            .and_then(|a| a.images.first())
            .map(|i| i.url.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogAlbum {
    pub name: String,
    #[serde(default)]
    pub images: Vec<CatalogImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogImage {
    pub url: String,
    pub height: Option<i32>,
    pub width: Option<i32>,
}

/// One page of track search results.
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub items: Vec<CatalogTrack>,
    pub total: i64,
}

/// Raw search response envelope: `{"tracks": {"items": [...], "total": n}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub tracks: Option<TrackPage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackPage {
    #[serde(default)]
    pub items: Vec<CatalogTrack>,
    #[serde(default)]
    pub total: i64,
}

/// Raw chart response envelope: `{"items": [...]}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ChartResponse {
    #[serde(default)]
    pub items: Vec<CatalogTrack>,
}

/// Token endpoint response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_deserializes_from_catalog_json() {
        let json = r#"{
            "id": "4uLU6hMCjMI75M1A2tKUQC",
            "name": "Never Gonna Give You Up",
            "artists": [{"id": "0gxyHStUsqpMadRV0Di1Qt", "name": "Rick Astley"}],
            "album": {
                "name": "Whenever You Need Somebody",
                "images": [{"url": "https://img.example/640.jpg", "height": 640, "width": 640}]
            },
            "preview_url": null,
            "popularity": 81
        }"#;
        let track: CatalogTrack = serde_json::from_str(json).unwrap();
        assert_eq!(track.artist_names(), vec!["Rick Astley"]);
        assert_eq!(track.album_name(), "Whenever You Need Somebody");
        assert_eq!(track.album_image().as_deref(), Some("https://img.example/640.jpg"));
        assert_eq!(track.popularity, Some(81));
    }

    #[test]
    fn test_track_tolerates_missing_optional_fields() {
        let json = r#"{"id": "abc", "name": "Sparse"}"#;
        let track: CatalogTrack = serde_json::from_str(json).unwrap();
        assert!(track.artist_names().is_empty());
        assert_eq!(track.album_name(), "");
        assert_eq!(track.album_image(), None);
    }
}
