use serde::{Deserialize, Serialize};

/// An uploaded image or logo as returned by the content API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub url: String,
    #[serde(default)]
    pub alternative_text: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub formats: Option<MediaFormats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaFormats {
    #[serde(default)]
    pub thumbnail: Option<MediaFormat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaFormat {
    pub url: String,
}

impl Media {
    pub fn resolve(&mut self, base: &str) {
        self.url = resolve_media_url(base, &self.url);
        if let Some(thumb) = self.formats.as_mut().and_then(|f| f.thumbnail.as_mut()) {
            thumb.url = resolve_media_url(base, &thumb.url);
        }
    }
}

/// Prefixes `base` onto a relative upload path. Absolute URLs pass through.
pub fn resolve_media_url(base: &str, url: &str) -> String {
    if url.starts_with("http") {
        return url.to_string();
    }
    let base = base.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{base}{url}")
    } else {
        format!("{base}/{url}")
    }
}
