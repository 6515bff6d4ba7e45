//! Data structures and types for Digitalflix
//!
//! Contains all shared models used across the application organized by domain:
//! - **Catalog**: catalog entries and partial updates for the REST resource
//! - **Navigation**: watch-screen parameters and trailer selection
//! - **Profile**: the signed-in user's profile and watch history

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Catalog Models
// =============================================================================

/// Genres offered by the admin form
pub const GENRES: &[&str] = &[
    "Action",
    "Romance",
    "Science Fiction",
    "Horror",
    "Comedy",
    "Drama",
    "Fantasy",
    "Thriller",
    "Adventure",
    "Documentary",
];

/// One entry of the streaming catalog
///
/// Field names on the wire follow the `/api/movies` resource
/// (`image`, `year`, `trailerUrl`, `videoUrl`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Server-assigned identifier, absent until created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub title: String,
    pub genre: String,
    /// Rating on a 0-10 scale
    pub rating: f32,
    #[serde(rename = "image")]
    pub image_url: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "year", default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<u16>,
    #[serde(rename = "trailerUrl", default, skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
    #[serde(rename = "videoUrl", default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl CatalogItem {
    /// Create an unsaved item with the required fields
    pub fn new(
        title: impl Into<String>,
        genre: impl Into<String>,
        rating: f32,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            genre: genre.into(),
            rating,
            image_url: image_url.into(),
            featured: false,
            description: None,
            release_year: None,
            trailer_url: None,
            video_url: None,
        }
    }

    /// Case-insensitive match against title or genre
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&term) || self.genre.to_lowercase().contains(&term)
    }

    /// Trailer selection for this item, if it has a trailer
    pub fn trailer(&self) -> Option<TrailerSelection> {
        self.trailer_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .map(|url| TrailerSelection::new(url, &self.title))
    }

    /// Navigation parameters for watching this item
    pub fn watch_params(&self) -> WatchParams {
        WatchParams {
            id: self.id.map(|id| id.to_string()),
            title: self.title.clone(),
            video_url: self.video_url.clone().filter(|u| !u.trim().is_empty()),
        }
    }
}

impl fmt::Display for CatalogItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self
            .release_year
            .map(|y| format!(" ({})", y))
            .unwrap_or_default();
        write!(f, "{}{} [{}] ★ {:.1}", self.title, year_str, self.genre, self.rating)
    }
}

/// Filter items by a search term over title and genre
pub fn filter_items<'a>(items: &'a [CatalogItem], term: &str) -> Vec<&'a CatalogItem> {
    items.iter().filter(|item| item.matches(term)).collect()
}

/// Partial update for a catalog item
///
/// Absent fields are left out of the request body entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(rename = "image", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "year", skip_serializing_if = "Option::is_none")]
    pub release_year: Option<u16>,
    #[serde(rename = "trailerUrl", skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
    #[serde(rename = "videoUrl", skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl CatalogPatch {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<&CatalogItem> for CatalogPatch {
    /// Full replacement patch carrying every field of `item`
    fn from(item: &CatalogItem) -> Self {
        Self {
            title: Some(item.title.clone()),
            genre: Some(item.genre.clone()),
            rating: Some(item.rating),
            image_url: Some(item.image_url.clone()),
            featured: Some(item.featured),
            description: item.description.clone(),
            release_year: item.release_year,
            trailer_url: item.trailer_url.clone(),
            video_url: item.video_url.clone(),
        }
    }
}

// =============================================================================
// Navigation Models
// =============================================================================

/// Trailer chosen for the modal player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailerSelection {
    pub video_url: String,
    pub display_title: String,
}

impl TrailerSelection {
    pub fn new(video_url: impl Into<String>, display_title: impl Into<String>) -> Self {
        Self {
            video_url: video_url.into(),
            display_title: display_title.into(),
        }
    }
}

/// Default title when the watch screen is opened without one
pub const DEFAULT_WATCH_TITLE: &str = "Movie";

/// Parameters of the watch screen, as carried in a URL query string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default = "default_watch_title")]
    pub title: String,
    #[serde(rename = "videoUrl", default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

fn default_watch_title() -> String {
    DEFAULT_WATCH_TITLE.to_string()
}

impl Default for WatchParams {
    fn default() -> Self {
        Self {
            id: None,
            title: default_watch_title(),
            video_url: None,
        }
    }
}

impl WatchParams {
    /// Parse from a query string like `id=1&title=Foo&videoUrl=...`
    ///
    /// A leading `?` is accepted. Empty `title` and `videoUrl` values are
    /// treated as absent.
    pub fn from_query(query: &str) -> Result<Self, serde_urlencoded::de::Error> {
        let query = query.trim().trim_start_matches('?');
        let mut params: WatchParams = serde_urlencoded::from_str(query)?;
        if params.title.trim().is_empty() {
            params.title = default_watch_title();
        }
        params.video_url = params.video_url.filter(|u| !u.trim().is_empty());
        params.id = params.id.filter(|id| !id.trim().is_empty());
        Ok(params)
    }

    /// Render back to a query string
    pub fn to_query(&self) -> String {
        serde_urlencoded::to_string(self).unwrap_or_default()
    }
}

// =============================================================================
// Profile Models
// =============================================================================

/// Signed-in user's profile (in-memory only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub bio: String,
    pub plan: String,
    pub join_date: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "John Silva".into(),
            email: "john@email.com".into(),
            phone: "(11) 99999-9999".into(),
            bio: "Fan of action and science fiction movies".into(),
            plan: "Premium".into(),
            join_date: "January 2024".into(),
        }
    }
}

/// One finished watch session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchHistoryEntry {
    pub title: String,
    pub progress_percent: u8,
}

/// Maximum number of recently watched entries kept
pub const WATCH_HISTORY_LIMIT: usize = 10;

/// Record a session in history: newest first, one entry per title
pub fn record_watch(history: &mut Vec<WatchHistoryEntry>, entry: WatchHistoryEntry) {
    history.retain(|e| e.title != entry.title);
    history.insert(0, entry);
    history.truncate(WATCH_HISTORY_LIMIT);
}
