use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A grouping of ranked items (movies, books, ramen shops, ...)
///
/// `display_order` drives presentation order, ascending. Ties keep the
/// store-assigned order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    pub icon: String,
    #[serde(default)]
    pub display_order: i32,
}

impl Category {
    /// Placeholder substituted when an item's category is missing from the
    /// lookup set. Join results never drop a base record over a broken key.
    pub fn fallback() -> Self {
        Self {
            id: 0,
            name: "unknown".to_string(),
            name_en: None,
            icon: "📋".to_string(),
            display_order: i32::MAX,
        }
    }
}

/// A store-owned ranking list entry. `rank` is 1 = best and unique within a
/// category in well-formed data, but duplicates and gaps are tolerated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankingItem {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    pub rank: u32,
    pub category_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A user-owned ranking entry from the later data model. `category` is a
/// denormalized free-text label, not a foreign key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Favorite {
    /// Missing titles mark a malformed record; aggregation skips them.
    #[serde(default)]
    pub title: Option<String>,
    pub slot: u32,
    #[serde(default)]
    pub category: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// User profile. `is_public` gates every cross-user aggregation: favorites
/// whose owner is missing or private are excluded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: String,
    pub handle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

/// One row of the cross-user popularity ranking (derived, never persisted)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopularityEntry {
    /// 1-based position in the truncated result
    pub rank: u32,
    pub title: String,
    pub category: String,
    pub count: usize,
}

/// A digest candidate: a rank-1 item enriched with its category display pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DigestPick {
    pub title: String,
    #[serde(rename = "categoryName")]
    pub category_name: String,
    #[serde(rename = "categoryIcon")]
    pub category_icon: String,
}

/// One favorite-search result row, joined to the owner's public display fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteSearchHit {
    pub title: String,
    pub slot: u32,
    pub category: String,
    pub handle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

// ============================================================================
// TMDb API Types
// ============================================================================

/// Raw movie entry from the TMDb search response
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub overview: Option<String>,
}

/// Movie metadata returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    pub poster_url: Option<String>,
    pub release_year: Option<String>,
    pub rating: Option<f64>,
    pub overview: Option<String>,
}

impl From<TmdbMovie> for MovieSummary {
    fn from(movie: TmdbMovie) -> Self {
        let poster_url = movie
            .poster_path
            .map(|path| format!("https://image.tmdb.org/t/p/w500{}", path));

        // TMDb dates are YYYY-MM-DD; the year prefix is all we surface
        let release_year = movie
            .release_date
            .filter(|d| d.len() >= 4)
            .map(|d| d[..4].to_string());

        MovieSummary {
            id: movie.id,
            title: movie.title,
            poster_url,
            release_year,
            rating: movie.vote_average,
            overview: movie.overview,
        }
    }
}
