/// External collaborator abstractions
///
/// The core aggregation and rendering logic consumes already-fetched record
/// sets; these traits mark the boundary to everything that actually does
/// network I/O: the Supabase record store, the LINE push channel, the trivia
/// and analysis text generator, and the TMDb movie lookup. Routes hold them
/// as trait objects so tests can swap in fakes.
use crate::{
    error::AppResult,
    models::{Category, Favorite, MovieSummary, Profile, RankingItem},
};

pub mod anthropic;
pub mod line;
pub mod supabase;
pub mod tmdb;

/// Read access to the backing record store
///
/// Every method returns a point-in-time snapshot; the core never sees a
/// partially fetched set. Absence is an empty Vec, not an error, except for
/// the single-category lookup where `None` means not found.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// All categories in display order
    async fn categories(&self) -> AppResult<Vec<Category>>;

    /// A single category by id
    async fn category(&self, id: i64) -> AppResult<Option<Category>>;

    /// Items of one category, best rank first
    async fn items_for_category(&self, category_id: i64) -> AppResult<Vec<RankingItem>>;

    /// Every ranking item across all categories, best rank first
    async fn all_items(&self) -> AppResult<Vec<RankingItem>>;

    /// Items holding the top rank of their category
    async fn top_items(&self) -> AppResult<Vec<RankingItem>>;

    /// All user favorites
    async fn favorites(&self) -> AppResult<Vec<Favorite>>;

    /// Profiles explicitly marked public
    async fn public_profiles(&self) -> AppResult<Vec<Profile>>;

    /// Favorites matching a free-text title query and optional slot
    async fn search_favorites(&self, query: &str, slot: Option<u32>)
        -> AppResult<Vec<Favorite>>;
}

/// Produces the trivia and analysis text consumed as opaque annotations
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> AppResult<String>;
}

/// Push-notification delivery channel
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn push(&self, to: &str, message: &str) -> AppResult<()>;
}

/// Movie metadata lookup
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieSearcher: Send + Sync {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<MovieSummary>>;
}
