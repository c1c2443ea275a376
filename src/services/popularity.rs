use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use crate::{
    error::{AppError, AppResult},
    models::{Category, DigestPick, Favorite, FavoriteSearchHit, PopularityEntry, Profile, RankingItem},
    services::join,
};

/// How many entries the cross-user popularity ranking keeps
pub const POPULARITY_LIMIT: usize = 10;

/// Builds the digest candidate pool from rank-1 items.
///
/// The caller supplies items already filtered to the top rank; if a category
/// somehow holds several rank-1 items, all of them enter the pool. Each item
/// is joined to its category display pair, falling back to the `"unknown"`
/// placeholder when the category is missing. Items with an empty or
/// whitespace-only title are dropped. An empty pool is terminal for the
/// digest flow.
pub fn digest_pool(items: &[RankingItem], categories: &[Category]) -> AppResult<Vec<DigestPick>> {
    let fallback = Category::fallback();

    let pool: Vec<DigestPick> = join::enrich(
        items,
        categories,
        |item| item.category_id,
        |cat| cat.id,
        &fallback,
        |item, cat| DigestPick {
            title: item.title.clone(),
            category_name: cat.name.clone(),
            category_icon: cat.icon.clone(),
        },
    )
    .into_iter()
    .filter(|pick| !pick.title.trim().is_empty())
    .collect();

    if pool.is_empty() {
        return Err(AppError::EmptyPool(
            "ランキングデータが見つかりません".to_string(),
        ));
    }

    Ok(pool)
}

struct TitleGroup {
    title: String,
    category: String,
    count: usize,
}

/// Ranks the most popular favorite titles across public users.
///
/// Favorites owned by a missing or private profile are discarded. Titles
/// group under a trimmed, case-folded key; the first record seen for a key
/// supplies the display title and category. Groups sort by count descending
/// (stable, so equal counts keep first-seen order), truncate to `limit`, and
/// re-rank 1..=N. Records without a title are skipped, never fatal. Zero
/// eligible records yield an empty list, not an error.
pub fn rank_popular(
    favorites: &[Favorite],
    public_ids: &HashSet<String>,
    limit: usize,
) -> Vec<PopularityEntry> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<TitleGroup> = Vec::new();

    for favorite in favorites {
        if !public_ids.contains(&favorite.user_id) {
            continue;
        }
        let Some(title) = favorite.title.as_deref() else {
            continue;
        };

        let key = title.trim().to_lowercase();
        match index.get(&key) {
            Some(&slot) => groups[slot].count += 1,
            None => {
                index.insert(key, groups.len());
                groups.push(TitleGroup {
                    title: title.to_string(),
                    category: favorite.category.clone(),
                    count: 1,
                });
            }
        }
    }

    groups.sort_by_key(|group| Reverse(group.count));

    groups
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(position, group)| PopularityEntry {
            rank: position as u32 + 1,
            title: group.title,
            category: group.category,
            count: group.count,
        })
        .collect()
}

/// Joins a caller-prefiltered favorite subset to owner display fields.
///
/// Same pipeline as the popularity ranking up to the privacy gate: favorites
/// of missing or private owners are excluded, then each survivor is joined to
/// its profile's handle and display name. An optional exact slot match
/// narrows the result. Empty input is an empty result, never an error.
pub fn search_hits(
    favorites: &[Favorite],
    profiles: &[Profile],
    slot: Option<u32>,
) -> Vec<FavoriteSearchHit> {
    let public: HashSet<&str> = profiles
        .iter()
        .filter(|p| p.is_public)
        .map(|p| p.id.as_str())
        .collect();

    let eligible: Vec<Favorite> = favorites
        .iter()
        .filter(|f| public.contains(f.user_id.as_str()))
        .filter(|f| f.title.is_some())
        .filter(|f| slot.map_or(true, |wanted| f.slot == wanted))
        .cloned()
        .collect();

    let fallback = Profile {
        id: String::new(),
        handle: "unknown".to_string(),
        display_name: None,
        is_public: false,
    };

    join::enrich(
        &eligible,
        profiles,
        |f| f.user_id.clone(),
        |p| p.id.clone(),
        &fallback,
        |favorite, profile| FavoriteSearchHit {
            title: favorite.title.clone().unwrap_or_default(),
            slot: favorite.slot,
            category: favorite.category.clone(),
            handle: profile.handle.clone(),
            display_name: profile.display_name.clone(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: i64, name: &str, icon: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            name_en: None,
            icon: icon.to_string(),
            display_order: 0,
        }
    }

    fn item(title: &str, rank: u32, category_id: i64) -> RankingItem {
        RankingItem {
            id: 0,
            title: title.to_string(),
            title_en: None,
            rank,
            category_id,
            created_at: None,
        }
    }

    fn favorite(title: Option<&str>, slot: u32, category: &str, user_id: &str) -> Favorite {
        Favorite {
            title: title.map(|t| t.to_string()),
            slot,
            category: category.to_string(),
            user_id: user_id.to_string(),
            created_at: None,
        }
    }

    fn profile(id: &str, handle: &str, is_public: bool) -> Profile {
        Profile {
            id: id.to_string(),
            handle: handle.to_string(),
            display_name: None,
            is_public,
        }
    }

    fn public_ids(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_digest_pool_joins_category_display_pair() {
        let categories = vec![category(1, "Movies", "🎬")];
        let items = vec![item("Dune", 1, 1)];

        let pool = digest_pool(&items, &categories).unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].title, "Dune");
        assert_eq!(pool[0].category_name, "Movies");
        assert_eq!(pool[0].category_icon, "🎬");
    }

    #[test]
    fn test_digest_pool_falls_back_on_missing_category() {
        let items = vec![item("Dune", 1, 42)];

        let pool = digest_pool(&items, &[]).unwrap();
        assert_eq!(pool[0].category_name, "unknown");
        assert_eq!(pool[0].category_icon, "📋");
    }

    #[test]
    fn test_digest_pool_drops_blank_titles() {
        let categories = vec![category(1, "Movies", "🎬")];
        let items = vec![item("", 1, 1), item("   ", 1, 1), item("Dune", 1, 1)];

        let pool = digest_pool(&items, &categories).unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].title, "Dune");
    }

    #[test]
    fn test_digest_pool_empty_is_terminal() {
        let categories = vec![category(1, "Movies", "🎬")];
        let items = vec![item("", 1, 1)];

        let err = digest_pool(&items, &categories).unwrap_err();
        assert!(matches!(err, AppError::EmptyPool(_)));
    }

    #[test]
    fn test_digest_pool_keeps_duplicate_rank_one_items() {
        // Two rank-1 items in the same category both enter the pool; intent
        // in the data is unclear, so nothing deduplicates here.
        let categories = vec![category(1, "Movies", "🎬")];
        let items = vec![item("Dune", 1, 1), item("Arrival", 1, 1)];

        let pool = digest_pool(&items, &categories).unwrap();
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_rank_popular_counts_case_insensitive_trimmed() {
        let favorites = vec![
            favorite(Some("Foo "), 1, "Movies", "u1"),
            favorite(Some("foo"), 2, "Movies", "u2"),
        ];

        let ranked = rank_popular(&favorites, &public_ids(&["u1", "u2"]), POPULARITY_LIMIT);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].count, 2);
        // First-seen record supplies the display title, untouched
        assert_eq!(ranked[0].title, "Foo ");
        assert_eq!(ranked[0].rank, 1);
    }

    #[test]
    fn test_rank_popular_excludes_private_and_unknown_users() {
        let favorites = vec![
            favorite(Some("Dune"), 1, "Movies", "public"),
            favorite(Some("Dune"), 1, "Movies", "private"),
            favorite(Some("Dune"), 1, "Movies", "ghost"),
        ];

        let ranked = rank_popular(&favorites, &public_ids(&["public"]), POPULARITY_LIMIT);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].count, 1);
    }

    #[test]
    fn test_rank_popular_skips_missing_titles() {
        let favorites = vec![
            favorite(None, 1, "Movies", "u1"),
            favorite(Some("Dune"), 2, "Movies", "u1"),
        ];

        let ranked = rank_popular(&favorites, &public_ids(&["u1"]), POPULARITY_LIMIT);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].title, "Dune");
    }

    #[test]
    fn test_rank_popular_sorted_by_count_then_first_seen() {
        let favorites = vec![
            favorite(Some("B"), 1, "Movies", "u1"),
            favorite(Some("A"), 1, "Movies", "u1"),
            favorite(Some("A"), 1, "Movies", "u2"),
            favorite(Some("C"), 1, "Movies", "u2"),
        ];

        let ranked = rank_popular(&favorites, &public_ids(&["u1", "u2"]), POPULARITY_LIMIT);
        let titles: Vec<&str> = ranked.iter().map(|e| e.title.as_str()).collect();
        // A has count 2; B and C tie at 1 and keep first-seen order
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert_eq!(ranked[0].count, 2);
        assert_eq!(ranked[1].rank, 2);
        assert_eq!(ranked[2].rank, 3);
    }

    #[test]
    fn test_rank_popular_truncates_and_reranks() {
        let favorites: Vec<Favorite> = (0..15)
            .map(|i| favorite(Some(&format!("title-{}", i)), 1, "Movies", "u1"))
            .collect();

        let ranked = rank_popular(&favorites, &public_ids(&["u1"]), POPULARITY_LIMIT);
        assert_eq!(ranked.len(), POPULARITY_LIMIT);
        let positions: Vec<u32> = ranked.iter().map(|e| e.rank).collect();
        assert_eq!(positions, (1..=10).collect::<Vec<u32>>());
    }

    #[test]
    fn test_rank_popular_count_sum_matches_eligible_records() {
        let favorites = vec![
            favorite(Some("A"), 1, "Movies", "u1"),
            favorite(Some("a"), 1, "Movies", "u2"),
            favorite(Some("B"), 1, "Movies", "u1"),
            favorite(Some("C"), 1, "Movies", "hidden"),
            favorite(None, 1, "Movies", "u1"),
        ];

        let ranked = rank_popular(&favorites, &public_ids(&["u1", "u2"]), POPULARITY_LIMIT);
        let total: usize = ranked.iter().map(|e| e.count).sum();
        // 3 eligible records: hidden user and the missing title don't count
        assert_eq!(total, 3);
    }

    #[test]
    fn test_rank_popular_order_insensitive_for_unique_counts() {
        let favorites = vec![
            favorite(Some("A"), 1, "Movies", "u1"),
            favorite(Some("A"), 1, "Movies", "u2"),
            favorite(Some("A"), 1, "Movies", "u3"),
            favorite(Some("B"), 1, "Movies", "u1"),
            favorite(Some("B"), 1, "Movies", "u2"),
            favorite(Some("C"), 1, "Movies", "u3"),
        ];
        let users = public_ids(&["u1", "u2", "u3"]);

        let forward = rank_popular(&favorites, &users, POPULARITY_LIMIT);
        let mut reversed_input = favorites.clone();
        reversed_input.reverse();
        let reversed = rank_popular(&reversed_input, &users, POPULARITY_LIMIT);

        let order = |entries: &[PopularityEntry]| {
            entries
                .iter()
                .map(|e| (e.title.clone(), e.count))
                .collect::<Vec<_>>()
        };
        assert_eq!(order(&forward), order(&reversed));
    }

    #[test]
    fn test_rank_popular_empty_input_is_empty_result() {
        let ranked = rank_popular(&[], &public_ids(&["u1"]), POPULARITY_LIMIT);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_search_hits_filters_private_owners_and_joins_handles() {
        let favorites = vec![
            favorite(Some("Dune"), 1, "Movies", "u1"),
            favorite(Some("Dune"), 1, "Movies", "u2"),
        ];
        let profiles = vec![profile("u1", "alice", true), profile("u2", "bob", false)];

        let hits = search_hits(&favorites, &profiles, None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].handle, "alice");
        assert_eq!(hits[0].title, "Dune");
    }

    #[test]
    fn test_search_hits_exact_slot_match() {
        let favorites = vec![
            favorite(Some("Dune"), 1, "Movies", "u1"),
            favorite(Some("Arrival"), 2, "Movies", "u1"),
        ];
        let profiles = vec![profile("u1", "alice", true)];

        let hits = search_hits(&favorites, &profiles, Some(2));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Arrival");
        assert_eq!(hits[0].slot, 2);
    }

    #[test]
    fn test_search_hits_empty_input_is_empty_result() {
        let hits = search_hits(&[], &[profile("u1", "alice", true)], None);
        assert!(hits.is_empty());
    }
}
