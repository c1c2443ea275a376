use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    models::{Category, Favorite, Profile, RankingItem},
    services::providers::RecordStore,
};

/// Record store backed by Supabase's PostgREST endpoint
///
/// Plain GETs with the anon key; filtering, ordering and projection ride in
/// the query string.
#[derive(Clone)]
pub struct SupabaseStore {
    http_client: HttpClient,
    base_url: String,
    anon_key: String,
}

impl SupabaseStore {
    pub fn new(base_url: String, anon_key: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
            anon_key,
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> AppResult<Vec<T>> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);

        let response = self
            .http_client
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(table = %table, status = %status, body = %body, "Supabase request failed");
            return Err(AppError::ExternalApi(format!(
                "Supabase error: {} {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl RecordStore for SupabaseStore {
    async fn categories(&self) -> AppResult<Vec<Category>> {
        self.fetch(
            "categories",
            &[
                ("select", "id,name,name_en,icon,display_order"),
                ("order", "display_order.asc"),
            ],
        )
        .await
    }

    async fn category(&self, id: i64) -> AppResult<Option<Category>> {
        let id_filter = format!("eq.{}", id);
        let rows: Vec<Category> = self
            .fetch(
                "categories",
                &[
                    ("select", "id,name,name_en,icon,display_order"),
                    ("id", &id_filter),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn items_for_category(&self, category_id: i64) -> AppResult<Vec<RankingItem>> {
        let category_filter = format!("eq.{}", category_id);
        self.fetch(
            "ranking_items",
            &[
                ("select", "id,title,title_en,rank,category_id"),
                ("category_id", &category_filter),
                ("order", "rank.asc"),
            ],
        )
        .await
    }

    async fn all_items(&self) -> AppResult<Vec<RankingItem>> {
        self.fetch(
            "ranking_items",
            &[
                ("select", "id,title,title_en,rank,category_id"),
                ("order", "rank.asc"),
            ],
        )
        .await
    }

    async fn top_items(&self) -> AppResult<Vec<RankingItem>> {
        self.fetch(
            "ranking_items",
            &[
                ("select", "id,title,title_en,rank,category_id"),
                ("rank", "eq.1"),
            ],
        )
        .await
    }

    async fn favorites(&self) -> AppResult<Vec<Favorite>> {
        self.fetch(
            "favorites",
            &[("select", "title,slot,category,user_id,created_at")],
        )
        .await
    }

    async fn public_profiles(&self) -> AppResult<Vec<Profile>> {
        self.fetch(
            "profiles",
            &[
                ("select", "id,handle,display_name,is_public"),
                ("is_public", "eq.true"),
            ],
        )
        .await
    }

    async fn search_favorites(
        &self,
        query: &str,
        slot: Option<u32>,
    ) -> AppResult<Vec<Favorite>> {
        let title_filter = format!("ilike.*{}*", query);
        let mut params: Vec<(&str, &str)> = vec![
            ("select", "title,slot,category,user_id,created_at"),
            ("title", &title_filter),
        ];

        let slot_filter = slot.map(|s| format!("eq.{}", s));
        if let Some(filter) = slot_filter.as_deref() {
            params.push(("slot", filter));
        }

        self.fetch("favorites", &params).await
    }
}
