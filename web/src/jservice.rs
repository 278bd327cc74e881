use std::collections::BTreeSet;

use gloo::net::http::Request;
use jeopardy_core as game;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

pub(crate) const DEFAULT_API_BASE: &str = "http://jservice.io/api";

/// Entry of the `/categories` listing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
struct CategorySummary {
    id: game::CategoryId,
}

/// Body of `/category?id=`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
struct CategoryPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    title: String,
    #[serde(default)]
    clues: Vec<CluePayload>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
struct CluePayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    question: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    answer: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<CategoryPayload> for game::CategoryDetail {
    fn from(payload: CategoryPayload) -> Self {
        Self {
            title: payload.title,
            clues: payload
                .clues
                .into_iter()
                .map(|clue| game::ClueText::new(clue.question, clue.answer))
                .collect(),
        }
    }
}

/// Keeps the first occurrence of every id among the first `pool_size`
/// listing entries, in listing order.
fn pool_ids(pool: Vec<CategorySummary>, pool_size: usize) -> Vec<game::CategoryId> {
    if pool.len() > pool_size {
        log::warn!("asked for {} categories, got {}", pool_size, pool.len());
    }

    let mut seen = BTreeSet::new();
    pool.into_iter()
        .take(pool_size)
        .map(|category| category.id)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// [`game::DataSource`] backed by the jService trivia API.
#[derive(Debug)]
pub(crate) struct JService {
    base: String,
    picker: game::RandomPicker,
}

impl JService {
    pub(crate) fn new(base: &str, seed: u64) -> Self {
        Self {
            base: base.trim_end_matches('/').to_owned(),
            picker: game::RandomPicker::new(seed),
        }
    }

    fn categories_url(&self, count: usize) -> String {
        format!("{}/categories?count={}", self.base, count)
    }

    fn category_url(&self, id: game::CategoryId) -> String {
        format!("{}/category?id={}", self.base, id)
    }
}

impl game::DataSource for JService {
    async fn pick_categories(
        &self,
        pool_size: usize,
        count: usize,
    ) -> game::Result<Vec<game::CategoryId>> {
        let pool: Vec<CategorySummary> = get_json(&self.categories_url(pool_size)).await?;
        self.picker.pick_category_ids(pool_ids(pool, pool_size), count)
    }

    async fn fetch_category(&self, id: game::CategoryId) -> game::Result<game::CategoryDetail> {
        let payload: CategoryPayload = get_json(&self.category_url(id)).await?;
        Ok(payload.into())
    }
}

async fn get_json<T: DeserializeOwned>(url: &str) -> game::Result<T> {
    log::debug!("GET {}", url);
    let response = Request::get(url).send().await.map_err(transport_error)?;
    if !response.ok() {
        return Err(game::GameError::DataSourceFailure(format!(
            "{} answered {} {}",
            url,
            response.status(),
            response.status_text()
        )));
    }
    response.json().await.map_err(transport_error)
}

fn transport_error(err: gloo::net::Error) -> game::GameError {
    game::GameError::DataSourceFailure(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_listing_decodes_and_dedups() {
        let pool: Vec<CategorySummary> = serde_json::from_str(
            r#"[
                {"id": 11531, "title": "mixed bag", "clues_count": 5},
                {"id": 11532, "title": null, "clues_count": 5},
                {"id": 11531, "title": "mixed bag", "clues_count": 5},
                {"id": 7}
            ]"#,
        )
        .unwrap();

        assert_eq!(pool_ids(pool, 100), vec![11531, 11532, 7]);
    }

    #[test]
    fn oversized_listing_is_cut_to_pool_size() {
        let pool: Vec<CategorySummary> = (1..=10).map(|id| CategorySummary { id }).collect();

        assert_eq!(pool_ids(pool.clone(), 6), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(pool_ids(pool.clone(), 10).len(), 10);
        assert!(pool_ids(pool, 0).is_empty());

        // repeats in the kept prefix are not backfilled from the tail
        let repeated: Vec<CategorySummary> = [5, 5, 6, 7, 8]
            .into_iter()
            .map(|id| CategorySummary { id })
            .collect();
        assert_eq!(pool_ids(repeated, 3), vec![5, 6]);
    }

    #[test]
    fn category_payload_becomes_detail() {
        let payload: CategoryPayload = serde_json::from_str(
            r#"{
                "id": 21,
                "title": "wine",
                "clues_count": 2,
                "clues": [
                    {"id": 1, "answer": "Champagne", "question": "Bubbly from France", "value": 200, "invalid_count": null},
                    {"id": 2, "answer": null, "question": "Left blank upstream", "value": null}
                ]
            }"#,
        )
        .unwrap();

        let detail = game::CategoryDetail::from(payload);

        assert_eq!(detail.title, "wine");
        assert_eq!(
            detail.clues,
            vec![
                game::ClueText::new("Bubbly from France", "Champagne"),
                game::ClueText::new("Left blank upstream", ""),
            ]
        );
    }

    #[test]
    fn urls_ignore_trailing_slash() {
        let source = JService::new("http://jservice.io/api/", 0);

        assert_eq!(
            source.categories_url(100),
            "http://jservice.io/api/categories?count=100"
        );
        assert_eq!(source.category_url(42), "http://jservice.io/api/category?id=42");
    }
}
