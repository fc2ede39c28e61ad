//! HTTP client for the hosted tarot card table.
//!
//! The store exposes a REST view of its tables; the only call we need is a
//! fetch-all of `tarot_cards`. Rows carry `id`, `name` and an image `url`, and
//! may carry `keywords` and `meaning`.

use super::{Deck, TarotCard};
use crate::config::Config;
use crate::constants::TAROT_CARDS_TABLE;
use crate::errors::{AppResult, StoreError};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// A row of the hosted `tarot_cards` table.
#[derive(Debug, Deserialize)]
struct CardRow {
    id: Value,
    name: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    keywords: Option<Vec<String>>,
    #[serde(default)]
    meaning: Option<String>,
}

impl CardRow {
    fn into_card(self) -> TarotCard {
        let id = match self.id {
            Value::String(s) => s,
            other => other.to_string(),
        };
        TarotCard {
            id,
            name: self.name,
            keywords: self.keywords.unwrap_or_default(),
            meaning: self.meaning.unwrap_or_default(),
            image_url: self.url.unwrap_or_default(),
        }
    }
}

/// Client for the hosted card store.
pub struct CardStore {
    base_url: String,
    api_key: String,
    client: Client,
}

impl CardStore {
    /// Creates a store client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the store project (e.g., "https://xyz.example.co")
    /// * `api_key` - Anonymous API key sent as `apikey` and bearer token
    /// * `timeout` - Request timeout
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(
                    "Failed to build HTTP client with a {:?} timeout, using defaults: {}",
                    timeout, e
                );
                Client::new()
            });
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Creates a client from configuration, or `None` when the store is not set up.
    pub fn from_config(config: &Config) -> Option<Self> {
        config
            .store_credentials()
            .map(|(url, key)| Self::new(url, key, config.request_timeout))
    }

    /// Fetches every row of the card table.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The store is not reachable
    /// - The store answers with a non-success status
    /// - The body is not a JSON array of card rows
    pub fn fetch_all_cards(&self) -> AppResult<Vec<TarotCard>> {
        let url = format!("{}/rest/v1/{}", self.base_url, TAROT_CARDS_TABLE);
        debug!("Fetching tarot cards from {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("select", "*")])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .map_err(StoreError::Unreachable)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(StoreError::InvalidResponse(format!("HTTP {}: {}", status, error_text)).into());
        }

        let rows: Vec<CardRow> = response.json().map_err(|e| {
            StoreError::InvalidResponse(format!("Failed to parse card rows: {}", e))
        })?;

        debug!("Fetched {} card rows", rows.len());
        Ok(rows.into_iter().map(CardRow::into_card).collect())
    }
}

/// Loads the deck for this session, never failing.
///
/// Uses the store when one is given and it returns at least one card; any
/// failure, or an empty table, falls back to the built-in deck.
pub fn load_deck(store: Option<&CardStore>) -> Deck {
    let Some(store) = store else {
        debug!("Card store not configured, using built-in deck");
        return Deck::builtin();
    };

    match store.fetch_all_cards() {
        Ok(cards) if !cards.is_empty() => {
            info!("Loaded {} cards from the card store", cards.len());
            Deck::new(cards)
        }
        Ok(_) => {
            warn!("Card store returned no cards, using built-in deck");
            Deck::builtin()
        }
        Err(e) => {
            warn!("Failed to fetch cards, using built-in deck: {}", e);
            Deck::builtin()
        }
    }
}
