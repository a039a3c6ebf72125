//! Filter selection and the filter option set shown in the dropdowns.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, warn};
use urlencoding::encode;

use crate::store::{HighlightStore, StoreError};

/// The visitor's current constraints. Empty parts mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    game: String,
    tag: String,
    user: String,
}

impl FilterSelection {
    #[must_use]
    pub fn new(game: impl Into<String>, tag: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            game: game.into(),
            tag: tag.into(),
            user: user.into(),
        }
    }

    /// Game constraint, if set.
    #[must_use]
    pub fn game(&self) -> Option<&str> {
        non_blank(&self.game)
    }

    /// Tag constraint, if set.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        non_blank(&self.tag)
    }

    /// Username substring, trimmed, if set.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        non_blank(&self.user).map(str::trim)
    }

    /// Whether any constraint is set.
    #[must_use]
    pub fn is_filtering(&self) -> bool {
        self.game().is_some() || self.tag().is_some() || self.user().is_some()
    }

    /// Reset every constraint.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Query string (with leading `?`) that reproduces this selection, plus
    /// any extra pairs. Empty constraints are left out; returns `/` when
    /// there is nothing to encode.
    #[must_use]
    pub fn to_href(&self, extra: &[(&str, &str)]) -> String {
        let parts: Vec<String> = [
            ("game", self.game()),
            ("tag", self.tag()),
            ("user", self.user()),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| format!("{k}={}", encode(v))))
        .chain(extra.iter().map(|(k, v)| format!("{k}={}", encode(v))))
        .collect();

        if parts.is_empty() {
            "/".to_string()
        } else {
            format!("/?{}", parts.join("&"))
        }
    }
}

fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// The `game,tags` projection the option set is derived from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterColumns {
    #[serde(default)]
    pub game: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<Option<String>>>,
}

/// Selectable values for each filter dropdown.
///
/// Once derived, both lists start with an empty sentinel meaning "all".
/// The default (nothing derived yet, or derivation failed) is two empty lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub games: Vec<String>,
    pub tags: Vec<String>,
}

impl FilterOptions {
    /// Build the option set from every row of the corpus.
    #[must_use]
    pub fn derive(rows: &[FilterColumns]) -> Self {
        let games: BTreeSet<&str> = rows.iter().filter_map(|r| r.game.as_deref()).collect();
        let tags: BTreeSet<&str> = rows
            .iter()
            .filter_map(|r| r.tags.as_ref())
            .flatten()
            .filter_map(Option::as_deref)
            .collect();

        Self {
            games: with_sentinel(games),
            tags: with_sentinel(tags),
        }
    }
}

fn with_sentinel(values: BTreeSet<&str>) -> Vec<String> {
    std::iter::once(String::new())
        .chain(values.into_iter().map(str::to_string))
        .collect()
}

/// Derives the option set at most once per process.
///
/// Failures are not cached: they are logged, an empty option set is
/// returned, and the next call tries again.
#[derive(Debug, Default)]
pub struct FilterOptionCache {
    cell: OnceCell<FilterOptions>,
}

impl FilterOptionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached option set, deriving it from the store on first use.
    pub async fn get(&self, store: &dyn HighlightStore) -> FilterOptions {
        let result = self
            .cell
            .get_or_try_init(|| async {
                let rows = store.fetch_filter_columns().await?;
                let options = FilterOptions::derive(&rows);
                debug!(
                    rows = rows.len(),
                    games = options.games.len().saturating_sub(1),
                    tags = options.tags.len().saturating_sub(1),
                    "Derived filter options"
                );
                Ok::<_, StoreError>(options)
            })
            .await;

        match result {
            Ok(options) => options.clone(),
            Err(e) => {
                warn!(error = %e, "Failed to load filter options; dropdowns will be empty");
                FilterOptions::default()
            }
        }
    }

    /// Whether a derivation has succeeded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}
