//! Turns filter selection changes into store queries and publishes the
//! resulting gallery state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::filters::FilterSelection;
use crate::model::Highlight;
use crate::store::{HighlightQuery, HighlightStore, StoreError};

/// What the gallery currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GalleryState {
    pub results: Vec<Highlight>,
    pub is_loading: bool,
    pub error: Option<String>,
}

struct Inner {
    store: Arc<dyn HighlightStore>,
    selection: watch::Sender<FilterSelection>,
    state: watch::Sender<GalleryState>,
    /// Sequence number of the most recently issued query.
    latest: AtomicU64,
}

impl Inner {
    /// Apply a settled query, unless a newer one has been issued since.
    fn settle(&self, seq: u64, outcome: Result<Vec<Highlight>, StoreError>) {
        let applied = self.state.send_if_modified(|state| {
            if self.latest.load(Ordering::SeqCst) != seq {
                return false;
            }
            state.is_loading = false;
            match &outcome {
                Ok(results) => {
                    state.results.clone_from(results);
                }
                Err(e) => {
                    state.error = Some(e.display_message());
                }
            }
            true
        });

        match (&outcome, applied) {
            (_, false) => debug!(seq, "Discarding superseded highlight query result"),
            (Ok(results), true) => debug!(seq, count = results.len(), "Highlights loaded"),
            (Err(e), true) => error!(seq, error = %e, "Failed to fetch highlights"),
        }
    }
}

/// Owns one gallery's selection and state.
///
/// Every issued query is numbered; only the result of the most recently
/// issued query is ever applied, whatever order responses arrive in.
#[derive(Clone)]
pub struct QueryOrchestrator {
    inner: Arc<Inner>,
}

impl QueryOrchestrator {
    #[must_use]
    pub fn new(store: Arc<dyn HighlightStore>) -> Self {
        let (selection, _) = watch::channel(FilterSelection::default());
        let (state, _) = watch::channel(GalleryState::default());
        Self {
            inner: Arc::new(Inner {
                store,
                selection,
                state,
                latest: AtomicU64::new(0),
            }),
        }
    }

    /// Receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<GalleryState> {
        self.inner.state.subscribe()
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> GalleryState {
        self.inner.state.borrow().clone()
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> FilterSelection {
        self.inner.selection.borrow().clone()
    }

    /// Start with the given selection and issue the first query.
    pub fn mount(&self, selection: FilterSelection) -> JoinHandle<()> {
        self.inner.selection.send_replace(selection);
        self.issue()
    }

    /// Change the selection. A query is issued only if it actually changed.
    pub fn set_selection(&self, selection: FilterSelection) -> Option<JoinHandle<()>> {
        let changed = self.inner.selection.send_if_modified(|current| {
            if *current == selection {
                false
            } else {
                *current = selection;
                true
            }
        });
        changed.then(|| self.issue())
    }

    /// Reset every constraint and re-query if anything was set.
    pub fn clear_filters(&self) -> Option<JoinHandle<()>> {
        self.set_selection(FilterSelection::default())
    }

    /// Re-issue the query for the current selection.
    pub fn refresh(&self) -> JoinHandle<()> {
        self.issue()
    }

    /// Mount with `selection`, wait for the query to settle and return the
    /// resulting state.
    pub async fn load(&self, selection: FilterSelection) -> GalleryState {
        if let Err(e) = self.mount(selection).await {
            error!(error = %e, "Highlight query task failed");
        }
        self.snapshot()
    }

    fn issue(&self) -> JoinHandle<()> {
        let seq = self.inner.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let selection = self.selection();
        self.inner.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });

        let query = HighlightQuery::for_selection(&selection);
        debug!(seq, ?selection, "Issuing highlight query");

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let outcome = inner.store.fetch_highlights(&query).await;
            inner.settle(seq, outcome);
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::sync::oneshot;

    use super::*;
    use crate::filters::FilterColumns;
    use crate::store::Filter;

    type Reply = Result<Vec<Highlight>, StoreError>;

    /// Store whose answers are released by the test, keyed by game filter.
    #[derive(Default)]
    struct GatedStore {
        queries: Mutex<Vec<HighlightQuery>>,
        gates: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
    }

    impl GatedStore {
        fn gate(&self, game: &str) -> oneshot::Sender<Reply> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().insert(game.to_string(), rx);
            tx
        }
    }

    fn game_of(query: &HighlightQuery) -> String {
        query
            .filters
            .iter()
            .find_map(|f| match f {
                Filter::Eq { column: "game", value } => Some(value.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }

    #[async_trait]
    impl HighlightStore for GatedStore {
        async fn fetch_filter_columns(&self) -> Result<Vec<FilterColumns>, StoreError> {
            Ok(Vec::new())
        }

        async fn fetch_highlights(&self, query: &HighlightQuery) -> Reply {
            self.queries.lock().unwrap().push(query.clone());
            let gate = self.gates.lock().unwrap().remove(&game_of(query));
            match gate {
                Some(rx) => rx.await.unwrap(),
                None => Ok(Vec::new()),
            }
        }
    }

    fn highlight(id: &str, created_at: &str) -> Highlight {
        Highlight {
            id: id.to_string(),
            media_urls: Vec::new(),
            game: None,
            tags: None,
            username: "u".to_string(),
            created_at: created_at.to_string(),
            content: None,
        }
    }

    #[tokio::test]
    async fn test_load_replaces_results() {
        let store = Arc::new(GatedStore::default());
        let gate = store.gate("");
        let orchestrator = QueryOrchestrator::new(store.clone());

        let handle = orchestrator.mount(FilterSelection::default());
        assert!(orchestrator.snapshot().is_loading);

        gate.send(Ok(vec![highlight("1", "2024-01-01")])).unwrap();
        handle.await.unwrap();

        let state = orchestrator.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
        assert_eq!(state.results.len(), 1);
        assert!(store.queries.lock().unwrap()[0].is_unfiltered());
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_results() {
        let store = Arc::new(GatedStore::default());
        let orchestrator = QueryOrchestrator::new(store.clone());

        let first = store.gate("");
        let handle = orchestrator.mount(FilterSelection::default());
        first.send(Ok(vec![highlight("1", "2024-01-01")])).unwrap();
        handle.await.unwrap();

        let second = store.gate("Chess");
        let handle = orchestrator
            .set_selection(FilterSelection::new("Chess", "", ""))
            .unwrap();
        second
            .send(Err(StoreError::Api {
                status: 400,
                message: Some("column does not exist".to_string()),
            }))
            .unwrap();
        handle.await.unwrap();

        let state = orchestrator.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("column does not exist"));
        assert_eq!(state.results, vec![highlight("1", "2024-01-01")]);
    }

    #[tokio::test]
    async fn test_new_query_clears_previous_error() {
        let store = Arc::new(GatedStore::default());
        let orchestrator = QueryOrchestrator::new(store.clone());

        let failing = store.gate("");
        let handle = orchestrator.mount(FilterSelection::default());
        failing
            .send(Err(StoreError::Api {
                status: 500,
                message: None,
            }))
            .unwrap();
        handle.await.unwrap();
        assert_eq!(
            orchestrator.snapshot().error.as_deref(),
            Some("Failed to fetch highlights")
        );

        let gate = store.gate("Go");
        let handle = orchestrator
            .set_selection(FilterSelection::new("Go", "", ""))
            .unwrap();
        assert_eq!(orchestrator.snapshot().error, None);
        gate.send(Ok(Vec::new())).unwrap();
        handle.await.unwrap();
        assert_eq!(orchestrator.snapshot().error, None);
    }

    #[tokio::test]
    async fn test_out_of_order_response_is_discarded() {
        let store = Arc::new(GatedStore::default());
        let orchestrator = QueryOrchestrator::new(store.clone());

        let old_gate = store.gate("Chess");
        let new_gate = store.gate("Go");
        let old = orchestrator.mount(FilterSelection::new("Chess", "", ""));
        let new = orchestrator
            .set_selection(FilterSelection::new("Go", "", ""))
            .unwrap();

        new_gate.send(Ok(vec![highlight("go", "2024-01-02")])).unwrap();
        new.await.unwrap();
        old_gate
            .send(Ok(vec![highlight("chess", "2024-01-01")]))
            .unwrap();
        old.await.unwrap();

        let state = orchestrator.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.results, vec![highlight("go", "2024-01-02")]);
    }

    #[tokio::test]
    async fn test_stale_response_does_not_end_loading() {
        let store = Arc::new(GatedStore::default());
        let orchestrator = QueryOrchestrator::new(store.clone());

        let old_gate = store.gate("Chess");
        let new_gate = store.gate("Go");
        let old = orchestrator.mount(FilterSelection::new("Chess", "", ""));
        let new = orchestrator
            .set_selection(FilterSelection::new("Go", "", ""))
            .unwrap();

        old_gate.send(Ok(vec![highlight("chess", "2024-01-01")])).unwrap();
        old.await.unwrap();
        let state = orchestrator.snapshot();
        assert!(state.is_loading);
        assert!(state.results.is_empty());

        new_gate.send(Ok(Vec::new())).unwrap();
        new.await.unwrap();
        assert!(!orchestrator.snapshot().is_loading);
    }

    #[tokio::test]
    async fn test_unchanged_selection_does_not_requery() {
        let store = Arc::new(GatedStore::default());
        let orchestrator = QueryOrchestrator::new(store.clone());
        orchestrator.mount(FilterSelection::default()).await.unwrap();

        assert!(orchestrator.set_selection(FilterSelection::default()).is_none());
        assert!(orchestrator.clear_filters().is_none());
        assert_eq!(store.queries.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_filters_requeries_unfiltered() {
        let store = Arc::new(GatedStore::default());
        let orchestrator = QueryOrchestrator::new(store.clone());
        orchestrator
            .mount(FilterSelection::new("Chess", "clutch", "mag"))
            .await
            .unwrap();

        orchestrator.clear_filters().unwrap().await.unwrap();

        assert_eq!(orchestrator.selection(), FilterSelection::default());
        let queries = store.queries.lock().unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].filters.len(), 3);
        assert!(queries[1].is_unfiltered());
    }

    #[tokio::test]
    async fn test_subscribers_see_loading_transition() {
        let store = Arc::new(GatedStore::default());
        let orchestrator = QueryOrchestrator::new(store.clone());
        let mut rx = orchestrator.subscribe();

        let gate = store.gate("");
        let handle = orchestrator.mount(FilterSelection::default());
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_loading);

        gate.send(Ok(vec![highlight("1", "2024-01-01")])).unwrap();
        handle.await.unwrap();
        rx.changed().await.unwrap();
        let state = rx.borrow_and_update().clone();
        assert!(!state.is_loading);
        assert_eq!(state.results.len(), 1);
    }

    #[tokio::test]
    async fn test_load_returns_settled_state() {
        let store = Arc::new(GatedStore::default());
        let orchestrator = QueryOrchestrator::new(store);
        let state = orchestrator.load(FilterSelection::default()).await;
        assert_eq!(state, GalleryState::default());
    }
}
