use crate::core::location::LocationState;
use crate::core::ranking::rank_and_scale;
use crate::domain::model::{RankedResultSet, SearchParams};
use crate::domain::ports::PlaceSearch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisabledReason {
    EmptyQuery,
    NoLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The backend was not called.
    Disabled(DisabledReason),
    /// The backend was called. A failed call shows up as an empty set.
    Completed {
        query: String,
        ranked: RankedResultSet,
    },
}

impl SearchOutcome {
    pub fn ranked(&self) -> Option<&RankedResultSet> {
        match self {
            SearchOutcome::Completed { ranked, .. } => Some(ranked),
            SearchOutcome::Disabled(_) => None,
        }
    }
}

pub struct SearchEngine<S: PlaceSearch> {
    search: S,
}

impl<S: PlaceSearch> SearchEngine<S> {
    pub fn new(search: S) -> Self {
        Self { search }
    }

    pub async fn run(&self, query: &str, location: &LocationState) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome::Disabled(DisabledReason::EmptyQuery);
        }
        let Some(coordinates) = location.coordinates() else {
            tracing::warn!("Search disabled: {}", location.status_label());
            return SearchOutcome::Disabled(DisabledReason::NoLocation);
        };

        let params = SearchParams {
            query: query.to_string(),
            location: coordinates,
        };

        tracing::info!("Searching for '{}'", query);
        let places = match self.search.search(&params).await {
            Ok(places) => places,
            Err(e) => {
                tracing::error!("Search failed: {}", e);
                Vec::new()
            }
        };

        let ranked = rank_and_scale(&places);
        tracing::info!("Found {} places for '{}'", ranked.len(), query);

        SearchOutcome::Completed {
            query: query.to_string(),
            ranked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Coordinates, PlaceRecord, RawBusyness};
    use crate::utils::error::{Result, VibeError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockSearch {
        calls: AtomicUsize,
        fail: bool,
    }

    impl MockSearch {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl PlaceSearch for MockSearch {
        async fn search(&self, params: &SearchParams) -> Result<Vec<PlaceRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(VibeError::SearchFailed {
                    status: 500,
                    url: "http://backend/api/shops".to_string(),
                });
            }
            Ok(vec![
                PlaceRecord {
                    id: "busy".to_string(),
                    name: params.query.clone(),
                    busyness_raw: Some(RawBusyness::Number(90i64.into())),
                    ..Default::default()
                },
                PlaceRecord {
                    id: "quiet".to_string(),
                    name: params.query.clone(),
                    busyness_raw: Some(RawBusyness::Text("5%".to_string())),
                    ..Default::default()
                },
            ])
        }
    }

    fn located() -> LocationState {
        LocationState::Located(Coordinates {
            lat: 37.39,
            lng: -122.04,
        })
    }

    #[tokio::test]
    async fn test_search_ranks_results() {
        let engine = SearchEngine::new(MockSearch::new(false));

        let outcome = engine.run("  coffee ", &located()).await;

        match outcome {
            SearchOutcome::Completed { query, ranked } => {
                assert_eq!(query, "coffee");
                assert_eq!(ranked.ordered_places[0].id, "quiet");
                assert_eq!(ranked.ordered_places[1].id, "busy");
            }
            other => panic!("expected completed search, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failure_becomes_empty_results() {
        let engine = SearchEngine::new(MockSearch::new(true));

        let outcome = engine.run("coffee", &located()).await;

        let ranked = outcome.ranked().expect("search should have run");
        assert!(ranked.is_empty());
        assert_eq!(ranked.max_round_trip_minutes, 0);
    }

    #[tokio::test]
    async fn test_missing_location_disables_search() {
        let engine = SearchEngine::new(MockSearch::new(false));

        for state in [
            LocationState::Loading,
            LocationState::Failed("denied".to_string()),
        ] {
            let outcome = engine.run("coffee", &state).await;
            assert_eq!(outcome, SearchOutcome::Disabled(DisabledReason::NoLocation));
        }
        assert_eq!(engine.search.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blank_query_disables_search() {
        let engine = SearchEngine::new(MockSearch::new(false));

        let outcome = engine.run("   ", &located()).await;

        assert_eq!(outcome, SearchOutcome::Disabled(DisabledReason::EmptyQuery));
        assert_eq!(engine.search.calls.load(Ordering::SeqCst), 0);
    }
}
