use crate::tmdb::MovieRecord;
use tracing::{debug, info};

/// Where the result list stands for the current settled query.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchPhase {
    /// No query.
    #[default]
    Idle,
    /// Query settled, fetch in flight.
    Loading { query: String },
    /// Fetch resolved with zero matches.
    Empty { query: String },
    /// Fetch resolved with at least one match.
    Populated {
        query: String,
        movies: Vec<MovieRecord>,
    },
    /// Fetch failed; nothing to render beyond the notice.
    Failed { query: String },
}

/// Single owner of the query-derived UI state: result phase, the selected
/// record, and the pending user notice. Only one fetch is authoritative at
/// a time, keyed by the settled query string.
#[derive(Debug, Default)]
pub struct SearchController {
    phase: SearchPhase,
    selected: Option<MovieRecord>,
    notice: Option<String>,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    pub fn selected(&self) -> Option<&MovieRecord> {
        self.selected.as_ref()
    }

    /// A settled query arrived from the debouncer. Empty drops back to Idle
    /// with no fetch; anything else enters Loading and returns the query
    /// that must be fetched.
    pub fn query_settled(&mut self, query: &str) -> Option<String> {
        if query.is_empty() {
            self.phase = SearchPhase::Idle;
            return None;
        }
        debug!("Search settled on '{}'", query);
        self.phase = SearchPhase::Loading {
            query: query.to_string(),
        };
        Some(query.to_string())
    }

    /// Applies a completed fetch. Responses for anything other than the
    /// query currently loading are stale and are dropped.
    pub fn apply_results(&mut self, query: &str, movies: Vec<MovieRecord>) {
        if !self.is_loading(query) {
            debug!("Dropping stale results for '{}'", query);
            return;
        }
        info!("Search '{}' returned {} result(s)", query, movies.len());
        self.phase = if movies.is_empty() {
            SearchPhase::Empty {
                query: query.to_string(),
            }
        } else {
            SearchPhase::Populated {
                query: query.to_string(),
                movies,
            }
        };
    }

    /// Applies a failed fetch, surfacing the service message as a one-shot
    /// notice. Same staleness guard as `apply_results`.
    pub fn apply_error(&mut self, query: &str, message: String) {
        if !self.is_loading(query) {
            debug!("Dropping stale error for '{}'", query);
            return;
        }
        self.phase = SearchPhase::Failed {
            query: query.to_string(),
        };
        self.notice = Some(message);
    }

    fn is_loading(&self, query: &str) -> bool {
        matches!(&self.phase, SearchPhase::Loading { query: q } if q == query)
    }

    /// Opens the detail view on the 1-based card number. The record is
    /// captured by value, so a later search replacing the list leaves the
    /// open detail untouched.
    pub fn select(&mut self, number: usize) -> bool {
        let SearchPhase::Populated { movies, .. } = &self.phase else {
            return false;
        };
        let Some(movie) = number.checked_sub(1).and_then(|i| movies.get(i)) else {
            return false;
        };
        self.selected = Some(movie.clone());
        true
    }

    /// Explicit close and the cancel signal both land here.
    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, title: &str) -> MovieRecord {
        MovieRecord {
            id,
            title: title.to_string(),
            overview: String::new(),
            poster_path: None,
            release_date: None,
            vote_average: Some(7.5),
        }
    }

    #[test]
    fn empty_query_returns_to_idle_without_a_fetch() {
        let mut c = SearchController::new();
        c.query_settled("dune");
        assert_eq!(c.query_settled(""), None);
        assert_eq!(c.phase(), &SearchPhase::Idle);
    }

    #[test]
    fn results_for_the_current_query_populate() {
        let mut c = SearchController::new();
        assert_eq!(c.query_settled("dune"), Some("dune".to_string()));
        c.apply_results("dune", vec![movie(1, "Dune"), movie(2, "Dune: Part Two")]);
        match c.phase() {
            SearchPhase::Populated { query, movies } => {
                assert_eq!(query, "dune");
                assert_eq!(movies.len(), 2);
            }
            other => panic!("unexpected phase {other:?}"),
        }
    }

    #[test]
    fn stale_results_are_dropped() {
        let mut c = SearchController::new();
        c.query_settled("du");
        c.query_settled("dune");
        // Late response for the superseded query.
        c.apply_results("du", vec![movie(9, "Duel")]);
        assert_eq!(
            c.phase(),
            &SearchPhase::Loading {
                query: "dune".to_string()
            }
        );
        c.apply_error("du", "too late".to_string());
        assert_eq!(c.take_notice(), None);
    }

    #[test]
    fn zero_results_reach_the_empty_phase() {
        let mut c = SearchController::new();
        c.query_settled("zzzqqq");
        c.apply_results("zzzqqq", vec![]);
        assert_eq!(
            c.phase(),
            &SearchPhase::Empty {
                query: "zzzqqq".to_string()
            }
        );
    }

    #[test]
    fn errors_set_a_one_shot_notice() {
        let mut c = SearchController::new();
        c.query_settled("dune");
        c.apply_error("dune", "resource not found".to_string());
        assert_eq!(
            c.phase(),
            &SearchPhase::Failed {
                query: "dune".to_string()
            }
        );
        assert_eq!(c.take_notice(), Some("resource not found".to_string()));
        assert_eq!(c.take_notice(), None);
    }

    #[test]
    fn selection_captures_the_record_by_value() {
        let mut c = SearchController::new();
        c.query_settled("dune");
        c.apply_results("dune", vec![movie(1, "Dune"), movie(2, "Dune: Part Two")]);
        assert!(c.select(2));
        assert_eq!(c.selected().map(|m| m.id), Some(2));

        // A new search replacing the list leaves the open detail alone.
        c.query_settled("alien");
        c.apply_results("alien", vec![movie(3, "Alien")]);
        assert_eq!(c.selected().map(|m| m.id), Some(2));

        c.close_detail();
        assert!(c.selected().is_none());
    }

    #[test]
    fn selection_rejects_out_of_range_and_non_populated() {
        let mut c = SearchController::new();
        assert!(!c.select(1));
        c.query_settled("dune");
        assert!(!c.select(1));
        c.apply_results("dune", vec![movie(1, "Dune")]);
        assert!(!c.select(0));
        assert!(!c.select(2));
        assert!(c.select(1));
    }
}
