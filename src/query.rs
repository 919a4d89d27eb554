use std::time::Duration;
use tokio::time::Instant;

/// Input must sit still this long before a new value propagates downstream.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// Last-write-wins debounce over the raw query string.
///
/// Time is passed in by the caller, so the contract holds regardless of how
/// the surrounding loop schedules itself (and tests can drive it under
/// paused time).
#[derive(Debug)]
pub struct DebouncedQuery {
    raw: String,
    settled: String,
    pending_since: Option<Instant>,
    window: Duration,
}

impl DebouncedQuery {
    pub fn new(window: Duration) -> Self {
        Self {
            raw: String::new(),
            settled: String::new(),
            pending_since: None,
            window,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn settled(&self) -> &str {
        &self.settled
    }

    /// Replaces the raw value and restarts the quiescence window. Clearing
    /// to empty goes through the same path as any other edit.
    pub fn set_at(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        if text == self.raw {
            return;
        }
        self.raw = text;
        self.pending_since = if self.raw == self.settled {
            None
        } else {
            Some(now)
        };
    }

    /// When the pending edit will settle, for the event loop's timer.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending_since.map(|since| since + self.window)
    }

    /// Promotes the raw value to the settled one once the window has
    /// elapsed. Yields each settled value exactly once.
    pub fn poll_at(&mut self, now: Instant) -> Option<String> {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }
        self.pending_since = None;
        self.settled = self.raw.clone();
        Some(self.settled.clone())
    }
}

impl Default for DebouncedQuery {
    fn default() -> Self {
        Self::new(DEBOUNCE_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn settles_after_quiescence_window() {
        let mut q = DebouncedQuery::default();
        let t0 = Instant::now();
        q.set_at("dune", t0);
        assert_eq!(q.poll_at(t0 + Duration::from_millis(299)), None);
        assert_eq!(
            q.poll_at(t0 + Duration::from_millis(300)),
            Some("dune".to_string())
        );
        // Settled exactly once.
        assert_eq!(q.poll_at(t0 + Duration::from_secs(10)), None);
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_edits_yield_only_the_final_value() {
        let mut q = DebouncedQuery::default();
        let t0 = Instant::now();
        q.set_at("d", t0);
        q.set_at("du", t0 + Duration::from_millis(100));
        q.set_at("dun", t0 + Duration::from_millis(200));
        q.set_at("dune", t0 + Duration::from_millis(290));

        // The earlier edits never settle; each keystroke restarted the timer.
        assert_eq!(q.poll_at(t0 + Duration::from_millis(400)), None);
        assert_eq!(
            q.poll_at(t0 + Duration::from_millis(590)),
            Some("dune".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_debounces_through_the_same_path() {
        let mut q = DebouncedQuery::default();
        let t0 = Instant::now();
        q.set_at("dune", t0);
        q.poll_at(t0 + DEBOUNCE_WINDOW).unwrap();

        q.set_at("", t0 + Duration::from_millis(500));
        assert_eq!(q.settled(), "dune");
        assert_eq!(
            q.poll_at(t0 + Duration::from_millis(800)),
            Some(String::new())
        );
        assert_eq!(q.settled(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn identical_text_does_not_rearm() {
        let mut q = DebouncedQuery::default();
        let t0 = Instant::now();
        q.set_at("dune", t0);
        q.poll_at(t0 + DEBOUNCE_WINDOW).unwrap();

        q.set_at("dune", t0 + Duration::from_secs(1));
        assert_eq!(q.deadline(), None);

        // Editing away and back to the settled value cancels the pending edit.
        q.set_at("dune 2", t0 + Duration::from_secs(2));
        q.set_at("dune", t0 + Duration::from_millis(2100));
        assert_eq!(q.deadline(), None);
        assert_eq!(q.poll_at(t0 + Duration::from_secs(5)), None);
    }
}
