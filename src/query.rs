//! Request bookkeeping for the three remote reads the UI depends on
//! (profile, suggestions, follow status).
//!
//! Each slot tracks one key at a time. Issuing a request hands out a
//! [`Ticket`]; only the most recently issued ticket may resolve the slot,
//! so a slow response for an older key never overwrites a newer one.
//! Ids come from one process-wide counter, so a slot that is rebuilt never
//! hands out an id an earlier slot already used.

use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Next request id. Strictly increasing for the life of the process.
pub fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub key: String,
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Fetching,
    Failed(String),
    Ready,
}

#[derive(Debug)]
pub struct Query<T> {
    key: Option<String>,
    latest: u64,
    status: QueryStatus,
    data: Option<T>,
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self {
            key: None,
            latest: 0,
            status: QueryStatus::Idle,
            data: None,
        }
    }
}

impl<T> Query<T> {
    /// Starts a request for `key`. A different key drops the cached data; the
    /// same key keeps it visible while the refetch is in flight.
    pub fn issue(&mut self, key: &str) -> Ticket {
        if self.key.as_deref() != Some(key) {
            self.key = Some(key.to_string());
            self.data = None;
        }
        self.latest = next_id();
        self.status = QueryStatus::Fetching;
        Ticket {
            key: key.to_string(),
            id: self.latest,
        }
    }

    /// Applies a response. Returns `false` when the ticket was superseded or
    /// already answered and the response was dropped.
    pub fn resolve<E: Display>(&mut self, ticket: &Ticket, result: Result<T, E>) -> bool {
        if self.status != QueryStatus::Fetching
            || ticket.id != self.latest
            || self.key.as_deref() != Some(ticket.key.as_str())
        {
            tracing::debug!(key = %ticket.key, id = ticket.id, latest = self.latest, "dropping stale response");
            return false;
        }
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.status = QueryStatus::Ready;
            }
            Err(e) => {
                self.data = None;
                self.status = QueryStatus::Failed(e.to_string());
            }
        }
        true
    }

    /// Forgets the key and invalidates any outstanding ticket.
    pub fn reset(&mut self) {
        self.key = None;
        self.latest = 0;
        self.status = QueryStatus::Idle;
        self.data = None;
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn status(&self) -> &QueryStatus {
        &self.status
    }

    /// True only for a first load: a refetch with data on screen is not
    /// "loading".
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Fetching && self.data.is_none()
    }

    pub fn is_fetching(&self) -> bool {
        self.status == QueryStatus::Fetching
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            QueryStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Q = Query<u32>;

    #[test]
    fn resolves_latest_ticket() {
        let mut q = Q::default();
        let t = q.issue("octocat");
        assert!(q.is_loading());

        assert!(q.resolve::<String>(&t, Ok(7)));
        assert_eq!(q.data(), Some(&7));
        assert_eq!(q.status(), &QueryStatus::Ready);
    }

    #[test]
    fn stale_ticket_is_dropped() {
        let mut q = Q::default();
        let old = q.issue("octocat");
        let new = q.issue("torvalds");

        assert!(!q.resolve::<String>(&old, Ok(1)));
        assert!(q.data().is_none());
        assert!(q.resolve::<String>(&new, Ok(2)));
        assert_eq!(q.key(), Some("torvalds"));
        assert_eq!(q.data(), Some(&2));
    }

    #[test]
    fn refetch_same_key_keeps_data() {
        let mut q = Q::default();
        let t = q.issue("octocat");
        q.resolve::<String>(&t, Ok(1));

        let again = q.issue("octocat");
        assert_ne!(t.id, again.id);
        assert!(q.is_fetching());
        assert!(!q.is_loading());
        assert_eq!(q.data(), Some(&1));
    }

    #[test]
    fn new_key_clears_data() {
        let mut q = Q::default();
        let t = q.issue("octocat");
        q.resolve::<String>(&t, Ok(1));

        q.issue("torvalds");
        assert!(q.data().is_none());
        assert!(q.is_loading());
    }

    #[test]
    fn failure_surfaces_message() {
        let mut q = Q::default();
        let t = q.issue("ghost");
        q.resolve(&t, Err("user not found: ghost"));

        assert_eq!(q.error(), Some("user not found: ghost"));
        assert!(q.data().is_none());
        assert!(!q.is_fetching());
    }

    #[test]
    fn reset_invalidates_outstanding_ticket() {
        let mut q = Q::default();
        let t = q.issue("oc");
        q.reset();

        assert!(!q.resolve::<String>(&t, Ok(3)));
        assert_eq!(q.status(), &QueryStatus::Idle);
        assert!(q.key().is_none());
    }

    #[test]
    fn ticket_resolves_only_once() {
        let mut q = Q::default();
        let t = q.issue("octocat");
        assert!(q.resolve::<String>(&t, Ok(1)));

        assert!(!q.resolve::<String>(&t, Ok(2)));
        assert_eq!(q.data(), Some(&1));
    }

    #[test]
    fn rebuilt_slot_ignores_tickets_from_previous_one() {
        let mut first = Q::default();
        let old = first.issue("octocat");

        let mut second = Q::default();
        let fresh = second.issue("octocat");
        assert_ne!(old, fresh);

        assert!(second.resolve::<String>(&fresh, Ok(1)));
        assert!(!second.resolve::<String>(&old, Ok(0)));
        assert_eq!(second.data(), Some(&1));
    }
}
