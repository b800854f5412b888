use crate::command::Command;
use crate::error::GhseekError;
use crate::github::types::GithubUser;
use crate::query::{Query, QueryStatus, Ticket};

/// Inputs shorter than this (after trimming) never query or show the dropdown.
const MIN_QUERY_CHARS: usize = 2;

pub struct SuggestionCoordinator {
    debounced: String,
    visible: bool,
    highlighted: Option<usize>,
    limit: usize,
    query: Query<Vec<String>>,
}

impl SuggestionCoordinator {
    pub fn new(limit: usize) -> Self {
        Self {
            debounced: String::new(),
            visible: false,
            highlighted: None,
            limit,
            query: Query::default(),
        }
    }

    /// Called on every keystroke with the full draft.
    pub fn on_draft_changed(&mut self, draft: &str) {
        self.visible = long_enough(draft);
        self.highlighted = None;
    }

    /// Called when the debouncer lets a draft through.
    pub fn settle(&mut self, value: &str) -> Option<Command> {
        self.debounced = value.to_string();
        let trimmed = value.trim();

        if !long_enough(trimmed) {
            self.query.reset();
            return None;
        }
        if self.query.key() == Some(trimmed) && !matches!(self.query.status(), QueryStatus::Failed(_)) {
            return None;
        }

        Some(Command::SearchUsers {
            ticket: self.query.issue(trimmed),
            limit: self.limit,
        })
    }

    pub fn resolve(
        &mut self,
        ticket: &Ticket,
        result: Result<Vec<GithubUser>, GhseekError>,
    ) -> bool {
        let limit = self.limit;
        let logins = result.map(|users| {
            users
                .into_iter()
                .take(limit)
                .map(|u| u.login)
                .collect::<Vec<_>>()
        });
        if let Err(ref e) = logins {
            tracing::warn!(key = %ticket.key, error = %e, "suggestion query failed");
        }
        let applied = self.query.resolve(ticket, logins);
        if applied {
            self.highlighted = None;
        }
        applied
    }

    pub fn suggestions(&self) -> &[String] {
        match self.query.data() {
            Some(list) => &list[..list.len().min(self.limit)],
            None => &[],
        }
    }

    pub fn is_open(&self) -> bool {
        self.visible && !self.suggestions().is_empty()
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.highlighted = None;
    }

    pub fn highlight_next(&mut self) {
        let len = self.suggestions().len();
        if !self.is_open() || len == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        });
    }

    pub fn highlight_prev(&mut self) {
        if !self.is_open() {
            return;
        }
        self.highlighted = match self.highlighted {
            Some(0) | None => None,
            Some(i) => Some(i - 1),
        };
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn highlighted_login(&self) -> Option<&str> {
        if !self.is_open() {
            return None;
        }
        self.highlighted
            .and_then(|i| self.suggestions().get(i))
            .map(String::as_str)
    }

    pub fn debounced(&self) -> &str {
        &self.debounced
    }

    pub fn is_fetching(&self) -> bool {
        self.query.is_fetching()
    }
}

fn long_enough(s: &str) -> bool {
    s.trim().chars().count() >= MIN_QUERY_CHARS
}
