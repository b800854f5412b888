use crate::command::Command;
use crate::error::GhseekError;
use crate::github::types::GithubUser;
use crate::query::{Query, QueryStatus, Ticket};
use crate::search::recent::RecentSearches;
use tokio::sync::watch;

/// Separates what is being typed (`draft`) from what was last committed
/// (`submitted`). The profile is only ever fetched for `submitted`, which is
/// never blank.
pub struct SearchCoordinator {
    draft: String,
    submitted: String,
    profile: Query<GithubUser>,
    recent: RecentSearches,
    warnings: Vec<String>,
}

impl SearchCoordinator {
    pub fn new(recent: RecentSearches) -> Self {
        Self {
            draft: String::new(),
            submitted: String::new(),
            profile: Query::default(),
            recent,
            warnings: Vec::new(),
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn push_char(&mut self, c: char) {
        self.draft.push(c);
    }

    pub fn pop_char(&mut self) {
        self.draft.pop();
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    pub fn submitted(&self) -> &str {
        &self.submitted
    }

    /// Commits typed input. Blank input is ignored. Committing the login that
    /// is already shown does not refetch unless the last attempt failed.
    pub fn commit(&mut self, raw: &str) -> Option<Command> {
        let login = raw.trim();
        if login.is_empty() {
            return None;
        }
        let login = login.to_string();
        tracing::info!(%login, "search submitted");

        self.draft.clear();
        self.record_recent(&login);

        let unchanged = self.submitted == login
            && self.profile.key() == Some(login.as_str())
            && !matches!(self.profile.status(), QueryStatus::Failed(_));
        self.submitted = login;
        if unchanged {
            return None;
        }
        Some(Command::FetchProfile(self.profile.issue(&self.submitted)))
    }

    pub fn submit_draft(&mut self) -> Option<Command> {
        let draft = self.draft.clone();
        self.commit(&draft)
    }

    /// Picks a login from the suggestion dropdown or the recent list.
    ///
    /// A new login becomes `submitted` and is fetched. Picking the login that
    /// is already submitted fetches it again: key-change alone would never
    /// rerun an identical search.
    pub fn select(&mut self, login: &str) -> Option<Command> {
        let login = login.trim();
        if login.is_empty() {
            return None;
        }

        if self.submitted == login {
            tracing::info!(%login, "same login selected, refetching");
        } else {
            tracing::info!(%login, "login selected");
            self.submitted = login.to_string();
        }
        self.draft = self.submitted.clone();
        self.record_recent(login);

        Some(Command::FetchProfile(self.profile.issue(&self.submitted)))
    }

    pub fn resolve_profile(
        &mut self,
        ticket: &Ticket,
        result: Result<GithubUser, GhseekError>,
    ) -> bool {
        if let Err(ref e) = result {
            tracing::warn!(login = %ticket.key, error = %e, "profile fetch failed");
        }
        self.profile.resolve(ticket, result)
    }

    pub fn profile(&self) -> &Query<GithubUser> {
        &self.profile
    }

    pub fn subscribe_recent(&self) -> watch::Receiver<Vec<String>> {
        self.recent.subscribe()
    }

    /// Persistence problems are not fatal; the caller surfaces them.
    pub fn drain_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    fn record_recent(&mut self, login: &str) {
        if let Err(e) = self.recent.add(login) {
            tracing::warn!(error = %e, "could not persist recent searches");
            self.warnings.push(e.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::recent::MemoryStorage;
    use crate::test_utils::make_user;

    fn coordinator() -> SearchCoordinator {
        SearchCoordinator::new(RecentSearches::load(Box::new(MemoryStorage::default())))
    }

    fn recent(s: &SearchCoordinator) -> Vec<String> {
        s.subscribe_recent().borrow().clone()
    }

    fn fetch_ticket(cmd: Option<Command>) -> Ticket {
        match cmd {
            Some(Command::FetchProfile(t)) => t,
            other => panic!("expected a profile fetch, got {other:?}"),
        }
    }

    #[test]
    fn blank_commit_is_a_no_op() {
        let mut s = coordinator();
        let t = fetch_ticket(s.commit("octocat"));
        s.resolve_profile(&t, Ok(make_user("octocat")));

        for raw in ["", "   ", "\t\n"] {
            assert_eq!(s.commit(raw), None);
        }
        assert_eq!(s.submitted(), "octocat");
        assert_eq!(recent(&s), vec!["octocat"]);
        assert_eq!(s.profile().data().map(|u| u.login.as_str()), Some("octocat"));
    }

    #[test]
    fn commit_trims_clears_draft_and_records() {
        let mut s = coordinator();
        for c in "  torvalds ".chars() {
            s.push_char(c);
        }
        let t = fetch_ticket(s.submit_draft());

        assert_eq!(t.key, "torvalds");
        assert_eq!(s.submitted(), "torvalds");
        assert_eq!(s.draft(), "");
        assert_eq!(recent(&s), vec!["torvalds"]);
        assert!(s.profile().is_loading());
    }

    #[test]
    fn octocat_torvalds_scenario() {
        let mut s = coordinator();

        let t = fetch_ticket(s.commit("octocat"));
        assert!(s.resolve_profile(&t, Ok(make_user("octocat"))));
        assert_eq!(s.profile().data().unwrap().login, "octocat");
        assert_eq!(recent(&s), vec!["octocat"]);

        let t = fetch_ticket(s.commit("torvalds"));
        s.resolve_profile(&t, Ok(make_user("torvalds")));
        assert_eq!(recent(&s), vec!["torvalds", "octocat"]);

        let t = fetch_ticket(s.commit("octocat"));
        s.resolve_profile(&t, Ok(make_user("octocat")));
        assert_eq!(recent(&s), vec!["octocat", "torvalds"]);
    }

    #[test]
    fn selecting_current_login_refetches_exactly_once() {
        let mut s = coordinator();
        let first = fetch_ticket(s.commit("octocat"));
        s.resolve_profile(&first, Ok(make_user("octocat")));

        let again = fetch_ticket(s.select("octocat"));
        assert_eq!(again.key, "octocat");
        assert!(again.id > first.id);
        assert_eq!(s.submitted(), "octocat");
        // the old card stays up while the refetch runs
        assert!(s.profile().is_fetching());
        assert!(s.profile().data().is_some());
    }

    #[test]
    fn selecting_other_login_fetches_new_key_once() {
        let mut s = coordinator();
        let t = fetch_ticket(s.commit("octocat"));
        s.resolve_profile(&t, Ok(make_user("octocat")));

        let cmd = s.select("torvalds");
        let t = fetch_ticket(cmd);
        assert_eq!(t.key, "torvalds");
        assert_eq!(s.submitted(), "torvalds");
        assert_eq!(s.draft(), "torvalds");
        assert!(s.profile().data().is_none());
        assert_eq!(recent(&s), vec!["torvalds", "octocat"]);
    }

    #[test]
    fn recommitting_loaded_login_does_not_refetch() {
        let mut s = coordinator();
        let t = fetch_ticket(s.commit("octocat"));
        s.resolve_profile(&t, Ok(make_user("octocat")));

        assert_eq!(s.commit("octocat"), None);
    }

    #[test]
    fn recommitting_after_failure_retries() {
        let mut s = coordinator();
        let t = fetch_ticket(s.commit("ghost"));
        s.resolve_profile(&t, Err(GhseekError::NotFound("ghost".into())));
        assert_eq!(s.profile().error(), Some("user not found: ghost"));

        assert!(s.commit("ghost").is_some());
    }

    #[test]
    fn response_for_superseded_login_is_ignored() {
        let mut s = coordinator();
        let old = fetch_ticket(s.commit("octocat"));
        let new = fetch_ticket(s.commit("torvalds"));

        assert!(!s.resolve_profile(&old, Ok(make_user("octocat"))));
        assert!(s.resolve_profile(&new, Ok(make_user("torvalds"))));
        assert_eq!(s.profile().data().unwrap().login, "torvalds");
    }

    #[test]
    fn blank_selection_is_ignored() {
        let mut s = coordinator();
        assert_eq!(s.select("  "), None);
        assert_eq!(s.submitted(), "");
    }
}
