//! Follow/unfollow state for the user on the card.

use crate::command::Command;
use crate::error::GhseekError;
use crate::github::types::FollowAction;
use crate::query::{self, Query, Ticket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    IdleNotFollowing,
    IdleFollowing,
    /// A mutation is in flight; the button keeps showing the last known status.
    Pending { following: bool },
}

impl ToggleState {
    pub fn label(self) -> &'static str {
        match self {
            ToggleState::IdleFollowing | ToggleState::Pending { following: true } => "Following",
            ToggleState::IdleNotFollowing | ToggleState::Pending { following: false } => {
                "Follow User"
            }
        }
    }

    pub fn is_pending(self) -> bool {
        matches!(self, ToggleState::Pending { .. })
    }
}

/// What a finished mutation asks the UI to do. `refetch` is empty when the
/// result belongs to a mutation this toggle is no longer waiting on.
#[derive(Debug, PartialEq, Eq)]
pub enum FollowOutcome {
    Succeeded {
        message: String,
        refetch: Option<Command>,
    },
    Failed {
        message: String,
    },
}

pub struct FollowToggle {
    login: String,
    status: Query<bool>,
    /// Id of the mutation in flight.
    pending: Option<u64>,
}

impl FollowToggle {
    /// Binds the toggle to `login` and returns the initial status query.
    pub fn mount(login: &str) -> (Self, Option<Command>) {
        let mut toggle = Self {
            login: login.to_string(),
            status: Query::default(),
            pending: None,
        };
        let cmd = toggle.refresh();
        (toggle, cmd)
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    /// Re-queries follow status. Disabled while no login is bound.
    pub fn refresh(&mut self) -> Option<Command> {
        if self.login.trim().is_empty() {
            return None;
        }
        Some(Command::CheckFollowing(self.status.issue(&self.login)))
    }

    pub fn resolve_status(&mut self, ticket: &Ticket, result: Result<bool, GhseekError>) -> bool {
        if let Err(ref e) = result {
            tracing::warn!(login = %ticket.key, error = %e, "follow status check failed");
        }
        self.status.resolve(ticket, result)
    }

    /// Unknown status reads as not following.
    pub fn is_following(&self) -> bool {
        self.status.data().copied().unwrap_or(false)
    }

    pub fn status_error(&self) -> Option<&str> {
        self.status.error()
    }

    pub fn state(&self) -> ToggleState {
        let following = self.is_following();
        match self.pending {
            Some(_) => ToggleState::Pending { following },
            None if following => ToggleState::IdleFollowing,
            None => ToggleState::IdleNotFollowing,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.pending.is_some()
    }

    /// True when `id` is the mutation this toggle is waiting on.
    pub fn awaits(&self, id: u64) -> bool {
        self.pending == Some(id)
    }

    pub fn label(&self) -> &'static str {
        self.state().label()
    }

    /// Starts follow or unfollow depending on the current status. Ignored
    /// while a mutation is in flight.
    pub fn toggle(&mut self) -> Option<Command> {
        if self.is_disabled() || self.login.is_empty() {
            return None;
        }
        let action = FollowAction::for_status(self.is_following());
        let id = query::next_id();
        self.pending = Some(id);
        Some(Command::SetFollowing {
            login: self.login.clone(),
            action,
            id,
        })
    }

    /// Applies the result of mutation `id`. A result for any other mutation
    /// still produces its message but leaves the toggle alone.
    pub fn finish(
        &mut self,
        id: u64,
        action: FollowAction,
        result: Result<(), GhseekError>,
    ) -> FollowOutcome {
        let current = self.awaits(id);
        if current {
            self.pending = None;
        } else {
            tracing::debug!(login = %self.login, id, "result for a mutation no longer awaited");
        }
        match result {
            Ok(()) => {
                let refetch = current.then(|| Command::CheckFollowing(self.status.issue(&self.login)));
                FollowOutcome::Succeeded {
                    message: action.success_message(&self.login),
                    refetch,
                }
            }
            Err(e) => {
                tracing::warn!(login = %self.login, ?action, error = %e, "follow mutation failed");
                FollowOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_ticket(cmd: Option<Command>) -> Ticket {
        match cmd {
            Some(Command::CheckFollowing(t)) => t,
            other => panic!("expected status check, got {other:?}"),
        }
    }

    fn mutation_id(cmd: Option<Command>) -> u64 {
        match cmd {
            Some(Command::SetFollowing { id, .. }) => id,
            other => panic!("expected mutation, got {other:?}"),
        }
    }

    fn mounted(following: bool) -> FollowToggle {
        let (mut toggle, cmd) = FollowToggle::mount("octocat");
        let t = status_ticket(cmd);
        toggle.resolve_status(&t, Ok(following));
        toggle
    }

    #[test]
    fn mount_queries_status_only_with_login() {
        let (_, cmd) = FollowToggle::mount("octocat");
        assert_eq!(status_ticket(cmd).key, "octocat");

        let (_, cmd) = FollowToggle::mount("");
        assert!(cmd.is_none());
    }

    #[test]
    fn follow_then_requery_switches_label() {
        let mut toggle = mounted(false);
        assert_eq!(toggle.state(), ToggleState::IdleNotFollowing);
        assert_eq!(toggle.label(), "Follow User");

        let cmd = toggle.toggle();
        let id = match cmd {
            Some(Command::SetFollowing { ref login, action, id }) => {
                assert_eq!(login, "octocat");
                assert_eq!(action, FollowAction::Follow);
                id
            }
            other => panic!("expected mutation, got {other:?}"),
        };
        assert_eq!(toggle.state(), ToggleState::Pending { following: false });
        assert_eq!(toggle.label(), "Follow User", "no optimistic update");

        let refetch = match toggle.finish(id, FollowAction::Follow, Ok(())) {
            FollowOutcome::Succeeded { message, refetch } => {
                assert_eq!(message, "You are now following octocat");
                refetch
            }
            other => panic!("unexpected {other:?}"),
        };
        let t = status_ticket(refetch);
        toggle.resolve_status(&t, Ok(true));

        assert_eq!(toggle.state(), ToggleState::IdleFollowing);
        assert_eq!(toggle.label(), "Following");
    }

    #[test]
    fn following_user_toggles_to_unfollow() {
        let mut toggle = mounted(true);
        let cmd = toggle.toggle();
        assert!(matches!(
            cmd,
            Some(Command::SetFollowing { action: FollowAction::Unfollow, .. })
        ));
        let id = mutation_id(cmd);

        let outcome = toggle.finish(id, FollowAction::Unfollow, Ok(()));
        let t = match outcome {
            FollowOutcome::Succeeded { refetch, .. } => status_ticket(refetch),
            other => panic!("unexpected {other:?}"),
        };
        toggle.resolve_status(&t, Ok(false));
        assert_eq!(toggle.state(), ToggleState::IdleNotFollowing);
    }

    #[test]
    fn disabled_for_whole_mutation() {
        let mut toggle = mounted(false);
        assert!(!toggle.is_disabled());

        let id = mutation_id(toggle.toggle());
        assert!(toggle.is_disabled());
        assert_eq!(toggle.toggle(), None, "second click while pending is ignored");
        assert!(toggle.is_disabled());

        toggle.finish(id, FollowAction::Follow, Err(GhseekError::TokenRequired));
        assert!(!toggle.is_disabled());
    }

    #[test]
    fn failure_restores_previous_state() {
        let mut toggle = mounted(true);
        let id = mutation_id(toggle.toggle());

        let outcome = toggle.finish(
            id,
            FollowAction::Unfollow,
            Err(GhseekError::GitHub("Requires authentication".into())),
        );
        assert_eq!(
            outcome,
            FollowOutcome::Failed {
                message: "github error: Requires authentication".into()
            }
        );
        assert_eq!(toggle.state(), ToggleState::IdleFollowing);
        assert_eq!(toggle.label(), "Following");
    }

    #[test]
    fn unknown_status_reads_as_not_following() {
        let (toggle, _) = FollowToggle::mount("octocat");
        assert_eq!(toggle.state(), ToggleState::IdleNotFollowing);
    }

    #[test]
    fn result_of_earlier_mutation_leaves_current_one_pending() {
        let mut first = mounted(false);
        let old = mutation_id(first.toggle());

        // card remounted for the same login, new mutation started
        let mut toggle = mounted(false);
        let current = mutation_id(toggle.toggle());
        assert_ne!(old, current);

        let outcome = toggle.finish(old, FollowAction::Follow, Ok(()));
        assert_eq!(
            outcome,
            FollowOutcome::Succeeded {
                message: "You are now following octocat".into(),
                refetch: None
            }
        );
        assert!(toggle.is_disabled());
        assert!(toggle.awaits(current));

        let outcome = toggle.finish(current, FollowAction::Follow, Ok(()));
        assert!(matches!(outcome, FollowOutcome::Succeeded { refetch: Some(_), .. }));
        assert!(!toggle.is_disabled());
    }

    #[test]
    fn status_from_earlier_mount_is_ignored() {
        let (_, old) = FollowToggle::mount("octocat");
        let old = status_ticket(old);

        let (mut toggle, fresh) = FollowToggle::mount("octocat");
        let fresh = status_ticket(fresh);

        assert!(toggle.resolve_status(&fresh, Ok(true)));
        assert!(!toggle.resolve_status(&old, Ok(false)));
        assert_eq!(toggle.label(), "Following");
    }
}
