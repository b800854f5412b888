use crate::github::types::FollowAction;
use crate::query::Ticket;

/// Side effects requested by the coordinators. The event loop turns each one
/// into a spawned request whose result comes back as an `AppEvent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchProfile(Ticket),
    SearchUsers { ticket: Ticket, limit: usize },
    CheckFollowing(Ticket),
    SetFollowing {
        login: String,
        action: FollowAction,
        id: u64,
    },
    OpenUrl(String),
}
