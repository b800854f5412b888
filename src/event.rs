use crate::error::GhseekError;
use crate::github::types::{FollowAction, GithubUser};
use crate::query::Ticket;
use crate::search::debounce::Settled;
use crossterm::event::KeyEvent;

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
    DraftSettled(Settled),
    ProfileLoaded {
        ticket: Ticket,
        result: Result<GithubUser, GhseekError>,
    },
    SuggestionsLoaded {
        ticket: Ticket,
        result: Result<Vec<GithubUser>, GhseekError>,
    },
    FollowStatusLoaded {
        ticket: Ticket,
        result: Result<bool, GhseekError>,
    },
    FollowFinished {
        login: String,
        action: FollowAction,
        id: u64,
        result: Result<(), GhseekError>,
    },
}

impl From<Settled> for AppEvent {
    fn from(settled: Settled) -> Self {
        AppEvent::DraftSettled(settled)
    }
}
