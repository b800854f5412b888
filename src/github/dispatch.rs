use crate::command::Command;
use crate::event::AppEvent;
use crate::github::client::GithubClient;
use tokio::sync::mpsc;

/// Runs a command in the background and reports back on `tx`. Requests never
/// block the UI task; results for superseded tickets are discarded by the
/// receiver, not here.
pub fn spawn(client: &GithubClient, command: Command, tx: &mpsc::UnboundedSender<AppEvent>) {
    match command {
        Command::OpenUrl(url) => {
            if let Err(e) = open::that_detached(&url) {
                tracing::warn!(%url, error = %e, "could not open browser");
            }
        }
        command => {
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let event = run(&client, command).await;
                if let Some(event) = event {
                    let _ = tx.send(event);
                }
            });
        }
    }
}

async fn run(client: &GithubClient, command: Command) -> Option<AppEvent> {
    let event = match command {
        Command::FetchProfile(ticket) => {
            let result = client.fetch_user(&ticket.key).await;
            AppEvent::ProfileLoaded { ticket, result }
        }
        Command::SearchUsers { ticket, limit } => {
            let result = client.search_users(&ticket.key, limit).await;
            AppEvent::SuggestionsLoaded { ticket, result }
        }
        Command::CheckFollowing(ticket) => {
            let result = client.is_following(&ticket.key).await;
            AppEvent::FollowStatusLoaded { ticket, result }
        }
        Command::SetFollowing { login, action, id } => {
            let result = client.set_following(&login, action).await;
            AppEvent::FollowFinished {
                login,
                action,
                id,
                result,
            }
        }
        Command::OpenUrl(_) => return None,
    };
    Some(event)
}
