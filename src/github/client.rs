use crate::error::{GhseekError, Result};
use crate::github::types::{FollowAction, GithubUser, SearchResponse};
use octocrab::Octocrab;
use serde::Serialize;

#[derive(Clone)]
pub struct GithubClient {
    octo: Octocrab,
    authenticated: bool,
}

#[derive(Serialize)]
struct SearchParams<'a> {
    q: &'a str,
    per_page: u8,
}

impl GithubClient {
    pub fn new(token: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder();
        let token = token.filter(|t| !t.is_empty());
        if let Some(token) = token {
            builder = builder.personal_token(token.to_string());
        }
        let octo = builder
            .build()
            .map_err(|e| GhseekError::GitHub(e.to_string()))?;

        Ok(Self {
            octo,
            authenticated: token.is_some(),
        })
    }

    pub async fn fetch_user(&self, login: &str) -> Result<GithubUser> {
        let route = format!("/users/{}", encode_segment(login));
        tracing::debug!(%login, "fetching profile");

        self.octo
            .get::<GithubUser, _, ()>(route, None)
            .await
            .map_err(|e| {
                if is_not_found(&e) {
                    GhseekError::NotFound(login.to_string())
                } else {
                    map_octo_error(e)
                }
            })
    }

    /// Returns up to `limit` users whose login matches `partial`, in
    /// GitHub's best-match order.
    pub async fn search_users(&self, partial: &str, limit: usize) -> Result<Vec<GithubUser>> {
        let params = SearchParams {
            q: partial,
            per_page: limit.clamp(1, 100) as u8,
        };
        tracing::debug!(%partial, "searching users");

        let resp: SearchResponse = self
            .octo
            .get("/search/users", Some(&params))
            .await
            .map_err(map_octo_error)?;

        let mut items = resp.items;
        items.truncate(limit);
        Ok(items)
    }

    pub async fn is_following(&self, login: &str) -> Result<bool> {
        self.require_token()?;
        let route = following_route(login);

        match self.octo._get(route).await {
            Ok(resp) => match resp.status().as_u16() {
                204 => Ok(true),
                404 => Ok(false),
                code => Err(GhseekError::GitHub(format!(
                    "unexpected status {code} checking follow status for {login}"
                ))),
            },
            Err(e) if is_not_found(&e) => Ok(false),
            Err(e) => Err(map_octo_error(e)),
        }
    }

    pub async fn set_following(&self, login: &str, action: FollowAction) -> Result<()> {
        self.require_token()?;
        let route = following_route(login);
        tracing::info!(%login, ?action, "updating follow state");

        let resp = match action {
            FollowAction::Follow => self.octo._put(route, None::<&()>).await,
            FollowAction::Unfollow => self.octo._delete(route, None::<&()>).await,
        }
        .map_err(map_octo_error)?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(GhseekError::GitHub(format!(
                "{} {login} failed with status {}",
                match action {
                    FollowAction::Follow => "follow",
                    FollowAction::Unfollow => "unfollow",
                },
                status.as_u16()
            )))
        }
    }

    fn require_token(&self) -> Result<()> {
        if self.authenticated {
            Ok(())
        } else {
            Err(GhseekError::TokenRequired)
        }
    }
}

fn following_route(login: &str) -> String {
    format!("/user/following/{}", encode_segment(login))
}

fn is_not_found(e: &octocrab::Error) -> bool {
    matches!(e, octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404)
}

fn map_octo_error(e: octocrab::Error) -> GhseekError {
    match &e {
        octocrab::Error::GitHub { source, .. } => GhseekError::GitHub(source.message.clone()),
        _ => GhseekError::GitHub(e.to_string()),
    }
}

/// Percent-encodes a login for use as a single path segment.
fn encode_segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        if b.is_ascii_alphanumeric() || b"-._~".contains(&b) {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_segment_keeps_valid_logins() {
        assert_eq!(encode_segment("octo-cat_1"), "octo-cat_1");
    }

    #[test]
    fn encode_segment_escapes_path_characters() {
        assert_eq!(encode_segment("a/b c"), "a%2Fb%20c");
        assert_eq!(encode_segment("é"), "%C3%A9");
    }

    #[test]
    fn following_route_is_encoded() {
        assert_eq!(following_route("a b"), "/user/following/a%20b");
    }

    #[tokio::test]
    async fn follow_without_token_is_rejected() {
        let client = GithubClient::new(None).unwrap();
        let err = client
            .set_following("octocat", FollowAction::Follow)
            .await
            .unwrap_err();
        assert!(matches!(err, GhseekError::TokenRequired));

        let err = client.is_following("octocat").await.unwrap_err();
        assert!(matches!(err, GhseekError::TokenRequired));
    }
}
