use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user profile as returned by `GET /users/{login}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubUser {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[allow(dead_code)]
    pub avatar_url: String,
    #[serde(default)]
    pub bio: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub public_repos: Option<u32>,
    #[serde(default)]
    pub followers: Option<u32>,
    #[serde(default)]
    pub following: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl GithubUser {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.login)
    }
}

/// Body of `GET /search/users`. Items carry the same user shape, minus the
/// profile-only fields.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<GithubUser>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowAction {
    Follow,
    Unfollow,
}

impl FollowAction {
    pub fn for_status(following: bool) -> Self {
        if following {
            FollowAction::Unfollow
        } else {
            FollowAction::Follow
        }
    }

    pub fn success_message(self, login: &str) -> String {
        match self {
            FollowAction::Follow => format!("You are now following {login}"),
            FollowAction::Unfollow => format!("You are no longer following {login}"),
        }
    }
}
