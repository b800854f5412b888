#![cfg(test)]

use crate::github::types::GithubUser;
use ratatui::buffer::Buffer;

pub fn make_user(login: &str) -> GithubUser {
    GithubUser {
        login: login.to_string(),
        name: None,
        avatar_url: format!("https://avatars.githubusercontent.com/{login}"),
        bio: None,
        html_url: format!("https://github.com/{login}"),
        public_repos: Some(8),
        followers: Some(100),
        following: Some(9),
        created_at: None,
    }
}

/// Flattens a rendered buffer into newline-separated rows.
pub fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
