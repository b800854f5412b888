use crate::command::Command;
use crate::config::Config;
use crate::error::GhseekError;
use crate::event::AppEvent;
use crate::follow::{FollowOutcome, FollowToggle};
use crate::github::types::FollowAction;
use crate::search::{
    coordinator::SearchCoordinator, debounce::Debouncer, recent::RecentSearches,
    suggest::SuggestionCoordinator,
};
use crate::ui::{
    dropdown::Dropdown,
    header_bar::HeaderBar,
    help_panel::HelpPanel,
    input::{self, Action, Focus},
    recent_panel::RecentPanel,
    search_bar::SearchBar,
    status_bar::{ProfileStatus, StatusBar},
    theme,
    toast::{Notification, NotifyLevel, Toast},
    user_card::UserCard,
};
use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;
use tokio::sync::{mpsc, watch};

const MAX_VISIBLE_TOASTS: usize = 3;

pub struct App {
    pub search: SearchCoordinator,
    pub suggest: SuggestionCoordinator,
    debouncer: Debouncer<AppEvent>,
    pub card: Option<FollowToggle>,
    recent: watch::Receiver<Vec<String>>,
    pub recent_selected: usize,

    pub focus: Focus,
    pub show_help: bool,
    pub notifications: Vec<Notification>,
    pub authenticated: bool,

    commands: Vec<Command>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, recent: RecentSearches, tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        let search = SearchCoordinator::new(recent);
        let recent = search.subscribe_recent();

        Self {
            debouncer: Debouncer::new(config.debounce(), tx),
            suggest: SuggestionCoordinator::new(config.max_suggestions),
            authenticated: config.github_token.is_some(),
            search,
            card: None,
            recent,
            recent_selected: 0,
            focus: Focus::Search,
            show_help: false,
            notifications: Vec::new(),
            commands: Vec::new(),
            should_quit: false,
        }
    }

    /// Commits a login passed on the command line.
    pub fn start(&mut self, login: Option<&str>) {
        if let Some(login) = login {
            let cmd = self.search.commit(login);
            self.after_search(cmd);
        }
    }

    /// Requests produced since the last call, in issue order.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn notify(&mut self, level: NotifyLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    pub fn recent_entries(&self) -> Vec<String> {
        self.recent.borrow().clone()
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => {
                if self.show_help {
                    self.show_help = false;
                    return;
                }
                let action = input::map_key(key, self.focus);
                self.handle_action(action);
            }
            AppEvent::Resize => {}
            AppEvent::Tick => {
                let now = Instant::now();
                self.notifications.retain(|n| !n.is_expired(now));
            }
            AppEvent::DraftSettled(settled) => {
                if self.debouncer.is_current(&settled) {
                    if let Some(cmd) = self.suggest.settle(&settled.value) {
                        self.commands.push(cmd);
                    }
                }
            }
            AppEvent::ProfileLoaded { ticket, result } => {
                if !self.search.resolve_profile(&ticket, result) {
                    return;
                }
                self.sync_card();
            }
            AppEvent::SuggestionsLoaded { ticket, result } => {
                self.suggest.resolve(&ticket, result);
            }
            AppEvent::FollowStatusLoaded { ticket, result } => {
                if let Some(card) = self.card.as_mut() {
                    card.resolve_status(&ticket, result);
                }
            }
            AppEvent::FollowFinished {
                login,
                action,
                id,
                result,
            } => self.finish_follow(&login, action, id, result),
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Input(c) => {
                self.search.push_char(c);
                self.draft_changed();
            }
            Action::Backspace => {
                self.search.pop_char();
                self.draft_changed();
            }
            Action::Submit => self.submit(),
            Action::Up => match self.focus {
                Focus::Search => self.suggest.highlight_prev(),
                Focus::Recent => self.recent_selected = self.recent_selected.saturating_sub(1),
                Focus::Card => {}
            },
            Action::Down => match self.focus {
                Focus::Search => self.suggest.highlight_next(),
                Focus::Recent => {
                    if self.recent_selected + 1 < self.recent.borrow().len() {
                        self.recent_selected += 1;
                    }
                }
                Focus::Card => {}
            },
            Action::NextFocus => self.set_focus(self.focus.next()),
            Action::PrevFocus => self.set_focus(self.focus.prev()),
            Action::FocusSearch => self.set_focus(Focus::Search),
            Action::Select => match self.focus {
                Focus::Search => self.submit(),
                Focus::Recent => self.select_recent(),
                Focus::Card => self.toggle_follow(),
            },
            Action::ToggleFollow => self.toggle_follow(),
            Action::OpenProfile => {
                if let Some(user) = self.search.profile().data() {
                    self.commands.push(Command::OpenUrl(user.html_url.clone()));
                }
            }
            Action::Refresh => self.refresh(),
            Action::Help => self.show_help = true,
            Action::Dismiss => {
                if self.suggest.is_open() {
                    self.suggest.hide();
                } else if self.focus == Focus::Search && !self.search.draft().is_empty() {
                    self.search.clear_draft();
                    self.debouncer.cancel();
                    self.suggest.on_draft_changed("");
                } else {
                    self.should_quit = true;
                }
            }
            Action::None => {}
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        if focus != Focus::Search {
            self.suggest.hide();
        }
        self.focus = focus;
    }

    fn draft_changed(&mut self) {
        let draft = self.search.draft().to_string();
        self.suggest.on_draft_changed(&draft);
        self.debouncer.schedule(draft);
    }

    /// Enter in the search box: a highlighted suggestion wins over the
    /// typed draft.
    fn submit(&mut self) {
        if let Some(login) = self.suggest.highlighted_login().map(str::to_string) {
            self.select(&login);
            return;
        }
        self.debouncer.cancel();
        self.suggest.hide();
        let cmd = self.search.submit_draft();
        self.after_search(cmd);
    }

    fn select(&mut self, login: &str) {
        self.debouncer.cancel();
        self.suggest.hide();
        let cmd = self.search.select(login);
        self.after_search(cmd);
    }

    fn select_recent(&mut self) {
        let login = self.recent.borrow().get(self.recent_selected).cloned();
        if let Some(login) = login {
            self.select(&login);
        }
    }

    fn refresh(&mut self) {
        let submitted = self.search.submitted().to_string();
        if submitted.is_empty() {
            return;
        }
        self.select(&submitted);
        if let Some(cmd) = self.card.as_mut().and_then(FollowToggle::refresh) {
            self.commands.push(cmd);
        }
    }

    fn toggle_follow(&mut self) {
        if self.search.profile().data().is_none() {
            return;
        }
        if let Some(cmd) = self.card.as_mut().and_then(FollowToggle::toggle) {
            self.commands.push(cmd);
        }
    }

    fn after_search(&mut self, cmd: Option<Command>) {
        if let Some(cmd) = cmd {
            self.commands.push(cmd);
        }
        self.recent_selected = 0;
        self.sync_card();
        for warning in self.search.drain_warnings() {
            self.notify(NotifyLevel::Warn, warning);
        }
    }

    /// Mounts a fresh toggle when the displayed login changes and drops it
    /// when no profile is shown.
    fn sync_card(&mut self) {
        let Some(login) = self.search.profile().data().map(|u| u.login.clone()) else {
            self.card = None;
            return;
        };
        if self.card.as_ref().map(FollowToggle::login) == Some(login.as_str()) {
            return;
        }
        let (toggle, cmd) = FollowToggle::mount(&login);
        self.card = Some(toggle);
        if let Some(cmd) = cmd {
            self.commands.push(cmd);
        }
    }

    fn finish_follow(
        &mut self,
        login: &str,
        action: FollowAction,
        id: u64,
        result: Result<(), GhseekError>,
    ) {
        let card = self.card.as_mut().filter(|c| c.login() == login);
        let (level, message, refetch) = match card {
            Some(card) => match card.finish(id, action, result) {
                FollowOutcome::Succeeded { message, refetch } => (NotifyLevel::Info, message, refetch),
                FollowOutcome::Failed { message } => (NotifyLevel::Error, message, None),
            },
            None => match result {
                Ok(()) => (NotifyLevel::Info, action.success_message(login), None),
                Err(e) => (NotifyLevel::Error, e.to_string(), None),
            },
        };
        if let Some(cmd) = refetch {
            self.commands.push(cmd);
        }
        self.notify(level, message);
    }

    fn profile_status(&self) -> ProfileStatus<'_> {
        let profile = self.search.profile();
        if profile.is_loading() {
            ProfileStatus::Loading(self.search.submitted())
        } else if let Some(err) = profile.error() {
            ProfileStatus::Failed(err)
        } else if let Some(user) = profile.data() {
            ProfileStatus::Shown(&user.login)
        } else {
            ProfileStatus::Empty
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let size = frame.area();

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(size);

        frame.render_widget(
            HeaderBar {
                authenticated: self.authenticated,
            },
            rows[0],
        );

        frame.render_widget(
            SearchBar {
                draft: self.search.draft(),
                focused: self.focus == Focus::Search,
                pending_query: self
                    .suggest
                    .is_fetching()
                    .then(|| self.suggest.debounced().trim()),
            },
            rows[1],
        );

        let body = Layout::horizontal([Constraint::Length(26), Constraint::Min(1)]).split(rows[2]);

        let entries = self.recent_entries();
        frame.render_widget(
            RecentPanel {
                entries: &entries,
                selected: self.recent_selected,
                focused: self.focus == Focus::Recent,
                submitted: self.search.submitted(),
            },
            body[0],
        );

        let profile = self.search.profile();
        match profile.data() {
            Some(user) => frame.render_widget(
                UserCard {
                    user,
                    toggle: self.card.as_ref(),
                    refreshing: profile.is_fetching(),
                    focused: self.focus == Focus::Card,
                },
                body[1],
            ),
            None => {
                let (text, style) = match self.profile_status() {
                    ProfileStatus::Loading(_) => ("Loading...".to_string(), Style::default()),
                    ProfileStatus::Failed(msg) => (msg.to_string(), Style::default().fg(theme::ERROR_FG)),
                    _ => (
                        "Search for a GitHub user to see their profile".to_string(),
                        Style::default().fg(theme::DIM_TEXT),
                    ),
                };
                let block = Block::default()
                    .title(" Profile ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::border_color(self.focus == Focus::Card)));
                frame.render_widget(
                    Paragraph::new(text).style(style).wrap(Wrap { trim: true }).block(block),
                    body[1],
                );
            }
        }

        frame.render_widget(
            StatusBar {
                profile: self.profile_status(),
                focus: self.focus,
            },
            rows[3],
        );

        if self.focus == Focus::Search && self.suggest.is_open() {
            let dropdown = Dropdown {
                suggestions: self.suggest.suggestions(),
                highlighted: self.suggest.highlighted(),
            };
            let area = dropdown.area(rows[1], size);
            frame.render_widget(dropdown, area);
        }

        for (i, notification) in self
            .notifications
            .iter()
            .rev()
            .take(MAX_VISIBLE_TOASTS)
            .enumerate()
        {
            frame.render_widget(
                Toast {
                    notification,
                    offset: i as u16 * 3,
                },
                rows[2],
            );
        }

        if self.show_help {
            frame.render_widget(HelpPanel, size);
        }
    }
}
