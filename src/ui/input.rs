use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Recent,
    Card,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Search => Focus::Recent,
            Focus::Recent => Focus::Card,
            Focus::Card => Focus::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Search => Focus::Card,
            Focus::Recent => Focus::Search,
            Focus::Card => Focus::Recent,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Input(char),
    Backspace,
    Submit,
    Up,
    Down,
    NextFocus,
    PrevFocus,
    FocusSearch,
    Select,
    ToggleFollow,
    OpenProfile,
    Refresh,
    Help,
    Dismiss,
    Quit,
    None,
}

pub fn map_key(key: KeyEvent, focus: Focus) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Tab => return Action::NextFocus,
        KeyCode::BackTab => return Action::PrevFocus,
        KeyCode::Esc => return Action::Dismiss,
        _ => {}
    }

    if focus == Focus::Search {
        return match key.code {
            KeyCode::Enter => Action::Submit,
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Up => Action::Up,
            KeyCode::Down => Action::Down,
            KeyCode::Char(c) => Action::Input(c),
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::Down,
        KeyCode::Char('k') | KeyCode::Up => Action::Up,
        KeyCode::Enter => Action::Select,
        KeyCode::Char('f') => Action::ToggleFollow,
        KeyCode::Char('o') => Action::OpenProfile,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('/') | KeyCode::Char('i') => Action::FocusSearch,
        KeyCode::Char('?') => Action::Help,
        _ => Action::None,
    }
}
