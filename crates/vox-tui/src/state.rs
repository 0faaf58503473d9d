//! TUI state types.
//!
//! One `Screen` at a time; each screen owns its own state struct. The reducer
//! is the only place these are mutated.

use vox_types::{Poll, PollOption, User};

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Whether the event loop should exit.
    pub should_quit: bool,
    /// The signed-in account, if any. Mirrors the stored session at startup
    /// and tracks login/logout while the TUI runs.
    pub user: Option<User>,
    /// The active screen.
    pub screen: Screen,
}

impl AppState {
    /// Creates the initial state: poll list, loading.
    pub fn new(user: Option<User>) -> Self {
        Self {
            should_quit: false,
            user,
            screen: Screen::PollList(PollListState::loading()),
        }
    }
}

/// The active screen.
#[derive(Debug)]
pub enum Screen {
    PollList(PollListState),
    PollDetail(PollDetailState),
    CreatePoll(CreatePollState),
    Login(AuthFormState),
    Register(AuthFormState),
}

/// Poll list screen.
#[derive(Debug)]
pub struct PollListState {
    pub polls: Vec<Poll>,
    pub loading: bool,
    /// Cursor into `polls`; clamped whenever the list changes.
    pub selected: usize,
}

impl PollListState {
    pub fn loading() -> Self {
        Self {
            polls: Vec::new(),
            loading: true,
            selected: 0,
        }
    }
}

/// Poll detail screen.
#[derive(Debug)]
pub struct PollDetailState {
    pub poll_id: i64,
    pub phase: DetailPhase,
}

impl PollDetailState {
    pub fn loading(poll_id: i64) -> Self {
        Self {
            poll_id,
            phase: DetailPhase::Loading,
        }
    }
}

/// Detail screen lifecycle. Any load failure lands in `NotFound`.
#[derive(Debug)]
pub enum DetailPhase {
    Loading,
    NotFound,
    Ready(DetailReady),
}

/// Loaded poll detail: the poll, its current results, and voting state.
#[derive(Debug)]
pub struct DetailReady {
    pub poll: Poll,
    pub results: Vec<PollOption>,
    /// Cursor into `poll.options`; `None` until the user picks one.
    pub selected: Option<usize>,
    pub voting: bool,
    pub error: Option<String>,
}

/// Poll creation form.
#[derive(Debug)]
pub struct CreatePollState {
    pub title: String,
    pub description: String,
    pub end_date: String,
    /// Option texts; starts with two empty slots and never shrinks below two.
    pub options: Vec<String>,
    pub focus: CreateFocus,
    pub error: Option<String>,
    pub submitting: bool,
}

impl CreatePollState {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            end_date: String::new(),
            options: vec![String::new(), String::new()],
            focus: CreateFocus::Title,
            error: None,
            submitting: false,
        }
    }
}

impl Default for CreatePollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Focused field on the creation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateFocus {
    Title,
    Description,
    EndDate,
    Option(usize),
}

/// Login/register form; both screens share the same shape.
#[derive(Debug, Default)]
pub struct AuthFormState {
    pub username: String,
    pub password: String,
    pub focus: AuthFocus,
    pub error: Option<String>,
    pub submitting: bool,
}

/// Focused field on the auth form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthFocus {
    #[default]
    Username,
    Password,
}
