//! UI event types.
//!
//! Everything that can change state flows through here: terminal input,
//! the frame tick, and completed API calls.

use vox_types::{Poll, PollOption, User};

/// Events consumed by the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick; drives rendering.
    Tick,
    /// Raw terminal input.
    Terminal(crossterm::event::Event),
    /// A completed API call.
    Api(ApiUiEvent),
}

/// Results of async API calls, sent to the inbox by handlers.
///
/// Failure variants carry the rendered error chain as a string so the
/// reducer stays free of error types.
#[derive(Debug)]
pub enum ApiUiEvent {
    PollsLoaded(Vec<Poll>),
    PollsLoadFailed(String),
    PollDetailLoaded {
        poll_id: i64,
        poll: Poll,
        results: Vec<PollOption>,
    },
    PollDetailFailed {
        poll_id: i64,
        error: String,
    },
    PollCreated(Poll),
    PollCreateFailed(String),
    VoteRecorded {
        poll_id: i64,
        results: Vec<PollOption>,
    },
    VoteFailed {
        poll_id: i64,
        error: String,
    },
    LoginCompleted(User),
    LoginFailed(String),
    RegisterCompleted(User),
    RegisterFailed(String),
    LoggedOut,
}
