//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! This keeps the reducer pure: it only mutates state and returns effects,
//! never performs I/O or spawns tasks directly.

use vox_types::NewPoll;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Fetch the poll list.
    FetchPolls,

    /// Fetch one poll and its results (two sequential requests).
    FetchPollDetail { poll_id: i64 },

    /// Create a poll.
    SubmitPoll { poll: NewPoll },

    /// Cast a vote, then refetch results.
    SubmitVote { poll_id: i64, option_id: i64 },

    /// Sign in with the given credentials.
    Login { username: String, password: String },

    /// Create an account with the given credentials.
    Register { username: String, password: String },

    /// Drop the stored session.
    Logout,
}
