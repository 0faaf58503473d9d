//! Full-screen TUI for Vox.

pub mod effects;
pub mod events;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
pub use runtime::TuiRuntime;
use vox_core::api::ApiClient;
use vox_core::session;

use crate::state::AppState;

/// Runs the interactive poll browser.
pub fn run(client: ApiClient) -> Result<()> {
    // The TUI needs a terminal to render into
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The interactive browser requires a terminal.\n\
             Use `vox polls list` for non-interactive output."
        );
    }

    let user = session::load(client.home())?.map(|s| s.user);
    let state = AppState::new(user);

    let mut runtime = TuiRuntime::new(client, state)?;
    runtime.run()?;

    Ok(())
}
