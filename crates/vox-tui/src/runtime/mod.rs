//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them.
//!
//! Async API results arrive through an inbox channel: handlers send
//! `UiEvent`s to `inbox_tx`, and the runtime drains `inbox_rx` each frame.

mod handlers;

use std::future::Future;
use std::io::Stdout;

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use vox_core::api::ApiClient;

use crate::effects::UiEffect;
use crate::events::{ApiUiEvent, UiEvent};
use crate::state::{AppState, DetailPhase, Screen};
use crate::{render, terminal, update};

/// Target frame interval while something is in flight (~60fps).
pub const FRAME_DURATION: std::time::Duration = std::time::Duration::from_millis(16);

/// Poll duration when idle. Longer timeout reduces CPU usage when nothing
/// is happening.
pub const IDLE_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(100);

type UiEventSender = mpsc::UnboundedSender<UiEvent>;
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop, panic, or Ctrl+C.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    client: ApiClient,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: std::time::Instant,
    last_terminal_event: std::time::Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime and enters the alternate screen.
    pub fn new(client: ApiClient, state: AppState) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let now = std::time::Instant::now();
        Ok(Self {
            terminal,
            state,
            client,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop.
    ///
    /// Must be called from within a tokio runtime; effect handlers are
    /// spawned onto it.
    pub fn run(&mut self) -> Result<()> {
        // The initial screen is a loading poll list; kick off the fetch.
        self.execute_effect(UiEffect::FetchPolls);

        let mut dirty = true;
        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = std::time::Instant::now();
                }

                // Only Tick triggers render - this caps frame rate at tick
                // cadence. Other events update state but batch renders.
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }

                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects events from the terminal and the inbox.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast polling while a request is in flight or the user is actively
        // interacting; slow polling otherwise to save CPU.
        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let tick_interval = if self.is_busy() || recent_terminal_activity {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(event) = self.inbox_rx.try_recv() {
            events.push(event);
        }

        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            std::time::Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(std::time::Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = std::time::Instant::now();
        }

        Ok(events)
    }

    /// Whether any screen has a request in flight.
    fn is_busy(&self) -> bool {
        match &self.state.screen {
            Screen::PollList(list) => list.loading,
            Screen::PollDetail(detail) => match &detail.phase {
                DetailPhase::Loading => true,
                DetailPhase::NotFound => false,
                DetailPhase::Ready(ready) => ready.voting,
            },
            Screen::CreatePoll(form) => form.submitting,
            Screen::Login(form) | Screen::Register(form) => form.submitting,
        }
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async effect handler and routes its result to the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce(ApiClient) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            let _ = tx.send(f(client).await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::FetchPolls => {
                self.spawn_effect(handlers::fetch_polls);
            }
            UiEffect::FetchPollDetail { poll_id } => {
                self.spawn_effect(move |client| handlers::fetch_poll_detail(client, poll_id));
            }
            UiEffect::SubmitPoll { poll } => {
                self.spawn_effect(move |client| handlers::submit_poll(client, poll));
            }
            UiEffect::SubmitVote { poll_id, option_id } => {
                self.spawn_effect(move |client| handlers::submit_vote(client, poll_id, option_id));
            }
            UiEffect::Login { username, password } => {
                self.spawn_effect(move |client| handlers::login(client, username, password));
            }
            UiEffect::Register { username, password } => {
                self.spawn_effect(move |client| handlers::register(client, username, password));
            }
            UiEffect::Logout => {
                // Synchronous: deletes the session file. Errors are logged,
                // not surfaced; the session may already be gone.
                if let Err(e) = self.client.logout() {
                    tracing::error!("Failed to clear session: {e:#}");
                }
                let effects =
                    update::update(&mut self.state, UiEvent::Api(ApiUiEvent::LoggedOut));
                self.execute_effects(effects);
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
