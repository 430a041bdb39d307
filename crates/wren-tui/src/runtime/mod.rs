//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Async results arrive through a single "inbox" channel:
//! - Handlers send `UiEvent`s directly to `inbox_tx`
//! - The runtime drains `inbox_rx` each frame
//! - This eliminates per-operation receivers and keeps event collection flat

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use wren_core::api::ApiClient;
use wren_core::config::Config;
use wren_core::credentials::{BearerToken, CredentialStore};

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Target frame rate for interactive updates (60fps = ~16ms per frame).
pub const FRAME_DURATION: std::time::Duration = std::time::Duration::from_millis(16);

/// Poll duration when idle (no tasks running, no recent input).
/// Longer timeout reduces CPU usage when nothing is happening.
pub const IDLE_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop, panic, or Ctrl+C.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    /// API client shared with spawned handlers. Rebuilt when the stored
    /// credential changes.
    client: Arc<ApiClient>,
    base_url: String,
    /// Inbox sender - handlers send events here.
    inbox_tx: UiEventSender,
    /// Inbox receiver - runtime drains this each frame.
    inbox_rx: UiEventReceiver,
    last_tick: std::time::Instant,
    last_render: std::time::Instant,
    /// Last time a terminal event was received (for fast tick during
    /// interaction).
    last_terminal_event: std::time::Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(config: Config, token: Option<BearerToken>) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let base_url = config.effective_base_url().to_string();
        let client = Arc::new(ApiClient::with_token(base_url.clone(), token));
        let state = AppState::new(config);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let now = std::time::Instant::now();
        Ok(Self {
            terminal,
            state,
            client,
            base_url,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_render: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop.
    ///
    /// # Errors
    /// Returns an error if terminal I/O fails.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;

        let effects = update::bootstrap(&mut self.state.tui);
        self.execute_effects(effects);

        let result = self.event_loop();

        let _ = terminal::disable_input_features();

        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.tui.should_quit {
            let mut events = self.collect_events()?;

            // Prepend Frame event with the current terminal size so layout
            // updates happen before other events.
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = std::time::Instant::now();
                }

                // Only Tick triggers render - this caps the frame rate at
                // tick cadence. Terminal events update state but batch
                // renders to the next Tick.
                let marks_dirty = matches!(&event, UiEvent::Tick);

                let effects = update::update(&mut self.state, event);
                if marks_dirty {
                    dirty = true;
                }
                self.execute_effects(effects);
            }

            if dirty {
                self.last_render = std::time::Instant::now();
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

        // Fast polling while tasks run or the user is interacting;
        // otherwise slow polling to save CPU.
        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll =
            self.state.tui.tasks.is_any_running() || recent_terminal_activity;

        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Drain inbox - all async results arrive here
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Wake up exactly when the next Tick is due, unless events are
        // already pending.
        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            std::time::Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
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

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        if !effects.is_empty() {
            self.execute_effects(effects);
        }
    }

    /// Spawns an async task with a uniform TaskStarted/TaskCompleted
    /// lifecycle. The reducer drops completions whose id is no longer the
    /// active one for the kind, so only the latest-issued task lands.
    ///
    /// The started event is applied synchronously, not through the inbox:
    /// a later event in the same batch (say, navigating away right after
    /// the load was issued) must already see the task as running so it
    /// can cancel it.
    fn spawn_task<F, Fut>(&mut self, kind: TaskKind, id: TaskId, cancelable: bool, f: F)
    where
        F: FnOnce(Option<CancellationToken>) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let cancel = cancelable.then(CancellationToken::new);
        let started = TaskStarted {
            id,
            cancel: cancel.clone(),
        };
        self.dispatch_event(UiEvent::TaskStarted { kind, started });
        tokio::spawn(async move {
            let inner = f(cancel).await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    /// Executes a single effect by dispatching to the appropriate handler.
    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }

            // Cancellation: emitted by the reducer when an in-flight load
            // is abandoned. The runtime just fires the token; the late
            // completion is dropped as stale.
            UiEffect::CancelTask { token, .. } => {
                if let Some(cancel) = token {
                    cancel.cancel();
                }
            }

            UiEffect::ResolveSession { task } => {
                let client = Arc::clone(&self.client);
                self.spawn_task(TaskKind::SessionResolve, task, false, move |_| {
                    handlers::resolve_session(client)
                });
            }
            UiEffect::LoadFeed { task } => {
                let client = Arc::clone(&self.client);
                self.spawn_task(TaskKind::FeedLoad, task, true, move |cancel| {
                    handlers::load_feed(client, cancel)
                });
            }
            UiEffect::CreatePost {
                task,
                message,
                hashtags,
            } => {
                let client = Arc::clone(&self.client);
                self.spawn_task(TaskKind::PostCreate, task, false, move |_| {
                    handlers::create_post(client, message, hashtags)
                });
            }
            UiEffect::DeletePost { task, id } => {
                let client = Arc::clone(&self.client);
                self.spawn_task(TaskKind::PostDelete, task, false, move |_| {
                    handlers::delete_post(client, id)
                });
            }
            UiEffect::Login {
                task,
                username,
                password,
            } => {
                let client = Arc::clone(&self.client);
                self.spawn_task(TaskKind::Login, task, false, move |_| {
                    handlers::login(client, username, password)
                });
            }
            UiEffect::Register {
                task,
                username,
                email,
                password,
            } => {
                let client = Arc::clone(&self.client);
                self.spawn_task(TaskKind::Register, task, false, move |_| {
                    handlers::register(client, username, email, password)
                });
            }
            UiEffect::DeleteAccount { task } => {
                let client = Arc::clone(&self.client);
                self.spawn_task(TaskKind::AccountDelete, task, false, move |_| {
                    handlers::delete_account(client)
                });
            }

            UiEffect::SaveCredential { token } => {
                let mut store = CredentialStore::load().unwrap_or_default();
                store.set(token.clone());
                if let Err(e) = store.save() {
                    tracing::warn!("failed to persist credential: {e:#}");
                }
                self.rebuild_client(Some(token));
            }
            UiEffect::ClearCredential => {
                let mut store = CredentialStore::load().unwrap_or_default();
                store.clear();
                if let Err(e) = store.save() {
                    tracing::warn!("failed to clear credential: {e:#}");
                }
                self.rebuild_client(None);
            }
        }
    }

    /// Swaps in a client carrying the new credential. In-flight tasks keep
    /// their clone of the old client and finish with the old token.
    fn rebuild_client(&mut self, token: Option<BearerToken>) {
        self.client = Arc::new(ApiClient::with_token(self.base_url.clone(), token));
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
