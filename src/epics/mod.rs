//! # Epics
//!
//! Side effects live here. Every dispatched action is shown to [`Epics::observe`]
//! after the reducer has run. An epic answers in one of two ways:
//!
//! - **Immediately**: follow-up actions are returned as a `Vec` and the
//!   dispatcher runs them, in order, before anything else.
//! - **Later**: a tokio task is spawned; whatever it produces is sent back
//!   through the action channel.
//!
//! ```text
//! RequestJoke ──► request_joke  ──► SetJoke(None), SetLoading(true)
//!                                   ... GET /jokes/categories ...
//!                               ──► SetThemes([a,b,c]), SetLoading(false), SetTimer(5)
//! SetThemes([..]) ► countdown   ──► SetTimer(4) ... SetTimer(0), SetThemes([])
//! SetJoke(_)    ──► joke_arrived ─► SetThemes([]), SetTimer(0)
//! ApplyTheme(c) ──► apply_theme ──► ... GET /jokes/random?category=c ...
//!                               ──► SetJoke(Some(text))
//! ```
//!
//! RequestJoke and SetJoke also cancel the running countdown. Countdown
//! output is stamped with the instance that produced it, and
//! [`Epics::accept`] drops anything still queued from a cancelled instance.

pub mod apply_theme;
pub mod countdown;
pub mod request_joke;

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, warn};
use rand::rngs::StdRng;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::api::JokeSource;
use crate::core::action::Action;
use crate::core::config::{DEFAULT_COUNTDOWN_SECS, DEFAULT_TICK_MILLIS, ResolvedConfig};

/// What the async epics put on the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Queued {
    /// Result of a fetch.
    Action(Action),
    /// Countdown output, tagged with the countdown instance that sent it.
    Countdown { instance: u64, action: Action },
}

impl From<Action> for Queued {
    fn from(action: Action) -> Self {
        Queued::Action(action)
    }
}

/// Channel the async epics report back on.
pub type ActionSender = UnboundedSender<Queued>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpicSettings {
    /// Seconds the user gets to pick a category.
    pub countdown_secs: u32,
    /// Length of one countdown second.
    pub tick: Duration,
}

impl Default for EpicSettings {
    fn default() -> Self {
        Self {
            countdown_secs: DEFAULT_COUNTDOWN_SECS,
            tick: Duration::from_millis(DEFAULT_TICK_MILLIS),
        }
    }
}

impl From<&ResolvedConfig> for EpicSettings {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            countdown_secs: config.countdown_secs,
            tick: config.tick,
        }
    }
}

struct Countdown {
    instance: u64,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct Epics {
    source: Arc<dyn JokeSource>,
    sampler: Arc<Mutex<StdRng>>,
    settings: EpicSettings,
    sender: ActionSender,
    countdown: Option<Countdown>,
    next_instance: u64,
}

impl Epics {
    pub fn new(
        source: Arc<dyn JokeSource>,
        rng: StdRng,
        settings: EpicSettings,
        sender: ActionSender,
    ) -> Self {
        Self {
            source,
            sampler: Arc::new(Mutex::new(rng)),
            settings,
            sender,
            countdown: None,
            next_instance: 0,
        }
    }

    pub fn settings(&self) -> EpicSettings {
        self.settings
    }

    /// Runs every epic against `action`. Returns the follow-ups that must be
    /// dispatched right away. Must be called from inside a tokio runtime.
    pub fn observe(&mut self, action: &Action) -> Vec<Action> {
        match action {
            Action::RequestJoke => {
                self.cancel_countdown();
                self.spawn(request_joke::fetch_themes(
                    self.source.clone(),
                    self.sampler.clone(),
                    self.settings.countdown_secs,
                ));
                request_joke::immediate()
            }
            Action::SetJoke(_) => {
                self.cancel_countdown();
                joke_arrived()
            }
            Action::SetThemes(themes) if !themes.is_empty() => {
                self.start_countdown();
                Vec::new()
            }
            Action::ApplyTheme(category) => {
                self.spawn(apply_theme::fetch_joke(self.source.clone(), category.clone()));
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Unwraps a queued item for dispatch. Countdown output from an instance
    /// that has since been cancelled or replaced yields `None`.
    pub fn accept(&self, queued: Queued) -> Option<Action> {
        match queued {
            Queued::Action(action) => Some(action),
            Queued::Countdown { instance, action } => {
                let live = self
                    .countdown
                    .as_ref()
                    .is_some_and(|c| c.instance == instance && !c.token.is_cancelled());
                if live {
                    Some(action)
                } else {
                    debug!("Dropping {} from stale countdown #{}", action.kind(), instance);
                    None
                }
            }
        }
    }

    /// True while a countdown task is still ticking.
    pub fn countdown_active(&self) -> bool {
        self.countdown
            .as_ref()
            .is_some_and(|c| !c.token.is_cancelled() && !c.handle.is_finished())
    }

    fn start_countdown(&mut self) {
        // One countdown at a time: a fresh theme set restarts the clock.
        self.cancel_countdown();
        let token = CancellationToken::new();
        let instance = self.next_instance;
        self.next_instance += 1;
        debug!(
            "Starting countdown #{}: {}s, tick {:?}",
            instance, self.settings.countdown_secs, self.settings.tick
        );
        let handle = tokio::spawn(countdown::run(
            token.clone(),
            instance,
            self.settings,
            self.sender.clone(),
        ));
        self.countdown = Some(Countdown {
            instance,
            token,
            handle,
        });
    }

    fn cancel_countdown(&mut self) {
        if let Some(countdown) = self.countdown.take() {
            if !countdown.handle.is_finished() {
                debug!("Cancelling active countdown");
            }
            countdown.token.cancel();
        }
    }

    /// Runs `work` in the background and forwards its actions, in order.
    fn spawn<F>(&self, work: F)
    where
        F: Future<Output = Vec<Action>> + Send + 'static,
    {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            for action in work.await {
                if sender.send(Queued::Action(action)).is_err() {
                    warn!("Failed to forward epic action: receiver dropped");
                    return;
                }
            }
        });
    }
}

impl Drop for Epics {
    fn drop(&mut self) {
        self.cancel_countdown();
    }
}

/// A joke was shown (or cleared): hide the choices and the clock.
pub fn joke_arrived() -> Vec<Action> {
    vec![Action::SetThemes(Vec::new()), Action::SetTimer(0)]
}
