//! # Dispatcher
//!
//! The loop tying the store to the epics. One action at a time:
//!
//! ```text
//! Action ──► Store::apply (reduce + notify) ──► Epics::observe
//!                                                 │         │
//!                             immediate follow-ups│         │spawned work
//!                                                 ▼         ▼
//!                                      dispatched now   action channel
//! ```
//!
//! Immediate follow-ups run depth-first, so an epic's synchronous output is
//! fully folded into the state before the next queued action is looked at.
//! Queued items pass through [`Epics::accept`] on the way out, so a countdown
//! tick that was already waiting when its countdown got cancelled is dropped.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use rand::rngs::StdRng;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::api::JokeSource;
use crate::core::action::Action;
use crate::core::state::AppState;
use crate::core::store::Store;
use crate::epics::{ActionSender, EpicSettings, Epics, Queued};

pub struct Dispatcher {
    store: Store,
    epics: Epics,
    sender: ActionSender,
    receiver: UnboundedReceiver<Queued>,
}

impl Dispatcher {
    pub fn new(
        store: Store,
        source: Arc<dyn JokeSource>,
        rng: StdRng,
        settings: EpicSettings,
    ) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let epics = Epics::new(source, rng, settings, sender.clone());
        Self {
            store,
            epics,
            sender,
            receiver,
        }
    }

    /// A handle for queueing actions from elsewhere (tasks, input threads).
    pub fn sender(&self) -> ActionSender {
        self.sender.clone()
    }

    pub fn state(&self) -> &Arc<AppState> {
        self.store.state()
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn countdown_active(&self) -> bool {
        self.epics.countdown_active()
    }

    /// Folds `action` into the store, then lets the epics react.
    /// Must be called from inside a tokio runtime.
    pub fn dispatch(&mut self, action: Action) {
        debug!("Dispatch: {:?}", action);
        self.store.apply(&action);
        for follow_up in self.epics.observe(&action) {
            self.dispatch(follow_up);
        }
    }

    /// Dispatches everything already queued without waiting.
    /// Returns how many queued actions were handled.
    pub fn drain(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(queued) = self.receiver.try_recv() {
            if let Some(action) = self.epics.accept(queued) {
                self.dispatch(action);
                handled += 1;
            }
        }
        handled
    }

    /// Waits for the next live queued action and dispatches it.
    pub async fn process_next(&mut self) -> Option<Action> {
        loop {
            let queued = self.receiver.recv().await?;
            if let Some(action) = self.epics.accept(queued) {
                self.dispatch(action.clone());
                return Some(action);
            }
        }
    }

    /// Keeps dispatching until nothing arrives for `idle`.
    pub async fn run_until_idle(&mut self, idle: Duration) -> usize {
        let mut handled = 0;
        while let Ok(Some(_)) = tokio::time::timeout(idle, self.process_next()).await {
            handled += 1;
        }
        handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::core::action::reduce;
    use crate::test_support::{ScriptedSource, seeded_rng, test_state};
    use std::sync::Mutex;

    fn dispatcher(source: ScriptedSource, initial: AppState) -> Dispatcher {
        Dispatcher::new(
            Store::new(initial, reduce),
            Arc::new(source),
            seeded_rng(),
            EpicSettings::default(),
        )
    }

    #[tokio::test]
    async fn test_set_joke_always_clears_themes_and_timer() {
        let mut d = dispatcher(ScriptedSource::with_categories(&["dev"]), test_state());
        d.dispatch(Action::SetJoke(Some("fresh".into())));

        let state = d.state();
        assert_eq!(state.joke.as_deref(), Some("fresh"));
        assert!(state.themes.is_empty());
        assert_eq!(state.timer, 0);
    }

    #[tokio::test]
    async fn test_request_joke_clears_immediately() {
        let mut d = dispatcher(ScriptedSource::with_categories(&["dev"]), test_state());
        d.dispatch(Action::RequestJoke);

        let state = d.state();
        assert!(state.joke.is_none());
        assert!(state.loading);
        assert!(state.themes.is_empty());
        assert_eq!(state.timer, 0);
    }

    #[tokio::test]
    async fn test_apply_theme_end_to_end() {
        let source = ScriptedSource::with_categories(&["dev"]).joke("joke text");
        let initial = AppState {
            loading: true,
            ..test_state()
        };
        let mut d = dispatcher(source, initial);

        d.dispatch(Action::ApplyTheme("dev".into()));
        assert_eq!(
            d.process_next().await,
            Some(Action::SetJoke(Some("joke text".into())))
        );

        let state = d.state();
        assert_eq!(state.joke.as_deref(), Some("joke text"));
        assert!(state.themes.is_empty());
        assert_eq!(state.timer, 0);
        assert!(state.loading, "loading is untouched by ApplyTheme");
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_round_trip_with_countdown() {
        let mut d = dispatcher(
            ScriptedSource::with_categories(&["a", "b", "c"]),
            AppState::default(),
        );
        d.dispatch(Action::RequestJoke);

        assert!(matches!(d.process_next().await, Some(Action::SetThemes(_))));
        assert_eq!(d.process_next().await, Some(Action::SetLoading(false)));
        assert_eq!(d.process_next().await, Some(Action::SetTimer(5)));

        let state = d.state().clone();
        assert_eq!(state.themes.len(), 3);
        assert_eq!(state.timer, 5);
        assert!(!state.loading);
        assert!(d.countdown_active());

        d.run_until_idle(Duration::from_secs(10)).await;

        let state = d.state();
        assert!(state.themes.is_empty());
        assert_eq!(state.timer, 0);
        assert!(!d.countdown_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_observed_by_subscriber() {
        let timers = Arc::new(Mutex::new(Vec::new()));
        let mut d = dispatcher(ScriptedSource::with_categories(&["a"]), AppState::default());
        let sink = timers.clone();
        d.store_mut().subscribe(move |state| {
            let mut seen = sink.lock().unwrap();
            if seen.last() != Some(&state.timer) {
                seen.push(state.timer);
            }
        });

        d.dispatch(Action::RequestJoke);
        d.run_until_idle(Duration::from_secs(10)).await;

        // First notification is SetLoading(true) with the timer still at 0.
        assert_eq!(*timers.lock().unwrap(), vec![0, 5, 4, 3, 2, 1, 0]);
    }

    #[tokio::test]
    async fn test_failed_categories_unblock_loading() {
        let source = ScriptedSource::failing(ApiError::Network("timed out".into()));
        let mut d = dispatcher(source, AppState::default());

        d.dispatch(Action::RequestJoke);
        assert!(d.state().loading);
        assert!(matches!(d.process_next().await, Some(Action::RequestFailed(_))));

        let state = d.state();
        assert!(!state.loading);
        assert!(state.error.as_deref().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_drain_handles_queued_actions() {
        let mut d = dispatcher(ScriptedSource::with_categories(&["a"]), AppState::default());
        let tx = d.sender();
        tx.send(Action::SetLoading(true).into()).unwrap();
        tx.send(Action::SetTimer(2).into()).unwrap();

        assert_eq!(d.drain(), 2);
        assert!(d.state().loading);
        assert_eq!(d.state().timer, 2);
        assert_eq!(d.drain(), 0);
    }

    /// Offers themes and lets the first countdown tick land in the channel
    /// without dispatching it.
    async fn with_queued_tick(source: ScriptedSource) -> Dispatcher {
        let mut d = dispatcher(source, AppState::default());
        d.dispatch(Action::SetThemes(vec!["a".into(), "b".into(), "c".into()]));
        d.dispatch(Action::SetTimer(5));
        tokio::time::sleep(Duration::from_millis(1001)).await;
        d
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_tick_dropped_after_request_joke() {
        let source = ScriptedSource::failing(ApiError::Network("down".into()));
        let mut d = with_queued_tick(source).await;

        d.dispatch(Action::RequestJoke);
        d.run_until_idle(Duration::from_secs(10)).await;

        let state = d.state();
        assert_eq!(state.timer, 0);
        assert!(state.themes.is_empty());
        assert!(!state.loading);
        assert!(state.error.is_some());
        assert!(!d.countdown_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_tick_dropped_after_set_joke() {
        let mut d = with_queued_tick(ScriptedSource::with_categories(&["a"])).await;

        d.dispatch(Action::SetJoke(Some("joke".into())));
        assert_eq!(d.drain(), 0);
        d.run_until_idle(Duration::from_secs(10)).await;

        let state = d.state();
        assert_eq!(state.joke.as_deref(), Some("joke"));
        assert_eq!(state.timer, 0);
        assert!(state.themes.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_tick_from_replaced_countdown_is_dropped() {
        let mut d = with_queued_tick(ScriptedSource::with_categories(&["a"])).await;

        // Fresh themes restart the clock; the old SetTimer(4) must not land.
        d.dispatch(Action::SetThemes(vec!["x".into(), "y".into(), "z".into()]));
        d.dispatch(Action::SetTimer(5));
        assert_eq!(d.drain(), 0);
        assert_eq!(d.state().timer, 5);
        assert!(d.countdown_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_second_countdown_still_clears_themes() {
        let settings = EpicSettings {
            countdown_secs: 0,
            ..EpicSettings::default()
        };
        let mut d = Dispatcher::new(
            Store::new(AppState::default(), reduce),
            Arc::new(ScriptedSource::with_categories(&["a", "b"])),
            seeded_rng(),
            settings,
        );

        d.dispatch(Action::RequestJoke);
        d.run_until_idle(Duration::from_secs(30)).await;

        let state = d.state();
        assert!(state.themes.is_empty());
        assert_eq!(state.timer, 0);
        assert!(!state.loading);
    }
}
