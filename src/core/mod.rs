//! # Core Application Logic
//!
//! This module contains Quip's business logic.
//! It knows nothing about any specific UI technology, and does no I/O.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • AppState (app data)  │
//!                    │  • Action (events)      │
//!                    │  • reduce() (reducer)   │
//!                    │  • Store (container)    │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Epics    │      │    API     │
//!     │  Adapter   │      │ (effects)  │      │  (reqwest) │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `AppState` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `reduce()` function
//! - [`store`]: The `Store` that owns the state and notifies subscribers
//! - [`config`]: Settings resolution (defaults → file → env → CLI)

pub mod action;
pub mod config;
pub mod state;
pub mod store;

pub use action::{Action, reduce};
pub use state::AppState;
pub use store::Store;
