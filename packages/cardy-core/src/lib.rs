//! Cardy Banking Assistant Core
//!
//! Application state, input helpers and user flows for the Cardy chat
//! assistant. Views read [`BankState`] snapshots from the [`BankStore`] and
//! trigger work through [`BankAssistant`]; nothing else mutates state.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cardy_core::{BankAssistant, BankStore, Config};
//!
//! let config = Config::from_env()?;
//! let store = Arc::new(BankStore::new());
//! let assistant = BankAssistant::new(store.clone(), Arc::new(config.client()));
//!
//! assistant.account_lookup("9876543210").await?;
//! let reply = assistant.chat_query("What is my loan status?").await?;
//! ```
//!
//! # Modules
//!
//! - [`state`] - State shape, actions and the reducer
//! - [`store`] - Shared store with change notification
//! - [`flows`] - Login, account lookup, chat and quick actions
//! - [`health`] - Periodic backend health checks
//! - [`validators`] / [`formatters`] - Input checks and display helpers
//! - [`testing`] - Scripted backend for tests (`testing` feature)

pub mod config;
pub mod constants;
pub mod error;
pub mod flows;
pub mod formatters;
pub mod health;
pub mod replies;
pub mod state;
pub mod store;
pub mod validators;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::Config;
pub use error::{ConfigError, FlowError, ValidationError};
pub use flows::{BankAssistant, FlowResult, QuickAction, QuickActionOutcome};
pub use health::{refresh_health, spawn_health_monitor};
pub use state::{
    BankAction, BankState, ChatMessage, HealthStatus, MessageKind, ModalKind, ModalState,
    NewMessage, Session,
};
pub use store::BankStore;
