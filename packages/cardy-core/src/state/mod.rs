//! Application state held by the [`BankStore`](crate::store::BankStore).

mod actions;
mod reducer;

pub use actions::BankAction;
pub use reducer::{BankReducer, Clock, Reducer};

use cardy_client::{AccountRecord, HealthReport, UserContext};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Bot,
    System,
    Error,
}

impl MessageKind {
    pub fn label(&self) -> &'static str {
        match self {
            MessageKind::User => "You",
            MessageKind::Bot => "Cardy",
            MessageKind::System => "System",
            MessageKind::Error => "Error",
        }
    }
}

/// A message before the store assigns it an id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub kind: MessageKind,
    pub text: String,
    pub account_data: Option<AccountRecord>,
}

impl NewMessage {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            account_data: None,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageKind::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Bot, text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(MessageKind::System, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Error, text)
    }

    pub fn with_account(mut self, record: AccountRecord) -> Self {
        self.account_data = Some(record);
        self
    }
}

/// A message in the chat log. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub id: u64,
    pub kind: MessageKind,
    pub text: String,
    pub account_data: Option<AccountRecord>,
    pub created_at: DateTime<Utc>,
}

/// Authenticated user.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub mobile_number: String,
    pub account_data: AccountRecord,
}

impl Session {
    /// Context forwarded with chat queries.
    pub fn context(&self) -> UserContext {
        UserContext {
            mobile_number: self.mobile_number.clone(),
            account_data: self.account_data.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModalKind {
    AccountLookup,
}

impl ModalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModalKind::AccountLookup => "account-lookup",
        }
    }
}

/// At most one modal is open at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModalState {
    pub is_open: bool,
    pub kind: Option<ModalKind>,
    pub data: Option<Value>,
}

impl ModalState {
    pub fn is_showing(&self, kind: ModalKind) -> bool {
        self.is_open && self.kind == Some(kind)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HealthStatus {
    pub is_healthy: bool,
    pub llm_available: bool,
    pub last_checked: Option<DateTime<Utc>>,
}

impl HealthStatus {
    pub fn from_report(report: &HealthReport, checked_at: DateTime<Utc>) -> Self {
        Self {
            is_healthy: report.is_healthy(),
            llm_available: report.llm_available.unwrap_or(false),
            last_checked: Some(checked_at),
        }
    }
}

/// Whole application state. Only the reducer produces new values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BankState {
    pub messages: Vec<ChatMessage>,
    pub account_data: Option<AccountRecord>,
    pub user: Option<Session>,
    pub is_authenticated: bool,
    pub is_typing: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    pub modal: ModalState,
    pub health: HealthStatus,
    /// Bumped whenever the session or chat log is torn down. Flows compare
    /// it before applying late results.
    pub generation: u64,
    /// Id of the most recently appended message.
    pub(crate) message_seq: u64,
}

impl BankState {
    /// Chat context for the current session, if authenticated.
    pub fn user_context(&self) -> Option<UserContext> {
        if !self.is_authenticated {
            return None;
        }
        self.user.as_ref().map(Session::context)
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}
