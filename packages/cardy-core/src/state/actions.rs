use cardy_client::{AccountRecord, HealthReport};
use serde_json::Value;

use super::{ModalKind, NewMessage, Session};

/// Every state transition the store accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum BankAction {
    // Messages
    AddMessage(NewMessage),
    ClearMessages,
    SetTyping(bool),

    // Account
    SetAccountData(Option<AccountRecord>),
    ClearAccountData,

    // Authentication
    SetUser(Session),
    LogoutUser,

    // Loading & errors
    SetLoading(bool),
    SetError(Option<String>),
    ClearError,

    // Modal
    SetModal {
        kind: ModalKind,
        data: Option<Value>,
    },
    CloseModal,

    // Health
    SetHealthStatus(HealthReport),
}

impl BankAction {
    /// Whether this action belongs to the current session and must be
    /// dropped once that session is gone.
    pub fn is_session_scoped(&self) -> bool {
        matches!(
            self,
            BankAction::AddMessage(_)
                | BankAction::SetAccountData(_)
                | BankAction::SetUser(_)
                | BankAction::SetError(_)
                | BankAction::SetModal { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            BankAction::AddMessage(_) => "add_message",
            BankAction::ClearMessages => "clear_messages",
            BankAction::SetTyping(_) => "set_typing",
            BankAction::SetAccountData(_) => "set_account_data",
            BankAction::ClearAccountData => "clear_account_data",
            BankAction::SetUser(_) => "set_user",
            BankAction::LogoutUser => "logout_user",
            BankAction::SetLoading(_) => "set_loading",
            BankAction::SetError(_) => "set_error",
            BankAction::ClearError => "clear_error",
            BankAction::SetModal { .. } => "set_modal",
            BankAction::CloseModal => "close_modal",
            BankAction::SetHealthStatus(_) => "set_health_status",
        }
    }
}
