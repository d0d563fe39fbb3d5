//! Bank reducer - the only place state changes.

use chrono::{DateTime, Utc};

use super::{BankAction, BankState, ChatMessage, HealthStatus, ModalState, NewMessage};

/// Pure transition from one state to the next.
pub trait Reducer<A, S> {
    fn reduce(&self, state: &S, action: &A) -> S;
}

/// Source of timestamps for appended messages and health checks.
pub type Clock = fn() -> DateTime<Utc>;

/// Reducer for [`BankState`].
#[derive(Clone, Copy)]
pub struct BankReducer {
    clock: Clock,
}

impl BankReducer {
    pub fn new() -> Self {
        Self { clock: Utc::now }
    }

    /// Use a fixed clock (tests).
    pub fn with_clock(clock: Clock) -> Self {
        Self { clock }
    }

    fn append(&self, state: &BankState, message: &NewMessage) -> BankState {
        let id = state.message_seq + 1;
        let mut messages = state.messages.clone();
        messages.push(ChatMessage {
            id,
            kind: message.kind,
            text: message.text.clone(),
            account_data: message.account_data.clone(),
            created_at: (self.clock)(),
        });

        BankState {
            messages,
            message_seq: id,
            ..state.clone()
        }
    }
}

impl Default for BankReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer<BankAction, BankState> for BankReducer {
    fn reduce(&self, state: &BankState, action: &BankAction) -> BankState {
        match action {
            BankAction::AddMessage(message) => self.append(state, message),

            BankAction::ClearMessages => {
                if state.messages.is_empty() {
                    return state.clone();
                }
                BankState {
                    messages: Vec::new(),
                    generation: state.generation + 1,
                    ..state.clone()
                }
            }

            BankAction::SetTyping(is_typing) => BankState {
                is_typing: *is_typing,
                ..state.clone()
            },

            BankAction::SetAccountData(record) => BankState {
                account_data: record.clone(),
                ..state.clone()
            },

            BankAction::ClearAccountData => BankState {
                account_data: None,
                ..state.clone()
            },

            BankAction::SetUser(session) => BankState {
                account_data: Some(session.account_data.clone()),
                user: Some(session.clone()),
                is_authenticated: true,
                generation: state.generation + 1,
                ..state.clone()
            },

            BankAction::LogoutUser => {
                let signed_out = state.user.is_none()
                    && !state.is_authenticated
                    && state.account_data.is_none()
                    && state.messages.is_empty();
                if signed_out {
                    return state.clone();
                }
                BankState {
                    user: None,
                    is_authenticated: false,
                    account_data: None,
                    messages: Vec::new(),
                    generation: state.generation + 1,
                    ..state.clone()
                }
            }

            BankAction::SetLoading(is_loading) => BankState {
                is_loading: *is_loading,
                ..state.clone()
            },

            BankAction::SetError(error) => BankState {
                error: error.clone(),
                is_loading: false,
                ..state.clone()
            },

            BankAction::ClearError => BankState {
                error: None,
                ..state.clone()
            },

            BankAction::SetModal { kind, data } => BankState {
                modal: ModalState {
                    is_open: true,
                    kind: Some(*kind),
                    data: data.clone(),
                },
                ..state.clone()
            },

            BankAction::CloseModal => BankState {
                modal: ModalState::default(),
                ..state.clone()
            },

            BankAction::SetHealthStatus(report) => BankState {
                health: HealthStatus::from_report(report, (self.clock)()),
                ..state.clone()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{MessageKind, ModalKind, Session};
    use cardy_client::{AccountRecord, HealthReport};
    use chrono::TimeZone;

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap()
    }

    fn reducer() -> BankReducer {
        BankReducer::with_clock(fixed_clock)
    }

    fn session() -> Session {
        Session {
            mobile_number: "9876543210".into(),
            account_data: AccountRecord {
                holder_name: Some("Asha Rao".into()),
                account_no: Some("1234567890123".into()),
                ..Default::default()
            },
        }
    }

    fn apply(state: BankState, actions: &[BankAction]) -> BankState {
        let r = reducer();
        actions.iter().fold(state, |s, a| r.reduce(&s, a))
    }

    #[test]
    fn add_message_assigns_distinct_ids_in_order() {
        let state = apply(
            BankState::default(),
            &[
                BankAction::AddMessage(NewMessage::user("first")),
                BankAction::AddMessage(NewMessage::bot("second")),
            ],
        );

        assert_eq!(state.messages.len(), 2);
        assert_ne!(state.messages[0].id, state.messages[1].id);
        assert_eq!(state.messages[0].text, "first");
        assert_eq!(state.messages[1].text, "second");
        assert_eq!(state.messages[1].kind, MessageKind::Bot);
        assert_eq!(state.messages[0].created_at, fixed_clock());
    }

    #[test]
    fn ids_stay_unique_across_clears() {
        let state = apply(
            BankState::default(),
            &[
                BankAction::AddMessage(NewMessage::user("a")),
                BankAction::ClearMessages,
                BankAction::AddMessage(NewMessage::user("b")),
            ],
        );
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].id, 2);
    }

    #[test]
    fn set_error_stops_loading() {
        let state = apply(
            BankState::default(),
            &[
                BankAction::SetLoading(true),
                BankAction::SetError(Some("boom".into())),
            ],
        );
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert!(!state.is_loading);

        let cleared = reducer().reduce(&state, &BankAction::ClearError);
        assert!(cleared.error.is_none());
    }

    #[test]
    fn set_user_attaches_account() {
        let state = reducer().reduce(&BankState::default(), &BankAction::SetUser(session()));
        assert!(state.is_authenticated);
        assert_eq!(state.user, Some(session()));
        assert_eq!(state.account_data, Some(session().account_data));
        assert_eq!(state.generation, 1);
    }

    #[test]
    fn logout_clears_session_and_messages_and_is_idempotent() {
        let logged_in = apply(
            BankState::default(),
            &[
                BankAction::SetUser(session()),
                BankAction::AddMessage(NewMessage::bot("Welcome back")),
            ],
        );

        let once = reducer().reduce(&logged_in, &BankAction::LogoutUser);
        assert!(once.user.is_none());
        assert!(!once.is_authenticated);
        assert!(once.account_data.is_none());
        assert!(once.messages.is_empty());
        assert!(once.generation > logged_in.generation);

        let twice = reducer().reduce(&once, &BankAction::LogoutUser);
        assert_eq!(twice, once);
    }

    #[test]
    fn modal_open_and_close() {
        let open = reducer().reduce(
            &BankState::default(),
            &BankAction::SetModal {
                kind: ModalKind::AccountLookup,
                data: None,
            },
        );
        assert!(open.modal.is_showing(ModalKind::AccountLookup));

        let closed = reducer().reduce(&open, &BankAction::CloseModal);
        assert_eq!(closed.modal, ModalState::default());
    }

    #[test]
    fn health_status_is_derived_from_report() {
        let state = reducer().reduce(
            &BankState::default(),
            &BankAction::SetHealthStatus(HealthReport {
                status: "healthy".into(),
                llm_available: None,
                service: None,
            }),
        );
        assert!(state.health.is_healthy);
        assert!(!state.health.llm_available);
        assert_eq!(state.health.last_checked, Some(fixed_clock()));

        let degraded = reducer().reduce(
            &state,
            &BankAction::SetHealthStatus(HealthReport {
                status: "degraded".into(),
                llm_available: Some(true),
                service: None,
            }),
        );
        assert!(!degraded.health.is_healthy);
        assert!(degraded.health.llm_available);
    }

    #[test]
    fn account_data_set_and_clear() {
        let record = session().account_data;
        let state = reducer().reduce(
            &BankState::default(),
            &BankAction::SetAccountData(Some(record.clone())),
        );
        assert_eq!(state.account_data, Some(record));
        assert!(reducer()
            .reduce(&state, &BankAction::ClearAccountData)
            .account_data
            .is_none());
    }
}
