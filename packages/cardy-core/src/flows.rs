//! User-triggered flows.
//!
//! Each flow marks the store as loading, clears the previous error,
//! validates locally, calls the backend, and records the outcome in the
//! store. Loading is reset by a drop guard so it clears on every exit path.
//!
//! Results are bound to the store generation captured when the flow
//! started; a response that lands after logout or a cleared chat is
//! dropped instead of leaking into the next session.

use std::sync::Arc;

use cardy_client::{AccountRecord, ApiEnvelope, BankApi, LoginProfile};
use tracing::{debug, info, warn};

use crate::constants::MAX_MESSAGE_LENGTH;
use crate::error::FlowError;
use crate::replies;
use crate::state::{BankAction, BankState, ModalKind, NewMessage, Session};
use crate::store::{BankStore, FlagGuard};
use crate::validators::{sanitize_input, validate_mobile_number, validate_query};

pub type FlowResult<T> = Result<T, FlowError>;

/// Quick action buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    Account,
    Loan,
    Branch,
    Contact,
}

impl QuickAction {
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "account" => Some(QuickAction::Account),
            "loan" => Some(QuickAction::Loan),
            "branch" => Some(QuickAction::Branch),
            "contact" => Some(QuickAction::Contact),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuickAction::Account => "account",
            QuickAction::Loan => "loan",
            QuickAction::Branch => "branch",
            QuickAction::Contact => "contact",
        }
    }
}

/// What a quick action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickActionOutcome {
    /// A modal was opened; no request was made
    ModalOpened(ModalKind),
    /// A bot reply was appended
    Replied(String),
    /// The action kind was not recognized
    Unknown,
}

/// Orchestrates flows against a store and a backend.
#[derive(Clone)]
pub struct BankAssistant {
    store: Arc<BankStore>,
    api: Arc<dyn BankApi>,
}

impl BankAssistant {
    pub fn new(store: Arc<BankStore>, api: Arc<dyn BankApi>) -> Self {
        Self { store, api }
    }

    pub fn store(&self) -> &Arc<BankStore> {
        &self.store
    }

    pub fn state(&self) -> BankState {
        self.store.snapshot()
    }

    /// Log in with a mobile number.
    ///
    /// Failures set the error state only; nothing is added to the chat.
    pub async fn login(&self, mobile_number: &str) -> FlowResult<LoginProfile> {
        let _loading = self.begin();
        let generation = self.store.generation();
        debug!(flow = "login", "Flow started");

        let mobile = match validate_mobile_number(mobile_number) {
            Ok(mobile) => mobile,
            Err(e) => return Err(self.fail(generation, e.into(), false)),
        };

        let result = self.api.login_with_phone(mobile).await;
        let profile = match payload(result, replies::LOGIN_FAILED) {
            Ok(profile) => profile,
            Err(e) => return Err(self.fail(generation, e, false)),
        };

        let session = Session {
            mobile_number: profile
                .mobile_number
                .clone()
                .unwrap_or_else(|| mobile.to_string()),
            account_data: profile.account.clone(),
        };
        let Some(state) = self
            .store
            .dispatch_for(generation, BankAction::SetUser(session))
        else {
            return Err(FlowError::Stale);
        };

        let welcome = replies::welcome(profile.account.holder_name.as_deref());
        self.store
            .dispatch_for(state.generation, BankAction::AddMessage(NewMessage::bot(welcome)));

        info!(flow = "login", "User logged in");
        Ok(profile)
    }

    /// End the session: clears user, account data and chat in one transition.
    pub fn logout(&self) {
        self.store.dispatch(BankAction::LogoutUser);
        info!("User logged out");
    }

    /// Look up account details for a mobile number.
    pub async fn account_lookup(&self, mobile_number: &str) -> FlowResult<AccountRecord> {
        let _loading = self.begin();
        let generation = self.store.generation();
        debug!(flow = "account_lookup", "Flow started");

        let mobile = match validate_mobile_number(mobile_number) {
            Ok(mobile) => mobile,
            Err(e) => return Err(self.fail(generation, e.into(), true)),
        };

        self.store.dispatch_for(
            generation,
            BankAction::AddMessage(NewMessage::user(replies::account_request(mobile))),
        );

        let result = self.api.fetch_account_details(mobile).await;
        let record = match payload(result, replies::ACCOUNT_LOOKUP_FAILED) {
            Ok(record) => record,
            Err(e) => return Err(self.fail(generation, e, true)),
        };

        if self
            .store
            .dispatch_for(generation, BankAction::SetAccountData(Some(record.clone())))
            .is_none()
        {
            return Err(FlowError::Stale);
        }
        self.store.dispatch_for(
            generation,
            BankAction::AddMessage(
                NewMessage::bot(replies::ACCOUNT_FETCHED).with_account(record.clone()),
            ),
        );

        info!(flow = "account_lookup", "Account details fetched");
        Ok(record)
    }

    /// Send a free-text question to the assistant.
    ///
    /// The session context is captured when the flow starts, so a login or
    /// logout while the request is in flight does not change what was sent.
    pub async fn chat_query(&self, text: &str) -> FlowResult<String> {
        let _loading = self.begin();
        let snapshot = self.store.snapshot();
        let generation = snapshot.generation;
        let context = snapshot.user_context();
        debug!(
            flow = "chat_query",
            authenticated = context.is_some(),
            "Flow started"
        );

        let query = sanitize_input(text);
        if let Err(e) = validate_query(&query, MAX_MESSAGE_LENGTH) {
            return Err(self.fail(generation, e.into(), true));
        }

        self.store
            .dispatch_for(generation, BankAction::AddMessage(NewMessage::user(query.clone())));

        let typing = self
            .store
            .hold(BankAction::SetTyping(true), BankAction::SetTyping(false));
        let result = self.api.send_chat_query(&query, context.as_ref()).await;
        typing.release();

        let response = match result {
            Ok(reply) if reply.success => reply
                .response
                .ok_or_else(|| FlowError::Domain(replies::CHAT_FAILED.to_string())),
            Ok(reply) => Err(FlowError::Domain(failure_message(
                reply.error,
                replies::CHAT_FAILED,
            ))),
            Err(e) => Err(FlowError::Transport(e)),
        };

        match response {
            Ok(text) => {
                if self
                    .store
                    .dispatch_for(generation, BankAction::AddMessage(NewMessage::bot(text.clone())))
                    .is_none()
                {
                    return Err(FlowError::Stale);
                }
                Ok(text)
            }
            Err(e) => Err(self.fail(generation, e, true)),
        }
    }

    /// Run a quick action by name.
    ///
    /// `account` opens the account lookup modal without a request. Unknown
    /// names get a literal "Unknown action" reply.
    pub async fn quick_action(&self, kind: &str) -> FlowResult<QuickActionOutcome> {
        let _loading = self.begin();
        let generation = self.store.generation();
        debug!(flow = "quick_action", kind, "Flow started");

        let Some(action) = QuickAction::parse(kind) else {
            self.store.dispatch_for(
                generation,
                BankAction::AddMessage(NewMessage::bot(replies::UNKNOWN_ACTION)),
            );
            return Ok(QuickActionOutcome::Unknown);
        };

        let text = match action {
            QuickAction::Account => {
                self.store.dispatch_for(
                    generation,
                    BankAction::SetModal {
                        kind: ModalKind::AccountLookup,
                        data: None,
                    },
                );
                return Ok(QuickActionOutcome::ModalOpened(ModalKind::AccountLookup));
            }
            QuickAction::Loan => payload(self.api.get_loan_info().await, replies::ACTION_FAILED)
                .map(|info| replies::loan_info(&info)),
            QuickAction::Branch => {
                payload(self.api.get_branch_info().await, replies::ACTION_FAILED)
                    .map(|info| replies::branch_info(&info))
            }
            QuickAction::Contact => {
                payload(self.api.get_contact_info().await, replies::ACTION_FAILED)
                    .map(|info| replies::contact_info(&info))
            }
        };

        match text {
            Ok(text) => {
                if self
                    .store
                    .dispatch_for(generation, BankAction::AddMessage(NewMessage::bot(text.clone())))
                    .is_none()
                {
                    return Err(FlowError::Stale);
                }
                Ok(QuickActionOutcome::Replied(text))
            }
            Err(e) => Err(self.fail(generation, e, true)),
        }
    }

    pub fn clear_messages(&self) {
        self.store.dispatch(BankAction::ClearMessages);
    }

    pub fn clear_account_data(&self) {
        self.store.dispatch(BankAction::ClearAccountData);
    }

    pub fn clear_error(&self) {
        self.store.dispatch(BankAction::ClearError);
    }

    pub fn close_modal(&self) {
        self.store.dispatch(BankAction::CloseModal);
    }

    fn begin(&self) -> FlagGuard<'_> {
        let loading = self
            .store
            .hold(BankAction::SetLoading(true), BankAction::SetLoading(false));
        self.store.dispatch(BankAction::ClearError);
        loading
    }

    /// Record a failure in the store and hand it back to the caller.
    ///
    /// Returns [`FlowError::Stale`] when the session moved on and the
    /// failure could not be recorded.
    fn fail(&self, generation: u64, err: FlowError, to_chat: bool) -> FlowError {
        let message = err.message();
        match &err {
            FlowError::Validation(_) => debug!(error = %message, "Input rejected"),
            FlowError::Transport(api) => {
                warn!(status = api.status(), error = %message, "Flow request failed")
            }
            _ => warn!(error = %message, "Flow failed"),
        }

        if self
            .store
            .dispatch_for(generation, BankAction::SetError(Some(message.clone())))
            .is_none()
        {
            return FlowError::Stale;
        }
        if to_chat {
            self.store
                .dispatch_for(generation, BankAction::AddMessage(NewMessage::error(message)));
        }
        err
    }
}

/// Payload of a successful envelope, or the failure it represents.
fn payload<T>(result: cardy_client::Result<ApiEnvelope<T>>, fallback: &str) -> FlowResult<T> {
    match result {
        Ok(envelope) if envelope.success => envelope
            .data
            .ok_or_else(|| FlowError::Domain(fallback.to_string())),
        Ok(envelope) => Err(FlowError::Domain(failure_message(envelope.error, fallback))),
        Err(e) => Err(FlowError::Transport(e)),
    }
}

fn failure_message(error: Option<String>, fallback: &str) -> String {
    error
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
