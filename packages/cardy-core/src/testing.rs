//! Testing utilities.
//!
//! [`MockBankApi`] stands in for the backend so flows can be exercised
//! without a server. Each endpoint replays a script of results; the last
//! scripted result repeats once the script runs out.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use cardy_client::{
    AccountRecord, ApiEnvelope, ApiError, BankApi, BranchInfo, ChatReply, ContactInfo,
    HealthReport, LoanInfo, LoginProfile, Result, UserContext,
};

/// Record of a call made to the mock backend.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    CheckHealth,
    FetchAccountDetails { mobile_number: String },
    LoginWithPhone { mobile_number: String },
    SendChatQuery {
        query: String,
        user_context: Option<UserContext>,
    },
    GetLoanInfo,
    GetBranchInfo,
    GetContactInfo,
}

type CallHook = Arc<dyn Fn(&MockCall) + Send + Sync>;

/// Replays scripted results for one endpoint.
struct Script<T> {
    queue: Mutex<VecDeque<Result<T>>>,
}

impl<T: Clone> Script<T> {
    fn push(&self, result: Result<T>) {
        self.queue.lock().unwrap().push_back(result);
    }

    fn next(&self, endpoint: &str) -> Result<T> {
        let mut queue = self.queue.lock().unwrap();
        match queue.len() {
            0 => Err(ApiError::Connection {
                detail: format!("no scripted response for {endpoint}"),
            }),
            1 => queue[0].clone(),
            _ => queue.pop_front().unwrap(),
        }
    }
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
        }
    }
}

/// A scripted [`BankApi`].
///
/// Unscripted endpoints fail with a connection error.
#[derive(Default)]
pub struct MockBankApi {
    health: Script<HealthReport>,
    account: Script<ApiEnvelope<AccountRecord>>,
    login: Script<ApiEnvelope<LoginProfile>>,
    chat: Script<ChatReply>,
    loans: Script<ApiEnvelope<LoanInfo>>,
    branches: Script<ApiEnvelope<BranchInfo>>,
    contact: Script<ApiEnvelope<ContactInfo>>,

    /// Call tracking for assertions
    calls: RwLock<Vec<MockCall>>,

    /// Runs inside every call, before the scripted result is returned
    on_call: RwLock<Option<CallHook>>,
}

impl MockBankApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_health(self, result: Result<HealthReport>) -> Self {
        self.health.push(result);
        self
    }

    pub fn with_account(self, result: Result<ApiEnvelope<AccountRecord>>) -> Self {
        self.account.push(result);
        self
    }

    pub fn with_login(self, result: Result<ApiEnvelope<LoginProfile>>) -> Self {
        self.login.push(result);
        self
    }

    pub fn with_chat(self, result: Result<ChatReply>) -> Self {
        self.chat.push(result);
        self
    }

    pub fn with_loans(self, result: Result<ApiEnvelope<LoanInfo>>) -> Self {
        self.loans.push(result);
        self
    }

    pub fn with_branches(self, result: Result<ApiEnvelope<BranchInfo>>) -> Self {
        self.branches.push(result);
        self
    }

    pub fn with_contact(self, result: Result<ApiEnvelope<ContactInfo>>) -> Self {
        self.contact.push(result);
        self
    }

    /// Run `hook` whenever an endpoint is called.
    ///
    /// Useful for observing the store mid-request or changing it under an
    /// in-flight flow.
    pub fn on_call<F>(self, hook: F) -> Self
    where
        F: Fn(&MockCall) + Send + Sync + 'static,
    {
        *self.on_call.write().unwrap() = Some(Arc::new(hook));
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.read().unwrap().clone()
    }

    fn record(&self, call: MockCall) {
        let hook = self.on_call.read().unwrap().clone();
        if let Some(hook) = hook {
            hook(&call);
        }
        self.calls.write().unwrap().push(call);
    }
}

#[async_trait]
impl BankApi for MockBankApi {
    async fn check_health(&self) -> Result<HealthReport> {
        self.record(MockCall::CheckHealth);
        self.health.next("check_health")
    }

    async fn fetch_account_details(
        &self,
        mobile_number: &str,
    ) -> Result<ApiEnvelope<AccountRecord>> {
        self.record(MockCall::FetchAccountDetails {
            mobile_number: mobile_number.to_string(),
        });
        self.account.next("fetch_account_details")
    }

    async fn login_with_phone(&self, mobile_number: &str) -> Result<ApiEnvelope<LoginProfile>> {
        self.record(MockCall::LoginWithPhone {
            mobile_number: mobile_number.to_string(),
        });
        self.login.next("login_with_phone")
    }

    async fn send_chat_query(
        &self,
        query: &str,
        user_context: Option<&UserContext>,
    ) -> Result<ChatReply> {
        self.record(MockCall::SendChatQuery {
            query: query.to_string(),
            user_context: user_context.cloned(),
        });
        self.chat.next("send_chat_query")
    }

    async fn get_loan_info(&self) -> Result<ApiEnvelope<LoanInfo>> {
        self.record(MockCall::GetLoanInfo);
        self.loans.next("get_loan_info")
    }

    async fn get_branch_info(&self) -> Result<ApiEnvelope<BranchInfo>> {
        self.record(MockCall::GetBranchInfo);
        self.branches.next("get_branch_info")
    }

    async fn get_contact_info(&self) -> Result<ApiEnvelope<ContactInfo>> {
        self.record(MockCall::GetContactInfo);
        self.contact.next("get_contact_info")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn last_scripted_result_repeats() {
        let api = MockBankApi::new()
            .with_chat(Ok(ChatReply::ok("first")))
            .with_chat(Ok(ChatReply::ok("again")));

        let replies = [
            api.send_chat_query("a", None).await.unwrap(),
            api.send_chat_query("b", None).await.unwrap(),
            api.send_chat_query("c", None).await.unwrap(),
        ];
        assert_eq!(replies[0].response.as_deref(), Some("first"));
        assert_eq!(replies[1].response.as_deref(), Some("again"));
        assert_eq!(replies[2].response.as_deref(), Some("again"));
        assert_eq!(api.calls().len(), 3);
    }

    #[tokio::test]
    async fn unscripted_endpoint_is_a_connection_error() {
        let api = MockBankApi::new();
        let err = api.get_loan_info().await.unwrap_err();
        assert_eq!(err.status(), 0);
        assert_eq!(api.calls(), vec![MockCall::GetLoanInfo]);
    }
}
