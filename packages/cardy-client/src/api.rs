//! The gateway seam between the assistant and the backend.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    AccountRecord, ApiEnvelope, BranchInfo, ChatReply, ContactInfo, HealthReport, LoanInfo,
    LoginProfile, UserContext,
};

/// Operations the assistant needs from the banking backend.
///
/// `Ok` means a 2xx response with a decodable body. The envelope's `success`
/// flag still has to be checked by the caller; `Err` covers every transport
/// and server-status failure.
#[async_trait]
pub trait BankApi: Send + Sync {
    async fn check_health(&self) -> Result<HealthReport>;

    async fn fetch_account_details(&self, mobile_number: &str)
        -> Result<ApiEnvelope<AccountRecord>>;

    async fn login_with_phone(&self, mobile_number: &str) -> Result<ApiEnvelope<LoginProfile>>;

    async fn send_chat_query(
        &self,
        query: &str,
        user_context: Option<&UserContext>,
    ) -> Result<ChatReply>;

    async fn get_loan_info(&self) -> Result<ApiEnvelope<LoanInfo>>;

    async fn get_branch_info(&self) -> Result<ApiEnvelope<BranchInfo>>;

    async fn get_contact_info(&self) -> Result<ApiEnvelope<ContactInfo>>;
}
