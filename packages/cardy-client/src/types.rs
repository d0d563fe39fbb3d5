//! Request and response types for the Cardy backend.
//!
//! These mirror the JSON payloads of the Flask service. Fields the client
//! does not interpret are kept in `extra` so nothing is lost on the way
//! back out (chat context forwards the account record verbatim).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Envelopes
// ============================================================================

/// Standard `{success, data, error}` envelope.
///
/// A missing `success` field decodes as `false`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// The payload when the backend reported success and sent one.
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}

/// Reply from `/api/chat/query`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ChatReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ChatReply {
    pub fn ok(response: impl Into<String>) -> Self {
        Self {
            success: true,
            response: Some(response.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            response: None,
            error: Some(error.into()),
        }
    }
}

// ============================================================================
// Health
// ============================================================================

/// Raw `/api/health` payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HealthReport {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub llm_available: Option<bool>,
    #[serde(default)]
    pub service: Option<String>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

// ============================================================================
// Accounts
// ============================================================================

/// Account holder record as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AccountRecord {
    #[serde(default)]
    pub holder_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub account_no: Option<String>,
    #[serde(default)]
    pub branch_name: Option<String>,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub loan_status: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub loan_end_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AccountRecord {
    pub fn has_active_loan(&self) -> bool {
        match self.loan_status.as_deref() {
            None | Some("") | Some("No Active Loans") => false,
            Some(_) => true,
        }
    }
}

/// Login payload: the account record plus the verified mobile number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LoginProfile {
    #[serde(default)]
    pub mobile_number: Option<String>,
    #[serde(flatten)]
    pub account: AccountRecord,
}

/// Session context forwarded with chat queries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserContext {
    pub mobile_number: String,
    pub account_data: AccountRecord,
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Serialize)]
pub struct MobileNumberRequest<'a> {
    pub mobile_number: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ChatQueryRequest<'a> {
    pub query: &'a str,
    pub user_context: Option<&'a UserContext>,
}

// ============================================================================
// Info pages
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LoanInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contact: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Branch {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BranchInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub branches: Vec<Branch>,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ContactInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub customer_care: String,
    #[serde(default)]
    pub fraud_reporting: String,
    #[serde(default)]
    pub description: String,
}

/// MySQL hands account numbers back as integers on some schemas.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => Some(other.to_string()),
    })
}
