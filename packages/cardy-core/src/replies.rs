//! Bot reply text.

use cardy_client::{BranchInfo, ContactInfo, LoanInfo};

pub const ACCOUNT_FETCHED: &str = "\u{2705} Account details fetched successfully!";
pub const UNKNOWN_ACTION: &str = "Unknown action";

pub const LOGIN_FAILED: &str = "Login failed";
pub const ACCOUNT_LOOKUP_FAILED: &str = "Failed to fetch account details";
pub const CHAT_FAILED: &str = "Failed to get response";
pub const ACTION_FAILED: &str = "Failed to process action";

/// Greeting after a successful login.
pub fn welcome(holder_name: Option<&str>) -> String {
    let name = holder_name.filter(|n| !n.trim().is_empty()).unwrap_or("there");
    format!(
        "Welcome back, {name}! \u{1F3E6}\n\n\
         I'm your banking assistant. I can help you with:\n\
         \u{2022} Account information and balances\n\
         \u{2022} Loan inquiries and applications\n\
         \u{2022} Branch locations and services\n\
         \u{2022} Transaction queries\n\
         \u{2022} Banking support\n\n\
         How can I assist you with your banking needs today?"
    )
}

pub fn account_request(mobile_number: &str) -> String {
    format!("Check account for {mobile_number}")
}

pub fn loan_info(info: &LoanInfo) -> String {
    format!(
        "\u{1F4A1} {}\n\n{}\n\n\u{1F4DE} Contact: {}",
        info.title, info.description, info.contact
    )
}

pub fn branch_info(info: &BranchInfo) -> String {
    let branches = info
        .branches
        .iter()
        .map(|b| format!("\u{2022} {} - {}", b.name, b.location))
        .collect::<Vec<_>>()
        .join("\n");
    format!("\u{1F3E6} {}\n\n{}\n\n{}", info.title, branches, info.note)
}

pub fn contact_info(info: &ContactInfo) -> String {
    format!(
        "\u{260E}\u{FE0F} {}\n\n\u{1F4DE} Customer Care: {}\n\u{1F6A8} Fraud Reporting: {}\n\n{}",
        info.title, info.customer_care, info.fraud_reporting, info.description
    )
}
