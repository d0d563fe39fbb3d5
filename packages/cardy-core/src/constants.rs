//! Application constants

pub const APP_NAME: &str = "Cardy AI";
pub const APP_SUBTITLE: &str = "Your Intelligent Banking Assistant";

pub const MAX_MESSAGE_LENGTH: usize = 500;
pub const MOBILE_NUMBER_LENGTH: usize = 10;

/// Placeholder for values that are missing or unusable.
pub const NOT_AVAILABLE: &str = "N/A";

pub const NO_ACTIVE_LOANS: &str = "No Active Loans";

// Shown while the chat log is empty
pub const WELCOME_TITLE: &str = "Welcome to Cardy AI Banking Assistant!";
pub const WELCOME_BODY: &str = "I'm here to assist you with all your banking needs - account inquiries, \
     loans, transactions, branch information, and financial services.";
pub const WELCOME_HINT: &str = "\u{1F4A1} I specialize in banking services only";

/// Entry in the quick action bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickActionButton {
    pub id: u8,
    pub text: &'static str,
    pub icon: &'static str,
    pub action: &'static str,
}

pub const QUICK_ACTIONS: &[QuickActionButton] = &[
    QuickActionButton {
        id: 1,
        text: "Check Account Details",
        icon: "\u{1F4B3}", // 💳
        action: "account",
    },
    QuickActionButton {
        id: 2,
        text: "Apply for Loan",
        icon: "\u{1F4B0}", // 💰
        action: "loan",
    },
    QuickActionButton {
        id: 3,
        text: "Find Branch",
        icon: "\u{1F3E6}", // 🏦
        action: "branch",
    },
    QuickActionButton {
        id: 4,
        text: "Contact Support",
        icon: "\u{1F4DE}", // 📞
        action: "contact",
    },
];
