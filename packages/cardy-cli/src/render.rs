//! Terminal rendering of the assistant state.

use cardy_client::AccountRecord;
use cardy_core::constants::{
    APP_NAME, APP_SUBTITLE, NOT_AVAILABLE, NO_ACTIVE_LOANS, WELCOME_BODY, WELCOME_HINT,
    WELCOME_TITLE,
};
use cardy_core::formatters::{
    capitalize_words, format_account_number, format_date, format_message_time,
    format_mobile_number,
};
use cardy_core::{BankState, ChatMessage, MessageKind};
use chrono::Local;
use colored::Colorize;

const RULE: &str = "\u{2550}";
const WIDTH: usize = 40;

pub fn header(state: &BankState) -> String {
    let status = if state.health.is_healthy {
        "\u{25CF} Online".bright_green()
    } else {
        "\u{25CF} Offline".bright_red()
    };
    let ai = if state.health.llm_available {
        " [AI]".bright_magenta().to_string()
    } else {
        String::new()
    };

    let mut lines = vec![
        format!("\u{2554}{}\u{2557}", RULE.repeat(WIDTH))
            .bright_cyan()
            .to_string(),
        format!("  \u{1F3E6} {}  {}{}", APP_NAME.bold(), status, ai),
        format!("  {}", APP_SUBTITLE.dimmed()),
    ];
    if let Some(user) = &state.user {
        let name = titled(user.account_data.holder_name.as_deref());
        lines.push(format!(
            "  Signed in as {} ({})",
            name.bright_white(),
            format_mobile_number(Some(&user.mobile_number))
        ));
    }
    lines.push(
        format!("\u{255A}{}\u{255D}", RULE.repeat(WIDTH))
            .bright_cyan()
            .to_string(),
    );
    lines.join("\n")
}

/// Placeholder for an empty chat log.
pub fn empty_state() -> String {
    format!(
        "  \u{1F4AC} {}\n{}\n\n  {}",
        WELCOME_TITLE.bold(),
        indent(WELCOME_BODY),
        WELCOME_HINT.dimmed()
    )
}

/// One chat message, with the account card when one is attached.
pub fn message(msg: &ChatMessage) -> String {
    let time = format_message_time(&msg.created_at.with_timezone(&Local));
    let label = match msg.kind {
        MessageKind::User => msg.kind.label().bright_blue().bold(),
        MessageKind::Bot => msg.kind.label().bright_green().bold(),
        MessageKind::System => msg.kind.label().yellow().bold(),
        MessageKind::Error => msg.kind.label().bright_red().bold(),
    };
    let text = match msg.kind {
        MessageKind::Error => msg.text.red().to_string(),
        _ => msg.text.clone(),
    };

    let mut out = format!("{} {}\n{}", label, time.dimmed(), indent(&text));
    if let Some(record) = &msg.account_data {
        out.push('\n');
        out.push_str(&indent(&account_card(record)));
    }
    out
}

pub fn account_card(record: &AccountRecord) -> String {
    let loan_status = record
        .loan_status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(NO_ACTIVE_LOANS);

    let mut rows = vec![
        ("Account Holder", titled(record.holder_name.as_deref())),
        ("Account Number", format_account_number(record.account_no.as_deref())),
        ("Branch", titled(record.branch_name.as_deref())),
        ("Account Type", titled(record.account_type.as_deref())),
        ("Loan Status", loan_status.to_string()),
    ];
    if record.has_active_loan() {
        rows.push(("Loan End Date", format_date(record.loan_end_date.as_deref())));
    }

    let mut out = "\u{1F4B3} Account Details".bold().to_string();
    for (label, value) in rows {
        let label = format!("{:<16}", format!("{label}:"));
        out.push_str(&format!("\n  {} {}", label.dimmed(), value));
    }
    out
}

pub fn error_banner(error: &str) -> String {
    format!("{} {}", "\u{26A0}".bright_red(), error.bright_red())
}

pub fn typing_indicator() -> String {
    "Cardy is typing...".dimmed().italic().to_string()
}

fn titled(text: Option<&str>) -> String {
    let text = capitalize_words(text);
    if text.trim().is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        text
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Tracks which messages have already been printed.
#[derive(Debug, Default)]
pub struct MessageLog {
    last_id: u64,
}

impl MessageLog {
    /// Messages appended since the last call. Ids never repeat, so a
    /// cleared chat needs no reset.
    pub fn fresh<'a>(&mut self, state: &'a BankState) -> Vec<&'a ChatMessage> {
        let fresh: Vec<_> = state
            .messages
            .iter()
            .filter(|m| m.id > self.last_id)
            .collect();
        if let Some(last) = fresh.last() {
            self.last_id = last.id;
        }
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardy_core::{BankAction, BankStore, NewMessage};
    use console::strip_ansi_codes;

    fn record() -> AccountRecord {
        AccountRecord {
            holder_name: Some("asha rao".into()),
            account_no: Some("1234567890123".into()),
            branch_name: Some("city center".into()),
            account_type: Some("savings".into()),
            loan_status: Some("Active".into()),
            loan_end_date: Some("2026-03-01".into()),
            ..Default::default()
        }
    }

    #[test]
    fn account_card_masks_and_formats() {
        let card = strip_ansi_codes(&account_card(&record())).to_string();
        assert!(card.contains("Asha Rao"));
        assert!(card.contains("XXXXXXXX-0123"));
        assert!(!card.contains("1234567890123"));
        assert!(card.contains("Mar 1, 2026"));
    }

    #[test]
    fn account_card_without_loan_shows_placeholder() {
        let card = strip_ansi_codes(&account_card(&AccountRecord::default())).to_string();
        assert!(card.contains("No Active Loans"));
        assert!(card.contains("N/A"));
        assert!(!card.contains("Loan End Date"));
    }

    #[test]
    fn message_log_only_yields_new_messages() {
        let store = BankStore::new();
        let mut log = MessageLog::default();

        store.dispatch(BankAction::AddMessage(NewMessage::user("one")));
        assert_eq!(log.fresh(&store.snapshot()).len(), 1);
        assert!(log.fresh(&store.snapshot()).is_empty());

        store.dispatch(BankAction::ClearMessages);
        store.dispatch(BankAction::AddMessage(NewMessage::bot("two")));
        let state = store.snapshot();
        let fresh = log.fresh(&state);
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].text, "two");
    }

    #[test]
    fn empty_state_welcomes_and_scopes_to_banking() {
        let text = strip_ansi_codes(&empty_state()).to_string();
        assert!(text.contains("Welcome to Cardy AI Banking Assistant!"));
        assert!(text.contains("account inquiries"));
        assert!(text.contains("I specialize in banking services only"));
    }

    #[test]
    fn header_shows_offline_before_first_check() {
        let text = strip_ansi_codes(&header(&BankState::default())).to_string();
        assert!(text.contains("Cardy AI"));
        assert!(text.contains("Offline"));
        assert!(!text.contains("[AI]"));
    }
}
