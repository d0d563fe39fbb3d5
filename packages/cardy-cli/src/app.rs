//! Interactive session and one-shot commands.

use std::future::Future;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use cardy_client::BankApi;
use cardy_core::constants::{MOBILE_NUMBER_LENGTH, QUICK_ACTIONS};
use cardy_core::{
    refresh_health, spawn_health_monitor, BankAssistant, BankStore, FlowError, ModalKind,
    QuickActionOutcome,
};
use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use tokio::task::JoinHandle;

use crate::render::{self, MessageLog};

enum MenuItem {
    Ask,
    Quick(&'static str),
    Login,
    Logout,
    ClearChat,
    Status,
    Exit,
}

pub struct App {
    assistant: BankAssistant,
    api: Arc<dyn BankApi>,
    health_interval: Duration,
    term: Term,
    log: MessageLog,
}

impl App {
    pub fn new(assistant: BankAssistant, api: Arc<dyn BankApi>, health_interval: Duration) -> Self {
        Self {
            assistant,
            api,
            health_interval,
            term: Term::stdout(),
            log: MessageLog::default(),
        }
    }

    pub async fn run(mut self) -> Result<ExitCode> {
        let monitor: JoinHandle<()> = spawn_health_monitor(
            self.assistant.store().clone(),
            self.api.clone(),
            self.health_interval,
        );
        // Let the startup health check land before the first header
        tokio::time::sleep(Duration::from_millis(200)).await;

        self.term.clear_screen()?;
        self.print_header();

        loop {
            println!();
            let menu = self.menu();
            let labels: Vec<String> = menu.iter().map(|(label, _)| label.clone()).collect();

            let selection = prompt(move || {
                Select::with_theme(&ColorfulTheme::default())
                    .with_prompt("What would you like to do?")
                    .items(&labels)
                    .default(0)
                    .interact()
            })
            .await?;

            match &menu[selection].1 {
                MenuItem::Ask => self.ask().await?,
                MenuItem::Quick(kind) => self.quick_action(kind).await?,
                MenuItem::Login => self.login().await?,
                MenuItem::Logout => {
                    self.assistant.logout();
                    println!("{}", "\u{1F44B} Logged out".bright_blue());
                    self.print_header();
                }
                MenuItem::ClearChat => {
                    self.assistant.clear_messages();
                    self.term.clear_screen()?;
                    self.print_header();
                }
                MenuItem::Status => {
                    refresh_health(self.assistant.store(), self.api.as_ref()).await;
                    self.print_header();
                }
                MenuItem::Exit => {
                    println!("{}", "\u{1F44B} Goodbye!".bright_blue());
                    break;
                }
            }
        }

        monitor.abort();
        Ok(ExitCode::SUCCESS)
    }

    fn menu(&self) -> Vec<(String, MenuItem)> {
        let state = self.assistant.state();
        let mut items = vec![("\u{1F4AC} Ask a question".to_string(), MenuItem::Ask)];
        items.extend(
            QUICK_ACTIONS
                .iter()
                .map(|qa| (format!("{} {}", qa.icon, qa.text), MenuItem::Quick(qa.action))),
        );
        if state.is_authenticated {
            items.push(("\u{1F6AA} Log out".to_string(), MenuItem::Logout));
        } else {
            items.push(("\u{1F510} Log in".to_string(), MenuItem::Login));
        }
        items.push(("\u{1F9F9} Clear chat".to_string(), MenuItem::ClearChat));
        items.push(("\u{1FA7A} Check status".to_string(), MenuItem::Status));
        items.push(("\u{1F6D1} Exit".to_string(), MenuItem::Exit));
        items
    }

    async fn ask(&mut self) -> Result<()> {
        let query: String = prompt(|| {
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt("You")
                .allow_empty(true)
                .interact_text()
        })
        .await?;

        let assistant = self.assistant.clone();
        // The flow's own messages carry the outcome
        let _ = with_typing_indicator(assistant.store(), assistant.chat_query(&query)).await;
        self.flush();
        Ok(())
    }

    async fn quick_action(&mut self, kind: &str) -> Result<()> {
        let outcome = self.assistant.quick_action(kind).await;
        self.flush();

        if let Ok(QuickActionOutcome::ModalOpened(ModalKind::AccountLookup)) = outcome {
            self.account_modal().await?;
        }
        Ok(())
    }

    /// Prompt for a mobile number until a lookup succeeds or the user
    /// submits an empty line.
    async fn account_modal(&mut self) -> Result<()> {
        while self
            .assistant
            .state()
            .modal
            .is_showing(ModalKind::AccountLookup)
        {
            let Some(mobile) = prompt_mobile("Mobile number (empty to cancel)").await? else {
                self.assistant.close_modal();
                break;
            };

            match self.assistant.account_lookup(&mobile).await {
                Ok(_) => self.assistant.close_modal(),
                Err(FlowError::Validation(e)) => println!("{}", render::error_banner(&e.to_string())),
                Err(_) => self.assistant.close_modal(),
            }
            self.flush();
        }
        Ok(())
    }

    async fn login(&mut self) -> Result<()> {
        let Some(mobile) = prompt_mobile("Mobile number").await? else {
            return Ok(());
        };

        match self.assistant.login(&mobile).await {
            Ok(_) => {
                self.print_header();
                self.flush();
            }
            Err(e) => {
                println!("{}", render::error_banner(&e.message()));
                self.assistant.clear_error();
            }
        }
        Ok(())
    }

    /// Header, plus the welcome placeholder while the chat is empty.
    fn print_header(&self) {
        let state = self.assistant.state();
        println!("{}", render::header(&state));
        if state.messages.is_empty() {
            println!();
            println!("{}", render::empty_state());
        }
    }

    /// Print messages appended since the last flush.
    fn flush(&mut self) {
        let state = self.assistant.state();
        for msg in self.log.fresh(&state) {
            println!();
            println!("{}", render::message(msg));
        }
    }
}

/// Run a blocking prompt off the async runtime.
async fn prompt<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> dialoguer::Result<T> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await??)
}

async fn prompt_mobile(label: &'static str) -> Result<Option<String>> {
    let input: String = prompt(move || {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .allow_empty(true)
            .validate_with(|s: &String| {
                if s.trim().chars().count() > MOBILE_NUMBER_LENGTH {
                    Err("Too many digits")
                } else {
                    Ok(())
                }
            })
            .interact_text()
    })
    .await?;

    let input = input.trim().to_string();
    Ok((!input.is_empty()).then_some(input))
}

/// Show a typing line while the store reports the assistant is typing.
async fn with_typing_indicator<F: Future>(store: &BankStore, flow: F) -> F::Output {
    let mut rx = store.subscribe();
    let term = Term::stdout();
    let mut shown = false;
    tokio::pin!(flow);

    loop {
        tokio::select! {
            output = &mut flow => {
                if shown {
                    let _ = term.clear_last_lines(1);
                }
                return output;
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    return flow.await;
                }
                let typing = rx.borrow_and_update().is_typing;
                if typing && !shown {
                    let _ = term.write_line(&render::typing_indicator());
                    shown = true;
                } else if !typing && shown {
                    let _ = term.clear_last_lines(1);
                    shown = false;
                }
            }
        }
    }
}

// =============================================================================
// One-shot commands
// =============================================================================

pub async fn ask(assistant: &BankAssistant, query: &str) -> Result<ExitCode> {
    let result = assistant.chat_query(query).await;
    print_transcript(assistant);
    Ok(exit_code(result.is_ok()))
}

pub async fn lookup(assistant: &BankAssistant, mobile_number: &str) -> Result<ExitCode> {
    let result = assistant.account_lookup(mobile_number).await;
    print_transcript(assistant);
    Ok(exit_code(result.is_ok()))
}

pub async fn health(assistant: &BankAssistant, api: &dyn BankApi) -> Result<ExitCode> {
    let reachable = refresh_health(assistant.store(), api).await;
    println!("{}", render::header(&assistant.state()));
    if let Some(checked) = assistant.state().health.last_checked {
        println!("  Last checked {}", checked.to_rfc3339().dimmed());
    }
    Ok(exit_code(reachable && assistant.state().health.is_healthy))
}

fn print_transcript(assistant: &BankAssistant) {
    for msg in &assistant.state().messages {
        println!("{}", render::message(msg));
    }
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
