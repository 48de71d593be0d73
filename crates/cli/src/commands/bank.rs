//! Interactive banking dashboard
//!
//! Reads commands from stdin and renders whatever the bank publishes.
//! Rendering is driven by events, so timer expiry and landed loans show up
//! without any input.

use anyhow::{bail, Context, Result};
use bankist_business::{Bank, BankEvent, LogoutReason, SessionState};
use bankist_core::BankConfig;
use bankist_reports::{format_countdown, AccountView, ReportExporter, TextExporter};
use rust_decimal::Decimal;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

/// One dashboard command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login { username: String, pin: u32 },
    Transfer { to: String, amount: Decimal },
    Loan(Decimal),
    Close { username: String, pin: u32 },
    Sort,
    Show { json: bool },
    Status,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, args)) = parts.split_first() else {
        return Ok(None);
    };

    let command = match (name.to_lowercase().as_str(), args) {
        ("login", [username, pin]) => Command::Login {
            username: username.to_string(),
            pin: parse_pin(pin)?,
        },
        ("transfer", [to, amount]) => Command::Transfer {
            to: to.to_string(),
            amount: parse_amount(amount)?,
        },
        ("loan", [amount]) => Command::Loan(parse_amount(amount)?),
        ("close", [username, pin]) => Command::Close {
            username: username.to_string(),
            pin: parse_pin(pin)?,
        },
        ("sort", []) => Command::Sort,
        ("show", []) => Command::Show { json: false },
        ("show", ["json"]) => Command::Show { json: true },
        ("status", []) => Command::Status,
        ("help", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        (other, _) => bail!("Unknown command or wrong arguments: {} (try `help`)", other),
    };

    Ok(Some(command))
}

fn parse_pin(raw: &str) -> Result<u32> {
    raw.parse()
        .with_context(|| format!("PIN must be a number, got {:?}", raw))
}

fn parse_amount(raw: &str) -> Result<Decimal> {
    raw.parse()
        .with_context(|| format!("Amount must be a number, got {:?}", raw))
}

/// Whether a countdown label is worth printing: each full minute and the
/// last ten seconds
pub fn worth_announcing(label: &str) -> bool {
    let Some((minutes, seconds)) = label.split_once(':') else {
        return false;
    };
    match (minutes.parse::<u32>(), seconds.parse::<u32>()) {
        (Ok(minutes), Ok(seconds)) => seconds == 0 || (minutes == 0 && seconds <= 10),
        _ => false,
    }
}

fn print_help() {
    println!("Commands:");
    println!("  login <user> <pin>       log in (e.g. login js 1111)");
    println!("  transfer <user> <amount> send money to another account");
    println!("  loan <amount>            request a loan");
    println!("  close <user> <pin>       close the current account");
    println!("  sort                     toggle sorting movements by amount");
    println!("  show [json]              print the dashboard");
    println!("  status                   session, countdown and clock");
    println!("  help | quit");
}

fn print_view(view: &AccountView) {
    println!("{}", TextExporter::new().export(view));
}

const LOGIN_PROMPT: &str = "Log in to get started";

/// Run the dashboard until `quit` or end of input
pub async fn run(config: &BankConfig) -> Result<()> {
    let bank = Bank::from_config(config).context("Failed to build account store")?;
    let mut events = bank.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut clock: Option<String> = None;

    let settings = bank.settings();
    println!(
        "Bankist - {} accounts loaded, auto-logout after {}, loans land after {} ms",
        bank.accounts().await.len(),
        format_countdown(settings.session_timeout_secs),
        settings.loan_delay.as_millis()
    );
    print_help();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                match parse(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(command)) => execute(&bank, command, clock.as_deref()).await,
                    Ok(None) => {}
                    Err(err) => println!("⚠️  {:#}", err),
                }
            }
            event = events.recv() => match event {
                Ok(BankEvent::Clock(label)) => clock = Some(label),
                Ok(event) => render_event(&event),
                Err(RecvError::Lagged(skipped)) => debug!("Skipped {} events", skipped),
                Err(RecvError::Closed) => break,
            }
        }
    }

    bank.shutdown().await;
    Ok(())
}

async fn execute(bank: &Bank, command: Command, clock: Option<&str>) {
    let outcome = match command {
        Command::Login { username, pin } => bank.login(&username, pin).await.map(|_| ()),
        Command::Transfer { to, amount } => bank.transfer(&to, amount).await.map(|_| ()),
        Command::Loan(amount) => bank.request_loan(amount).await.map(|loan| {
            println!("⏳ Loan of {} approved, arriving shortly", loan.amount);
        }),
        Command::Close { username, pin } => bank.close_account(&username, pin).await.map(|account| {
            println!("🗑️  Account of {} closed", account.owner);
        }),
        Command::Sort => bank.toggle_sort().await.map(|_| ()),
        Command::Show { json } => {
            match bank.view().await {
                Some(view) if json => match view.to_json(true) {
                    Ok(json) => println!("{}", json),
                    Err(err) => println!("❌ {}", err),
                },
                Some(view) => print_view(&view),
                None => println!("{}", LOGIN_PROMPT),
            }
            Ok(())
        }
        Command::Status => {
            match bank.session_state().await {
                SessionState::LoggedIn { username, remaining } => {
                    println!(
                        "Logged in as {} - logout in {}",
                        username,
                        format_countdown(remaining)
                    );
                    if let Some(clock) = clock {
                        println!("As of {}", clock);
                    }
                    if bank.is_sorted().await {
                        println!("Movements sorted by amount");
                    }
                }
                SessionState::LoggedOut => println!("Logged out"),
            }
            let pending = bank.pending_loans().await;
            if !pending.is_empty() {
                println!("{} loan(s) pending", pending.len());
            }
            Ok(())
        }
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Quit => Ok(()),
    };

    if let Err(err) = outcome {
        println!("❌ [{}] {}", err.area(), err);
    }
}

fn render_event(event: &BankEvent) {
    for line in event_lines(event) {
        println!("{}", line);
    }
}

/// What the terminal shows for one event
pub fn event_lines(event: &BankEvent) -> Vec<String> {
    match event {
        BankEvent::LoggedIn { welcome, .. } => vec![format!("👋 {}", welcome)],
        BankEvent::LoginFailed => vec!["Login Error, Please check your credentials".to_string()],
        BankEvent::Refresh(view) => vec![TextExporter::new().export(view)],
        BankEvent::Timer(label) if worth_announcing(label) => {
            vec![format!("⏱️  Logout in {}", label)]
        }
        // Someone else is logging in right now
        BankEvent::LoggedOut {
            username,
            reason: LogoutReason::Replaced,
        } => vec![format!("👋 {} logged out (replaced)", username)],
        BankEvent::LoggedOut { username, reason } => vec![
            format!("👋 {} logged out ({})", username, reason.as_str()),
            LOGIN_PROMPT.to_string(),
        ],
        BankEvent::LoanApplied { username, amount, .. } => {
            vec![format!("💰 Loan of {} credited to {}", amount, username)]
        }
        BankEvent::LoanCancelled { username, .. } => {
            vec![format!("Pending loan for {} cancelled", username)]
        }
        BankEvent::Timer(_) | BankEvent::LoanRequested(_) | BankEvent::Clock(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse("login js 1111").unwrap(),
            Some(Command::Login {
                username: "js".to_string(),
                pin: 1111
            })
        );
        assert_eq!(
            parse("  transfer jd 100.5 ").unwrap(),
            Some(Command::Transfer {
                to: "jd".to_string(),
                amount: dec("100.5")
            })
        );
        assert_eq!(parse("loan 50").unwrap(), Some(Command::Loan(dec("50"))));
        assert_eq!(parse("SORT").unwrap(), Some(Command::Sort));
        assert_eq!(parse("show json").unwrap(), Some(Command::Show { json: true }));
        assert_eq!(parse("exit").unwrap(), Some(Command::Quit));
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("login js").is_err());
        assert!(parse("login js abc").is_err());
        assert!(parse("transfer jd lots").is_err());
        assert!(parse("dance").is_err());
        assert!(parse("sort now").is_err());
    }

    #[test]
    fn test_worth_announcing() {
        assert!(worth_announcing("05:00"));
        assert!(worth_announcing("01:00"));
        assert!(worth_announcing("00:10"));
        assert!(worth_announcing("00:01"));
        assert!(!worth_announcing("04:59"));
        assert!(!worth_announcing("00:11"));
        assert!(!worth_announcing("garbage"));
    }

    #[test]
    fn test_login_failure_message() {
        assert_eq!(
            event_lines(&BankEvent::LoginFailed),
            vec!["Login Error, Please check your credentials".to_string()]
        );
    }

    #[test]
    fn test_logout_lines() {
        let timeout = event_lines(&BankEvent::logged_out("js", LogoutReason::Timeout));
        assert_eq!(timeout, vec!["👋 js logged out (timeout)", LOGIN_PROMPT]);

        let replaced = event_lines(&BankEvent::logged_out("js", LogoutReason::Replaced));
        assert_eq!(replaced, vec!["👋 js logged out (replaced)"]);
    }

    #[test]
    fn test_quiet_events() {
        assert!(event_lines(&BankEvent::Timer("04:59".to_string())).is_empty());
        assert_eq!(event_lines(&BankEvent::Timer("00:05".to_string())).len(), 1);
        assert!(event_lines(&BankEvent::Clock("04/05/2024, 10:00".to_string())).is_empty());
    }
}
