//! Integration tests for the bank controller
//!
//! Time is paused, so the one-second countdown and the loan delay are
//! driven deterministically with `tokio::time::sleep`. Sleeps end on
//! half-second offsets to avoid ties with timer ticks.

use std::time::Duration;

use bankist_business::{
    Bank, BankError, BankEvent, BankSettings, LoanRejection, LogoutReason, SessionState,
    TransferRejection,
};
use bankist_core::{Account, AccountStore, Currency, Movement};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::broadcast::{error::TryRecvError, Receiver};
use tokio::time::sleep;

fn scenario_store() -> AccountStore {
    let at = |day| Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap();
    let jonas = Account::new("Jonas Schmedtmann", dec!(1.2), 1111, Currency::eur(), "pt-PT")
        .with_movements(vec![
            Movement::new(dec!(200), at(1)),
            Movement::new(dec!(455.23), at(2)),
            Movement::new(dec!(-306.5), at(3)),
        ]);
    let jessica = Account::new("Jessica Davis", dec!(1.5), 2222, Currency::usd(), "en-US")
        .with_movements(vec![Movement::new(dec!(1000), at(1))]);
    AccountStore::new(vec![jonas, jessica])
}

fn bank() -> Bank {
    Bank::new(scenario_store(), BankSettings::default())
}

async fn balance(bank: &Bank, username: &str) -> Decimal {
    bank.account(username).await.unwrap().balance()
}

fn drain(rx: &mut Receiver<BankEvent>) -> Vec<BankEvent> {
    let mut events = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
    events
}

// === Login ===

#[tokio::test(start_paused = true)]
async fn test_login_success() {
    let bank = bank();
    let mut rx = bank.subscribe();

    let view = bank.login("js", 1111).await.unwrap();
    assert_eq!(view.balance, dec!(348.73));
    assert_eq!(bank.remaining().await, bank.settings().session_timeout_secs);
    assert_eq!(
        bank.session_state().await,
        SessionState::LoggedIn {
            username: "js".to_string(),
            remaining: 300
        }
    );

    let events = drain(&mut rx);
    assert!(events.iter().any(|e| matches!(
        e,
        BankEvent::LoggedIn { welcome, .. } if welcome == "Welcome back, Jonas"
    )));
    assert!(events
        .iter()
        .any(|e| matches!(e, BankEvent::Timer(label) if label == "05:00")));
    assert!(events.iter().any(|e| matches!(e, BankEvent::Refresh(_))));
}

#[tokio::test(start_paused = true)]
async fn test_login_failure_without_session() {
    let bank = bank();
    let mut rx = bank.subscribe();

    assert_eq!(bank.login("js", 9999).await, Err(BankError::InvalidCredentials));
    assert_eq!(bank.login("nobody", 1111).await, Err(BankError::InvalidCredentials));
    assert_eq!(bank.session_state().await, SessionState::LoggedOut);
    assert!(drain(&mut rx)
        .iter()
        .all(|e| matches!(e, BankEvent::LoginFailed)));
}

#[tokio::test(start_paused = true)]
async fn test_login_failure_keeps_existing_session() {
    let bank = bank();
    bank.login("js", 1111).await.unwrap();
    sleep(Duration::from_millis(10_500)).await;

    assert!(bank.login("jd", 1111).await.is_err());
    assert_eq!(bank.current_username().await.as_deref(), Some("js"));
    assert_eq!(bank.remaining().await, 290);
}

// === Transfer ===

#[tokio::test(start_paused = true)]
async fn test_transfer_scenario() {
    let bank = bank();
    bank.login("js", 1111).await.unwrap();

    let view = bank.transfer("jd", dec!(100)).await.unwrap();
    assert_eq!(view.balance, dec!(248.73));
    assert_eq!(balance(&bank, "jd").await, dec!(1100));

    let jonas = bank.account("js").await.unwrap();
    let jessica = bank.account("jd").await.unwrap();
    assert_eq!(jonas.movements().count(), 4);
    assert_eq!(jonas.movement_dates().count(), 4);
    assert_eq!(jessica.movements().count(), 2);
    assert_eq!(jessica.movement_dates().count(), 2);
    assert_eq!(jonas.movements().last(), Some(dec!(-100)));
    assert_eq!(jessica.movements().last(), Some(dec!(100)));
}

#[tokio::test(start_paused = true)]
async fn test_transfer_resets_countdown() {
    let bank = bank();
    bank.login("js", 1111).await.unwrap();
    sleep(Duration::from_millis(10_500)).await;
    assert_eq!(bank.remaining().await, 290);

    bank.transfer("jd", dec!(10)).await.unwrap();
    assert_eq!(bank.remaining().await, 300);

    sleep(Duration::from_millis(5_500)).await;
    assert_eq!(bank.remaining().await, 295);
}

#[tokio::test(start_paused = true)]
async fn test_failed_transfer_changes_nothing() {
    let bank = bank();
    bank.login("js", 1111).await.unwrap();
    sleep(Duration::from_millis(10_500)).await;
    let before = bank.accounts().await;

    assert_eq!(
        bank.transfer("jd", dec!(348.74)).await,
        Err(BankError::TransferRejected(
            TransferRejection::InsufficientBalance {
                needed: dec!(348.74),
                available: dec!(348.73),
            }
        ))
    );
    assert!(matches!(
        bank.transfer("js", dec!(1)).await,
        Err(BankError::TransferRejected(TransferRejection::SelfTransfer))
    ));
    assert!(matches!(
        bank.transfer("zz", dec!(1)).await,
        Err(BankError::TransferRejected(TransferRejection::UnknownReceiver(_)))
    ));

    assert_eq!(bank.accounts().await, before);
    assert_eq!(bank.remaining().await, 290);
}

// === Countdown ===

#[tokio::test(start_paused = true)]
async fn test_session_times_out() {
    let bank = bank();
    let mut rx = bank.subscribe();
    bank.login("js", 1111).await.unwrap();

    sleep(Duration::from_millis(299_500)).await;
    assert_eq!(bank.remaining().await, 1);
    assert_eq!(bank.current_username().await.as_deref(), Some("js"));

    sleep(Duration::from_secs(1)).await;
    assert_eq!(bank.session_state().await, SessionState::LoggedOut);
    assert!(bank.view().await.is_none());

    let events = drain(&mut rx);
    assert!(events.iter().any(|e| matches!(
        e,
        BankEvent::LoggedOut { username, reason: LogoutReason::Timeout } if username == "js"
    )));
    assert!(events
        .iter()
        .any(|e| matches!(e, BankEvent::Timer(label) if label == "00:01")));
}

#[tokio::test(start_paused = true)]
async fn test_relogin_replaces_countdown() {
    let bank = bank();
    bank.login("js", 1111).await.unwrap();
    sleep(Duration::from_millis(100_500)).await;
    assert_eq!(bank.remaining().await, 200);

    bank.login("jd", 2222).await.unwrap();
    assert_eq!(bank.remaining().await, 300);

    // The first countdown would have expired at t=300
    sleep(Duration::from_millis(249_700)).await;
    assert_eq!(
        bank.session_state().await,
        SessionState::LoggedIn {
            username: "jd".to_string(),
            remaining: 51
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_relogin_reports_replaced_session() {
    let bank = bank();
    bank.login("js", 1111).await.unwrap();
    let mut rx = bank.subscribe();

    bank.login("jd", 2222).await.unwrap();

    let events = drain(&mut rx);
    let replaced = events
        .iter()
        .position(|e| matches!(
            e,
            BankEvent::LoggedOut { username, reason: LogoutReason::Replaced } if username == "js"
        ))
        .unwrap();
    let welcomed = events
        .iter()
        .position(|e| matches!(e, BankEvent::LoggedIn { username, .. } if username == "jd"))
        .unwrap();
    assert!(replaced < welcomed);
}

#[tokio::test(start_paused = true)]
async fn test_operations_require_session() {
    let bank = bank();

    assert_eq!(bank.transfer("jd", dec!(1)).await, Err(BankError::NotLoggedIn));
    assert_eq!(bank.request_loan(dec!(1)).await, Err(BankError::NotLoggedIn));
    assert_eq!(bank.close_account("js", 1111).await, Err(BankError::NotLoggedIn));
    assert_eq!(bank.toggle_sort().await, Err(BankError::NotLoggedIn));
    assert_eq!(bank.remaining().await, 0);
}

// === Loans ===

#[tokio::test(start_paused = true)]
async fn test_loan_lands_after_delay() {
    let bank = bank();
    bank.login("js", 1111).await.unwrap();

    let loan = bank.request_loan(dec!(50)).await.unwrap();
    assert_eq!(loan.amount, dec!(50));
    assert_eq!(bank.pending_loans().await, vec![loan.clone()]);

    sleep(Duration::from_millis(2_400)).await;
    assert_eq!(bank.account("js").await.unwrap().movements().count(), 3);

    sleep(Duration::from_millis(200)).await;
    let jonas = bank.account("js").await.unwrap();
    assert_eq!(jonas.movements().count(), 4);
    assert_eq!(jonas.movement_dates().count(), 4);
    assert_eq!(jonas.movements().last(), Some(dec!(50)));
    assert!(bank.pending_loans().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_loan_resets_countdown_only_when_applied() {
    let bank = bank();
    bank.login("js", 1111).await.unwrap();
    sleep(Duration::from_millis(10_500)).await;

    bank.request_loan(dec!(50)).await.unwrap();
    assert_eq!(bank.remaining().await, 290);

    sleep(Duration::from_millis(2_600)).await;
    assert_eq!(bank.remaining().await, 300);
}

#[tokio::test(start_paused = true)]
async fn test_rejected_loan_never_applies() {
    let bank = bank();
    bank.login("js", 1111).await.unwrap();

    assert_eq!(
        bank.request_loan(dec!(5000)).await,
        Err(BankError::LoanRejected(LoanRejection::NoQualifyingDeposit {
            required: dec!(500)
        }))
    );
    assert!(bank.pending_loans().await.is_empty());

    sleep(Duration::from_millis(5_500)).await;
    assert_eq!(bank.account("js").await.unwrap().movements().count(), 3);
    assert_eq!(bank.remaining().await, 295);
}

#[tokio::test(start_paused = true)]
async fn test_loan_follows_requesting_account() {
    let bank = bank();
    bank.login("js", 1111).await.unwrap();
    bank.request_loan(dec!(50)).await.unwrap();

    bank.login("jd", 2222).await.unwrap();
    sleep(Duration::from_millis(3_500)).await;

    assert_eq!(balance(&bank, "js").await, dec!(398.73));
    assert_eq!(balance(&bank, "jd").await, dec!(1000));
    // jd's countdown is not touched by someone else's loan
    assert_eq!(bank.remaining().await, 297);
}

#[tokio::test(start_paused = true)]
async fn test_repeated_loans_stop_at_decimal_range() {
    let bank = bank();
    bank.login("js", 1111).await.unwrap();

    // Each landed loan qualifies the next one, ten times larger
    let mut amount = dec!(50);
    let mut landed = 0;
    let rejection = loop {
        match bank.request_loan(amount).await {
            Ok(_) => {
                sleep(Duration::from_millis(3_000)).await;
                landed += 1;
                amount *= dec!(10);
            }
            Err(err) => break err,
        }
        assert!(landed < 40, "loans never stopped");
    };

    assert_eq!(
        rejection,
        BankError::LoanRejected(LoanRejection::LimitExceeded(amount))
    );
    assert!(landed > 20);
    assert!(bank.pending_loans().await.is_empty());

    // Balance is still exact and the bank keeps working
    let jonas = bank.account("js").await.unwrap();
    assert_eq!(jonas.movements().count(), 3 + landed);
    assert_eq!(jonas.balance().fract(), dec!(0.73));
    assert!(bank.view().await.is_some());
    bank.transfer("jd", dec!(1)).await.unwrap();
    assert_eq!(balance(&bank, "jd").await, dec!(1001));
}

#[tokio::test(start_paused = true)]
async fn test_loan_dropped_when_balance_fills_up_meanwhile() {
    let mut accounts = scenario_store().accounts().to_vec();
    accounts.push(
        Account::new("Max Saver", dec!(1.2), 4444, Currency::usd(), "en-US").with_movements(vec![
            Movement::new(Decimal::MAX - dec!(1000), Utc::now()),
        ]),
    );
    let bank = Bank::new(AccountStore::new(accounts), BankSettings::default());
    let mut rx = bank.subscribe();

    bank.login("ms", 4444).await.unwrap();
    bank.request_loan(dec!(1000)).await.unwrap();

    bank.login("js", 1111).await.unwrap();
    bank.transfer("ms", dec!(300)).await.unwrap();
    sleep(Duration::from_millis(3_500)).await;

    assert_eq!(balance(&bank, "ms").await, Decimal::MAX - dec!(700));
    assert!(bank.pending_loans().await.is_empty());
    let events = drain(&mut rx);
    assert!(events
        .iter()
        .any(|e| matches!(e, BankEvent::LoanCancelled { username, .. } if username == "ms")));
    assert!(!events
        .iter()
        .any(|e| matches!(e, BankEvent::LoanApplied { .. })));
}

// === Closure ===

#[tokio::test(start_paused = true)]
async fn test_close_account() {
    let bank = bank();
    let mut rx = bank.subscribe();
    bank.login("js", 1111).await.unwrap();
    sleep(Duration::from_millis(10_500)).await;

    assert_eq!(bank.close_account("js", 2222).await, Err(BankError::ClosureRejected));
    assert_eq!(bank.close_account("jd", 2222).await, Err(BankError::ClosureRejected));
    assert_eq!(bank.current_username().await.as_deref(), Some("js"));
    assert_eq!(bank.remaining().await, 290);
    assert_eq!(bank.accounts().await.len(), 2);

    let removed = bank.close_account("js", 1111).await.unwrap();
    assert_eq!(removed.owner, "Jonas Schmedtmann");
    assert_eq!(bank.accounts().await.len(), 1);
    assert!(bank.account("js").await.is_none());
    assert!(bank.account("jd").await.is_some());
    assert_eq!(bank.session_state().await, SessionState::LoggedOut);

    assert!(drain(&mut rx).iter().any(|e| matches!(
        e,
        BankEvent::LoggedOut { reason: LogoutReason::Closed, .. }
    )));

    // Closed account can no longer log in
    assert_eq!(bank.login("js", 1111).await, Err(BankError::InvalidCredentials));
}

#[tokio::test(start_paused = true)]
async fn test_close_account_cancels_pending_loan() {
    let bank = bank();
    let mut rx = bank.subscribe();
    bank.login("js", 1111).await.unwrap();
    bank.request_loan(dec!(50)).await.unwrap();

    bank.close_account("js", 1111).await.unwrap();
    assert!(bank.pending_loans().await.is_empty());

    sleep(Duration::from_secs(5)).await;
    let events = drain(&mut rx);
    assert!(events
        .iter()
        .any(|e| matches!(e, BankEvent::LoanCancelled { username, .. } if username == "js")));
    assert!(!events
        .iter()
        .any(|e| matches!(e, BankEvent::LoanApplied { .. })));
}

// === Sort ===

#[tokio::test(start_paused = true)]
async fn test_toggle_sort() {
    let bank = bank();
    bank.login("js", 1111).await.unwrap();
    sleep(Duration::from_millis(10_500)).await;

    let view = bank.toggle_sort().await.unwrap();
    assert!(view.sorted);
    assert!(bank.is_sorted().await);
    let amounts: Vec<Decimal> = view.rows.iter().map(|r| r.amount).collect();
    assert_eq!(amounts, vec![dec!(455.23), dec!(200), dec!(-306.5)]);

    // Backing order untouched, countdown untouched
    let backing: Vec<Decimal> = bank.account("js").await.unwrap().movements().collect();
    assert_eq!(backing, vec![dec!(200), dec!(455.23), dec!(-306.5)]);
    assert_eq!(bank.remaining().await, 290);

    let view = bank.toggle_sort().await.unwrap();
    assert!(!view.sorted);
    assert_eq!(view.rows[0].amount, dec!(-306.5));
}

#[tokio::test(start_paused = true)]
async fn test_logout_and_shutdown() {
    let bank = bank();
    bank.login("js", 1111).await.unwrap();
    bank.request_loan(dec!(50)).await.unwrap();

    bank.shutdown().await;
    assert_eq!(bank.session_state().await, SessionState::LoggedOut);
    assert!(bank.pending_loans().await.is_empty());
    assert_eq!(bank.logout().await, None);

    sleep(Duration::from_secs(5)).await;
    assert_eq!(bank.account("js").await.unwrap().movements().count(), 3);
}
