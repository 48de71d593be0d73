//! Bank controller
//!
//! Owns the account store and the session behind one lock, runs the timers,
//! and publishes [`BankEvent`]s for the presentation layer. Every operation
//! holds the lock for its whole check-then-mutate sequence, so each one is
//! atomic with respect to timer callbacks.

use crate::error::{BankError, BankResult};
use crate::event::{BankEvent, LogoutReason};
use crate::ledger;
use crate::loan::{PendingLoan, ScheduledLoan};
use crate::session::{Session, SessionState, Tick};
use bankist_core::{Account, AccountStore, BankConfig, CoreResult};
use bankist_reports::{format_countdown, format_date_time, AccountView};
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tokio::time::{interval, interval_at, sleep, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Event channel capacity
const EVENT_CAPACITY: usize = 256;

/// Timing and approval knobs
#[derive(Debug, Clone, PartialEq)]
pub struct BankSettings {
    pub session_timeout_secs: u32,
    pub loan_delay: Duration,
    pub loan_ratio: Decimal,
}

impl From<&BankConfig> for BankSettings {
    fn from(config: &BankConfig) -> Self {
        Self {
            session_timeout_secs: config.session_timeout_secs,
            loan_delay: Duration::from_millis(config.loan_delay_ms),
            loan_ratio: config.loan_ratio,
        }
    }
}

impl Default for BankSettings {
    fn default() -> Self {
        Self::from(&BankConfig::default())
    }
}

struct BankState {
    store: AccountStore,
    session: Session,
    sorted: bool,
    loans: HashMap<Uuid, ScheduledLoan>,
}

struct Shared {
    state: Mutex<BankState>,
    events: broadcast::Sender<BankEvent>,
    settings: BankSettings,
}

/// The banking dashboard controller. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Bank {
    shared: Arc<Shared>,
}

impl Bank {
    pub fn new(store: AccountStore, settings: BankSettings) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let state = BankState {
            store,
            session: Session::new(settings.session_timeout_secs),
            sorted: false,
            loans: HashMap::new(),
        };

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                events,
                settings,
            }),
        }
    }

    /// Build the store and settings from a config
    pub fn from_config(config: &BankConfig) -> CoreResult<Self> {
        Ok(Self::new(config.build_store()?, BankSettings::from(config)))
    }

    /// Subscribe to presentation events
    pub fn subscribe(&self) -> broadcast::Receiver<BankEvent> {
        self.shared.events.subscribe()
    }

    /// Timing and approval knobs this bank runs with
    pub fn settings(&self) -> &BankSettings {
        &self.shared.settings
    }

    // === Ledger operations ===

    /// Log in. A failed attempt leaves any existing session as it was.
    pub async fn login(&self, username: &str, pin: u32) -> BankResult<AccountView> {
        let mut state = self.lock().await;

        let (username, first_name, locale) = match ledger::authenticate(&state.store, username, pin) {
            Some(account) => (
                account.username.clone(),
                account.first_name().to_string(),
                account.locale.clone(),
            ),
            None => {
                warn!("Login rejected for {}", username);
                self.publish(BankEvent::LoginFailed);
                return Err(BankError::InvalidCredentials);
            }
        };

        if let Some(previous) = state.session.current().map(str::to_string) {
            debug!("Replacing session of {}", previous);
            self.publish(BankEvent::logged_out(&previous, LogoutReason::Replaced));
        }

        state.sorted = false;
        let countdown_id = state.session.begin(&username);
        let session_id = state.session.id();
        self.start_countdown(&mut state, countdown_id);
        let clock = self.spawn_clock(session_id, locale);
        state.session.attach_clock(clock);

        info!("Logged in: {}", username);
        self.publish(BankEvent::logged_in(&username, &first_name));
        self.refresh(&state)
    }

    /// Transfer from the current account to `to`
    pub async fn transfer(&self, to: &str, amount: Decimal) -> BankResult<AccountView> {
        let mut state = self.lock().await;
        let from = state
            .session
            .current()
            .ok_or(BankError::NotLoggedIn)?
            .to_string();

        if let Err(rejection) = ledger::transfer(&mut state.store, &from, to, amount, Utc::now()) {
            warn!("Transfer {} -> {} of {} rejected: {}", from, to, amount, rejection);
            return Err(rejection.into());
        }

        info!("Transferred {} from {} to {}", amount, from, to);
        let countdown_id = state.session.reset_countdown();
        self.start_countdown(&mut state, countdown_id);
        self.refresh(&state)
    }

    /// Request a loan for the current account.
    ///
    /// Returns as soon as the loan is approved; the movement lands after the
    /// configured delay, and only then is the countdown reset.
    pub async fn request_loan(&self, amount: Decimal) -> BankResult<PendingLoan> {
        let mut state = self.lock().await;
        let username = state
            .session
            .current()
            .ok_or(BankError::NotLoggedIn)?
            .to_string();
        let account = state
            .store
            .find_by_username(&username)
            .ok_or(BankError::NotLoggedIn)?;

        let pending: Vec<Decimal> = state
            .loans
            .values()
            .filter(|scheduled| scheduled.loan.username == username)
            .map(|scheduled| scheduled.loan.amount)
            .collect();

        let ratio = self.shared.settings.loan_ratio;
        let approved = ledger::approve_loan(account, amount, ratio, &pending).map_err(|rejection| {
            warn!("Loan of {} for {} rejected: {}", amount, username, rejection);
            BankError::from(rejection)
        })?;

        let loan = PendingLoan::new(&username, approved);
        let mut scheduled = ScheduledLoan::new(loan.clone());
        scheduled.handle = Some(self.spawn_loan(loan.id));
        state.loans.insert(loan.id, scheduled);

        info!("Loan {} of {} approved for {}", loan.id, approved, username);
        self.publish(BankEvent::LoanRequested(loan.clone()));
        Ok(loan)
    }

    /// Close the current account. Needs its exact username and PIN.
    pub async fn close_account(&self, username: &str, pin: u32) -> BankResult<Account> {
        let mut state = self.lock().await;
        let current = state
            .session
            .current()
            .ok_or(BankError::NotLoggedIn)?
            .to_string();
        let account = state
            .store
            .find_by_username(&current)
            .ok_or(BankError::NotLoggedIn)?;

        if !ledger::closure_matches(account, username, pin) {
            warn!("Closure of {} rejected", current);
            return Err(BankError::ClosureRejected);
        }

        let removed = state
            .store
            .remove_account(&current)
            .ok_or(BankError::ClosureRejected)?;
        self.cancel_loans_for(&mut state, &current);
        state.session.end();
        state.sorted = false;

        info!("Account {} closed", current);
        self.publish(BankEvent::logged_out(&current, LogoutReason::Closed));
        Ok(removed)
    }

    /// Flip between chronological and ascending-amount order
    pub async fn toggle_sort(&self) -> BankResult<AccountView> {
        let mut state = self.lock().await;
        if !state.session.is_active() {
            return Err(BankError::NotLoggedIn);
        }

        state.sorted = !state.sorted;
        self.refresh(&state)
    }

    /// End the session without touching any account
    pub async fn logout(&self) -> Option<String> {
        let mut state = self.lock().await;
        let username = state.session.end()?;
        state.sorted = false;

        info!("Logged out: {}", username);
        self.publish(BankEvent::logged_out(&username, LogoutReason::Requested));
        Some(username)
    }

    /// Log out and drop every pending loan
    pub async fn shutdown(&self) {
        self.logout().await;
        let mut state = self.lock().await;
        for (_, mut scheduled) in state.loans.drain() {
            scheduled.cancel();
        }
    }

    // === Queries ===

    pub async fn session_state(&self) -> SessionState {
        self.lock().await.session.state()
    }

    pub async fn current_username(&self) -> Option<String> {
        self.lock().await.session.current().map(str::to_string)
    }

    /// Seconds left before auto-logout (0 when logged out)
    pub async fn remaining(&self) -> u32 {
        self.lock().await.session.remaining()
    }

    /// Whether movements are shown in ascending-amount order
    pub async fn is_sorted(&self) -> bool {
        self.lock().await.sorted
    }

    /// Dashboard view of the current account
    pub async fn view(&self) -> Option<AccountView> {
        let state = self.lock().await;
        Self::build_view(&state)
    }

    pub async fn account(&self, username: &str) -> Option<Account> {
        self.lock().await.store.find_by_username(username).cloned()
    }

    pub async fn accounts(&self) -> Vec<Account> {
        self.lock().await.store.accounts().to_vec()
    }

    pub async fn pending_loans(&self) -> Vec<PendingLoan> {
        let state = self.lock().await;
        let mut loans: Vec<PendingLoan> = state.loans.values().map(|s| s.loan.clone()).collect();
        loans.sort_by_key(|loan| loan.requested_at);
        loans
    }

    // === Internals ===

    async fn lock(&self) -> MutexGuard<'_, BankState> {
        self.shared.state.lock().await
    }

    fn publish(&self, event: BankEvent) {
        // No subscriber is fine
        self.shared.events.send(event).ok();
    }

    fn build_view(state: &BankState) -> Option<AccountView> {
        let username = state.session.current()?;
        let account = state.store.find_by_username(username)?;
        Some(AccountView::build(account, state.sorted, Utc::now()))
    }

    fn refresh(&self, state: &BankState) -> BankResult<AccountView> {
        let view = Self::build_view(state).ok_or(BankError::NotLoggedIn)?;
        self.publish(BankEvent::Refresh(view.clone()));
        Ok(view)
    }

    fn start_countdown(&self, state: &mut BankState, countdown_id: u64) {
        self.publish(BankEvent::Timer(state.session.format_remaining()));
        let handle = self.spawn_countdown(countdown_id);
        state.session.attach_countdown(handle);
    }

    fn spawn_countdown(&self, countdown_id: u64) -> JoinHandle<()> {
        let bank = self.clone();
        tokio::spawn(async move {
            let period = Duration::from_secs(1);
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                if !bank.countdown_tick(countdown_id).await {
                    break;
                }
            }
        })
    }

    /// Returns false once this countdown should stop
    async fn countdown_tick(&self, countdown_id: u64) -> bool {
        let mut state = self.lock().await;
        if state.session.countdown_id() != countdown_id {
            return false;
        }

        let username = state.session.current().map(str::to_string);
        match state.session.tick() {
            Tick::Running(remaining) => {
                debug!("Session countdown: {}s left", remaining);
                self.publish(BankEvent::Timer(format_countdown(remaining)));
                true
            }
            Tick::Expired => {
                state.sorted = false;
                self.publish(BankEvent::Timer(format_countdown(0)));
                if let Some(username) = username {
                    info!("Session of {} timed out", username);
                    self.publish(BankEvent::logged_out(&username, LogoutReason::Timeout));
                }
                false
            }
            Tick::Idle => false,
        }
    }

    fn spawn_clock(&self, session_id: u64, locale: String) -> JoinHandle<()> {
        let bank = self.clone();
        tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(1));
            loop {
                ticker.tick().await;
                if bank.lock().await.session.id() != session_id {
                    break;
                }
                bank.publish(BankEvent::Clock(format_date_time(Utc::now(), &locale)));
            }
        })
    }

    fn spawn_loan(&self, id: Uuid) -> JoinHandle<()> {
        let bank = self.clone();
        let delay = self.shared.settings.loan_delay;
        tokio::spawn(async move {
            sleep(delay).await;
            bank.apply_loan(id).await;
        })
    }

    /// Credit a pending loan to the account that requested it
    async fn apply_loan(&self, id: Uuid) {
        let mut state = self.lock().await;
        let Some(scheduled) = state.loans.remove(&id) else {
            return;
        };
        let loan = scheduled.loan;

        let Some(account) = state.store.find_mut(&loan.username) else {
            debug!("Loan {} dropped, {} no longer exists", id, loan.username);
            return;
        };
        // A transfer may have filled the account since approval
        if !account.can_record([loan.amount]) {
            warn!("Loan {} of {} no longer fits {}", id, loan.amount, loan.username);
            self.publish(BankEvent::LoanCancelled {
                id,
                username: loan.username.clone(),
            });
            return;
        }
        account.push_movement(loan.amount, Utc::now());

        info!("Loan {} of {} credited to {}", id, loan.amount, loan.username);
        self.publish(BankEvent::LoanApplied {
            id,
            username: loan.username.clone(),
            amount: loan.amount,
        });

        if state.session.is_current(&loan.username) {
            let countdown_id = state.session.reset_countdown();
            self.start_countdown(&mut state, countdown_id);
            self.refresh(&state).ok();
        }
    }

    fn cancel_loans_for(&self, state: &mut BankState, username: &str) {
        let ids: Vec<Uuid> = state
            .loans
            .iter()
            .filter(|(_, scheduled)| scheduled.loan.username == username)
            .map(|(id, _)| *id)
            .collect();

        for id in ids {
            if let Some(mut scheduled) = state.loans.remove(&id) {
                scheduled.cancel();
                debug!("Loan {} cancelled", id);
                self.publish(BankEvent::LoanCancelled {
                    id,
                    username: username.to_string(),
                });
            }
        }
    }
}
