//! Session state and auto-logout countdown
//!
//! The countdown and the header clock are tokio tasks owned by the session.
//! Their handles live here so that ending or replacing a session always
//! aborts them before anything new is started.

use bankist_reports::format_countdown;
use tokio::task::JoinHandle;

/// Observable session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn { username: String, remaining: u32 },
}

/// Result of one countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still running, with the seconds left
    Running(u32),
    /// Reached zero; the session has been ended
    Expired,
    /// No session to count down
    Idle,
}

/// The single authenticated session
#[derive(Debug)]
pub struct Session {
    current: Option<String>,
    remaining: u32,
    timeout: u32,
    /// Bumped on every begin/end; clock tasks compare against it
    id: u64,
    /// Bumped on every countdown (re)start; countdown tasks compare against it
    countdown_id: u64,
    countdown: Option<JoinHandle<()>>,
    clock: Option<JoinHandle<()>>,
}

impl Session {
    pub fn new(timeout: u32) -> Self {
        Self {
            current: None,
            remaining: 0,
            timeout,
            id: 0,
            countdown_id: 0,
            countdown: None,
            clock: None,
        }
    }

    pub fn state(&self) -> SessionState {
        match &self.current {
            Some(username) => SessionState::LoggedIn {
                username: username.clone(),
                remaining: self.remaining,
            },
            None => SessionState::LoggedOut,
        }
    }

    /// Username of the current account
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_current(&self, username: &str) -> bool {
        self.current.as_deref() == Some(username)
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn countdown_id(&self) -> u64 {
        self.countdown_id
    }

    /// Start a session for `username`, replacing any previous one.
    ///
    /// Returns the new countdown id; the caller spawns the countdown task
    /// with it and hands the handle back through [`Session::attach_countdown`].
    pub fn begin(&mut self, username: &str) -> u64 {
        self.end();
        self.current = Some(username.to_string());
        self.id += 1;
        self.reset_countdown()
    }

    /// Restore the full timeout and invalidate the running countdown task
    pub fn reset_countdown(&mut self) -> u64 {
        if let Some(handle) = self.countdown.take() {
            handle.abort();
        }
        self.remaining = self.timeout;
        self.countdown_id += 1;
        self.countdown_id
    }

    pub fn attach_countdown(&mut self, handle: JoinHandle<()>) {
        if let Some(previous) = self.countdown.replace(handle) {
            previous.abort();
        }
    }

    pub fn attach_clock(&mut self, handle: JoinHandle<()>) {
        if let Some(previous) = self.clock.replace(handle) {
            previous.abort();
        }
    }

    /// One second elapsed
    pub fn tick(&mut self) -> Tick {
        if self.current.is_none() {
            return Tick::Idle;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.end();
            Tick::Expired
        } else {
            Tick::Running(self.remaining)
        }
    }

    /// Tear down the session. Returns the username that was logged in.
    pub fn end(&mut self) -> Option<String> {
        self.cancel_timers();
        self.remaining = 0;
        self.countdown_id += 1;
        let previous = self.current.take();
        if previous.is_some() {
            self.id += 1;
        }
        previous
    }

    /// Abort countdown and clock tasks
    pub fn cancel_timers(&mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.abort();
        }
        if let Some(handle) = self.clock.take() {
            handle.abort();
        }
    }

    /// `mm:ss` label for the remaining time
    pub fn format_remaining(&self) -> String {
        format_countdown(self.remaining)
    }
}
