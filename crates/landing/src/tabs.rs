//! Operations tabs

use crate::error::{LandingError, LandingResult};
use serde::Serialize;
use tracing::debug;

/// Tab strip where exactly one tab and its content area are active.
///
/// Holding a single active index makes "exactly one" structural.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tabs {
    count: usize,
    active: usize,
}

impl Tabs {
    pub fn new(count: usize) -> LandingResult<Self> {
        if count == 0 {
            return Err(LandingError::NoTabs);
        }
        Ok(Self { count, active: 0 })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Handle a click. `None` means the click missed every tab and is ignored.
    ///
    /// Returns whether the active tab was (re)set.
    pub fn activate(&mut self, clicked: Option<usize>) -> LandingResult<bool> {
        let Some(index) = clicked else {
            return Ok(false);
        };
        if index >= self.count {
            return Err(LandingError::TabOutOfRange {
                index,
                count: self.count,
            });
        }

        self.active = index;
        debug!("Tab -> {}", index);
        Ok(true)
    }

    pub fn is_tab_active(&self, index: usize) -> bool {
        index == self.active
    }

    /// Content areas follow their tab one to one
    pub fn is_content_active(&self, index: usize) -> bool {
        self.is_tab_active(index)
    }

    pub fn tab_states(&self) -> Vec<bool> {
        (0..self.count).map(|i| self.is_tab_active(i)).collect()
    }
}
