//! Testimonial slider

use crate::error::{LandingError, LandingResult};
use serde::Serialize;
use tracing::debug;

/// Slide carousel with wrap-around navigation and one dot per slide
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Carousel {
    len: usize,
    current: usize,
}

impl Carousel {
    pub fn new(len: usize) -> LandingResult<Self> {
        if len == 0 {
            return Err(LandingError::EmptyCarousel);
        }
        Ok(Self { len, current: 0 })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Advance one slide, wrapping from the last back to the first
    pub fn next(&mut self) -> usize {
        self.current = if self.current == self.len - 1 {
            0
        } else {
            self.current + 1
        };
        debug!("Slide -> {}", self.current);
        self.current
    }

    /// Go back one slide, wrapping from the first to the last
    pub fn prev(&mut self) -> usize {
        self.current = if self.current == 0 {
            self.len - 1
        } else {
            self.current - 1
        };
        debug!("Slide -> {}", self.current);
        self.current
    }

    /// Jump to a slide (dot click)
    pub fn go_to(&mut self, index: usize) -> LandingResult<usize> {
        if index >= self.len {
            return Err(LandingError::SlideOutOfRange {
                index,
                len: self.len,
            });
        }
        self.current = index;
        debug!("Slide -> {}", self.current);
        Ok(self.current)
    }

    /// Arrow keys move the slider. Returns true when the key was used.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match key {
            "ArrowRight" => {
                self.next();
                true
            }
            "ArrowLeft" => {
                self.prev();
                true
            }
            _ => false,
        }
    }

    /// Horizontal offset of each slide in percent: `100 * (i - current)`
    pub fn offsets(&self) -> Vec<i64> {
        let current = self.current as i64;
        (0..self.len as i64).map(|i| 100 * (i - current)).collect()
    }

    /// `translateX(..%)` for each slide
    pub fn transforms(&self) -> Vec<String> {
        self.offsets()
            .into_iter()
            .map(|offset| format!("translateX({}%)", offset))
            .collect()
    }

    /// Active flag per dot; exactly one is set
    pub fn dots(&self) -> Vec<bool> {
        (0..self.len).map(|i| i == self.current).collect()
    }
}
