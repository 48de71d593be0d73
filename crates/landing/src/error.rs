//! Error types for the landing page controllers

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LandingError {
    #[error("Carousel needs at least one slide")]
    EmptyCarousel,

    #[error("Slide {index} out of range (0..{len})")]
    SlideOutOfRange { index: usize, len: usize },

    #[error("Tabs need at least one tab")]
    NoTabs,

    #[error("Tab {index} out of range (0..{count})")]
    TabOutOfRange { index: usize, count: usize },

    #[error("No such element: {0}")]
    UnknownElement(usize),
}

pub type LandingResult<T> = Result<T, LandingError>;
