//! # Bankist Landing
//!
//! State machines behind the marketing page: slider, tabs, modal, sticky
//! nav, hover fade, section reveal and lazy images. Nothing here touches
//! the banking crates.

pub mod carousel;
pub mod error;
pub mod modal;
pub mod nav;
pub mod reveal;
pub mod tabs;

pub use carousel::Carousel;
pub use error::{LandingError, LandingResult};
pub use modal::Modal;
pub use nav::{scroll_to_first_section, NavAction, NavHover, NavLink, StickyNav};
pub use reveal::{LazyImage, Section, SectionReveal};
pub use tabs::Tabs;

use serde::Serialize;
use tracing::info;

/// All controllers of one landing page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandingPage {
    pub carousel: Carousel,
    pub tabs: Tabs,
    pub modal: Modal,
    pub nav: StickyNav,
    pub hover: NavHover,
    pub sections: SectionReveal,
    pub images: Vec<LazyImage>,
}

impl LandingPage {
    pub fn new(slides: usize, tabs: usize) -> LandingResult<Self> {
        let page = Self {
            carousel: Carousel::new(slides)?,
            tabs: Tabs::new(tabs)?,
            modal: Modal::new(),
            nav: StickyNav::new(),
            hover: NavHover::standard(),
            sections: SectionReveal::new(["section--1", "section--2", "section--3", "section--4"]),
            images: vec![
                LazyImage::new("img/digital-lazy.jpg", "img/digital.jpg"),
                LazyImage::new("img/grow-lazy.jpg", "img/grow.jpg"),
                LazyImage::new("img/card-lazy.jpg", "img/card.jpg"),
            ],
        };
        info!("Landing page ready: {} slides, {} tabs", slides, tabs);
        Ok(page)
    }

    /// Document-level keydown: Escape goes to the modal, arrows to the slider.
    /// Returns true when some controller used the key.
    pub fn handle_key(&mut self, key: &str) -> bool {
        let closed = self.modal.handle_key(key);
        let moved = self.carousel.handle_key(key);
        closed || moved
    }
}
