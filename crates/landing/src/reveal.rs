//! Scroll-triggered section reveal and lazy image loading
//!
//! Both react to the first intersection only; after that the element is
//! no longer observed and later events are ignored.

use crate::error::{LandingError, LandingResult};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub id: String,
    hidden: bool,
}

impl Section {
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// Sections start hidden and are revealed once scrolled into view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionReveal {
    sections: Vec<Section>,
}

impl SectionReveal {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sections: ids
                .into_iter()
                .map(|id| Section {
                    id: id.into(),
                    hidden: true,
                })
                .collect(),
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Returns true if this event revealed the section
    pub fn on_intersection(&mut self, index: usize, is_intersecting: bool) -> LandingResult<bool> {
        let section = self
            .sections
            .get_mut(index)
            .ok_or(LandingError::UnknownElement(index))?;

        if !is_intersecting || !section.hidden {
            return Ok(false);
        }
        section.hidden = false;
        debug!("Section {} revealed", section.id);
        Ok(true)
    }

    pub fn hidden_count(&self) -> usize {
        self.sections.iter().filter(|s| s.hidden).count()
    }
}

/// Image that starts as a blurred placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LazyImage {
    pub src: String,
    pub data_src: String,
    /// Full-resolution source swapped in
    pub loaded: bool,
    blurred: bool,
}

impl LazyImage {
    pub fn new(placeholder: &str, full: &str) -> Self {
        Self {
            src: placeholder.to_string(),
            data_src: full.to_string(),
            loaded: false,
            blurred: true,
        }
    }

    /// First intersection swaps in the full-resolution source
    pub fn on_intersection(&mut self, is_intersecting: bool) -> bool {
        if !is_intersecting || self.loaded {
            return false;
        }
        self.src = self.data_src.clone();
        self.loaded = true;
        debug!("Lazy image -> {}", self.src);
        true
    }

    /// Load finished; only meaningful after the swap
    pub fn on_load(&mut self) {
        if self.loaded {
            self.blurred = false;
        }
    }

    pub fn is_blurred(&self) -> bool {
        self.blurred
    }
}
