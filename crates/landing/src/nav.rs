//! Navigation bar: sticky behaviour, hover fade and link actions

use crate::error::{LandingError, LandingResult};
use serde::Serialize;
use tracing::debug;

/// Opacity of the links around a hovered one
pub const FADED_OPACITY: f32 = 0.5;

/// Nav becomes sticky once the header has scrolled out of view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StickyNav {
    sticky: bool,
}

impl StickyNav {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header intersection changed. Returns the new sticky flag.
    pub fn on_header_intersection(&mut self, is_intersecting: bool) -> bool {
        self.sticky = !is_intersecting;
        self.sticky
    }

    pub fn is_sticky(&self) -> bool {
        self.sticky
    }
}

/// What clicking a nav link does
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NavAction {
    /// Smooth-scroll to the section with this anchor
    ScrollTo(String),
    /// Leave the landing page for the banking dashboard
    OpenBank,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: String,
    pub action: NavAction,
}

impl NavLink {
    pub fn section(label: &str, anchor: &str) -> Self {
        Self {
            label: label.to_string(),
            action: NavAction::ScrollTo(anchor.to_string()),
        }
    }

    pub fn open_bank(label: &str) -> Self {
        Self {
            label: label.to_string(),
            action: NavAction::OpenBank,
        }
    }
}

/// Links plus the hover fade. Hovering one link fades its siblings and the logo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavHover {
    links: Vec<NavLink>,
    hovered: Option<usize>,
}

impl NavHover {
    pub fn new(links: Vec<NavLink>) -> Self {
        Self {
            links,
            hovered: None,
        }
    }

    /// Features / Operations / Testimonials / Open account
    pub fn standard() -> Self {
        Self::new(vec![
            NavLink::section("Features", "#section--1"),
            NavLink::section("Operations", "#section--2"),
            NavLink::section("Testimonials", "#section--3"),
            NavLink::open_bank("Open account"),
        ])
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn hover(&mut self, index: usize) -> LandingResult<()> {
        if index >= self.links.len() {
            return Err(LandingError::UnknownElement(index));
        }
        self.hovered = Some(index);
        Ok(())
    }

    pub fn leave(&mut self) {
        self.hovered = None;
    }

    /// Opacity of link `index`: faded while a sibling is hovered
    pub fn opacity(&self, index: usize) -> f32 {
        match self.hovered {
            Some(hovered) if hovered != index => FADED_OPACITY,
            _ => 1.0,
        }
    }

    pub fn logo_opacity(&self) -> f32 {
        if self.hovered.is_some() {
            FADED_OPACITY
        } else {
            1.0
        }
    }

    pub fn click(&self, index: usize) -> LandingResult<&NavAction> {
        let link = self
            .links
            .get(index)
            .ok_or(LandingError::UnknownElement(index))?;
        debug!("Nav click: {} -> {:?}", link.label, link.action);
        Ok(&link.action)
    }
}

/// Action of the hero "Learn more" button
pub fn scroll_to_first_section() -> NavAction {
    NavAction::ScrollTo("#section--1".to_string())
}
