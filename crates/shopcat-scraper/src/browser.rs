//! The rendering-engine seam.
//!
//! The engine never talks to a browser directly; it drives a [`Browser`]
//! and turns every wait into an explicit [`WaitOutcome`]. A wait that runs
//! out is a normal answer, not an error: for the next-page and load-more
//! controls it is how the engine learns a listing is exhausted.

use std::time::Duration;

use crate::error::ScraperError;

/// What a bounded wait polls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition<'a> {
    /// An element matching the CSS selector exists in the DOM.
    Present(&'a str),
    /// An element matching the CSS selector is displayed and enabled.
    Clickable(&'a str),
}

impl Condition<'_> {
    #[must_use]
    pub fn selector(&self) -> &str {
        match self {
            Condition::Present(css) | Condition::Clickable(css) => css,
        }
    }
}

/// Result of [`Browser::wait_until`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome<E> {
    Found(E),
    NotFound,
}

impl<E> WaitOutcome<E> {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, WaitOutcome::Found(_))
    }
}

impl<E> From<Option<E>> for WaitOutcome<E> {
    fn from(found: Option<E>) -> Self {
        found.map_or(WaitOutcome::NotFound, WaitOutcome::Found)
    }
}

/// Operations the extraction engine needs from a rendering engine.
///
/// Calls are issued strictly one at a time. Every method may be slow; an
/// `Err` means the engine itself failed (disconnected, crashed). Only
/// navigation and the initial wait treat that as fatal; later failures end
/// the current phase early. Element absence is reported through
/// [`WaitOutcome::NotFound`] instead.
#[allow(async_fn_in_trait)]
pub trait Browser {
    /// Handle to an element located by [`Browser::wait_until`].
    type Element;

    async fn navigate(&self, url: &str) -> Result<(), ScraperError>;

    /// Serialized DOM of the current page, parsed by the engine into a
    /// [`crate::Snapshot`].
    async fn page_source(&self) -> Result<String, ScraperError>;

    /// Polls for `condition` until it holds or `timeout` elapses.
    async fn wait_until(
        &self,
        condition: Condition<'_>,
        timeout: Duration,
    ) -> Result<WaitOutcome<Self::Element>, ScraperError>;

    async fn scroll_to_bottom(&self) -> Result<(), ScraperError>;

    async fn scroll_into_view(&self, element: &Self::Element) -> Result<(), ScraperError>;

    async fn click(&self, element: &Self::Element) -> Result<(), ScraperError>;

    /// Current scrollable height of the document body, in pixels.
    async fn measured_page_height(&self) -> Result<u64, ScraperError>;

    /// Releases the rendering engine.
    async fn close(self) -> Result<(), ScraperError>
    where
        Self: Sized;
}
