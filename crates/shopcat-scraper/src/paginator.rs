//! Forward pagination of the available-products listing.
//!
//! Each listing page is an infinite-scroll grid: scroll until the page
//! stops growing, extract, then click "next". The listing is finished when
//! a page yields no names not already seen, or when there is no clickable
//! next control. No page-count limit applies.

use shopcat_core::{Catalog, CatalogKind, ProductRecord, SeenNames};

use crate::browser::{Browser, Condition, WaitOutcome};
use crate::error::ScraperError;
use crate::extract::Snapshot;
use crate::pacing::Pause;
use crate::report::{preview_new_records, ProgressEvent};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginatorState {
    Scrolling,
    Extracting,
    Advancing,
    Done,
}

#[derive(Debug)]
pub struct PaginationOutcome {
    pub catalog: Catalog,
    pub pages_visited: u32,
    /// Every state entered, in order, starting with `Scrolling`.
    pub transitions: Vec<PaginatorState>,
}

impl<B: Browser> Session<'_, B> {
    /// Walks the available listing to the end.
    ///
    /// Names are checked against and added to `seen`. Browser failures
    /// never abort the listing: a failed scroll or height measurement
    /// counts as a settled page, and a failed snapshot ends the listing
    /// with the records gathered so far.
    pub async fn paginate_available(&mut self, seen: &mut SeenNames) -> PaginationOutcome {
        let mut catalog = Catalog::new(CatalogKind::Available);
        let mut page = 1u32;
        let mut state = PaginatorState::Scrolling;
        let mut transitions = vec![state];

        loop {
            let next = match state {
                PaginatorState::Scrolling => {
                    self.reporter.report(ProgressEvent::PageStarted { page });
                    let scrolls = self.scroll_until_stable().await;
                    tracing::debug!(page, scrolls, "page height settled");
                    PaginatorState::Extracting
                }
                PaginatorState::Extracting => match self.extract_available_page(seen).await {
                    Err(err) => {
                        tracing::warn!(page, error = %err, "could not capture listing page");
                        PaginatorState::Done
                    }
                    Ok(new_records) if new_records.is_empty() => {
                        self.reporter.report(ProgressEvent::NoNewRecords {
                            kind: CatalogKind::Available,
                        });
                        PaginatorState::Done
                    }
                    Ok(new_records) => {
                        tracing::debug!(page, new = new_records.len(), "extracted page");
                        preview_new_records(
                            &mut *self.reporter,
                            CatalogKind::Available,
                            catalog.len() + 1,
                            &new_records,
                            self.settings.preview_limit,
                        );
                        catalog.extend(new_records);
                        PaginatorState::Advancing
                    }
                },
                PaginatorState::Advancing => {
                    if self.click_next_page().await {
                        page += 1;
                        self.reporter.report(ProgressEvent::NextClicked { page });
                        self.pace(Pause::PageTurn).await;
                        PaginatorState::Scrolling
                    } else {
                        self.reporter.report(ProgressEvent::NoNextControl);
                        PaginatorState::Done
                    }
                }
                PaginatorState::Done => break,
            };
            tracing::debug!(from = ?state, to = ?next, page, "paginator transition");
            transitions.push(next);
            state = next;
        }

        PaginationOutcome {
            catalog,
            pages_visited: page,
            transitions,
        }
    }

    /// Scrolls to the bottom up to `max_scroll_attempts` times, stopping
    /// early once the page height stops growing or the browser fails to
    /// scroll or measure. Returns the scroll count.
    async fn scroll_until_stable(&mut self) -> u32 {
        let mut last_height = match self.browser.measured_page_height().await {
            Ok(height) => height,
            Err(err) => {
                tracing::warn!(error = %err, "could not measure page height");
                return 0;
            }
        };
        let mut scrolls = 0;
        while scrolls < self.settings.max_scroll_attempts {
            if let Err(err) = self.browser.scroll_to_bottom().await {
                tracing::warn!(error = %err, "could not scroll to bottom");
                break;
            }
            scrolls += 1;
            self.pace(Pause::Scroll).await;
            let height = match self.browser.measured_page_height().await {
                Ok(height) => height,
                Err(err) => {
                    tracing::warn!(error = %err, "could not measure page height");
                    break;
                }
            };
            if height <= last_height {
                break;
            }
            last_height = height;
        }
        scrolls
    }

    async fn extract_available_page(
        &mut self,
        seen: &mut SeenNames,
    ) -> Result<Vec<ProductRecord>, ScraperError> {
        let source = self.browser.page_source().await?;
        let snapshot = Snapshot::parse(&source);
        Ok(self
            .extractor
            .extract(snapshot.root(), seen, self.extractor.available_card()))
    }

    /// Clicks the next-page control. `false` when it is absent, never
    /// becomes clickable, the wait fails, or the click is rejected.
    async fn click_next_page(&mut self) -> bool {
        let outcome = self
            .browser
            .wait_until(
                Condition::Clickable(&self.layout.next_page_selector),
                self.settings.control_wait,
            )
            .await;
        let button = match outcome {
            Ok(WaitOutcome::Found(button)) => button,
            Ok(WaitOutcome::NotFound) => return false,
            Err(err) => {
                tracing::warn!(error = %err, "waiting for next-page control failed");
                return false;
            }
        };
        if let Err(err) = self.browser.click(&button).await {
            tracing::warn!(error = %err, "next-page control rejected the click");
            return false;
        }
        true
    }
}
