//! The sold-out phase: expand the sold-out listing, then extract it
//! section by section.
//!
//! The sold-out area only renders a first batch of cards plus a "see more"
//! control. The loader clicks that control until it is gone; its absence
//! is the signal that every sold-out card is in the DOM. Extraction then
//! runs once per labelled section, skipping the storefront's
//! recommendations section, whose cards are not the merchant's products.

use scraper::Selector;
use shopcat_core::{Catalog, CatalogKind, ProductRecord, SeenNames, StorefrontLayout};

use crate::browser::{Browser, Condition, WaitOutcome};
use crate::error::ScraperError;
use crate::extract::{compile, element_text, Snapshot};
use crate::pacing::Pause;
use crate::report::{preview_new_records, ProgressEvent};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    Loading,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOutcome {
    pub clicks: u32,
    /// `true` when loading stopped at `max_load_more_clicks` with the
    /// control still present.
    pub hit_click_limit: bool,
}

#[derive(Debug)]
pub struct SectionOutcome {
    pub catalog: Catalog,
    pub sections_visited: usize,
    pub sections_skipped: usize,
}

#[derive(Debug)]
pub(crate) struct SectionSelectors {
    section: Selector,
    title: Selector,
}

impl SectionSelectors {
    pub(crate) fn new(layout: &StorefrontLayout) -> Result<Self, ScraperError> {
        Ok(Self {
            section: compile(&layout.section_selector)?,
            title: compile(&layout.section_title_selector)?,
        })
    }
}

/// What one section of the snapshot produced.
enum SectionResult {
    Skipped { title: String },
    Extracted(Vec<ProductRecord>),
}

impl<B: Browser> Session<'_, B> {
    /// Clicks the load-more-sold-out control until it no longer becomes
    /// clickable within the control wait.
    ///
    /// A failed wait, or a control that cannot be scrolled to or clicked,
    /// ends loading like a missing one.
    pub async fn load_all_sold_out(&mut self) -> LoaderOutcome {
        self.reporter.report(ProgressEvent::LoadingSoldOut);

        let mut clicks = 0u32;
        let mut hit_click_limit = false;
        let mut state = LoaderState::Loading;

        while state == LoaderState::Loading {
            if clicks >= self.settings.max_load_more_clicks {
                tracing::warn!(clicks, "load-more control still present at click limit");
                hit_click_limit = true;
                break;
            }
            state = if self.click_load_more().await {
                clicks += 1;
                self.reporter.report(ProgressEvent::LoadMoreClicked { clicks });
                self.pace(Pause::AfterLoadMoreClick).await;
                LoaderState::Loading
            } else {
                LoaderState::Done
            };
            tracing::debug!(?state, clicks, "loader step");
        }

        self.reporter.report(ProgressEvent::SoldOutLoaded { clicks });
        LoaderOutcome {
            clicks,
            hit_click_limit,
        }
    }

    async fn click_load_more(&mut self) -> bool {
        let outcome = self
            .browser
            .wait_until(
                Condition::Clickable(&self.layout.load_more_sold_out_selector),
                self.settings.control_wait,
            )
            .await;
        let button = match outcome {
            Ok(WaitOutcome::Found(button)) => button,
            Ok(WaitOutcome::NotFound) => return false,
            Err(err) => {
                tracing::warn!(error = %err, "waiting for load-more control failed");
                return false;
            }
        };
        if let Err(err) = self.browser.scroll_into_view(&button).await {
            tracing::warn!(error = %err, "could not scroll load-more control into view");
            return false;
        }
        self.pace(Pause::BeforeLoadMoreClick).await;
        if let Err(err) = self.browser.click(&button).await {
            tracing::warn!(error = %err, "load-more control rejected the click");
            return false;
        }
        true
    }

    /// Extracts sold-out cards from one fresh snapshot, section by section,
    /// in document order.
    ///
    /// Sections whose heading contains the layout's recommended marker
    /// contribute nothing. Names are checked against and added to `seen`.
    /// If the snapshot cannot be captured the catalog is empty.
    pub async fn extract_sold_out_sections(&mut self, seen: &mut SeenNames) -> SectionOutcome {
        self.reporter.report(ProgressEvent::ExtractingSoldOut);
        let results = match self.browser.page_source().await {
            Ok(source) => self.extract_sections(&Snapshot::parse(&source), seen),
            Err(err) => {
                tracing::warn!(error = %err, "could not capture sold-out page");
                Vec::new()
            }
        };

        let mut catalog = Catalog::new(CatalogKind::SoldOut);
        let mut sections_visited = 0;
        let mut sections_skipped = 0;
        for result in results {
            match result {
                SectionResult::Skipped { title } => {
                    sections_skipped += 1;
                    self.reporter.report(ProgressEvent::SectionSkipped { title });
                }
                SectionResult::Extracted(records) => {
                    sections_visited += 1;
                    tracing::debug!(
                        section = sections_visited,
                        new = records.len(),
                        "extracted section"
                    );
                    catalog.extend(records);
                    self.pace(Pause::Section).await;
                }
            }
        }

        preview_new_records(
            &mut *self.reporter,
            CatalogKind::SoldOut,
            1,
            catalog.records(),
            self.settings.preview_limit,
        );

        SectionOutcome {
            catalog,
            sections_visited,
            sections_skipped,
        }
    }

    fn extract_sections(&self, snapshot: &Snapshot, seen: &mut SeenNames) -> Vec<SectionResult> {
        let marker = self.layout.recommended_marker.as_str();
        snapshot
            .select(&self.sections.section)
            .map(|section| {
                let heading = section.select(&self.sections.title).next();
                let is_recommended = !marker.is_empty()
                    && heading.is_some_and(|h| h.text().collect::<String>().contains(marker));
                if is_recommended {
                    SectionResult::Skipped {
                        title: heading.map(element_text).unwrap_or_default(),
                    }
                } else {
                    SectionResult::Extracted(self.extractor.extract(
                        section,
                        seen,
                        self.extractor.sold_out_card(),
                    ))
                }
            })
            .collect()
    }
}
