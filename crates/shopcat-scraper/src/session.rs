//! One scraping run against one storefront.
//!
//! A [`Session`] owns the browser for its whole lifetime and runs the two
//! phases back to back: the available listing ([`crate::paginator`]) and
//! then the sold-out area ([`crate::sold_out`]). The per-catalog
//! [`SeenNames`] sets live only inside [`Session::collect`] and are passed
//! down by reference.

use std::time::Duration;

use shopcat_core::{AppConfig, Catalogs, SeenNames, StorefrontLayout};

use crate::browser::{Browser, Condition, WaitOutcome};
use crate::error::ScraperError;
use crate::export::CatalogExporter;
use crate::extract::RecordExtractor;
use crate::pacing::{Pacer, Pause};
use crate::report::{ProgressEvent, Reporter};
use crate::sold_out::SectionSelectors;

/// Preview limit used when none (or an invalid one) is given.
pub const DEFAULT_PREVIEW_LIMIT: usize = 1000;

/// Timeouts and bounds for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// How long to wait for the first product card after navigating.
    pub initial_wait: Duration,
    /// How long to wait for the next-page and load-more controls.
    pub control_wait: Duration,
    /// Scroll steps per listing page before extracting.
    pub max_scroll_attempts: u32,
    /// Guard against a load-more control that never disappears.
    pub max_load_more_clicks: u32,
    /// Number of records per catalog echoed to the reporter.
    pub preview_limit: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            initial_wait: Duration::from_secs(20),
            control_wait: Duration::from_secs(5),
            max_scroll_attempts: 3,
            max_load_more_clicks: 500,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
        }
    }
}

impl EngineSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig, preview_limit: usize) -> Self {
        Self {
            initial_wait: Duration::from_secs(config.initial_wait_secs),
            control_wait: Duration::from_secs(config.control_wait_secs),
            max_scroll_attempts: config.max_scroll_attempts,
            max_load_more_clicks: config.max_load_more_clicks,
            preview_limit,
        }
    }
}

pub struct Session<'r, B: Browser> {
    pub(crate) browser: B,
    pub(crate) layout: StorefrontLayout,
    pub(crate) extractor: RecordExtractor,
    pub(crate) sections: SectionSelectors,
    pub(crate) settings: EngineSettings,
    pacer: Box<dyn Pacer>,
    pub(crate) reporter: &'r mut dyn Reporter,
}

impl<'r, B: Browser> Session<'r, B> {
    /// Builds a session, compiling every selector in `layout` up front.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if a selector in `layout`
    /// does not parse.
    pub fn new(
        browser: B,
        layout: StorefrontLayout,
        settings: EngineSettings,
        pacer: Box<dyn Pacer>,
        reporter: &'r mut dyn Reporter,
    ) -> Result<Self, ScraperError> {
        let extractor = RecordExtractor::new(&layout)?;
        let sections = SectionSelectors::new(&layout)?;
        Ok(Self {
            browser,
            layout,
            extractor,
            sections,
            settings,
            pacer,
            reporter,
        })
    }

    #[must_use]
    pub fn browser(&self) -> &B {
        &self.browser
    }

    /// Scrapes `url`, closes the browser, and hands both catalogs to
    /// `exporter`.
    ///
    /// The browser is closed on every path, including failures. Once the
    /// listing has appeared, browser failures only cut a phase short;
    /// whatever was collected is still exported.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InitialLoadTimeout`] if no product card appears
    ///   within the initial wait. Nothing is exported.
    /// - [`ScraperError::WebDriver`] / [`ScraperError::Transport`] if
    ///   navigation or the initial wait itself fails. Nothing is exported.
    /// - [`ScraperError::Export`] if `exporter` fails.
    pub async fn run<E: CatalogExporter>(
        mut self,
        url: &str,
        exporter: &E,
    ) -> Result<Catalogs, ScraperError> {
        let collected = self.collect(url).await;

        let Self {
            browser,
            settings,
            reporter,
            ..
        } = self;
        if let Err(err) = browser.close().await {
            tracing::warn!(error = %err, "failed to close browser");
        }
        let catalogs = collected?;

        reporter.report(ProgressEvent::Totals {
            available: catalogs.available.len(),
            sold_out: catalogs.sold_out.len(),
        });
        for catalog in [&catalogs.available, &catalogs.sold_out] {
            reporter.report(ProgressEvent::CatalogPreview {
                kind: catalog.kind(),
                records: catalog.head(settings.preview_limit).to_vec(),
            });
        }

        let destination = exporter
            .export(&catalogs)
            .map_err(|e| ScraperError::Export(Box::new(e)))?;
        tracing::info!(
            available = catalogs.available.len(),
            sold_out = catalogs.sold_out.len(),
            %destination,
            "catalogs exported"
        );
        reporter.report(ProgressEvent::Exported { destination });

        Ok(catalogs)
    }

    /// Runs both phases and returns the catalogs without closing the
    /// browser or exporting.
    ///
    /// # Errors
    ///
    /// See [`Session::run`].
    pub async fn collect(&mut self, url: &str) -> Result<Catalogs, ScraperError> {
        self.wait_for_listing(url).await?;

        let mut seen_available = SeenNames::new();
        let available = self.paginate_available(&mut seen_available).await;
        tracing::info!(
            records = available.catalog.len(),
            pages = available.pages_visited,
            "available phase done"
        );

        self.pace(Pause::PhaseBreak).await;

        let mut seen_sold_out = SeenNames::new();
        let loader = self.load_all_sold_out().await;
        let sold_out = self.extract_sold_out_sections(&mut seen_sold_out).await;
        tracing::info!(
            records = sold_out.catalog.len(),
            load_more_clicks = loader.clicks,
            sections = sold_out.sections_visited,
            skipped = sold_out.sections_skipped,
            "sold-out phase done"
        );

        Ok(Catalogs {
            available: available.catalog,
            sold_out: sold_out.catalog,
        })
    }

    async fn wait_for_listing(&mut self, url: &str) -> Result<(), ScraperError> {
        self.reporter.report(ProgressEvent::Navigating {
            url: url.to_owned(),
        });
        self.browser.navigate(url).await?;

        let presence = self
            .browser
            .wait_until(
                Condition::Present(&self.layout.initial_presence_selector),
                self.settings.initial_wait,
            )
            .await?;
        if let WaitOutcome::NotFound = presence {
            let waited_secs = self.settings.initial_wait.as_secs();
            tracing::error!(url, waited_secs, "initial product listing never appeared");
            self.reporter
                .report(ProgressEvent::InitialLoadFailed { waited_secs });
            return Err(ScraperError::InitialLoadTimeout {
                url: url.to_owned(),
                waited_secs,
            });
        }
        self.reporter.report(ProgressEvent::PageLoaded);
        Ok(())
    }

    /// Sleeps for whatever the pacer chooses for `pause`. Long pauses are
    /// announced to the reporter.
    pub(crate) async fn pace(&mut self, pause: Pause) {
        let delay = self.pacer.delay_for(pause);
        if delay.is_zero() {
            return;
        }
        if matches!(pause, Pause::PageTurn | Pause::Section | Pause::PhaseBreak) {
            self.reporter.report(ProgressEvent::Waiting { pause, delay });
        }
        tokio::time::sleep(delay).await;
    }
}
