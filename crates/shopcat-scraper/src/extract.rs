//! Card extraction from a parsed page snapshot.

use scraper::{ElementRef, Html, Selector};
use shopcat_core::{card_selector, ProductRecord, SeenNames, StorefrontLayout, NAME_NOT_FOUND};

use crate::error::ScraperError;
use crate::normalize::{normalize_sales_count, parse_price};

/// Immutable parse of the page source at one instant.
///
/// A fresh snapshot must be captured after every interaction; elements
/// borrowed from an old one describe a page that no longer exists.
pub struct Snapshot {
    html: Html,
}

impl Snapshot {
    #[must_use]
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// The whole document, for page-wide extraction.
    #[must_use]
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    pub fn select<'a>(&'a self, selector: &'a Selector) -> impl Iterator<Item = ElementRef<'a>> {
        self.html.select(selector)
    }
}

/// Compiles `css`, mapping parse failures to [`ScraperError::InvalidSelector`].
pub(crate) fn compile(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::InvalidSelector {
        selector: css.to_owned(),
        reason: e.to_string(),
    })
}

/// Whitespace-trimmed text content of `element`, with empty text nodes
/// dropped and the rest concatenated.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Parses product cards into [`ProductRecord`]s, skipping names already seen.
///
/// Holds the compiled per-card selectors; the card selector itself is passed
/// per call because the available and sold-out listings use different card
/// classes.
#[derive(Debug)]
pub struct RecordExtractor {
    available_card: Selector,
    sold_out_card: Selector,
    title: Selector,
    price: Selector,
    label: Selector,
    sold_marker: String,
    thousands_marker: String,
}

impl RecordExtractor {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if any card or field
    /// selector in `layout` does not parse.
    pub fn new(layout: &StorefrontLayout) -> Result<Self, ScraperError> {
        Ok(Self {
            available_card: compile(&card_selector(&layout.available_card_classes))?,
            sold_out_card: compile(&card_selector(&layout.sold_out_card_classes))?,
            title: compile(&layout.title_selector)?,
            price: compile(&layout.price_selector)?,
            label: compile("div")?,
            sold_marker: layout.sold_marker.clone(),
            thousands_marker: layout.thousands_marker.clone(),
        })
    }

    #[must_use]
    pub fn available_card(&self) -> &Selector {
        &self.available_card
    }

    #[must_use]
    pub fn sold_out_card(&self) -> &Selector {
        &self.sold_out_card
    }

    /// Extracts every card under `container` whose name is not yet in `seen`.
    ///
    /// Each emitted record's name is inserted into `seen` as it is emitted,
    /// so a card repeated within the same container, or in a later snapshot
    /// of the same listing, is returned at most once. Output follows
    /// document order.
    pub fn extract(
        &self,
        container: ElementRef<'_>,
        seen: &mut SeenNames,
        card: &Selector,
    ) -> Vec<ProductRecord> {
        container
            .select(card)
            .map(|el| self.parse_card(el))
            .filter(|record| seen.insert_new(&record.name))
            .collect()
    }

    fn parse_card(&self, card: ElementRef<'_>) -> ProductRecord {
        let name = card
            .select(&self.title)
            .next()
            .map(element_text)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| NAME_NOT_FOUND.to_owned());

        let price = card
            .select(&self.price)
            .next()
            .map_or(0, |el| parse_price(&element_text(el)));

        let monthly_sales = self
            .sold_label(card)
            .map_or(0, |el| normalize_sales_count(&element_text(el), &self.thousands_marker));

        ProductRecord {
            name,
            price,
            monthly_sales,
        }
    }

    /// The first `div` in `card` holding its own text with the sold marker.
    ///
    /// Matched by content rather than position; card markup reorders the
    /// rating and sold-count rows between listings.
    fn sold_label<'a>(&self, card: ElementRef<'a>) -> Option<ElementRef<'a>> {
        card.select(&self.label).find(|div| {
            div.children()
                .filter_map(|node| node.value().as_text())
                .any(|text| text.contains(self.sold_marker.as_str()))
        })
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
