//! Selectors and marker words describing a storefront shop page.
//!
//! The default layout is the Shopee Indonesia shop page: an infinite-scroll
//! "available" grid with a next-page button, followed by a sold-out area
//! grouped into header sections and expanded by a "see more" button.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontLayout {
    /// Space-separated class list of an available product card.
    pub available_card_classes: String,
    /// Space-separated class list of a sold-out product card.
    pub sold_out_card_classes: String,
    /// Product title inside a card.
    pub title_selector: String,
    /// Price text inside a card.
    pub price_selector: String,
    /// Word identifying the "items sold" label, e.g. `"Terjual"`.
    pub sold_marker: String,
    /// Thousands abbreviation in sold counts, e.g. `"RB"` in `"1,2RB"`.
    pub thousands_marker: String,
    /// Element whose presence means the first listing has rendered.
    pub initial_presence_selector: String,
    pub next_page_selector: String,
    pub load_more_sold_out_selector: String,
    pub section_selector: String,
    pub section_title_selector: String,
    /// Heading text of the recommendations section, which is not part of
    /// the merchant's catalog.
    pub recommended_marker: String,
}

impl Default for StorefrontLayout {
    fn default() -> Self {
        Self {
            available_card_classes: "shop-search-result-view__item".to_owned(),
            sold_out_card_classes: "shop-collection-view__item".to_owned(),
            title_selector: "div.line-clamp-2".to_owned(),
            price_selector: "span.truncate".to_owned(),
            sold_marker: "Terjual".to_owned(),
            thousands_marker: "RB".to_owned(),
            initial_presence_selector: ".shop-search-result-view__item".to_owned(),
            next_page_selector: "button.shopee-icon-button--right".to_owned(),
            load_more_sold_out_selector:
                "div.shop-sold-out-see-more > button.shopee-button-outline".to_owned(),
            section_selector: "div.shopee-header-section".to_owned(),
            section_title_selector: "div.shopee-header-section__header__title".to_owned(),
            recommended_marker: "Kamu Mungkin Suka".to_owned(),
        }
    }
}

/// Turns a space-separated class list into a compound `div` selector.
///
/// `"a b"` becomes `"div.a.b"`; repeated whitespace is ignored.
#[must_use]
pub fn card_selector(classes: &str) -> String {
    classes
        .split_whitespace()
        .fold(String::from("div"), |mut sel, class| {
            sel.push('.');
            sel.push_str(class);
            sel
        })
}
