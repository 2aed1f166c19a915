use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Name recorded for a card whose title element is missing or empty.
pub const NAME_NOT_FOUND: &str = "Name Not Found";

/// One product card parsed from a storefront listing.
///
/// Field order is the export column order: `name, price, monthly_sales`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Display title. Falls back to [`NAME_NOT_FOUND`].
    pub name: String,
    /// Price in whole currency units with grouping characters removed.
    /// `0` when the price text could not be parsed.
    pub price: u64,
    /// Items sold as reported by the card's "sold" label, `0` when absent.
    pub monthly_sales: u64,
}

/// Which of the two catalogs a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Available,
    SoldOut,
}

impl CatalogKind {
    /// Short label used in progress lines, e.g. `[Ready #3]`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CatalogKind::Available => "Ready",
            CatalogKind::SoldOut => "Sold out",
        }
    }

    /// Sheet (or file suffix) name used by exporters.
    #[must_use]
    pub fn sheet_name(self) -> &'static str {
        match self {
            CatalogKind::Available => "Available_Products",
            CatalogKind::SoldOut => "Sold_Out_Products",
        }
    }
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogKind::Available => write!(f, "available"),
            CatalogKind::SoldOut => write!(f, "sold-out"),
        }
    }
}

/// Names already emitted for one catalog.
///
/// Grow-only: the only mutating operation is [`SeenNames::insert_new`].
#[derive(Debug, Default, Clone)]
pub struct SeenNames {
    names: HashSet<String>,
}

impl SeenNames {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name` and returns `true` if it had not been seen before.
    pub fn insert_new(&mut self, name: &str) -> bool {
        if self.names.contains(name) {
            return false;
        }
        self.names.insert(name.to_owned())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Ordered records collected for one phase. Insertion order is DOM
/// encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    kind: CatalogKind,
    records: Vec<ProductRecord>,
}

impl Catalog {
    #[must_use]
    pub fn new(kind: CatalogKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = ProductRecord>) {
        self.records.extend(records);
    }

    #[must_use]
    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    /// The first `n` records, or all of them when fewer exist.
    #[must_use]
    pub fn head(&self, n: usize) -> &[ProductRecord] {
        &self.records[..n.min(self.records.len())]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductRecord> {
        self.records.iter()
    }
}

/// Both catalogs produced by one session, as handed to an exporter.
///
/// No cross-catalog dedup: a name may appear in both when stock state
/// changed between the two phases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogs {
    pub available: Catalog,
    pub sold_out: Catalog,
}

impl Default for Catalogs {
    fn default() -> Self {
        Self {
            available: Catalog::new(CatalogKind::Available),
            sold_out: Catalog::new(CatalogKind::SoldOut),
        }
    }
}
