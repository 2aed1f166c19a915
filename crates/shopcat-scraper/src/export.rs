use shopcat_core::Catalogs;

/// Persists the two catalogs of a finished session.
///
/// Implementations write one table per catalog with the columns
/// `name, price, monthly_sales`, labelled by
/// [`shopcat_core::CatalogKind::sheet_name`].
pub trait CatalogExporter {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Writes both catalogs, returning a description of where they went.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` when the output cannot be written.
    fn export(&self, catalogs: &Catalogs) -> Result<String, Self::Error>;
}
