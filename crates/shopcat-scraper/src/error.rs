use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("WebDriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("browser {operation} failed: {reason}")]
    Transport { operation: String, reason: String },

    #[error("invalid selector \"{selector}\": {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("no products appeared on {url} within {waited_secs}s")]
    InitialLoadTimeout { url: String, waited_secs: u64 },

    #[error("export failed: {0}")]
    Export(#[source] Box<dyn std::error::Error + Send + Sync>),
}
