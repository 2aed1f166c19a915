pub mod browser;
pub mod error;
pub mod export;
pub mod extract;
pub mod normalize;
pub mod pacing;
pub mod paginator;
pub mod report;
pub mod session;
pub mod sold_out;
pub mod webdriver;

pub use browser::{Browser, Condition, WaitOutcome};
pub use error::ScraperError;
pub use export::CatalogExporter;
pub use extract::{RecordExtractor, Snapshot};
pub use normalize::{normalize_sales_count, parse_price};
pub use pacing::{NoPacing, Pacer, Pause, RandomPacer};
pub use paginator::{PaginationOutcome, PaginatorState};
pub use report::{ProgressEvent, Reporter};
pub use session::{EngineSettings, Session, DEFAULT_PREVIEW_LIMIT};
pub use sold_out::{LoaderOutcome, LoaderState, SectionOutcome};
pub use webdriver::WebDriverBrowser;
