//! Turns the raw tab-separated price history into a validated `PriceSeries`.
//!
//! - `DataLoader`: probes candidate file names in priority order and parses the first hit.
//! - `SeriesCache`: an explicit, process-owned cache keyed by source file.
//! - `cells`: the total parsers used for dates, numbers and headers.

pub mod cache;
pub mod cells;
pub mod error;
pub mod reader;
pub mod source;

pub use cache::SeriesCache;
pub use error::LoaderError;
pub use reader::{read_path, read_series};
pub use source::{DataLoader, LoadedSeries};
