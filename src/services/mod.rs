pub mod catalog_service;
pub mod poller;
pub mod quote_debouncer;

pub use catalog_service::{build_catalog, TokenCatalogLoader};
pub use poller::PollingTask;
pub use quote_debouncer::{QuoteDebouncer, QuoteUpdate};
