#![forbid(unsafe_code)]

//! Report metadata model and analysis engine (headless).
//!
//! - [`model`]: typed pages/visuals as delivered by the upstream analysis service
//! - [`store`]: persisted metadata and preferences behind a pluggable key-value backend
//! - [`usage`]: field-usage tally and most/least used rankings
//! - [`preprocess`] + [`resolve`]: tolerant decoding of the AI-suggested alternate layout
//! - [`upload`]: applying an upload response without clobbering good data
//!
//! Everything here is synchronous and performs no I/O except through a [`store::FileStore`].

pub mod config;
mod decode;
pub mod error;
pub mod inspect;
pub mod model;
pub mod preprocess;
pub mod resolve;
pub mod store;
pub mod upload;
pub mod usage;

pub use config::{ConfigError, LensConfig};
pub use error::{Error, Result};
pub use inspect::{PageDetail, PageSummary, ReportSummary, describe_page, summarize_report};
pub use model::{Page, Position, Preferences, ReportMetadata, Visual};
pub use preprocess::{
    AlternateLayout, LayoutDecodeError, decode_alternate_layout, strip_code_fences,
};
pub use resolve::{parse_page_index, resolve_alternate_page, try_resolve_alternate_page};
pub use store::{FileStore, KeyValueStore, MemoryStore, MetadataStore, StoreError};
pub use upload::{UploadError, UploadOutcome, UploadStatus, ingest_upload};
pub use usage::{FieldCount, RankedUsage, UsageTally, aggregate, rank, rank_top};

#[cfg(test)]
mod tests;
