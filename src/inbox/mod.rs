pub mod client;
pub mod demo;
pub mod filter;
pub mod render;
pub mod stats;
pub mod store;
pub mod types;

pub use client::{HttpTransport, MessageService, Transport};
pub use filter::{DateBucket, FilterCriteria, StatusFilter, filter, filter_indices};
pub use store::{LocalStore, STORAGE_KEY, StoreWatcher};
pub use types::*;
