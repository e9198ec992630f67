//! sortwatch: watch a directory and file new arrivals into category
//! subfolders.
//!
//! Pipeline: watch session → raw events → event filter → bounded queue →
//! sorter worker → move executor → filesystem.

pub mod categories;
pub mod config;
pub mod error;
pub mod events;
pub mod filter;
pub mod mover;
pub mod queue;
pub mod watcher;
pub mod worker;

pub use categories::{CategoryTable, FALLBACK_CATEGORY};
pub use config::{default_download_dir, RetryPolicy, SorterConfig, DEFAULT_QUEUE_CAPACITY};
pub use error::{Result, SorterError};
pub use events::{RawEvent, RawEventKind};
pub use mover::{FileMover, MoveExecutor, MoveOutcome, SkipReason};
pub use queue::{bounded, Offer, SortQueue};
pub use watcher::{start, WatchConfig, WatchSession};
pub use worker::SorterWorker;
