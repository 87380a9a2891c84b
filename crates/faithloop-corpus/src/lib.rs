//! FaithLoop Corpus - demo data lifecycle and check-in recording
//!
//! Seeds a week of synthetic check-ins tagged with the demo sentinel, purges
//! them (with every row derived from them), and records real check-ins through
//! the same extract → persist → index pipeline.
//!
//! ## Usage
//!
//! ```ignore
//! use faithloop_corpus::{CorpusManager, SeedConfig};
//!
//! let manager = CorpusManager::new(&store, &store);
//! let outcome = manager.seed(&ctx, &SeedConfig::with_days(3))?;
//! println!("{}", outcome.summary());
//!
//! let purged = manager.purge(&ctx);
//! ```
//!
//! ## Failure model
//!
//! A seed aborts only when the store fails its health check. Per-item
//! failures are appended to the outcome's `errors` and the batch continues;
//! repeating the operation is the recovery path.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod checkin;
mod config;
mod demo_content;
mod error;
mod lifecycle;
mod outcome;

pub use checkin::CheckinOutcome;
pub use config::SeedConfig;
pub use demo_content::{build_demo_items, DEMO_DAYS, DEMO_TAGS, SEED_VERSION};
pub use error::CorpusError;
pub use lifecycle::CorpusManager;
pub use outcome::{PurgeOutcome, SeedOutcome};
