#![forbid(unsafe_code)]
//! Line-preserving synchronization of Android `strings.xml` resources.
//!
//! A canonical source file decides which keys exist and how the file is laid
//! out; every target locale file is rewritten to follow it while keeping the
//! translations it already has. New keys arrive as copies of the source line,
//! ready to be sent for translation.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use langsync::{NoopObserver, Synchronizer};
//!
//! let mut sync = Synchronizer::new(
//!     "app/src/main/res/values/strings.xml",
//!     ["app/src/main/res/values-fr/strings.xml"],
//! );
//! match sync.run(&mut NoopObserver) {
//!     langsync::SyncOutcome::Synced { targets, .. } => println!("{} file(s) synced", targets.len()),
//!     langsync::SyncOutcome::Failed { reason, .. } => eprintln!("{}", reason),
//! }
//! ```
//!
//! # Line grammar
//!
//! Only a handful of line shapes are recognized: `<string …>…</string>` on
//! one line, `<string-array>` openings and closings, single-line `<item>`s,
//! comments and blank lines. Everything else passes through untouched, which
//! also means an entry that wraps over several lines is not preserved.
//!
//! # Guarantees
//!
//! - Merged output is UTF-8 with CRLF line endings.
//! - Targets are only replaced after every target has been merged into its
//!   temp file; a failure before that leaves all of them byte-for-byte intact.

pub mod check;
pub mod classify;
pub mod error;
pub mod index;
pub mod locale;
pub mod merge;
pub mod sync;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    check::{SourceCheck, check_source_format, is_resource_file},
    classify::{Category, LineRecord, LineScanner, classify},
    error::Error,
    index::{TranslationIndex, build_index},
    merge::{LINE_TERMINATOR, MergeStats, merge_into, merge_to_file, merge_to_string},
    sync::{
        DEFAULT_TEMP_FILE_NAME, NoopObserver, SyncObserver, SyncOptions, SyncOutcome, SyncState,
        Synchronizer, TargetReport, sync,
    },
    traits::TextSource,
    types::{SourceDocument, TargetDocument},
};
