//! Shared plumbing for the command-line tools: seed selection, session configuration
//! and question catalogs on disk, and the hash-chained journal file format.

pub mod files;
pub mod journal_file;
pub mod seed;

pub use files::{load_catalog, load_config};
pub use journal_file::{JournalLoadError, JournalWriter, LoadedJournal, load_journal_from_file};
pub use seed::{SeedChoice, generate_runtime_seed, resolve_seed};
