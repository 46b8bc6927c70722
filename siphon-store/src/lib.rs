//! SQLite materialization for siphon.
//!
//! A [`Store`] owns one SQLite connection. It creates the single
//! denormalized table of a source from derived [`Columns`] and inserts
//! flattened records into it, one parameterized `INSERT` per record.
//!
//! ```ignore
//! let mut store = Store::open(&options)?;
//! let table = store.create_table("Country", &columns)?;
//! let summary = store.load(&table, &records)?;
//! ```
//!
//! [`Columns`]: siphon_schema::Columns

mod error;
mod options;
pub mod sql;
mod store;
mod summary;

pub use error::{Error, Result};
pub use options::{JournalMode, SqliteOptions, SynchronousMode};
pub use store::{Rows, Store, Table};
pub use summary::LoadSummary;
