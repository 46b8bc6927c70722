//! Report data structures for commands.
//!
//! Commands collect data into a report, then render it to an Output target.

mod check;
mod columns;
mod introspect;
mod load;
mod output;
mod preview;

pub use check::{CheckReport, SourceInfo};
pub use columns::ColumnsReport;
pub use introspect::IntrospectReport;
pub use load::LoadReport;
pub use preview::PreviewReport;
#[cfg(test)]
pub use output::BufferOutput;
pub use output::{Report, TerminalOutput};
