//! Engine operations, grouped by concern.
//!
//! Each submodule adds an `impl Engine` block: writes (`transactions`),
//! aggregation (`financials`), listings (`history`) and the CSV projection
//! (`export`).

mod export;
mod financials;
mod history;
mod transactions;

pub use history::{HistoryEntry, HistoryFilter};
