//! Run persistence backends.

mod json_store;

pub use json_store::{trades_to_csv, JsonRunStore};
