//! HTTP surface of the classifier.

mod routes;
mod types;

pub use routes::{serve, AppState};
