//! Earthquake alert-level classification with an operator console and a
//! public announcement board.
//!
//! The offline trainer fits a random forest on historical readings and
//! writes the model and label encoder. The operator flow loads both,
//! predicts an alert level for a chosen event and publishes it as the
//! single public announcement.

pub mod announcement;
pub mod config;
pub mod console;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod ml;
pub mod models;
pub mod session;
pub mod startup;

pub use config::Config;
pub use error::{AppError, Result};
