//! Prediction form submission: capture named fields, require every one to be
//! filled, post them as JSON to the prediction endpoint and report the output.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod handler;
pub mod printer;
pub mod response;

pub use client::{PredictClient, PredictionTransport};
pub use config::Config;
pub use error::{AttachError, ConfigError, SubmitError, ValidationError};
pub use form::{FieldSet, Form, Preset};
pub use handler::{FormHandler, Outcome};
pub use printer::{ConsoleReporter, Reporter};
