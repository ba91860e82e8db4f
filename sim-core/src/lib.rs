//! Core of the electricity savings simulator: reference data, the
//! step-dependency form engine, validation, and the form controller.

pub mod catalog;
pub mod controller;
pub mod engine;
pub mod input;
pub mod models;

pub use controller::{
    FormController, FormSnapshot, SinkError, Submission, SubmissionSink, SubmitError,
};
pub use input::{FieldInput, InputParseError};
pub use models::*;
