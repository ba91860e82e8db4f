//! Form controller: owns the current [`FormData`] snapshot and sequences the
//! pure engine functions around each input event.
//!
//! Per input: write the raw value (re-deriving the area for postal codes),
//! clear the fields the reset cascade names, then let callers pull a fresh
//! [`FormSnapshot`]. Derived views are never cached.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::engine::{
    FormState, SavingsCalculator, SavingsEstimate, analyze_form_state, can_submit, detect_area,
    fields_to_reset, steps_for_state, validate_form,
};
use crate::input::FieldInput;
use crate::models::{FieldName, FormData, FormErrors, FormStep};

/// Message shown when the submission sink fails.
pub const SUBMIT_FAILED_MESSAGE: &str = "An error occurred while submitting. Please try again.";

/// Receiver of a finished, validated form.
pub trait SubmissionSink {
    fn accept(
        &mut self,
        lead: &FormData,
    ) -> Result<(), SinkError>;
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("submission rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("form is incomplete; next required field: {next_field:?}")]
    Incomplete { next_field: Option<FieldName> },

    #[error("form has validation errors: {0}")]
    Invalid(FormErrors),

    #[error("submission failed: {0}")]
    Sink(#[source] SinkError),
}

/// Everything a front end needs to render the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub data: FormData,
    pub state: FormState,
    pub errors: FormErrors,
    pub steps: Vec<FormStep>,
    pub can_submit: bool,
}

/// A successfully handed-off form and its estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub lead: FormData,
    pub estimate: SavingsEstimate,
}

#[derive(Debug, Clone, Default)]
pub struct FormController {
    data: FormData,
    submit_error: Option<String>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from prefilled values. The area is re-derived from the postal
    /// code regardless of what `data` carries.
    pub fn with_data(mut data: FormData) -> Self {
        data.area = data
            .postal_code
            .as_deref()
            .map(|postal_code| detect_area(postal_code).area);
        Self {
            data,
            submit_error: None,
        }
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    /// Applies one input event and returns the fields it cleared.
    pub fn apply(
        &mut self,
        input: FieldInput,
    ) -> Vec<FieldName> {
        let field = input.field();
        let mut next = self.data.clone();
        write_input(&mut next, input);

        let reset = fields_to_reset(&self.data, &next);
        for dependent in &reset {
            // area was just re-derived above
            if *dependent != FieldName::Area {
                next.clear(*dependent);
            }
        }

        debug!(field = %field, reset = ?reset, "applied field input");
        self.data = next;
        self.submit_error = None;
        reset
    }

    /// Clears every field and any pending submission error.
    pub fn reset(&mut self) {
        debug!("form reset");
        self.data = FormData::default();
        self.submit_error = None;
    }

    /// Derives state, errors, steps, and submittability for the current
    /// snapshot.
    pub fn snapshot(&self) -> FormSnapshot {
        let state = analyze_form_state(&self.data);
        let mut errors = validate_form(&self.data);
        if let Some(message) = &self.submit_error {
            errors.insert_submit(message.clone());
        }
        let steps = steps_for_state(&state, &self.data, &errors);
        let can_submit = can_submit(&self.data, &errors);

        FormSnapshot {
            data: self.data.clone(),
            state,
            errors,
            steps,
            can_submit,
        }
    }

    /// Validates the form and hands it to `sink`.
    ///
    /// On success the form is cleared and the estimate returned. A sink
    /// failure leaves the form untouched and records a single submit error
    /// that the next snapshot reports.
    ///
    /// # Errors
    ///
    /// * [`SubmitError::Invalid`] when any field or cross-field rule fails.
    /// * [`SubmitError::Incomplete`] when a step is still open.
    /// * [`SubmitError::Sink`] when the sink rejects the form.
    pub fn submit<S: SubmissionSink + ?Sized>(
        &mut self,
        sink: &mut S,
        calculator: &SavingsCalculator,
    ) -> Result<Submission, SubmitError> {
        let errors = validate_form(&self.data);
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }

        let state = analyze_form_state(&self.data);
        let bill = match self.data.electricity_bill {
            Some(bill) if state.is_form_complete => bill,
            _ => {
                return Err(SubmitError::Incomplete {
                    next_field: state.next_required_field,
                });
            }
        };

        if let Err(error) = sink.accept(&self.data) {
            warn!(%error, "submission sink failed");
            self.submit_error = Some(SUBMIT_FAILED_MESSAGE.to_string());
            return Err(SubmitError::Sink(error));
        }

        let lead = std::mem::take(&mut self.data);
        self.submit_error = None;
        let estimate = calculator.estimate(bill);
        info!(
            area = ?lead.area,
            company = ?lead.company,
            plan = ?lead.plan,
            savings = %estimate.monthly_savings,
            "form submitted"
        );

        Ok(Submission { lead, estimate })
    }
}

fn write_input(
    data: &mut FormData,
    input: FieldInput,
) {
    match input {
        FieldInput::PostalCode(postal_code) => {
            if postal_code.is_empty() {
                data.postal_code = None;
                data.area = None;
            } else {
                data.area = Some(detect_area(&postal_code).area);
                data.postal_code = Some(postal_code);
            }
        }
        FieldInput::Company(company) => data.company = company,
        FieldInput::Plan(plan) => data.plan = plan,
        FieldInput::Capacity(capacity) => data.capacity = capacity,
        FieldInput::ElectricityBill(bill) => data.electricity_bill = bill,
        FieldInput::Email(email) => data.email = Some(email).filter(|e| !e.is_empty()),
    }
}
