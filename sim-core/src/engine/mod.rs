//! The form engine: pure functions over immutable [`FormData`] snapshots.
//!
//! [`FormData`]: crate::models::FormData

pub mod area;
pub mod capacity;
pub mod estimate;
pub mod form_state;
pub mod reset;
pub mod steps;
pub mod validation;

pub use area::{AreaDetection, detect_area};
pub use capacity::{CapacityOptions, generate_capacity_options, is_capacity_required};
pub use estimate::{EstimateError, SavingsCalculator, SavingsEstimate};
pub use form_state::{FormState, FormStateAnalyzer, analyze_form_state};
pub use reset::fields_to_reset;
pub use steps::{can_submit, project_steps, steps_for_state};
pub use validation::{validate_cross_fields, validate_fields, validate_form};
