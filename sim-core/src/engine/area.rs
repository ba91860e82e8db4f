//! Postal code to service area detection.

use serde::Serialize;

use crate::catalog::{self, AREAS, POSTAL_CODE_LENGTH};
use crate::models::AreaCode;

pub const POSTAL_CODE_LENGTH_ERROR: &str = "postal code must be 7 digits";
pub const POSTAL_CODE_DIGITS_ERROR: &str = "postal code must contain only digits";
pub const AREA_NOT_SERVICED_ERROR: &str = "area not serviced";

/// Outcome of [`detect_area`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaDetection {
    pub area: AreaCode,
    pub area_name: &'static str,
    pub is_supported: bool,
    pub error_message: Option<&'static str>,
}

impl AreaDetection {
    fn unsupported(error_message: &'static str) -> Self {
        Self {
            area: AreaCode::Unsupported,
            area_name: catalog::area(AreaCode::Unsupported).name,
            is_supported: false,
            error_message: Some(error_message),
        }
    }
}

/// Determines the service area for a postal code.
///
/// Total over all strings: partial, empty, or malformed input yields the
/// unsupported area together with the reason.
///
/// # Examples
///
/// ```
/// use sim_core::engine::detect_area;
/// use sim_core::models::AreaCode;
///
/// assert_eq!(detect_area("1000001").area, AreaCode::Tokyo);
/// assert_eq!(detect_area("5300001").area, AreaCode::Kansai);
/// assert!(!detect_area("2000000").is_supported);
/// ```
pub fn detect_area(postal_code: &str) -> AreaDetection {
    if postal_code.chars().count() != POSTAL_CODE_LENGTH {
        return AreaDetection::unsupported(POSTAL_CODE_LENGTH_ERROR);
    }

    if !postal_code.bytes().all(|b| b.is_ascii_digit()) {
        return AreaDetection::unsupported(POSTAL_CODE_DIGITS_ERROR);
    }

    AREAS
        .iter()
        .find(|area| area.is_supported() && area.matches_postal_code(postal_code))
        .map_or_else(
            || AreaDetection::unsupported(AREA_NOT_SERVICED_ERROR),
            |area| AreaDetection {
                area: area.code,
                area_name: area.name,
                is_supported: true,
                error_message: None,
            },
        )
}
