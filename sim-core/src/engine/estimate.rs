//! Placeholder savings estimate shown after submission.
//!
//! This is not a rate engine: the switched bill is the current bill minus a
//! flat discount, rounded down to whole yen.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Discount applied when no other rate is configured (10%).
pub const DEFAULT_DISCOUNT_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstimateError {
    #[error("discount rate {0} is outside 0..=1")]
    RateOutOfRange(Decimal),
}

/// Result of [`SavingsCalculator::estimate`]. All amounts in yen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsEstimate {
    pub current_bill: Decimal,
    pub estimated_bill: Decimal,
    pub monthly_savings: Decimal,
    pub annual_savings: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavingsCalculator {
    discount_rate: Decimal,
}

impl SavingsCalculator {
    /// Creates a calculator for `discount_rate`, a fraction in `0..=1`.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::RateOutOfRange`] for rates below zero or
    /// above one.
    pub fn new(discount_rate: Decimal) -> Result<Self, EstimateError> {
        if discount_rate < Decimal::ZERO || discount_rate > Decimal::ONE {
            return Err(EstimateError::RateOutOfRange(discount_rate));
        }
        Ok(Self { discount_rate })
    }

    pub fn discount_rate(&self) -> Decimal {
        self.discount_rate
    }

    /// Estimates the bill after switching.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use sim_core::engine::SavingsCalculator;
    ///
    /// let estimate = SavingsCalculator::default().estimate(dec!(5555));
    ///
    /// assert_eq!(estimate.monthly_savings, dec!(555));
    /// assert_eq!(estimate.estimated_bill, dec!(5000));
    /// ```
    pub fn estimate(
        &self,
        current_bill: Decimal,
    ) -> SavingsEstimate {
        let monthly_savings = (current_bill * self.discount_rate).floor();

        SavingsEstimate {
            current_bill,
            estimated_bill: current_bill - monthly_savings,
            monthly_savings,
            annual_savings: monthly_savings * MONTHS_PER_YEAR,
        }
    }
}

impl Default for SavingsCalculator {
    fn default() -> Self {
        Self {
            discount_rate: DEFAULT_DISCOUNT_RATE,
        }
    }
}
