//! Quantity type - a value with an associated dimension vector
//!
//! Values are always held in base units; a quantity of `1 km` is stored as
//! `1000` with the length dimension. Every operation returns a new quantity.

use std::fmt;
use serde::{Serialize, Deserialize};
use ucal_core::{Number, UcalError};
use crate::Dimension;

/// Largest argument accepted by `factorial`
pub const FACTORIAL_LIMIT: i64 = 1_000_000;

/// A physical quantity: a numeric value in base units plus its dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quantity {
    /// The numeric value, in base units
    pub value: Number,
    /// Exponents of the base dimensions
    pub dimension: Dimension,
}

impl Quantity {
    /// Create a new quantity
    pub fn new(value: Number, dimension: Dimension) -> Self {
        Quantity { value, dimension }
    }

    /// Create a dimensionless quantity (pure number)
    pub fn dimensionless(value: Number) -> Self {
        Quantity { value, dimension: Dimension::DIMENSIONLESS }
    }

    /// One of the base unit at `index`
    pub fn base_unit(index: usize) -> Self {
        Quantity { value: Number::from_i64(1), dimension: Dimension::base(index) }
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless()
    }

    /// A dimensionless whole number
    pub fn is_integer(&self) -> bool {
        self.is_dimensionless() && self.value.is_integer()
    }

    /// Check if two quantities have the same dimensions (after rounding)
    pub fn matches_dimension(&self, other: &Quantity) -> bool {
        self.dimension.matches(&other.dimension)
    }

    fn require_same_dimension(&self, other: &Quantity, op: &str) -> Result<(), UcalError> {
        if self.dimension != other.dimension {
            return Err(UcalError::inconsistent_units(format!(
                "cannot {} [{}] and [{}]",
                op, self.dimension, other.dimension
            )));
        }
        Ok(())
    }

    fn require_dimensionless(&self, what: &str) -> Result<(), UcalError> {
        if !self.is_dimensionless() {
            return Err(UcalError::inconsistent_units(format!(
                "{} must be dimensionless, got [{}]",
                what, self.dimension
            )));
        }
        Ok(())
    }

    // ========== Arithmetic ==========

    /// Add two quantities (dimensions must be identical)
    pub fn add(&self, other: &Quantity) -> Result<Quantity, UcalError> {
        self.require_same_dimension(other, "add")?;
        Ok(Quantity::new(self.value.add(&other.value), self.dimension))
    }

    /// Subtract two quantities (dimensions must be identical)
    pub fn sub(&self, other: &Quantity) -> Result<Quantity, UcalError> {
        self.require_same_dimension(other, "subtract")?;
        Ok(Quantity::new(self.value.sub(&other.value), self.dimension))
    }

    /// Multiply two quantities
    pub fn mul(&self, other: &Quantity) -> Quantity {
        Quantity::new(
            self.value.mul(&other.value),
            self.dimension.multiply(&other.dimension),
        )
    }

    /// Divide two quantities
    pub fn div(&self, other: &Quantity) -> Result<Quantity, UcalError> {
        let value = self.value.checked_div(&other.value)?;
        Ok(Quantity::new(value, self.dimension.divide(&other.dimension)))
    }

    /// Remainder of truncated division; the result is a pure number
    pub fn rem(&self, other: &Quantity) -> Result<Quantity, UcalError> {
        self.require_same_dimension(other, "take the remainder of")?;
        let value = self.value.checked_rem(&other.value)?;
        Ok(Quantity::dimensionless(value))
    }

    /// Negate
    pub fn neg(&self) -> Quantity {
        Quantity::new(self.value.neg(), self.dimension)
    }

    /// Unary plus
    pub fn pos(&self) -> Quantity {
        self.clone()
    }

    /// Raise to a dimensionless power
    pub fn pow(&self, exponent: &Quantity, precision: u32) -> Result<Quantity, UcalError> {
        exponent.require_dimensionless("exponent")?;

        let exp = exponent.value.to_f64().ok_or_else(|| {
            UcalError::overflow("exponent out of range")
        })?;
        let value = self.value.pow_real(&exponent.value, precision)?;
        Ok(Quantity::new(value, self.dimension.power(exp)))
    }

    /// Factorial of a dimensionless non-negative integer
    pub fn factorial(&self, precision: u32) -> Result<Quantity, UcalError> {
        self.require_dimensionless("factorial argument")?;
        if !self.value.is_integer() || self.value.is_negative() {
            return Err(UcalError::invalid_value(format!(
                "factorial requires a non-negative integer, got {}",
                self.value
            )));
        }

        let n = match self.value.to_i64() {
            Some(n) if n <= FACTORIAL_LIMIT => n,
            _ => {
                return Err(UcalError::overflow(format!(
                    "factorial argument exceeds {}",
                    FACTORIAL_LIMIT
                )))
            }
        };

        let mut result = Number::from_i64(1).with_precision(precision);
        for i in 2..=n {
            result = result.mul(&Number::from_i64(i).with_precision(precision));
        }
        Ok(Quantity::dimensionless(result))
    }

    // ========== Functions ==========

    /// Square root; dimension exponents are halved
    pub fn sqrt(&self, precision: u32) -> Result<Quantity, UcalError> {
        let value = self.value.sqrt(precision)?;
        Ok(Quantity::new(value, self.dimension.power(0.5)))
    }

    /// e raised to a dimensionless quantity
    pub fn exp(&self, precision: u32) -> Result<Quantity, UcalError> {
        self.require_dimensionless("exp argument")?;
        Ok(Quantity::dimensionless(self.value.exp(precision)?))
    }

    /// Natural logarithm of a dimensionless quantity
    pub fn ln(&self, precision: u32) -> Result<Quantity, UcalError> {
        self.require_dimensionless("ln argument")?;
        Ok(Quantity::dimensionless(self.value.ln(precision)?))
    }

    /// Base-10 logarithm of a dimensionless quantity
    pub fn log10(&self, precision: u32) -> Result<Quantity, UcalError> {
        self.require_dimensionless("log10 argument")?;
        Ok(Quantity::dimensionless(self.value.log10(precision)?))
    }

    /// Absolute value
    pub fn abs(&self) -> Quantity {
        Quantity::new(self.value.abs(), self.dimension)
    }
}

/// Raw rendering in base units, e.g. `1000 m`
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.dimension)
        }
    }
}
