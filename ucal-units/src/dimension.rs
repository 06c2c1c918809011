//! Dimensional analysis types
//!
//! Each physical quantity has dimensions represented as an 8-element vector
//! of exponents, one per base unit:
//! [mass, length, time, current, temperature, amount, luminosity, data]
//!
//! Exponents are floating point so that `sqrt` and fractional powers can
//! produce half-integer dimensions (`m^1.5`).

use std::fmt;
use serde::{Serialize, Deserialize};

/// Number of base dimensions
pub const DIMENSION_COUNT: usize = 8;

/// Dimension indices, in base-unit order
pub const MASS: usize = 0;
pub const LENGTH: usize = 1;
pub const TIME: usize = 2;
pub const CURRENT: usize = 3;
pub const TEMPERATURE: usize = 4;
pub const AMOUNT: usize = 5;
pub const LUMINOSITY: usize = 6;
pub const DATA: usize = 7;

/// Symbols of the base units, indexed like the exponent vector
pub const BASE_UNITS: [&str; DIMENSION_COUNT] = ["kg", "m", "s", "A", "K", "mol", "cd", "byte"];

/// Exponents are compared and printed on a 1e-5 grid
const ROUNDING_SCALE: f64 = 1.0e5;

/// Represents the dimensions of a physical quantity
/// as exponents of the 8 base dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    /// [mass, length, time, current, temperature, amount, luminosity, data]
    pub exponents: [f64; DIMENSION_COUNT],
}

impl Dimension {
    /// Dimensionless quantity (all exponents zero)
    pub const DIMENSIONLESS: Dimension = Dimension { exponents: [0.0; DIMENSION_COUNT] };

    /// Unit vector for one base dimension (exponent 1 on `index`)
    pub fn base(index: usize) -> Self {
        let mut exponents = [0.0; DIMENSION_COUNT];
        exponents[index] = 1.0;
        Dimension { exponents }
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0.0)
    }

    /// Multiply dimensions (add exponents)
    pub fn multiply(&self, other: &Dimension) -> Dimension {
        let mut result = [0.0; DIMENSION_COUNT];
        for i in 0..DIMENSION_COUNT {
            result[i] = self.exponents[i] + other.exponents[i];
        }
        Dimension { exponents: result }
    }

    /// Divide dimensions (subtract exponents)
    pub fn divide(&self, other: &Dimension) -> Dimension {
        let mut result = [0.0; DIMENSION_COUNT];
        for i in 0..DIMENSION_COUNT {
            result[i] = self.exponents[i] - other.exponents[i];
        }
        Dimension { exponents: result }
    }

    /// Raise to a (possibly fractional) power (scale exponents)
    pub fn power(&self, exp: f64) -> Dimension {
        let mut result = [0.0; DIMENSION_COUNT];
        for i in 0..DIMENSION_COUNT {
            result[i] = self.exponents[i] * exp;
        }
        Dimension { exponents: result }
    }

    /// Exponents snapped to the nearest 1e-5
    pub fn rounded(&self) -> Dimension {
        let mut result = [0.0; DIMENSION_COUNT];
        for i in 0..DIMENSION_COUNT {
            result[i] = (self.exponents[i] * ROUNDING_SCALE + 0.5).floor() / ROUNDING_SCALE;
        }
        Dimension { exponents: result }
    }

    /// Hashable key of the rounded exponents, in units of 1e-5
    pub fn key(&self) -> [i64; DIMENSION_COUNT] {
        let mut key = [0i64; DIMENSION_COUNT];
        for i in 0..DIMENSION_COUNT {
            key[i] = (self.exponents[i] * ROUNDING_SCALE + 0.5).floor() as i64;
        }
        key
    }

    /// True if both dimensions agree once rounded to 1e-5
    pub fn matches(&self, other: &Dimension) -> bool {
        self.key() == other.key()
    }
}

/// Render an exponent the way it is written in input: `2`, `-1`, `1.5`
fn format_exponent(exp: f64) -> String {
    if exp == exp.trunc() {
        format!("{}", exp as i64)
    } else {
        format!("{}", exp)
    }
}

/// Base units with their exponents, e.g. `kg m^2 s^-2`
impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        for (exp, name) in self.rounded().exponents.iter().zip(BASE_UNITS.iter()) {
            if *exp == 0.0 {
                continue;
            }
            if *exp == 1.0 {
                parts.push(name.to_string());
            } else {
                parts.push(format!("{}^{}", name, format_exponent(*exp)));
            }
        }

        write!(f, "{}", parts.join(" "))
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}
