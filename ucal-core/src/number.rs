//! Arbitrary precision numbers using dashu
//!
//! Uses dashu-float (DBig) for decimal arithmetic at a configurable
//! working precision. Literal parsing (decimal, hex, binary), the
//! transcendental functions needed by the calculator and the output
//! rendering rules all live here.

use dashu_float::DBig;
use dashu_float::ops::{SquareRoot, Abs};
use dashu_int::IBig;
use serde::{Deserialize, Serialize, Serializer, Deserializer};
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Domain error: {0}")]
    DomainError(String),

    #[error("Overflow: result too large")]
    Overflow,
}

/// Default working precision for calculations (decimal digits)
pub const DEFAULT_PRECISION: u32 = 32;

/// Default number of significant digits kept when rendering a result
pub const OUTPUT_PRECISION: u32 = 16;

/// Largest decimal exponent a computed power may reach
pub const MAX_DECIMAL_EXPONENT: f64 = 1e15;

/// Widest scale gap between the operands of a remainder
const MAX_REM_SCALE: usize = 100_000;

/// Arbitrary precision decimal number
///
/// Built on dashu-float's DBig. All fallible operations return Results,
/// never panic.
#[derive(Debug, Clone)]
pub struct Number {
    inner: DBig,
}

impl Number {
    // ========== Construction ==========

    fn with_work_precision(val: DBig, precision: u32) -> DBig {
        val.with_precision(precision as usize).value()
    }

    fn from_parts(significand: IBig, exponent: isize, precision: u32) -> Self {
        Self { inner: Self::with_work_precision(DBig::from_parts(significand, exponent), precision) }
    }

    /// Parse a numeric literal as produced by the tokenizer
    ///
    /// Supports: "123", "-3.14", ".5", "1.", "1.5e10", "+1e+9", "0x1F", "0b101"
    pub fn from_literal(s: &str, precision: u32) -> Result<Self, NumberError> {
        let original = s.trim();
        let lower = original.to_ascii_lowercase();
        let (negative, body) = match lower.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, lower.strip_prefix('+').unwrap_or(lower.as_str())),
        };

        let radix = if let Some(hex) = body.strip_prefix("0x") {
            Some((hex, 16))
        } else if let Some(bin) = body.strip_prefix("0b") {
            Some((bin, 2))
        } else {
            None
        };

        if let Some((digits, radix)) = radix {
            if digits.is_empty() {
                return Err(NumberError::ParseError(original.to_string()));
            }
            let mut n = IBig::from_str_radix(digits, radix)
                .map_err(|_| NumberError::ParseError(original.to_string()))?;
            if negative {
                n = -n;
            }
            return Ok(Self::from_parts(n, 0, precision));
        }

        let (mantissa, exponent) = match body.find('e') {
            Some(pos) => {
                let exp: isize = body[pos + 1..].parse()
                    .map_err(|_| NumberError::ParseError(original.to_string()))?;
                (&body[..pos], exp)
            }
            None => (body, 0),
        };

        let (int_part, frac_part) = match mantissa.find('.') {
            Some(pos) => (&mantissa[..pos], &mantissa[pos + 1..]),
            None => (mantissa, ""),
        };

        let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part) {
            return Err(NumberError::ParseError(original.to_string()));
        }

        let digits = format!("{}{}", int_part, frac_part);
        let mut significand: IBig = digits.parse()
            .map_err(|_| NumberError::ParseError(original.to_string()))?;
        if negative {
            significand = -significand;
        }

        Ok(Self::from_parts(significand, exponent - frac_part.len() as isize, precision))
    }

    /// Create from i64 with default working precision
    pub fn from_i64(n: i64) -> Self {
        Self { inner: Self::with_work_precision(DBig::from(n), DEFAULT_PRECISION) }
    }

    /// Re-round to the given number of significant digits
    pub fn with_precision(&self, precision: u32) -> Self {
        Self { inner: Self::with_work_precision(self.inner.clone(), precision) }
    }

    // ========== Predicates ==========

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.inner == DBig::ZERO
    }

    /// Check if negative
    pub fn is_negative(&self) -> bool {
        self.inner < DBig::ZERO
    }

    /// Check if value is an integer
    pub fn is_integer(&self) -> bool {
        let floor_val = self.inner.clone().floor();
        self.inner == floor_val
    }

    // ========== Basic Arithmetic ==========

    pub fn add(&self, other: &Self) -> Self {
        Self { inner: &self.inner + &other.inner }
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self { inner: &self.inner - &other.inner }
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self { inner: &self.inner * &other.inner }
    }

    pub fn neg(&self) -> Self {
        Self { inner: -&self.inner }
    }

    /// Safe division (returns Result, never panics)
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            Err(NumberError::DivisionByZero)
        } else {
            Ok(Self { inner: &self.inner / &other.inner })
        }
    }

    /// Remainder of truncated division; the result takes the sign of `self`
    ///
    /// Computed exactly on integer significands brought to a common scale.
    pub fn checked_rem(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            return Err(NumberError::DivisionByZero);
        }

        let precision = self.inner.precision().max(other.inner.precision());
        let (a, a_exp) = self.inner.clone().into_repr().into_parts();
        let (b, b_exp) = other.inner.clone().into_repr().into_parts();
        let exponent = a_exp.min(b_exp);
        let (a_shift, b_shift) = ((a_exp - exponent) as usize, (b_exp - exponent) as usize);
        if a_shift.max(b_shift) > MAX_REM_SCALE {
            return Err(NumberError::DomainError(
                "remainder operands differ too much in scale".to_string()
            ));
        }

        let ten = IBig::from(10u8);
        let a = a * ten.pow(a_shift);
        let b = b * ten.pow(b_shift);
        let remainder = DBig::from_parts(a % b, exponent);
        Ok(Self { inner: remainder.with_precision(precision).value() })
    }

    /// Integer power by repeated squaring
    pub fn pow(&self, exp: i64) -> Result<Self, NumberError> {
        if exp == 0 {
            return Ok(Self::from_i64(1));
        }
        if !self.is_zero() {
            if let Some(zero) = Self::check_scale(self.log10_estimate() * exp as f64)? {
                return Ok(zero);
            }
        }

        let mut remaining = exp.unsigned_abs();
        let mut base = self.clone();
        let mut result = Self::from_i64(1);
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.mul(&base);
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.mul(&base);
            }
        }

        if exp < 0 {
            Self::from_i64(1).checked_div(&result)
        } else {
            Ok(result)
        }
    }

    /// Real-valued power: x^y = exp(y * ln(x)), exact for integer exponents
    pub fn pow_real(&self, exp: &Self, precision: u32) -> Result<Self, NumberError> {
        if exp.is_zero() {
            return Ok(Self::from_i64(1));
        }

        if exp.is_integer() {
            if let Some(e) = exp.to_i64() {
                return self.pow(e);
            }
            return self.pow_huge(exp);
        }

        if self.is_zero() {
            if exp.is_negative() {
                return Err(NumberError::DivisionByZero);
            }
            return Ok(Self::from_i64(0));
        }
        if self.is_negative() {
            return Err(NumberError::DomainError(
                "negative base with non-integer exponent".to_string()
            ));
        }

        let ln_x = self.ln(precision)?;
        ln_x.mul(exp).exp(precision)
    }

    /// Integer exponent beyond i64: only |x| = 1 and x = 0 stay finite and nonzero
    fn pow_huge(&self, exp: &Self) -> Result<Self, NumberError> {
        if self.is_zero() {
            if exp.is_negative() {
                return Err(NumberError::DivisionByZero);
            }
            return Ok(Self::from_i64(0));
        }
        if self.abs() == Self::from_i64(1) {
            // a positive stored exponent means a multiple of ten
            let (_, scale) = exp.inner.clone().into_repr().into_parts();
            let odd = scale <= 0
                && exp.to_ibig().map_or(false, |e| e % IBig::from(2u8) != IBig::ZERO);
            return Ok(if self.is_negative() && odd { self.clone() } else { self.abs() });
        }

        let shrinks = (self.log10_estimate() < 0.0) != exp.is_negative();
        let scale = if shrinks { f64::NEG_INFINITY } else { f64::INFINITY };
        match Self::check_scale(scale)? {
            Some(zero) => Ok(zero),
            None => Err(NumberError::Overflow),
        }
    }

    /// Approximate log10 of the magnitude; the value must be nonzero
    fn log10_estimate(&self) -> f64 {
        let (_, digits, exponent) = self.decimal_parts();
        let lead = &digits[..digits.len().min(17)];
        let mantissa: f64 = lead.parse().unwrap_or(1.0);
        mantissa.log10() + (exponent + (digits.len() - lead.len()) as isize) as f64
    }

    /// Overflow past the largest decimal exponent; Some(0) when the result underflows
    fn check_scale(log10: f64) -> Result<Option<Self>, NumberError> {
        if log10 > MAX_DECIMAL_EXPONENT {
            Err(NumberError::Overflow)
        } else if log10 < -MAX_DECIMAL_EXPONENT {
            Ok(Some(Self::from_i64(0)))
        } else {
            Ok(None)
        }
    }

    // ========== Transcendental Functions ==========

    /// Square root
    pub fn sqrt(&self, precision: u32) -> Result<Self, NumberError> {
        if self.is_negative() {
            return Err(NumberError::DomainError(
                "square root of negative number".to_string()
            ));
        }
        if self.is_zero() {
            return Ok(Self::from_i64(0));
        }

        let val = self.inner.clone().with_precision(precision as usize).value();
        Ok(Self { inner: val.sqrt() })
    }

    /// Natural logarithm
    pub fn ln(&self, precision: u32) -> Result<Self, NumberError> {
        if self.inner <= DBig::ZERO {
            return Err(NumberError::DomainError(
                "logarithm of non-positive number".to_string()
            ));
        }

        let val = self.inner.clone().with_precision(precision as usize).value();
        Ok(Self { inner: val.ln() })
    }

    /// Base-10 logarithm, exact for powers of ten
    pub fn log10(&self, precision: u32) -> Result<Self, NumberError> {
        if self.inner <= DBig::ZERO {
            return Err(NumberError::DomainError(
                "logarithm of non-positive number".to_string()
            ));
        }

        let (_, digits, exponent) = self.decimal_parts();
        if digits == "1" {
            return Ok(Self::from_i64(exponent as i64));
        }

        let ln_10 = Self::from_i64(10).ln(precision)?;
        self.ln(precision)?.checked_div(&ln_10)
    }

    /// Exponential function (e^x)
    pub fn exp(&self, precision: u32) -> Result<Self, NumberError> {
        let scale = match self.to_f64() {
            Some(x) => x / std::f64::consts::LN_10,
            None if self.is_negative() => f64::NEG_INFINITY,
            None => f64::INFINITY,
        };
        if let Some(zero) = Self::check_scale(scale)? {
            return Ok(zero);
        }

        let val = self.inner.clone().with_precision(precision as usize).value();
        Ok(Self { inner: val.exp() })
    }

    /// Absolute value
    pub fn abs(&self) -> Self {
        Self { inner: Abs::abs(self.inner.clone()) }
    }

    // ========== Conversion ==========

    /// Exact integer value, if this number is integral
    pub fn to_ibig(&self) -> Option<IBig> {
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();
        let ten = IBig::from(10u8);
        if exponent >= 0 {
            Some(significand * ten.pow(exponent as usize))
        } else {
            let divisor = ten.pow(exponent.unsigned_abs());
            if &significand % &divisor == IBig::ZERO {
                Some(significand / divisor)
            } else {
                None
            }
        }
    }

    /// Try to convert to i64
    pub fn to_i64(&self) -> Option<i64> {
        self.to_ibig()?.try_into().ok()
    }

    /// Convert to f64 (may lose precision)
    pub fn to_f64(&self) -> Option<f64> {
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();
        format!("{}e{}", significand, exponent)
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
    }

    // ========== Display ==========

    /// Sign, significant digits without trailing zeros, and the power of ten
    /// that scales the digit string to the value.
    fn decimal_parts(&self) -> (bool, String, isize) {
        let (significand, mut exponent) = self.inner.clone().into_repr().into_parts();
        let negative = significand < IBig::ZERO;
        let mut digits = significand.to_string();
        if negative {
            digits.remove(0);
        }
        while digits.len() > 1 && digits.ends_with('0') {
            digits.pop();
            exponent += 1;
        }
        (negative, digits, exponent)
    }

    /// Render with at most `significant` digits.
    ///
    /// Plain notation is used while the decimal exponent lies in
    /// `-6..significant`; outside that range the mantissa is printed as
    /// `d.ddd` followed by `e<exp>` (`1e555`, `-2.5e-9`). Trailing zeros and
    /// a dangling decimal point are trimmed.
    pub fn to_display(&self, significant: u32) -> String {
        let rounded = self.with_precision(significant.max(1));
        if rounded.is_zero() {
            return "0".to_string();
        }

        let (negative, digits, exponent) = rounded.decimal_parts();
        let adjusted = digits.len() as isize - 1 + exponent;
        let sign = if negative { "-" } else { "" };

        if adjusted >= significant as isize || adjusted < -6 {
            let mantissa = if digits.len() > 1 {
                format!("{}.{}", &digits[..1], &digits[1..])
            } else {
                digits
            };
            return format!("{}{}e{}", sign, mantissa, adjusted);
        }

        let body = if exponent >= 0 {
            format!("{}{}", digits, "0".repeat(exponent as usize))
        } else {
            let point = digits.len() as isize + exponent;
            if point > 0 {
                format!("{}.{}", &digits[..point as usize], &digits[point as usize..])
            } else {
                format!("0.{}{}", "0".repeat(point.unsigned_abs()), digits)
            }
        };
        format!("{}{}", sign, body)
    }

    /// Render an integral value in base 16 (`0x2A`) or base 2 (`0b101010`)
    pub fn to_radix_string(&self, radix: u32) -> Option<String> {
        let n = self.to_ibig()?;
        let prefix = match radix {
            16 => "0x",
            2 => "0b",
            _ => return None,
        };
        let negative = n < IBig::ZERO;
        let magnitude = if negative { -n } else { n };
        let digits = magnitude.in_radix(radix).to_string().to_uppercase();
        Some(format!("{}{}{}", if negative { "-" } else { "" }, prefix, digits))
    }
}

// ========== Trait Implementations ==========

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_display(DEFAULT_PRECISION))
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_literal(&s, DEFAULT_PRECISION).map_err(serde::de::Error::custom)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // DBig implements PartialOrd, use it and treat None as Equal
        self.inner.partial_cmp(&other.inner).unwrap_or(std::cmp::Ordering::Equal)
    }
}
