//! ucal Core - Fundamental types
//!
//! This crate provides the core types used throughout ucal:
//! - `Number`: Arbitrary precision decimal numbers
//! - `UcalError`: Structured parser/quantity errors

mod number;
mod error;

pub use number::{Number, NumberError, DEFAULT_PRECISION, OUTPUT_PRECISION};
pub use error::{UcalError, ErrorKind, codes};
