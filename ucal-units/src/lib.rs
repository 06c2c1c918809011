//! ucal Units - Dimension vectors and physical quantities
//!
//! Provides the unit-aware numeric type used by the engine:
//! - `Dimension`: exponents over the 8 base dimensions
//!   (kg, m, s, A, K, mol, cd, byte)
//! - `Quantity`: a value in base units with its dimension, and the
//!   dimension-checked arithmetic between quantities
//! - The textual unit definition table and the natural display units

pub mod dimension;
mod quantity;
mod units;

pub use dimension::{Dimension, BASE_UNITS, DIMENSION_COUNT};
pub use quantity::{Quantity, FACTORIAL_LIMIT};
pub use units::{UnitDefinition, UNIT_DEFINITIONS, NATURAL_UNITS};
