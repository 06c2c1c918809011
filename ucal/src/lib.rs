//! ucal - Unit-aware calculator engine
//!
//! Evaluates expressions such as `5km + 1mi` or `sqrt(2*g*30ft) in fps`,
//! checking dimensions and converting between units along the way.
//!
//! ```no_run
//! let mut engine = ucal::Engine::new()?;
//! assert_eq!(engine.interpret("1 m to mm")?, "1000 mm");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod eval;
mod format;
mod functions;
mod lexer;
mod passes;
mod registry;
mod token;

pub use config::EngineConfig;
pub use eval::{calculate, Evaluator};
pub use format::{Formatter, NaturalUnit, NaturalUnits};
pub use functions::Function;
pub use lexer::tokenize;
pub use passes::{insert_implicit_multiplication, reinterpret_percent, validate};
pub use registry::{Registry, RegistryError, ANSWER};
pub use token::{InfixOp, Item, PostfixOp, PrefixOp, Token, TokenKind};

pub use ucal_core::{codes, ErrorKind, Number, UcalError};
pub use ucal_units::{Dimension, Quantity};

use tracing::debug;
use ucal_units::{NATURAL_UNITS, UNIT_DEFINITIONS};

/// Words that split `<expression> <word> <unit>`, tried in this order
const SEPARATORS: [&str; 3] = [" to ", " as ", " in "];

/// Main ucal engine
///
/// Owns the unit registry, the natural display units and the `Ans` value.
pub struct Engine {
    config: EngineConfig,
    units: Registry,
    natural: NaturalUnits,
}

impl Engine {
    /// Engine with the default configuration
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(EngineConfig::default())
    }

    /// Build the unit registry and natural units for `config`
    pub fn with_config(config: EngineConfig) -> Result<Self, RegistryError> {
        let units = Registry::build(UNIT_DEFINITIONS, &config)?;
        let natural = NaturalUnits::build(NATURAL_UNITS, &units, &config)?;
        Ok(Self { config, units, natural })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.units
    }

    /// Evaluate `text` to a quantity without touching `Ans`
    pub fn calculate(&self, text: &str) -> Result<Quantity, UcalError> {
        calculate(text, &self.units, &self.config)
    }

    /// Evaluate `text` and render it in its natural unit
    pub fn evaluate(&mut self, text: &str) -> Result<String, UcalError> {
        debug!(input = text, "evaluate");
        let quantity = self.calculate(text)?;
        let result = self.format(&quantity, None);
        self.units.set_answer(quantity);
        Ok(result)
    }

    /// Evaluate `text` and render it in `unit`
    ///
    /// `unit` may be a unit name, a unit expression, or `hex`/`bin`/`binary`.
    /// A dimension mismatch is an error.
    pub fn evaluate_in(&mut self, text: &str, unit: &str) -> Result<String, UcalError> {
        debug!(input = text, unit, "evaluate in unit");
        self.convert(text, unit.trim())
    }

    /// Evaluate input that may name its output unit
    ///
    /// Recognizes `<expr> to <unit>`, `<expr> as <unit>` and
    /// `<expr> in <unit>`, splitting at the last occurrence of the word.
    /// Because `in` is also the inch, a failed `in` conversion falls back to
    /// evaluating the whole input.
    pub fn interpret(&mut self, text: &str) -> Result<String, UcalError> {
        for separator in SEPARATORS {
            if let Some((expression, target)) = text.rsplit_once(separator) {
                match self.convert(expression, target.trim()) {
                    Ok(result) => return Ok(result),
                    Err(err) if separator == " in " => {
                        debug!(error = %err, "not a conversion, evaluating whole input");
                    }
                    Err(err) => return Err(err),
                }
            }
        }
        self.evaluate(text)
    }

    fn convert(&mut self, expression: &str, target: &str) -> Result<String, UcalError> {
        let quantity = self.calculate(expression)?;

        let radix = match target.to_ascii_lowercase().as_str() {
            "hex" => Some((16, "hex")),
            "bin" | "binary" => Some((2, "binary")),
            _ => None,
        };
        if let Some((radix, name)) = radix {
            let digits = if quantity.is_integer() {
                quantity.value.to_radix_string(radix)
            } else {
                None
            };
            self.units.set_answer(quantity);
            let text = digits.unwrap_or_else(|| format!("only integers can be written as {}", name));
            return Ok(text);
        }

        let unit = self.calculate(target)?;
        if !quantity.matches_dimension(&unit) {
            return Err(UcalError::inconsistent_units(format!(
                "cannot express [{}] in {}",
                quantity.dimension, target
            ))
            .with_fragment(target));
        }
        let result = self.format(&quantity, Some(target));
        self.units.set_answer(quantity);
        Ok(result)
    }

    /// Render a quantity, preferring `requested` when its dimensions match
    pub fn format(&self, quantity: &Quantity, requested: Option<&str>) -> String {
        Formatter::new(&self.units, &self.natural, &self.config).format(quantity, requested)
    }

    /// What the quantity measures (`length`, `power`, ...), if known
    pub fn measure(&self, quantity: &Quantity) -> Option<&str> {
        self.natural.measure(&quantity.dimension)
    }

    /// The last successful result
    pub fn answer(&self) -> Option<&Quantity> {
        self.units.answer()
    }
}
