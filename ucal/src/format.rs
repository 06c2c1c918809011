//! Result rendering and display-unit selection
//!
//! A result is shown, in order of preference, in the unit the caller asked
//! for, in the natural unit of its dimension, or in raw base units.

use std::collections::HashMap;
use tracing::debug;
use ucal_units::{Dimension, Quantity, DIMENSION_COUNT};
use crate::config::EngineConfig;
use crate::eval::calculate;
use crate::registry::{Registry, RegistryError};

/// Preferred display unit for one dimension
#[derive(Debug, Clone)]
pub struct NaturalUnit {
    /// Unit expression, e.g. `m/s`
    pub name: String,
    /// What the dimension measures, e.g. `velocity`
    pub measure: String,
    /// The unit expression evaluated
    pub reference: Quantity,
}

/// Natural units keyed by rounded dimension
#[derive(Debug, Clone, Default)]
pub struct NaturalUnits {
    by_dimension: HashMap<[i64; DIMENSION_COUNT], NaturalUnit>,
}

impl NaturalUnits {
    /// Evaluate each `(expression, measure)` pair against the registry
    pub fn build(
        table: &[(&str, &str)],
        units: &Registry,
        config: &EngineConfig,
    ) -> Result<Self, RegistryError> {
        let mut by_dimension = HashMap::new();
        for (name, measure) in table {
            let reference = calculate(name, units, config).map_err(|source| {
                RegistryError::Definition { name: name.to_string(), source }
            })?;
            by_dimension.insert(
                reference.dimension.key(),
                NaturalUnit {
                    name: name.to_string(),
                    measure: measure.to_string(),
                    reference,
                },
            );
        }
        Ok(Self { by_dimension })
    }

    pub fn get(&self, dimension: &Dimension) -> Option<&NaturalUnit> {
        self.by_dimension.get(&dimension.key())
    }

    /// What a dimension measures (`length`, `power`, ...)
    pub fn measure(&self, dimension: &Dimension) -> Option<&str> {
        self.get(dimension).map(|unit| unit.measure.as_str())
    }

    pub fn len(&self) -> usize {
        self.by_dimension.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_dimension.is_empty()
    }
}

/// Renders quantities as `<number> <unit>` strings
pub struct Formatter<'a> {
    units: &'a Registry,
    natural: &'a NaturalUnits,
    config: &'a EngineConfig,
}

impl<'a> Formatter<'a> {
    pub fn new(units: &'a Registry, natural: &'a NaturalUnits, config: &'a EngineConfig) -> Self {
        Self { units, natural, config }
    }

    /// Render `quantity`, preferring `requested` when its dimensions match
    pub fn format(&self, quantity: &Quantity, requested: Option<&str>) -> String {
        let suffix = self.measure_suffix(quantity);

        if let Some(target) = requested {
            if let Some(unit) = self.units.get(target) {
                if unit.matches_dimension(quantity) {
                    debug!(target, "rendering in registered unit");
                    if let Some(text) = self.scaled(quantity, unit, target) {
                        return format!("{}{}", text, suffix);
                    }
                }
            } else if let Ok(unit) = calculate(target, self.units, self.config) {
                if unit.matches_dimension(quantity) {
                    debug!(target, "rendering in derived unit");
                    if let Some(text) = self.scaled(quantity, &unit, target) {
                        return format!("{}{}", text, suffix);
                    }
                }
            }
        }

        if let Some(natural) = self.natural.get(&quantity.dimension) {
            debug!(unit = %natural.name, "rendering in natural unit");
            if let Some(text) = self.scaled(quantity, &natural.reference, &natural.name) {
                return format!("{}{}", text, suffix);
            }
        }

        debug!("rendering in base units");
        format!("{}{}", self.base_units(quantity), suffix)
    }

    /// `quantity / unit` followed by `label`; None for a zero-valued unit
    fn scaled(&self, quantity: &Quantity, unit: &Quantity, label: &str) -> Option<String> {
        let value = quantity.value.checked_div(&unit.value).ok()?;
        Some(format!("{} {}", value.to_display(self.config.output_precision), label))
    }

    /// Value and the base units with their exponents
    pub fn base_units(&self, quantity: &Quantity) -> String {
        let number = quantity.value.to_display(self.config.output_precision);
        let units = quantity.dimension.to_string();
        if units.is_empty() {
            number
        } else {
            format!("{} {}", number, units)
        }
    }

    fn measure_suffix(&self, quantity: &Quantity) -> String {
        if !self.config.include_measure {
            return String::new();
        }
        match self.natural.measure(&quantity.dimension) {
            Some(measure) => format!(" [{}]", measure),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucal_core::Number;
    use ucal_units::dimension::{LENGTH, TIME};
    use ucal_units::{NATURAL_UNITS, UNIT_DEFINITIONS};

    struct Fixture {
        units: Registry,
        natural: NaturalUnits,
        config: EngineConfig,
    }

    impl Fixture {
        fn new(config: EngineConfig) -> Self {
            let units = Registry::build(UNIT_DEFINITIONS, &config).unwrap();
            let natural = NaturalUnits::build(NATURAL_UNITS, &units, &config).unwrap();
            Self { units, natural, config }
        }

        fn format(&self, text: &str, requested: Option<&str>) -> String {
            let q = calculate(text, &self.units, &self.config).unwrap();
            Formatter::new(&self.units, &self.natural, &self.config).format(&q, requested)
        }
    }

    #[test]
    fn test_natural_table_complete() {
        let fixture = Fixture::new(EngineConfig::default());
        assert_eq!(fixture.natural.len(), NATURAL_UNITS.len());
        assert_eq!(
            fixture.natural.measure(&Dimension::base(LENGTH).divide(&Dimension::base(TIME))),
            Some("velocity")
        );
    }

    #[test]
    fn test_natural_units() {
        let fixture = Fixture::new(EngineConfig::default());
        assert_eq!(fixture.format("1/s", None), "1 Hz");
        assert_eq!(fixture.format("1A*Ohm", None), "1 V");
        assert_eq!(fixture.format("m^2", None), "1 m^2");
        assert_eq!(fixture.format("1 km", None), "1000 m");
    }

    #[test]
    fn test_base_unit_fallback() {
        let fixture = Fixture::new(EngineConfig::default());
        assert_eq!(fixture.format("1/m", None), "1 m^-1");
        assert_eq!(fixture.format("m^1.5", None), "1 m^1.5");
        assert_eq!(fixture.format("1 in kg", None), "0.0254 kg m");
        assert_eq!(fixture.format("42", None), "42");
    }

    #[test]
    fn test_requested_unit() {
        let fixture = Fixture::new(EngineConfig::default());
        assert_eq!(fixture.format("1 m", Some("mm")), "1000 mm");
        assert_eq!(fixture.format("1in^2", Some("mm^2")), "645.16 mm^2");
        // mismatched request falls through to the natural unit
        assert_eq!(fixture.format("1 m", Some("kg")), "1 m");
    }

    #[test]
    fn test_include_measure() {
        let fixture = Fixture::new(EngineConfig::default().with_measure(true));
        assert_eq!(fixture.format("3 m", None), "3 m [length]");
        assert_eq!(fixture.format("5V * 500mA", None), "2.5 W [power]");
        assert_eq!(fixture.format("1/m", None), "1 m^-1");
    }

    #[test]
    fn test_output_precision() {
        let fixture = Fixture::new(EngineConfig::default().with_output_precision(4));
        let q = Quantity::dimensionless(Number::from_literal("3.14159", 32).unwrap());
        let formatter = Formatter::new(&fixture.units, &fixture.natural, &fixture.config);
        assert_eq!(formatter.format(&q, None), "3.142");
    }
}
