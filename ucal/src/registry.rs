//! Unit registry
//!
//! Maps unit and constant names to quantities in base units. Built once at
//! engine construction by resolving the textual definitions against the
//! base units, then read-only apart from the `Ans` entry.

use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};
use ucal_core::UcalError;
use ucal_units::{Quantity, UnitDefinition, BASE_UNITS};
use crate::config::EngineConfig;
use crate::eval::calculate;
use crate::lexer::tokenize;
use crate::passes::insert_implicit_multiplication;
use crate::token::TokenKind;

/// Name under which the last result is stored
pub const ANSWER: &str = "Ans";

/// Failure to build the registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("could not resolve unit definitions: {}", .0.join(", "))]
    Unresolved(Vec<String>),

    #[error("unit \"{name}\" does not reproduce its own dimensions")]
    Inconsistent { name: String },

    #[error("invalid definition for unit \"{name}\": {source}")]
    Definition {
        name: String,
        #[source]
        source: UcalError,
    },
}

/// Name to quantity map
#[derive(Debug, Clone, Default)]
pub struct Registry {
    units: HashMap<String, Quantity>,
}

impl Registry {
    /// Registry with no entries
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding only the base units
    pub fn with_base_units() -> Self {
        let mut registry = Self::empty();
        for (index, name) in BASE_UNITS.iter().enumerate() {
            registry.insert(name, Quantity::base_unit(index));
        }
        registry
    }

    /// Resolve `definitions` on top of the base units
    ///
    /// Each pass defines every entry whose referenced names are all known.
    /// A pass that defines nothing leaves the rest unresolvable.
    pub fn build(
        definitions: &[UnitDefinition],
        config: &EngineConfig,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::with_base_units();
        let mut pending: Vec<UnitDefinition> = definitions.to_vec();
        let mut pass = 0;

        while !pending.is_empty() {
            pass += 1;
            let before = pending.len();
            let mut deferred = Vec::new();

            for (name, expression) in pending {
                if !registry.can_resolve(expression) {
                    deferred.push((name, expression));
                    continue;
                }
                let quantity = calculate(expression, &registry, config).map_err(|source| {
                    RegistryError::Definition { name: name.to_string(), source }
                })?;
                registry.insert(name, quantity);
            }

            debug!(
                pass,
                resolved = before - deferred.len(),
                remaining = deferred.len(),
                "unit resolution pass"
            );
            if deferred.len() == before {
                let mut names: Vec<String> =
                    deferred.iter().map(|(name, _)| name.to_string()).collect();
                names.sort();
                return Err(RegistryError::Unresolved(names));
            }
            pending = deferred;
        }

        if config.verify_units {
            registry.verify(config)?;
        }

        info!(units = registry.len(), passes = pass, "unit registry ready");
        Ok(registry)
    }

    /// True if every name referenced by `expression` is registered
    fn can_resolve(&self, expression: &str) -> bool {
        let mut tokens = match tokenize(expression) {
            Ok(tokens) => tokens,
            // let the evaluation report it
            Err(_) => return true,
        };
        insert_implicit_multiplication(&mut tokens);
        tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Variable)
            .all(|t| self.contains(&t.text))
    }

    /// Every name, evaluated as an expression, must give back its own dimensions
    fn verify(&self, config: &EngineConfig) -> Result<(), RegistryError> {
        for (name, quantity) in &self.units {
            let check = calculate(name, self, config).map_err(|source| RegistryError::Definition {
                name: name.clone(),
                source,
            })?;
            if check.dimension != quantity.dimension {
                return Err(RegistryError::Inconsistent { name: name.clone() });
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Quantity> {
        self.units.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    pub fn insert(&mut self, name: &str, quantity: Quantity) {
        self.units.insert(name.to_string(), quantity);
    }

    /// Replace the stored last result
    pub fn set_answer(&mut self, quantity: Quantity) {
        self.insert(ANSWER, quantity);
    }

    pub fn answer(&self) -> Option<&Quantity> {
        self.get(ANSWER)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// All registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.units.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
