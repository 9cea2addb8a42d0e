//! Synthetic bookmaker market
//!
//! Generates odds with a fixed margin and injects a single value bet per round

mod odds;
mod types;
mod value_bet;

pub use odds::{variant_label, OddsGenerator, BOOKMAKER_MARGIN, MIN_ODDS};
pub use types::MarketError;
pub use value_bet::{implied_probabilities, InjectedValueBet, ValueBetInjector, MAX_PROBABILITY};

use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Ordered mapping from option name to a decimal value
///
/// Insertion order is the iteration order. Names are unique: inserting an
/// existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionMap {
    entries: Vec<(String, Decimal)>,
    /// Position of each name in `entries`
    index: HashMap<String, usize>,
}

/// Decimal odds per option for one round
pub type OddsBook = OptionMap;

/// Win probability per option for one round
pub type Probabilities = OptionMap;

impl OptionMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value for an option
    pub fn insert(&mut self, option: impl Into<String>, value: Decimal) {
        let option = option.into();
        match self.index.get(&option) {
            Some(&position) => self.entries[position].1 = value,
            None => {
                self.index.insert(option.clone(), self.entries.len());
                self.entries.push((option, value));
            }
        }
    }

    /// Value for an option
    pub fn get(&self, option: &str) -> Option<Decimal> {
        self.index
            .get(option)
            .and_then(|&position| self.entries.get(position))
            .map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> + '_ {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
    }

    /// Option names in insertion order
    pub fn options(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Values in insertion order
    pub fn values(&self) -> Vec<Decimal> {
        self.entries.iter().map(|(_, value)| *value).collect()
    }

    /// Name of the option at a position
    pub fn option_at(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|(name, _)| name.as_str())
    }

    /// Sum of implied probabilities (1/odds), i.e. one plus the bookmaker margin
    pub fn overround(&self) -> Decimal {
        self.entries
            .iter()
            .filter(|(_, odds)| *odds > Decimal::ZERO)
            .map(|(_, odds)| Decimal::ONE / *odds)
            .sum()
    }
}

impl<S: Into<String>> FromIterator<(S, Decimal)> for OptionMap {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        let mut map = OptionMap::new();
        for (option, value) in iter {
            map.insert(option, value);
        }
        map
    }
}

impl Serialize for OptionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
