//! Selection state for the cascading state/city picker.
//!
//! The state machine guarantees that the city side of the selection is
//! always consistent with the region side: changing the region clears the
//! city choice and its option list in the same call, so observers can never
//! see city options paired with a region they do not describe.

use std::fmt;

use thiserror::Error;

use crate::directory::{City, Region};
use crate::points::PointsParams;

/// One field of the selection.
///
/// `Unselected` is a distinguished sentinel, not absence: it is rendered as
/// a selectable placeholder row, distinct from any real region or city
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Choice {
    #[default]
    Unselected,
    Value(String),
}

impl Choice {
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Unselected => None,
            Self::Value(v) => Some(v),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unselected => write!(f, "-"),
            Self::Value(v) => write!(f, "{v}"),
        }
    }
}

/// One row of an option list.
///
/// Derived 1:1 from fetched records, preserving server order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Derive the region option list from fetched regions.
#[must_use]
pub fn region_options(regions: &[Region]) -> Vec<SelectOption> {
    regions
        .iter()
        .map(|r| SelectOption::new(&r.code, &r.code))
        .collect()
}

/// Derive the city option list from fetched cities.
#[must_use]
pub fn city_options(cities: &[City]) -> Vec<SelectOption> {
    cities
        .iter()
        .map(|c| SelectOption::new(&c.name, &c.name))
        .collect()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("a state must be selected before a city")]
    RegionRequired,
}

/// The user's current region and city choice plus both option lists.
///
/// Exclusively owned and mutated by the home screen; nothing else writes
/// to it.
#[derive(Debug, Default)]
pub struct SelectionState {
    region: Choice,
    city: Choice,
    region_options: Vec<SelectOption>,
    city_options: Vec<SelectOption>,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the region choice.
    ///
    /// As an atomic consequence, the city choice reverts to
    /// [`Choice::Unselected`] and the city options are cleared. The stale
    /// list must be gone before the dependent fetch is even issued.
    pub fn set_region(&mut self, choice: Choice) {
        self.region = choice;
        self.city = Choice::Unselected;
        self.city_options.clear();
    }

    /// Set the city choice.
    ///
    /// # Errors
    /// Returns [`SelectionError::RegionRequired`] when a city value is set
    /// while no region is selected; the state is left unchanged.
    pub fn set_city(&mut self, choice: Choice) -> Result<(), SelectionError> {
        if choice.is_selected() && !self.region.is_selected() {
            return Err(SelectionError::RegionRequired);
        }
        self.city = choice;
        Ok(())
    }

    /// Replace the region options wholesale.
    pub fn set_region_options(&mut self, options: Vec<SelectOption>) {
        self.region_options = options;
    }

    /// Replace the city options wholesale.
    pub fn set_city_options(&mut self, options: Vec<SelectOption>) {
        self.city_options = options;
    }

    #[must_use]
    pub const fn region(&self) -> &Choice {
        &self.region
    }

    #[must_use]
    pub const fn city(&self) -> &Choice {
        &self.city
    }

    #[must_use]
    pub fn region_options(&self) -> &[SelectOption] {
        &self.region_options
    }

    #[must_use]
    pub fn city_options(&self) -> &[SelectOption] {
        &self.city_options
    }

    /// Whether both sides of the selection hold real values.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.region.is_selected() && self.city.is_selected()
    }

    /// The navigation payload, present only for a complete selection.
    #[must_use]
    pub fn params(&self) -> Option<PointsParams> {
        match (&self.region, &self.city) {
            (Choice::Value(uf), Choice::Value(city)) => Some(PointsParams {
                uf: uf.clone(),
                city: city.clone(),
            }),
            _ => None,
        }
    }
}
