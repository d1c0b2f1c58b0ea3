//! Messages local to the home screen.
//!
//! Fetch results carry the generation of the request that produced them;
//! the screen discards any result whose generation is no longer current.

use crate::directory::{City, Region};
use crate::home::selection::Choice;

#[derive(Debug)]
pub enum HomeMsg {
    /// Fetch the region list (screen activation, or manual reload)
    Initialize,

    /// Region fetch results
    RegionsLoaded(Vec<Region>),
    RegionsFailed(String),

    /// The user picked a region row (or the placeholder)
    PickRegion(Choice),

    /// City fetch results, tagged with the generation that requested them
    CitiesLoaded {
        generation: u64,
        cities: Vec<City>,
    },
    CitiesFailed {
        generation: u64,
        error: String,
    },

    /// The user picked a city row (or the placeholder)
    PickCity(Choice),

    /// Copy "City, UF" to the clipboard
    CopySelection,

    /// Confirm the selection and open the points screen
    Confirm,
}
