//! Persistent record shapes: observations, species and cached common names

pub mod common_name;
pub mod observation;
pub mod species;

pub use common_name::TaxonCommonName;
pub use observation::{JsonObservation, LocationCoordinate, PhotoObservation};
pub use species::Species;
