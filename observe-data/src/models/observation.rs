use super::species::Species;
use chrono::{DateTime, Utc};
use observe_core::types::LeafIndex;
use observe_core::{ObserveError, ObserveResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// A photo the user took, with where and when
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoObservation {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub name: String,
    /// Identified species, once the user has confirmed one
    pub species: Option<Uuid>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Metres above sea level
    pub elevation: Option<f64>,
    #[serde(default)]
    pub photo_data: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_data: Option<Vec<u8>>,
}

impl PhotoObservation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            name: name.into(),
            species: None,
            latitude: None,
            longitude: None,
            elevation: None,
            photo_data: Vec::new(),
            thumbnail_data: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_species(mut self, species: &Species) -> Self {
        self.species = Some(species.id);
        self
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_elevation(mut self, metres: f64) -> Self {
        self.elevation = Some(metres);
        self
    }

    pub fn with_photo(mut self, data: Vec<u8>) -> Self {
        self.photo_data = data;
        self
    }

    pub fn with_thumbnail(mut self, data: Vec<u8>) -> Self {
        self.thumbnail_data = Some(data);
        self
    }

    /// Coordinate, only when both latitude and longitude are known
    pub fn location(&self) -> Option<LocationCoordinate> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(LocationCoordinate {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}

/// Export shape of an observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonObservation {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub leaf_index: LeafIndex,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_data: Option<LocationCoordinate>,
    /// Already encoded by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
}

impl JsonObservation {
    pub fn from_observation(
        observation: &PhotoObservation,
        species: &Species,
        image_base64: Option<String>,
    ) -> ObserveResult<Self> {
        if observation.species != Some(species.id) {
            return Err(ObserveError::InvalidInput(format!(
                "Observation {} is not linked to species {}",
                observation.id, species.id
            )));
        }

        Ok(Self {
            id: observation.id,
            timestamp: observation.timestamp,
            name: species.name.clone(),
            leaf_index: species.leaf_index,
            location_data: observation.location(),
            image_base64,
        })
    }
}
