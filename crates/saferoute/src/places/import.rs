use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::{debug, info};

use super::domain::{Place, PlaceId, PlaceType, PointLocation};
use super::repository::PlaceRepository;
use crate::repository::{next_record_id, RepositoryError};

/// Rows written to the store per insert call.
pub const IMPORT_BATCH_SIZE: usize = 500;

#[derive(Debug, thiserror::Error)]
pub enum PlacesImportError {
    #[error("failed to read places file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid places CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("could not store imported places: {0}")]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub duplicates: usize,
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
struct PlaceRow {
    name: String,
    #[serde(rename = "type")]
    place_type: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    subtype: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    state: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    lga: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    lng: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    lat: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_degrees(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

impl PlaceRow {
    fn into_place(self) -> Option<Place> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return None;
        }
        let place_type = PlaceType::parse(&self.place_type)?;
        let lng = parse_degrees(self.lng.as_deref())?;
        let lat = parse_degrees(self.lat.as_deref())?;
        if !(-180.0..=180.0).contains(&lng) || !(-90.0..=90.0).contains(&lat) {
            return None;
        }

        Some(Place {
            id: PlaceId(next_record_id("ng")),
            name,
            place_type,
            subtype: self.subtype,
            state: self.state,
            lga: self.lga,
            location: PointLocation::new([lng, lat]),
        })
    }

    fn dedup_key(&self) -> (String, String, String) {
        (
            self.name.trim().to_lowercase(),
            self.place_type.trim().to_lowercase(),
            self.lga
                .as_deref()
                .map(|lga| lga.trim().to_lowercase())
                .unwrap_or_default(),
        )
    }
}

/// Offline loader for `name,type,subtype,state,lga,lng,lat` CSV exports.
pub struct PlacesImporter;

impl PlacesImporter {
    pub fn from_path<P, R>(path: P, repository: &R) -> Result<ImportSummary, PlacesImportError>
    where
        P: AsRef<Path>,
        R: PlaceRepository + ?Sized,
    {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, repository)
    }

    pub fn from_reader<Rd, R>(reader: Rd, repository: &R) -> Result<ImportSummary, PlacesImportError>
    where
        Rd: Read,
        R: PlaceRepository + ?Sized,
    {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut summary = ImportSummary::default();
        let mut seen = HashSet::new();
        let mut batch = Vec::with_capacity(IMPORT_BATCH_SIZE);

        for row in csv_reader.deserialize::<PlaceRow>() {
            let row = row?;
            let key = row.dedup_key();
            let Some(place) = row.into_place() else {
                summary.skipped += 1;
                continue;
            };
            if !seen.insert(key) {
                summary.duplicates += 1;
                continue;
            }
            batch.push(place);

            if batch.len() == IMPORT_BATCH_SIZE {
                summary.inserted += repository.insert_batch(std::mem::take(&mut batch))?;
                debug!(inserted = summary.inserted, "flushed places batch");
            }
        }

        if !batch.is_empty() {
            summary.inserted += repository.insert_batch(batch)?;
        }

        info!(
            inserted = summary.inserted,
            duplicates = summary.duplicates,
            skipped = summary.skipped,
            "places import finished"
        );
        Ok(summary)
    }
}
