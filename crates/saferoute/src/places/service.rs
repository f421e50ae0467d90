use std::sync::Arc;

use tracing::{debug, warn};

use super::domain::{PlaceFeature, PlaceQuery, PlaceType};
use super::repository::{tokenize, PlaceRepository};

/// Queries shorter than this (in characters, after trimming) return nothing.
pub const MIN_QUERY_CHARS: usize = 2;
pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 15;

/// Autocomplete search over the places store. Never fails; problems yield an empty list.
pub struct PlacesService<R> {
    repository: Arc<R>,
    country: String,
}

impl<R> PlacesService<R>
where
    R: PlaceRepository + 'static,
{
    pub fn new(repository: Arc<R>, country: impl Into<String>) -> Self {
        Self {
            repository,
            country: country.into(),
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    pub fn search(&self, query: &str, types: Option<&str>, limit: Option<usize>) -> Vec<PlaceFeature> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        let terms = tokenize(query);
        if terms.is_empty() {
            return Vec::new();
        }

        let requested_types = match types.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => {
                let parsed = PlaceType::parse_list(raw);
                if parsed.is_empty() {
                    debug!(types = raw, "no supported place types requested");
                    return Vec::new();
                }
                parsed
            }
            None => Vec::new(),
        };

        let request = PlaceQuery {
            terms,
            types: requested_types,
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        };

        match self.repository.search(&request) {
            Ok(mut matches) => {
                matches.truncate(request.limit);
                matches
                    .into_iter()
                    .map(|scored| PlaceFeature::from_place(scored.place, &self.country))
                    .collect()
            }
            Err(err) => {
                warn!(error = %err, query, "places search failed, returning no results");
                Vec::new()
            }
        }
    }
}
