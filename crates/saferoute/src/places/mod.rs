//! Free-text places lookup backing the destination autocomplete.

pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    FeatureProperties, Place, PlaceFeature, PlaceId, PlaceQuery, PlaceType, PointLocation,
    ScoredPlace,
};
pub use import::{ImportSummary, PlacesImportError, PlacesImporter, IMPORT_BATCH_SIZE};
pub use repository::{rank_places, text_relevance, tokenize, PlaceRepository};
pub use router::places_router;
pub use service::{PlacesService, DEFAULT_LIMIT, MAX_LIMIT, MIN_QUERY_CHARS};
