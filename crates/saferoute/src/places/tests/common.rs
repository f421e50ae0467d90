use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::places::domain::{Place, PlaceId, PlaceQuery, PlaceType, PointLocation, ScoredPlace};
use crate::places::repository::{rank_places, PlaceRepository};
use crate::places::service::PlacesService;
use crate::repository::RepositoryError;

pub(super) fn place(name: &str, place_type: PlaceType, lga: &str, state: &str) -> Place {
    Place {
        id: PlaceId(name.to_lowercase().replace(' ', "-")),
        name: name.to_string(),
        place_type,
        subtype: None,
        state: Some(state.to_string()),
        lga: Some(lga.to_string()),
        location: PointLocation::new([3.4697, 6.4478]),
    }
}

pub(super) fn lagos_places() -> Vec<Place> {
    vec![
        place("Lekki Phase 1 Gate", PlaceType::Junction, "Eti-Osa", "Lagos"),
        place("Lekki Expressway", PlaceType::Road, "Eti-Osa", "Lagos"),
        place("Lekki British School", PlaceType::School, "Eti-Osa", "Lagos"),
        place("Ikeja City Mall", PlaceType::Poi, "Ikeja", "Lagos"),
        place("Allen Avenue", PlaceType::Road, "Ikeja", "Lagos"),
    ]
}

#[derive(Default, Clone)]
pub(super) struct MemoryPlaces {
    pub(super) places: Arc<Mutex<Vec<Place>>>,
    pub(super) batches: Arc<Mutex<Vec<usize>>>,
}

impl MemoryPlaces {
    pub(super) fn seeded(places: Vec<Place>) -> Self {
        let store = Self::default();
        *store.places.lock().expect("places mutex poisoned") = places;
        store
    }
}

impl PlaceRepository for MemoryPlaces {
    fn search(&self, query: &PlaceQuery) -> Result<Vec<ScoredPlace>, RepositoryError> {
        let guard = self.places.lock().expect("places mutex poisoned");
        Ok(rank_places(guard.iter(), query))
    }

    fn insert_batch(&self, places: Vec<Place>) -> Result<usize, RepositoryError> {
        let inserted = places.len();
        self.batches
            .lock()
            .expect("batch mutex poisoned")
            .push(inserted);
        self.places
            .lock()
            .expect("places mutex poisoned")
            .extend(places);
        Ok(inserted)
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.places.lock().expect("places mutex poisoned").len())
    }
}

pub(super) struct OfflinePlaces;

impl PlaceRepository for OfflinePlaces {
    fn search(&self, _query: &PlaceQuery) -> Result<Vec<ScoredPlace>, RepositoryError> {
        Err(RepositoryError::Unavailable("text index offline".to_string()))
    }

    fn insert_batch(&self, _places: Vec<Place>) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("text index offline".to_string()))
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("text index offline".to_string()))
    }
}

pub(super) fn lagos_service() -> PlacesService<MemoryPlaces> {
    PlacesService::new(Arc::new(MemoryPlaces::seeded(lagos_places())), "Nigeria")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
