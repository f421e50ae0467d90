use metrics_exporter_prometheus::PrometheusHandle;
use saferoute::history::{HistoryEntry, HistoryRepository};
use saferoute::places::{rank_places, Place, PlaceQuery, PlaceRepository, ScoredPlace};
use saferoute::reports::{HazardReport, ReportRepository};
use saferoute::repository::RepositoryError;
use saferoute::users::{UserProfile, UserRepository};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPlaceRepository {
    places: Arc<Mutex<Vec<Place>>>,
}

impl PlaceRepository for InMemoryPlaceRepository {
    fn search(&self, query: &PlaceQuery) -> Result<Vec<ScoredPlace>, RepositoryError> {
        let guard = self.places.lock().expect("places mutex poisoned");
        Ok(rank_places(guard.iter(), query))
    }

    fn insert_batch(&self, places: Vec<Place>) -> Result<usize, RepositoryError> {
        let mut guard = self.places.lock().expect("places mutex poisoned");
        let inserted = places.len();
        guard.extend(places);
        Ok(inserted)
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.places.lock().expect("places mutex poisoned").len())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryHistoryRepository {
    entries: Arc<Mutex<Vec<HistoryEntry>>>,
}

impl HistoryRepository for InMemoryHistoryRepository {
    fn insert(&self, entry: HistoryEntry) -> Result<HistoryEntry, RepositoryError> {
        let mut guard = self.entries.lock().expect("history mutex poisoned");
        if guard.iter().any(|existing| existing.id == entry.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(entry.clone());
        Ok(entry)
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<HistoryEntry>, RepositoryError> {
        let guard = self.entries.lock().expect("history mutex poisoned");
        let mut entries: Vec<HistoryEntry> = guard
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(entries)
    }

    fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let mut guard = self.entries.lock().expect("history mutex poisoned");
        let before = guard.len();
        guard.retain(|entry| entry.id != id);
        if guard.len() == before {
            Err(RepositoryError::NotFound)
        } else {
            Ok(())
        }
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryReportRepository {
    reports: Arc<Mutex<Vec<HazardReport>>>,
}

impl ReportRepository for InMemoryReportRepository {
    fn insert(&self, report: HazardReport) -> Result<HazardReport, RepositoryError> {
        let mut guard = self.reports.lock().expect("report mutex poisoned");
        if guard.iter().any(|existing| existing.id == report.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(report.clone());
        Ok(report)
    }

    fn recent(&self, limit: usize) -> Result<Vec<HazardReport>, RepositoryError> {
        let guard = self.reports.lock().expect("report mutex poisoned");
        let mut reports = guard.clone();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        reports.truncate(limit);
        Ok(reports)
    }

    fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let mut guard = self.reports.lock().expect("report mutex poisoned");
        let before = guard.len();
        guard.retain(|report| report.id != id);
        if guard.len() == before {
            Err(RepositoryError::NotFound)
        } else {
            Ok(())
        }
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryUserRepository {
    profiles: Arc<Mutex<HashMap<String, UserProfile>>>,
}

impl UserRepository for InMemoryUserRepository {
    fn fetch(&self, uid: &str) -> Result<Option<UserProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("user mutex poisoned");
        Ok(guard.get(uid).cloned())
    }

    fn upsert(&self, profile: UserProfile) -> Result<UserProfile, RepositoryError> {
        let mut guard = self.profiles.lock().expect("user mutex poisoned");
        guard.insert(profile.uid.clone(), profile.clone());
        Ok(profile)
    }
}
