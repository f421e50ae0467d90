use super::common::*;
use crate::places::import::{ImportSummary, PlacesImporter, IMPORT_BATCH_SIZE};
use crate::places::repository::PlaceRepository;
use crate::places::PlacesImportError;

#[test]
fn imports_deduplicates_and_skips_invalid_rows() {
    let csv = "name,type,subtype,state,lga,lng,lat\n\
Lekki Phase 1 Gate,junction,roundabout,Lagos,Eti-Osa,3.4697,6.4478\n\
lekki phase 1 gate,Junction,,Lagos,eti-osa,3.4697,6.4478\n\
Queens College,school,secondary,Lagos,Yaba,3.3792,6.5005\n\
Mystery Spot,volcano,,Lagos,Yaba,3.37,6.50\n\
Broken Coordinates,poi,,Lagos,Yaba,,\n\
Far Away,poi,,Lagos,Yaba,3.37,123.0\n";

    let store = MemoryPlaces::default();
    let summary = PlacesImporter::from_reader(csv.as_bytes(), &store).expect("import succeeds");

    assert_eq!(
        summary,
        ImportSummary {
            inserted: 2,
            duplicates: 1,
            skipped: 3,
        }
    );
    assert_eq!(store.count().expect("count"), 2);
}

#[test]
fn non_numeric_coordinates_skip_the_row_only() {
    let csv = "name,type,subtype,state,lga,lng,lat\n\
Allen Avenue,road,,Lagos,Ikeja,3.35,6.60\n\
Herbert Macaulay Way,road,,Lagos,Yaba,abc,6.5\n\
Ojota Interchange,junction,,Lagos,Kosofe,3.38,north\n\
Ikeja City Mall,poi,mall,Lagos,Ikeja,3.3569,6.6137\n";

    let store = MemoryPlaces::default();
    let summary = PlacesImporter::from_reader(csv.as_bytes(), &store).expect("import succeeds");

    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.skipped, 2);
    assert_eq!(store.count().expect("count"), 2);
}

#[test]
fn inserts_in_batches() {
    let mut csv = String::from("name,type,subtype,state,lga,lng,lat\n");
    for i in 0..(IMPORT_BATCH_SIZE + 20) {
        csv.push_str(&format!("Road {i},road,,Lagos,Ikeja,3.35,6.60\n"));
    }

    let store = MemoryPlaces::default();
    let summary = PlacesImporter::from_reader(csv.as_bytes(), &store).expect("import succeeds");

    assert_eq!(summary.inserted, IMPORT_BATCH_SIZE + 20);
    let batches = store.batches.lock().expect("batch mutex poisoned").clone();
    assert_eq!(batches, vec![IMPORT_BATCH_SIZE, 20]);
}

#[test]
fn store_failures_surface_from_import() {
    let csv = "name,type,subtype,state,lga,lng,lat\nAllen Avenue,road,,Lagos,Ikeja,3.35,6.60\n";
    match PlacesImporter::from_reader(csv.as_bytes(), &OfflinePlaces) {
        Err(PlacesImportError::Repository(_)) => {}
        other => panic!("expected repository error, got {other:?}"),
    }
}
