use crate::infra::InMemoryPlaceRepository;
use clap::Args;
use saferoute::error::AppError;
use saferoute::geometry::{RouteGeometry, TravelMode};
use saferoute::places::{PlaceRepository, PlacesImportError, PlacesImporter, PlacesService};
use saferoute::scoring::{RouteScoringService, ScoreOptions, ScoreResult};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// GeoJSON file holding a LineString, a Feature, or a bare coordinate array
    #[arg(long)]
    pub(crate) geojson: PathBuf,
    /// Travel mode (walking or driving)
    #[arg(long, default_value = "walking")]
    pub(crate) mode: String,
    /// Reference distance in kilometres; measured from the geometry when omitted
    #[arg(long)]
    pub(crate) distance_km: Option<f64>,
    /// Fixed seed for reproducible jitter
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug)]
pub(crate) struct PlacesArgs {
    /// Places CSV (name,type,subtype,state,lga,lng,lat)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Autocomplete query
    #[arg(long)]
    pub(crate) query: String,
    /// Comma-separated type filter (school,road,poi,junction)
    #[arg(long)]
    pub(crate) types: Option<String>,
    /// Maximum number of results (capped at 15)
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Country appended to each label
    #[arg(long, default_value = "Nigeria")]
    pub(crate) country: String,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.geojson)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;

    let mut options = ScoreOptions::new(TravelMode::parse_or_default(Some(&args.mode)));
    if let Some(distance) = args.distance_km {
        options = options.with_reference_distance(distance);
    }

    let service = RouteScoringService::local(args.seed);
    let result = match RouteGeometry::from_geojson(&value) {
        Ok(geometry) => service.score_local(&geometry, &options),
        Err(err) => {
            eprintln!("warning: {err}; reporting the neutral score");
            ScoreResult::fallback()
        }
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub(crate) fn run_places(args: PlacesArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryPlaceRepository::default());
    let summary = PlacesImporter::from_path(&args.csv, repository.as_ref())?;
    eprintln!(
        "imported {} places ({} duplicates, {} skipped), {} in store",
        summary.inserted,
        summary.duplicates,
        summary.skipped,
        repository.count().map_err(PlacesImportError::from)?
    );

    let service = PlacesService::new(repository, args.country);
    let results = service.search(&args.query, args.types.as_deref(), args.limit);
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
