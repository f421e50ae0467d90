use std::cmp::Ordering;

use super::domain::{Place, PlaceQuery, ScoredPlace};
use crate::repository::RepositoryError;

pub const NAME_WEIGHT: f64 = 10.0;
pub const LGA_WEIGHT: f64 = 3.0;
pub const STATE_WEIGHT: f64 = 1.0;

/// Read-mostly places store; writes come from the batch importer.
pub trait PlaceRepository: Send + Sync {
    fn search(&self, query: &PlaceQuery) -> Result<Vec<ScoredPlace>, RepositoryError>;
    fn insert_batch(&self, places: Vec<Place>) -> Result<usize, RepositoryError>;
    fn count(&self) -> Result<usize, RepositoryError>;
}

/// Lowercased word tokens, splitting on anything that is not alphanumeric.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn field_matches(field: Option<&str>, term: &str) -> usize {
    field
        .map(|value| tokenize(value).iter().filter(|token| *token == term).count())
        .unwrap_or(0)
}

/// Weighted whole-word relevance: name 10, LGA 3, state 1 per matching token.
pub fn text_relevance(place: &Place, terms: &[String]) -> f64 {
    terms
        .iter()
        .map(|term| {
            NAME_WEIGHT * field_matches(Some(place.name.as_str()), term) as f64
                + LGA_WEIGHT * field_matches(place.lga.as_deref(), term) as f64
                + STATE_WEIGHT * field_matches(place.state.as_deref(), term) as f64
        })
        .sum()
}

/// Filters, scores, and orders places for a query; stores without a text index use this.
pub fn rank_places<'a, I>(places: I, query: &PlaceQuery) -> Vec<ScoredPlace>
where
    I: IntoIterator<Item = &'a Place>,
{
    let mut ranked: Vec<ScoredPlace> = places
        .into_iter()
        .filter(|place| query.types.is_empty() || query.types.contains(&place.place_type))
        .filter_map(|place| {
            let relevance = text_relevance(place, &query.terms);
            (relevance > 0.0).then(|| ScoredPlace {
                place: place.clone(),
                relevance,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.place.name.cmp(&b.place.name))
    });
    ranked.truncate(query.limit);
    ranked
}
