use serde::Serialize;
use std::collections::HashMap;

use super::history::ArtistIndex;
use super::metascore::MetascoreBucket;
use super::store::Catalog;

/// One top-level block in the front end's filter sidebar.
#[derive(Debug, Clone, Serialize)]
pub struct FacetGroup {
    pub label: String,
    pub filters: Vec<Facet>,
}

/// A filter dimension. Its label, lower-cased, is the query key the front
/// end sends when one of the values is ticked.
#[derive(Debug, Clone, Serialize)]
pub struct Facet {
    pub label: String,
    pub values: Vec<FacetValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetValue {
    pub label: String,
    pub count: usize,
}

pub fn build_facets(catalog: &Catalog) -> Vec<FacetGroup> {
    let mut types = HashMap::new();
    let mut years = HashMap::new();
    let mut genres = HashMap::new();
    let mut scores = HashMap::new();

    for movie in catalog.movies() {
        *types.entry(movie.movie_type.as_str().to_string()).or_insert(0) += 1;

        let year = movie.year.trim();
        if !year.is_empty() {
            *years.entry(year.to_string()).or_insert(0) += 1;
        }

        for genre in movie.genres() {
            *genres.entry(genre.to_string()).or_insert(0) += 1;
        }

        if let Some(bucket) = movie.metascore_value().and_then(MetascoreBucket::for_score) {
            *scores.entry(bucket.key.to_string()).or_insert(0) += 1;
        }
    }

    vec![
        FacetGroup {
            label: "Movies".to_string(),
            filters: vec![
                facet("Type", types),
                facet("Year", years),
                facet("Genre", genres),
                facet("Metascore", scores),
            ],
        },
        FacetGroup {
            label: "Actor".to_string(),
            filters: vec![facet("Actor", artist_counts(catalog.actors()))],
        },
        FacetGroup {
            label: "Director".to_string(),
            filters: vec![facet("Director", artist_counts(catalog.directors()))],
        },
    ]
}

fn artist_counts(index: &ArtistIndex) -> HashMap<String, usize> {
    index
        .iter()
        .map(|person| (person.name.clone(), person.movies.len()))
        .collect()
}

fn facet(label: &str, counts: HashMap<String, usize>) -> Facet {
    let mut values: Vec<FacetValue> = counts
        .into_iter()
        .map(|(label, count)| FacetValue { label, count })
        .collect();

    values.sort_by(|a, b| b.count.cmp(&a.count).then(a.label.cmp(&b.label)));

    Facet {
        label: label.to_string(),
        values,
    }
}
