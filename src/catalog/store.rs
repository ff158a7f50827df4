use std::collections::HashMap;
use tracing::info;

use super::history::ArtistIndex;
use super::record::MovieRecord;

const EMBEDDED_DATASET: &str = include_str!("../../data/movies.json");

/// The in-memory dataset: records in source order plus the lookup indices.
///
/// `titles` maps the lower-cased title to a slot in `movies`, `ids` maps an
/// imdbID to that same title key. Both are built together and never change
/// shape after load, so a record reachable through one is reachable through
/// the other.
#[derive(Debug, Clone)]
pub struct Catalog {
    movies: Vec<MovieRecord>,
    titles: HashMap<String, usize>,
    ids: HashMap<String, String>,
    actors: ArtistIndex,
    directors: ArtistIndex,
}

impl Catalog {
    pub fn from_records(movies: Vec<MovieRecord>) -> Result<Self, DatasetError> {
        let mut titles = HashMap::with_capacity(movies.len());
        let mut ids = HashMap::with_capacity(movies.len());

        for (idx, movie) in movies.iter().enumerate() {
            let key = movie.title_key();
            if titles.insert(key.clone(), idx).is_some() {
                return Err(DatasetError::DuplicateTitle(movie.title.clone()));
            }
            if ids.insert(movie.imdb_id.clone(), key).is_some() {
                return Err(DatasetError::DuplicateId(movie.imdb_id.clone()));
            }
        }

        let actors = ArtistIndex::build(&movies, |m| m.actor_names());
        let directors = ArtistIndex::build(&movies, |m| m.director_names());

        Ok(Self {
            movies,
            titles,
            ids,
            actors,
            directors,
        })
    }

    pub fn from_json(source: &str, content: &str) -> Result<Self, DatasetError> {
        let movies: Vec<MovieRecord> = serde_json::from_str(content)
            .map_err(|e| DatasetError::ParseError(source.to_string(), e))?;
        Self::from_records(movies)
    }

    /// Load the dataset file at `path`, or the built-in dataset.
    pub fn load(path: Option<&str>) -> Result<Self, DatasetError> {
        let catalog = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .map_err(|e| DatasetError::ReadError(path.to_string(), e))?;
                Self::from_json(path, &content)?
            }
            None => Self::from_json("<embedded>", EMBEDDED_DATASET)?,
        };

        info!(
            "Loaded {} titles, {} actors, {} directors from {}",
            catalog.movies.len(),
            catalog.actors.len(),
            catalog.directors.len(),
            path.unwrap_or("embedded dataset")
        );

        Ok(catalog)
    }

    /// Case-insensitive title lookup.
    pub fn get(&self, title: &str) -> Option<&MovieRecord> {
        self.titles
            .get(&title.to_lowercase())
            .map(|&idx| &self.movies[idx])
    }

    pub fn get_by_imdb_id(&self, imdb_id: &str) -> Option<&MovieRecord> {
        self.ids.get(imdb_id).and_then(|key| self.get(key))
    }

    pub(crate) fn get_by_imdb_id_mut(&mut self, imdb_id: &str) -> Option<&mut MovieRecord> {
        let idx = *self.ids.get(imdb_id).and_then(|key| self.titles.get(key))?;
        self.movies.get_mut(idx)
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn actors(&self) -> &ArtistIndex {
        &self.actors
    }

    pub fn directors(&self) -> &ArtistIndex {
        &self.directors
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse dataset {0}: {1}")]
    ParseError(String, serde_json::Error),
    #[error("Duplicate title in dataset: {0}")]
    DuplicateTitle(String),
    #[error("Duplicate imdbID in dataset: {0}")]
    DuplicateId(String),
}
