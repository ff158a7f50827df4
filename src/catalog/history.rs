use std::collections::HashMap;

use super::record::MovieRecord;

/// Title reference inside an artist's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRef {
    pub title: String,
}

/// Everything one person is credited on, in dataset order.
#[derive(Debug, Clone)]
pub struct ArtistHistory {
    pub name: String,
    pub movies: Vec<MovieRef>,
}

/// Lower-cased person name -> history.
#[derive(Debug, Clone, Default)]
pub struct ArtistIndex {
    people: HashMap<String, ArtistHistory>,
}

impl ArtistIndex {
    /// Build an index from the names `credits` yields for each movie.
    /// A name credited twice on the same movie is recorded twice.
    pub fn build<'a, F, I>(movies: &'a [MovieRecord], credits: F) -> Self
    where
        F: Fn(&'a MovieRecord) -> I,
        I: Iterator<Item = &'a str>,
    {
        let mut people: HashMap<String, ArtistHistory> = HashMap::new();

        for movie in movies {
            for name in credits(movie) {
                people
                    .entry(name.to_lowercase())
                    .or_insert_with(|| ArtistHistory {
                        name: name.to_string(),
                        movies: Vec::new(),
                    })
                    .movies
                    .push(MovieRef {
                        title: movie.title.clone(),
                    });
            }
        }

        Self { people }
    }

    pub fn get(&self, name: &str) -> Option<&ArtistHistory> {
        self.people.get(&name.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArtistHistory> {
        self.people.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.people.len()
    }
}
