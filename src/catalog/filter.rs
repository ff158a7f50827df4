use tracing::debug;

use super::history::ArtistIndex;
use super::metascore::MetascoreBucket;
use super::record::{Flag, FlagField, MovieRecord, MovieType};
use super::store::Catalog;
use crate::util::{ParamValue, QueryParams};

/// The `/movies` query. Every field is optional; `None` means "don't filter
/// on this". Blank strings never make it in here. The person parameters keep
/// a repeated key as `Multiple`, since it still selects the person stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    pub movie_type: Option<String>,
    pub year: Option<String>,
    pub metascore: Option<String>,
    pub actor: Option<ParamValue>,
    pub director: Option<ParamValue>,
    pub genre: Option<String>,
    pub watched: Option<String>,
    pub saved: Option<String>,
}

impl FilterParams {
    pub fn from_query(params: &QueryParams) -> Self {
        let get = |key: &str| params.get(key).map(str::to_string);
        Self {
            movie_type: get("type"),
            year: get("year"),
            metascore: get("metascore"),
            actor: params.value("actor"),
            director: params.value("director"),
            genre: get("genre"),
            watched: get("watched"),
            saved: get("saved"),
        }
    }
}

/// Narrow the catalog down to the records matching `params`.
///
/// Stages run in a fixed order, each on what the previous one left over.
/// A parameter that fails validation skips its stage instead of rejecting
/// the query. Result order is catalog order, except after the person stage,
/// which yields the order (and duplicates) of the artist's history.
pub fn filter_movies<'a>(catalog: &'a Catalog, params: &FilterParams) -> Vec<&'a MovieRecord> {
    let mut data: Vec<&MovieRecord> = catalog.movies().iter().collect();

    if params.actor.is_some() || params.director.is_some() {
        data = people_stage(catalog, params.actor.as_ref(), params.director.as_ref());
        debug!(count = data.len(), "person stage");
    }

    if let Some(wanted) = params.movie_type.as_deref().and_then(MovieType::from_param) {
        data.retain(|m| m.movie_type == wanted);
        debug!(count = data.len(), movie_type = wanted.as_str(), "type stage");
    }

    if let Some(year) = params.year.as_deref() {
        let year = year.trim();
        data.retain(|m| m.year.trim() == year);
        debug!(count = data.len(), year, "year stage");
    }

    if let Some(bucket) = params.metascore.as_deref().and_then(MetascoreBucket::from_key) {
        data.retain(|m| m.metascore_value().map_or(false, |s| bucket.contains(s)));
        debug!(count = data.len(), bucket = bucket.key, "metascore stage");
    }

    if let Some(genre) = params.genre.as_deref() {
        let genre = genre.trim();
        data.retain(|m| m.genre.split(',').any(|g| g.trim() == genre));
        debug!(count = data.len(), genre, "genre stage");
    }

    for (field, param) in [
        (FlagField::Watched, &params.watched),
        (FlagField::Saved, &params.saved),
    ] {
        if let Some(wanted) = param.as_deref().and_then(Flag::from_param) {
            data.retain(|m| m.flag(field).matches(wanted));
            debug!(count = data.len(), field = field.as_str(), "flag stage");
        }
    }

    data
}

/// Actor lookup is exact on the lower-cased name. A director given together
/// with an actor that matched is only a substring check on the Director
/// field; on its own it is an exact lookup like the actor one. A repeated
/// key matches no one, but still replaces the working set.
fn people_stage<'a>(
    catalog: &'a Catalog,
    actor: Option<&ParamValue>,
    director: Option<&ParamValue>,
) -> Vec<&'a MovieRecord> {
    let mut list = match actor.and_then(ParamValue::as_single) {
        Some(actor) => credited(catalog, catalog.actors(), actor),
        None => Vec::new(),
    };

    if let Some(director) = director.and_then(ParamValue::as_single) {
        list = if list.is_empty() {
            credited(catalog, catalog.directors(), director)
        } else {
            list.into_iter()
                .filter(|m| m.director.contains(director))
                .collect()
        };
    }

    list
}

fn credited<'a>(catalog: &'a Catalog, index: &ArtistIndex, name: &str) -> Vec<&'a MovieRecord> {
    index
        .get(name)
        .map(|person| {
            person
                .movies
                .iter()
                .filter_map(|r| catalog.get(&r.title))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"[
        {"Title":"Blade Runner","Year":"1982","Genre":"Action, Drama, Sci-Fi","Type":"movie",
         "Director":"Ridley Scott","Actors":"Harrison Ford, Rutger Hauer, Sean Young",
         "Metascore":"84","imdbID":"tt0083658","Watched":"True"},
        {"Title":"Star Wars: Episode IV - A New Hope","Year":"1977","Genre":"Action, Adventure, Fantasy",
         "Type":"movie","Director":"George Lucas","Actors":"Mark Hamill, Harrison Ford, Carrie Fisher",
         "Metascore":"90","imdbID":"tt0076759","Watched":"False"},
        {"Title":"Alien","Year":"1979","Genre":"Horror, Sci-Fi","Type":"movie",
         "Director":"Ridley Scott","Actors":"Sigourney Weaver, Tom Skerritt",
         "Metascore":"89","imdbID":"tt0078748"},
        {"Title":"Stranger Things","Year":"2016–","Genre":"Drama, Fantasy, Horror","Type":"series",
         "Director":"N/A","Actors":"Winona Ryder, David Harbour","Metascore":"N/A",
         "imdbID":"tt4574334","Saved":"True"},
        {"Title":"Gladiator","Year":" 2000 ","Genre":"Action, Adventure, Drama","Type":"movie",
         "Director":"Ridley Scott","Actors":"Russell Crowe, Joaquin Phoenix",
         "Metascore":"67","imdbID":"tt0172495","Watched":"undefined","Saved":"False"}
    ]"#;

    fn catalog() -> Catalog {
        Catalog::from_json("test", DATASET).unwrap()
    }

    fn titles(list: &[&MovieRecord]) -> Vec<String> {
        list.iter().map(|m| m.title.clone()).collect()
    }

    fn params(pairs: &[(&str, &str)]) -> FilterParams {
        FilterParams::from_query(&QueryParams::from_pairs(pairs.iter().copied()))
    }

    #[test]
    fn test_no_params_returns_everything_in_order() {
        let c = catalog();
        let all = filter_movies(&c, &FilterParams::default());
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].title, "Blade Runner");
        assert_eq!(all[4].title, "Gladiator");
    }

    #[test]
    fn test_type_filter() {
        let c = catalog();
        for t in ["movie", "series"] {
            let res = filter_movies(&c, &params(&[("type", t)]));
            assert!(!res.is_empty());
            assert!(res.iter().all(|m| m.movie_type.as_str() == t));
        }
        // Not an exact token: stage skipped.
        assert_eq!(filter_movies(&c, &params(&[("type", "Series")])).len(), 5);
    }

    #[test]
    fn test_year_is_trimmed_string_match() {
        let c = catalog();
        assert_eq!(titles(&filter_movies(&c, &params(&[("year", " 2000")]))), vec!["Gladiator"]);
        assert!(filter_movies(&c, &params(&[("year", "2016")])).is_empty());
    }

    #[test]
    fn test_unknown_metascore_bucket_is_skipped() {
        let c = catalog();
        let unfiltered = filter_movies(&c, &FilterParams::default());
        assert_eq!(filter_movies(&c, &params(&[("metascore", "9")])), unfiltered);
    }

    #[test]
    fn test_metascore_bucket() {
        let c = catalog();
        let res = filter_movies(&c, &params(&[("metascore", "3")]));
        assert_eq!(titles(&res), vec!["Blade Runner", "Star Wars: Episode IV - A New Hope", "Alien"]);
        let res = filter_movies(&c, &params(&[("metascore", "2")]));
        assert_eq!(titles(&res), vec!["Gladiator"]);
    }

    #[test]
    fn test_genre_token_match() {
        let c = catalog();
        let res = filter_movies(&c, &params(&[("genre", "Horror ")]));
        assert_eq!(titles(&res), vec!["Alien", "Stranger Things"]);
        assert!(filter_movies(&c, &params(&[("genre", "Sci")])).is_empty());
    }

    #[test]
    fn test_watched_false_includes_unset() {
        let c = catalog();
        let res = filter_movies(&c, &params(&[("watched", "false")]));
        assert_eq!(
            titles(&res),
            vec!["Star Wars: Episode IV - A New Hope", "Alien", "Stranger Things", "Gladiator"]
        );
        let res = filter_movies(&c, &params(&[("watched", "true")]));
        assert_eq!(titles(&res), vec!["Blade Runner"]);
        // Capitalized token is not valid input.
        assert_eq!(filter_movies(&c, &params(&[("watched", "True")])).len(), 5);
    }

    #[test]
    fn test_saved_filter() {
        let c = catalog();
        let res = filter_movies(&c, &params(&[("saved", "true")]));
        assert_eq!(titles(&res), vec!["Stranger Things"]);
        assert_eq!(filter_movies(&c, &params(&[("saved", "false")])).len(), 4);
    }

    #[test]
    fn test_actor_lookup() {
        let c = catalog();
        let res = filter_movies(&c, &params(&[("actor", "harrison ford")]));
        assert_eq!(titles(&res), vec!["Blade Runner", "Star Wars: Episode IV - A New Hope"]);
        assert!(filter_movies(&c, &params(&[("actor", "Harrison")])).is_empty());
    }

    #[test]
    fn test_actor_then_director_is_substring() {
        let c = catalog();
        let res = filter_movies(
            &c,
            &params(&[("actor", "Harrison Ford"), ("director", "Ridley Scott")]),
        );
        assert_eq!(titles(&res), vec!["Blade Runner"]);

        // Partial director name only works as a narrowing substring.
        let res = filter_movies(&c, &params(&[("actor", "Harrison Ford"), ("director", "Scott")]));
        assert_eq!(titles(&res), vec!["Blade Runner"]);
        assert!(filter_movies(&c, &params(&[("director", "Scott")])).is_empty());

        // Case-sensitive substring.
        let res = filter_movies(
            &c,
            &params(&[("actor", "Harrison Ford"), ("director", "ridley scott")]),
        );
        assert!(res.is_empty());
    }

    #[test]
    fn test_director_falls_back_to_history() {
        let c = catalog();
        let res = filter_movies(&c, &params(&[("director", "ridley scott")]));
        assert_eq!(titles(&res), vec!["Blade Runner", "Alien", "Gladiator"]);

        // Actor with no matches: director history is used instead.
        let res = filter_movies(
            &c,
            &params(&[("actor", "Nobody"), ("director", "Ridley Scott")]),
        );
        assert_eq!(titles(&res), vec!["Blade Runner", "Alien", "Gladiator"]);
    }

    #[test]
    fn test_repeated_person_key_yields_nothing() {
        let c = catalog();
        let res = filter_movies(
            &c,
            &params(&[("actor", "Harrison Ford"), ("actor", "Sean Young")]),
        );
        assert!(res.is_empty());
        assert!(filter_movies(
            &c,
            &params(&[("director", "Ridley Scott"), ("director", "George Lucas")]),
        )
        .is_empty());

        // A repeated director does not narrow a matching actor.
        let res = filter_movies(
            &c,
            &params(&[
                ("actor", "Harrison Ford"),
                ("director", "Ridley Scott"),
                ("director", "Nobody"),
            ]),
        );
        assert_eq!(titles(&res), vec!["Blade Runner", "Star Wars: Episode IV - A New Hope"]);
    }

    #[test]
    fn test_loose_stored_type_is_filterable() {
        let c = Catalog::from_json(
            "test",
            r#"[{"Title":"Alien","Type":" Movie","imdbID":"tt0078748"},
                {"Title":"Lost","Type":"Series ","imdbID":"tt0411008"}]"#,
        )
        .unwrap();
        assert_eq!(titles(&filter_movies(&c, &params(&[("type", "movie")]))), vec!["Alien"]);
        assert_eq!(titles(&filter_movies(&c, &params(&[("type", "series")]))), vec!["Lost"]);
    }

    #[test]
    fn test_undefined_flag_counts_as_false() {
        let c = catalog();
        let res = filter_movies(&c, &params(&[("watched", "false"), ("director", "Ridley Scott")]));
        assert_eq!(titles(&res), vec!["Alien", "Gladiator"]);
        assert_eq!(c.get("Gladiator").map(|m| m.watched), Some(Flag::Undefined));
    }

    #[test]
    fn test_unknown_actor_yields_nothing() {
        let c = catalog();
        assert!(filter_movies(&c, &params(&[("actor", "Nobody"), ("genre", "Drama")])).is_empty());
    }

    #[test]
    fn test_stages_compose() {
        let c = catalog();
        let res = filter_movies(
            &c,
            &params(&[
                ("director", "Ridley Scott"),
                ("type", "movie"),
                ("genre", "Sci-Fi"),
                ("watched", "false"),
            ]),
        );
        assert_eq!(titles(&res), vec!["Alien"]);
    }

    #[test]
    fn test_duplicate_credits_are_kept() {
        let c = Catalog::from_json(
            "test",
            r#"[{"Title":"Twins","Type":"movie","imdbID":"tt1",
                 "Actors":"Jane Doe, Jane Doe"}]"#,
        )
        .unwrap();
        assert_eq!(filter_movies(&c, &params(&[("actor", "Jane Doe")])).len(), 2);
    }
}
