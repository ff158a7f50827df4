use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single catalog entry, in OMDb layout.
///
/// Only the fields the catalog indexes or filters on are typed. Everything
/// else in the source record (Plot, Poster, Ratings, ...) is kept in `extra`
/// and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Genre", default)]
    pub genre: String,
    #[serde(rename = "Type")]
    pub movie_type: MovieType,
    #[serde(rename = "Director", default)]
    pub director: String,
    #[serde(rename = "Actors", default)]
    pub actors: String,
    #[serde(rename = "Metascore", default)]
    pub metascore: String,
    #[serde(rename = "Watched", default, skip_serializing_if = "Flag::is_unset")]
    pub watched: Flag,
    #[serde(rename = "Saved", default, skip_serializing_if = "Flag::is_unset")]
    pub saved: Flag,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MovieRecord {
    /// Key into the title index.
    pub fn title_key(&self) -> String {
        self.title.to_lowercase()
    }

    pub fn genres(&self) -> impl Iterator<Item = &str> {
        split_list(&self.genre)
    }

    pub fn actor_names(&self) -> impl Iterator<Item = &str> {
        split_list(&self.actors)
    }

    pub fn director_names(&self) -> impl Iterator<Item = &str> {
        split_list(&self.director)
    }

    /// Numeric metascore, `None` for "N/A" and friends.
    pub fn metascore_value(&self) -> Option<u32> {
        self.metascore.trim().parse().ok()
    }

    pub fn flag(&self, field: FlagField) -> Flag {
        match field {
            FlagField::Watched => self.watched,
            FlagField::Saved => self.saved,
        }
    }

    pub fn set_flag(&mut self, field: FlagField, value: Flag) {
        match field {
            FlagField::Watched => self.watched = value,
            FlagField::Saved => self.saved = value,
        }
    }
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|p| !p.is_empty() && *p != "N/A")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MovieType {
    Movie,
    Series,
}

impl MovieType {
    /// Only the exact lower-case tokens are accepted as a query parameter.
    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(MovieType::Movie),
            "series" => Some(MovieType::Series),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MovieType::Movie => "movie",
            MovieType::Series => "series",
        }
    }
}

/// Stored types are compared trimmed and lower-cased, so `" Movie"` loads.
impl<'de> Deserialize<'de> for MovieType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        MovieType::from_param(raw.trim().to_lowercase().as_str()).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid movie type: {}", raw))
        })
    }
}

/// Watched/Saved state. `Unset` means the field is absent, `Undefined` that
/// it holds the legacy `"undefined"` token, which is written back as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flag {
    True,
    False,
    Undefined,
    #[default]
    Unset,
}

impl Flag {
    /// Parse a `"true"` / `"false"` request token. Anything else is rejected.
    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "true" => Some(Flag::True),
            "false" => Some(Flag::False),
            _ => None,
        }
    }

    pub fn is_unset(&self) -> bool {
        *self == Flag::Unset
    }

    /// Filter semantics: a record that was never marked counts as false.
    pub fn matches(&self, wanted: Flag) -> bool {
        *self == wanted
            || (wanted == Flag::False && matches!(self, Flag::Unset | Flag::Undefined))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::True => "True",
            Flag::False => "False",
            Flag::Undefined | Flag::Unset => "undefined",
        }
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Text(String),
            Null(()),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Bool(true) => Ok(Flag::True),
            Raw::Bool(false) => Ok(Flag::False),
            Raw::Null(()) => Ok(Flag::Unset),
            Raw::Text(s) => match s.trim().to_lowercase().as_str() {
                "true" => Ok(Flag::True),
                "false" => Ok(Flag::False),
                "undefined" => Ok(Flag::Undefined),
                "" => Ok(Flag::Unset),
                other => Err(serde::de::Error::custom(format!(
                    "invalid flag value: {}",
                    other
                ))),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagField {
    Watched,
    Saved,
}

impl FlagField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagField::Watched => "Watched",
            FlagField::Saved => "Saved",
        }
    }
}
