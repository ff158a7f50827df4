pub mod facets;
pub mod filter;
pub mod history;
pub mod metascore;
pub mod record;
pub mod repo;
pub mod store;

pub use facets::{build_facets, Facet, FacetGroup, FacetValue};
pub use filter::{filter_movies, FilterParams};
pub use history::{ArtistHistory, ArtistIndex, MovieRef};
pub use metascore::{MetascoreBucket, METASCORE_BUCKETS};
pub use record::{Flag, FlagField, MovieRecord, MovieType};
pub use repo::CatalogRepo;
pub use store::{Catalog, DatasetError};
