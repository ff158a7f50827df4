mod query;

pub use query::{ParamValue, QueryParams};
