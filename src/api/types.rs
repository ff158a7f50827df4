use serde::Deserialize;
use serde_json::Value;

use crate::catalog::{Flag, FlagField};

/// Body of `PUT /movies/:id`.
///
/// Values stay untyped so that a wrong type (`true` instead of `"true"`) is
/// just an invalid field, not a rejected request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMovieState {
    #[serde(default)]
    pub watched: Option<Value>,
    #[serde(default)]
    pub saved: Option<Value>,
}

impl UpdateMovieState {
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// The single mutation this request asks for. `saved` wins over `watched`.
    pub fn mutation(&self) -> Option<(FlagField, Flag)> {
        if let Some(flag) = token(&self.saved) {
            return Some((FlagField::Saved, flag));
        }
        token(&self.watched).map(|flag| (FlagField::Watched, flag))
    }
}

fn token(value: &Option<Value>) -> Option<Flag> {
    match value {
        Some(Value::String(s)) => Flag::from_param(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_takes_precedence() {
        let body = UpdateMovieState::from_body(br#"{"watched":"true","saved":"false"}"#);
        assert_eq!(body.mutation(), Some((FlagField::Saved, Flag::False)));
    }

    #[test]
    fn test_invalid_saved_falls_through_to_watched() {
        let body = UpdateMovieState::from_body(br#"{"watched":"true","saved":"yes"}"#);
        assert_eq!(body.mutation(), Some((FlagField::Watched, Flag::True)));

        let body = UpdateMovieState::from_body(br#"{"watched":"false","saved":""}"#);
        assert_eq!(body.mutation(), Some((FlagField::Watched, Flag::False)));
    }

    #[test]
    fn test_nothing_valid() {
        assert_eq!(UpdateMovieState::from_body(b"").mutation(), None);
        assert_eq!(UpdateMovieState::from_body(b"not json").mutation(), None);
        assert_eq!(
            UpdateMovieState::from_body(br#"{"watched":true,"saved":"True"}"#).mutation(),
            None
        );
    }
}
