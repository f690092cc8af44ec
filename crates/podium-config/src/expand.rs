//! Environment references in `podium.toml` values.
//!
//! `source_dir = "${TALKS:-.}/slides"` reads `TALKS` from the environment and
//! falls back to `.` when it is unset.

use std::borrow::Cow;

use crate::ConfigError;

/// Name of a referenced variable that is not set.
struct Unset(String);

fn lookup(name: &str) -> Result<Option<String>, Unset> {
    match std::env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(Unset(name.to_owned())),
    }
}

/// Substitute `${NAME}` and `${NAME:-fallback}` in the value of `field`.
///
/// Values without `${` are returned as written, so a plain `$` in a path
/// survives.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    match shellexpand::env_with_context(value, lookup) {
        Ok(expanded) => Ok(Cow::into_owned(expanded)),
        Err(err) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", err.cause.0),
        }),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_value_without_references() {
        assert_eq!(expand_env("decks/intro", "slides.source_dir").unwrap(), "decks/intro");
        assert_eq!(expand_env("cost-$5", "slides.source_dir").unwrap(), "cost-$5");
    }

    #[test]
    fn test_reference_inside_path() {
        // SAFETY: no other test touches this variable
        unsafe {
            std::env::set_var("PODIUM_EXPAND_TALK", "rust-meetup");
        }
        assert_eq!(
            expand_env("talks/${PODIUM_EXPAND_TALK}/slides", "slides.source_dir").unwrap(),
            "talks/rust-meetup/slides"
        );
    }

    #[test]
    fn test_set_variable_wins_over_fallback() {
        // SAFETY: no other test touches this variable
        unsafe {
            std::env::set_var("PODIUM_EXPAND_ROOT", "/srv");
        }
        assert_eq!(
            expand_env("${PODIUM_EXPAND_ROOT:-/tmp}/deck", "slides.source_dir").unwrap(),
            "/srv/deck"
        );
    }

    #[test]
    fn test_fallback_for_unset_variable() {
        // SAFETY: no other test touches this variable
        unsafe {
            std::env::remove_var("PODIUM_EXPAND_ABSENT");
        }
        assert_eq!(
            expand_env("${PODIUM_EXPAND_ABSENT:-slides}", "slides.source_dir").unwrap(),
            "slides"
        );
    }

    #[test]
    fn test_unset_variable_names_field() {
        // SAFETY: no other test touches this variable
        unsafe {
            std::env::remove_var("PODIUM_EXPAND_NOPE");
        }
        let err = expand_env("${PODIUM_EXPAND_NOPE}/x", "slides.source_dir").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Environment variable error in slides.source_dir: ${PODIUM_EXPAND_NOPE} not set"
        );
    }
}
