use std::path::PathBuf;

use thiserror::Error;

use crate::Country;

/// A single page could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("failed to read response body: {0}")]
    Body(#[from] std::io::Error),
}

/// A map-link payload that doesn't look like `name@lat,lng`.
#[derive(Debug, Error, PartialEq)]
pub enum EntryError {
    #[error("no `@` separator in {0:?}")]
    MissingSeparator(String),

    #[error("expected two coordinates, found {0} in {1:?}")]
    Components(usize, String),

    #[error("invalid coordinate {0:?}")]
    Coordinate(String),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog for {game} not found at {path}, run the crawl first")]
    Missing { game: String, path: PathBuf },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed table: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("override for {0:?} has a non-finite coordinate")]
    Override(String),

    #[error("game name must not be empty")]
    EmptyName,

    #[error("game name {0} is reserved for the duplicate file")]
    ReservedName(String),

    #[error("game {0} is configured twice")]
    DuplicateGame(String),

    #[error("{game} {country} template is missing the {{{placeholder}}} placeholder")]
    MissingPlaceholder {
        game: String,
        country: Country,
        placeholder: &'static str,
    },

    #[error("{game} {country} template uses the {{{placeholder}}} placeholder of another group")]
    ForeignPlaceholder {
        game: String,
        country: Country,
        placeholder: &'static str,
    },
}
