use std::{collections::BTreeMap, fs::read_to_string, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{catalog, error::ConfigError, Country};

const BUILTIN: &str = include_str!("../data/games.yaml");

/// One game title and the location page template for each country group it is published in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub name: String,
    pub urls: BTreeMap<Country, String>,
}

impl Game {
    pub fn url(&self, country: Country) -> Option<&str> {
        self.urls.get(&country).map(|x| x.as_str())
    }
}

/// Ordered game table. The first game with a template for a country is the
/// base of that country's duplicate search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameTable(Vec<Game>);

impl GameTable {
    pub fn new(games: Vec<Game>) -> Result<Self, ConfigError> {
        let table = Self(games);
        table.validate()?;
        Ok(table)
    }

    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN).context("built-in game table is invalid")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)
            .with_context(|| format!("failed to read game table {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid game table {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self, ConfigError> {
        let games: Vec<Game> = serde_yaml::from_str(contents)?;
        Self::new(games)
    }

    pub fn all(&self) -> &[Game] {
        &self.0
    }

    pub fn get(&self, name: &str) -> Option<&Game> {
        self.0.iter().find(|x| x.name == name)
    }

    /// Games publishing a page for `country`, in table order.
    pub fn for_country(&self, country: Country) -> Vec<&Game> {
        self.0
            .iter()
            .filter(|x| x.urls.contains_key(&country))
            .collect()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = Vec::new();
        for game in &self.0 {
            if game.name.trim().is_empty() {
                return Err(ConfigError::EmptyName);
            }
            if game.name == catalog::DUPLICATES {
                return Err(ConfigError::ReservedName(game.name.clone()));
            }
            if seen.contains(&&game.name) {
                return Err(ConfigError::DuplicateGame(game.name.clone()));
            }
            seen.push(&game.name);

            for (country, template) in &game.urls {
                let placeholder = country.placeholder();
                if !template.contains(&format!("{{{placeholder}}}")) {
                    return Err(ConfigError::MissingPlaceholder {
                        game: game.name.clone(),
                        country: *country,
                        placeholder,
                    });
                }

                for other in Country::all().into_iter().filter(|x| x != country) {
                    if template.contains(&format!("{{{}}}", other.placeholder())) {
                        return Err(ConfigError::ForeignPlaceholder {
                            game: game.name.clone(),
                            country: *country,
                            placeholder: other.placeholder(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}
