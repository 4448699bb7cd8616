use std::{collections::BTreeMap, fs::read_to_string, path::Path};

use anyhow::{Context, Result};
use geo::Point;

use crate::error::ConfigError;

const BUILTIN: &str = include_str!("../data/overrides.yaml");

/// Hand-checked coordinates for stores whose map link is wrong or missing
/// from the map provider. Matched on the exact store name.
#[derive(Clone, Debug, Default)]
pub struct Overrides(BTreeMap<String, Point>);

impl Overrides {
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN).context("built-in override table is invalid")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)
            .with_context(|| format!("failed to read override table {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid override table {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, (f64, f64)> = serde_yaml::from_str(contents)?;
        if let Some((name, _)) = raw
            .iter()
            .find(|(_, (lat, lng))| !lat.is_finite() || !lng.is_finite())
        {
            return Err(ConfigError::Override(name.clone()));
        }
        Ok(Self::from_iter(raw))
    }

    pub fn lookup(&self, name: &str) -> Option<Point> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(String, (f64, f64))> for Overrides {
    fn from_iter<T: IntoIterator<Item = (String, (f64, f64))>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, (lat, lng))| (name, Point::new(lat, lng)))
                .collect(),
        )
    }
}
