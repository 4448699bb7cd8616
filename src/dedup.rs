use std::{
    collections::{BTreeMap, HashSet},
    path::Path,
};

use anyhow::{Context, Result};
use itertools::Itertools;
use tracing::info;

use crate::{catalog, Country, GameTable, StoreRecord};

/// Stores of `country` present in every game that publishes pages for it.
///
/// Stores are matched on address alone, since the same venue is often named
/// differently across games. The result keeps the first game's records and
/// their order. A country served by a single game yields nothing.
pub fn country_duplicates<'a>(
    games: &GameTable,
    catalogs: &'a BTreeMap<String, Vec<StoreRecord>>,
    country: Country,
) -> Result<Vec<&'a StoreRecord>> {
    let available = games.for_country(country);
    if available.len() < 2 {
        return Ok(Vec::new());
    }

    let in_country = |name: &str| -> Result<Vec<&'a StoreRecord>> {
        Ok(catalogs
            .get(name)
            .with_context(|| format!("no catalog loaded for {name}"))?
            .iter()
            .filter(|x| x.country == country)
            .collect())
    };

    let mut common = in_country(&available[0].name)?;
    for game in &available[1..] {
        let addresses: HashSet<&str> = in_country(&game.name)?
            .into_iter()
            .map(|x| x.address.as_str())
            .collect();
        common.retain(|x| addresses.contains(x.address.as_str()));
    }

    Ok(common)
}

/// Records each game published for `country`, in table order.
pub fn country_counts<'a>(
    games: &'a GameTable,
    catalogs: &BTreeMap<String, Vec<StoreRecord>>,
    country: Country,
) -> Vec<(&'a str, usize)> {
    games
        .for_country(country)
        .into_iter()
        .map(|game| {
            let count = catalogs
                .get(&game.name)
                .map_or(0, |x| x.iter().filter(|x| x.country == country).count());
            (game.name.as_str(), count)
        })
        .collect()
}

/// Duplicates for every country group, concatenated in group order.
pub fn deduplicate(
    games: &GameTable,
    catalogs: &BTreeMap<String, Vec<StoreRecord>>,
) -> Result<Vec<StoreRecord>> {
    let mut output = Vec::new();
    for country in Country::all() {
        let found = country_duplicates(games, catalogs, country)?;
        let stores = country_counts(games, catalogs, country)
            .iter()
            .map(|(name, count)| format!("{name}={count}"))
            .join(", ");
        info!(
            %country,
            %stores,
            duplicates = found.len(),
            "matched stores"
        );
        output.extend(found.into_iter().cloned());
    }

    Ok(output)
}

/// Loads every configured game's catalog from `dir` and writes the duplicate
/// file next to them. Fails if any catalog is missing.
pub fn run(games: &GameTable, dir: &Path) -> Result<()> {
    let mut catalogs = BTreeMap::new();
    for game in games.all() {
        let records = catalog::load(dir, &game.name)?;
        info!(game = %game.name, stores = records.len(), "loaded catalog");
        catalogs.insert(game.name.clone(), records);
    }

    let duplicates = deduplicate(games, &catalogs)?;
    let path = catalog::save(dir, catalog::DUPLICATES, &duplicates)?;
    info!(
        duplicates = duplicates.len(),
        path = %path.display(),
        "wrote duplicates"
    );

    Ok(())
}
