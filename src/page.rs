//! Store extraction from a single location page.
//!
//! Each store on a page carries a map link (`//maps.google.com/maps?q=NAME@LAT,LNG&zoom`)
//! and an address span (`<span class="store_address">...</span>`). Both are scanned
//! independently and paired by position, so the i-th link belongs to the i-th address.

use geo::Point;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::{error::EntryError, Country, Overrides, StoreRecord};

static MAP_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"//maps\.google\.com/maps\?q=(.*)&zoom").expect("hardcoded"));
static ADDRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<span class="store_address">(.*)</span>"#).expect("hardcoded"));

pub fn parse(markup: &str, country: Country, overrides: &Overrides) -> Vec<StoreRecord> {
    let addresses: Vec<&str> = ADDRESS
        .captures_iter(markup)
        .map(|x| x.get(1).map_or("", |m| m.as_str()))
        .collect();

    let mut output = Vec::new();
    for (i, link) in MAP_LINK.captures_iter(markup).enumerate() {
        let payload = link.get(1).map_or("", |m| m.as_str());
        let (name, parsed) = match split_entry(payload) {
            Ok(x) => x,
            Err(e) => {
                warn!(%country, entry = i, "dropping store entry: {e}");
                continue;
            }
        };

        let location = overrides.lookup(name).unwrap_or(parsed);
        // some pages have fewer address spans than map links
        let address = addresses.get(i).copied().unwrap_or_default();

        output.push(StoreRecord {
            name: name.to_string(),
            address: address.to_string(),
            location,
            country,
        });
    }

    output
}

/// Splits `NAME@LAT,LNG` on the last `@`, since store names can contain one.
pub fn split_entry(payload: &str) -> Result<(&str, Point), EntryError> {
    let (name, coords) = payload
        .rsplit_once('@')
        .ok_or_else(|| EntryError::MissingSeparator(payload.to_string()))?;

    let parts: Vec<&str> = coords.split(',').collect();
    if parts.len() != 2 {
        return Err(EntryError::Components(parts.len(), coords.to_string()));
    }

    // nan and inf parse fine but can't be written back as JSON
    let coord = |x: &str| {
        x.trim()
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite())
            .ok_or_else(|| EntryError::Coordinate(x.to_string()))
    };
    Ok((name, Point::new(coord(parts[0])?, coord(parts[1])?)))
}
