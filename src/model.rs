use core::fmt;
use std::str::FromStr;

use anyhow::bail;
use geo::Point;
use serde::{Deserialize, Serialize};

/// Region grouping a location page is published under.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Country {
    /// Domestic listings, paged by prefecture.
    #[serde(rename = "JP")]
    Jp,
    /// International listings, paged by country code.
    #[serde(rename = "EN")]
    En,
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Country {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "JP" => Self::Jp,
            "EN" => Self::En,
            _ => bail!("Unknown country group: {s}"),
        })
    }
}

impl Country {
    /// Every country group, in crawl order.
    pub fn all() -> Vec<Self> {
        vec![Country::Jp, Country::En]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Jp => "JP",
            Self::En => "EN",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub name: String,
    pub address: String,
    #[serde(with = "lat_lng")]
    pub location: Point,
    pub country: Country,
}

/// Points are stored as `x = latitude, y = longitude` and written as `[lat, lng]`.
mod lat_lng {
    use geo::Point;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(point: &Point, serializer: S) -> Result<S::Ok, S::Error> {
        point.x_y().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Point, D::Error> {
        let (lat, lng) = <(f64, f64)>::deserialize(deserializer)?;
        Ok(Point::new(lat, lng))
    }
}
