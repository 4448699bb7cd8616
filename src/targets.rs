use std::ops::Range;

use crate::{Country, Game};

impl Country {
    /// Page identifiers: prefecture codes for JP, country codes for EN.
    pub fn ids(&self) -> Range<u32> {
        match self {
            Self::Jp => 0..47,
            Self::En => 1000..1020,
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Jp => "prefecture",
            Self::En => "country",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub country: Country,
    pub id: u32,
    pub url: String,
}

/// Every page to request for one country group of a template.
pub fn sequence(template: &str, country: Country) -> impl Iterator<Item = Target> + '_ {
    let placeholder = format!("{{{}}}", country.placeholder());
    country.ids().map(move |id| Target {
        country,
        id,
        url: template.replace(&placeholder, &id.to_string()),
    })
}

/// All pages for a game, in country group order then identifier order.
/// Groups without a template contribute nothing.
pub fn for_game(game: &Game) -> Vec<Target> {
    Country::all()
        .into_iter()
        .filter_map(|country| game.url(country).map(|x| (country, x)))
        .flat_map(|(country, template)| sequence(template, country))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefecture_pages() {
        let targets: Vec<_> = sequence("http://x/?at={prefecture}&ct=1000", Country::Jp).collect();
        assert_eq!(targets.len(), 47);
        assert_eq!(targets[0].url, "http://x/?at=0&ct=1000");
        assert_eq!(targets[46].id, 46);
        assert_eq!(targets[46].url, "http://x/?at=46&ct=1000");
    }

    #[test]
    fn country_pages() {
        let ids: Vec<_> = sequence("http://x/?ct={country}", Country::En)
            .map(|x| x.id)
            .collect();
        assert_eq!(ids, (1000..1020).collect::<Vec<_>>());
    }

    #[test]
    fn game_order() {
        let game = Game {
            name: "test".to_string(),
            urls: [
                (Country::En, "http://en/?ct={country}".to_string()),
                (Country::Jp, "http://jp/?at={prefecture}".to_string()),
            ]
            .into_iter()
            .collect(),
        };

        let targets = for_game(&game);
        assert_eq!(targets.len(), 67);
        assert_eq!(targets[0].url, "http://jp/?at=0");
        assert_eq!(targets[47].url, "http://en/?ct=1000");
        assert!(targets[..47].iter().all(|x| x.country == Country::Jp));
    }

    #[test]
    fn no_templates() {
        let game = Game {
            name: "empty".to_string(),
            urls: Default::default(),
        };
        assert!(for_game(&game).is_empty());
    }
}
