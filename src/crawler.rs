use std::{path::Path, time::Duration};

use anyhow::{bail, Result};
use rayon::{prelude::*, ThreadPoolBuilder};
use tracing::{debug, info, warn};
use ureq::Agent;

use crate::{
    catalog,
    error::FetchError,
    page,
    targets::{self, Target},
    utils::{agent, progress_bar},
    Game, GameTable, Overrides, StoreRecord,
};

pub trait Fetch: Sync {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

impl Fetch for Agent {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = match self.get(url).call() {
            Ok(x) => x,
            Err(ureq::Error::Status(code, _)) => return Err(FetchError::Status(code)),
            Err(e) => return Err(FetchError::Transport(e.to_string())),
        };

        let status = response.status();
        if !(200..300).contains(&status) {
            return Err(FetchError::Status(status));
        }
        Ok(response.into_string()?)
    }
}

#[derive(Clone, Debug)]
pub struct CrawlOptions {
    /// Requests in flight at once against the location host.
    pub jobs: usize,
    pub timeout: Duration,
    pub quiet: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            jobs: 4,
            timeout: Duration::from_secs(30),
            quiet: false,
        }
    }
}

/// Crawls every page of one game. A page that fails to load is logged and
/// contributes nothing; the remaining pages are still crawled.
///
/// Records come back in request order regardless of `jobs`.
pub fn crawl(
    game: &Game,
    overrides: &Overrides,
    fetcher: &impl Fetch,
    options: &CrawlOptions,
) -> Result<Vec<StoreRecord>> {
    let targets = targets::for_game(game);
    info!(game = %game.name, pages = targets.len(), "crawling");

    let pool = ThreadPoolBuilder::new()
        .num_threads(options.jobs.max(1))
        .build()?;
    let pb = progress_bar(targets.len() as u64, &game.name, options.quiet);

    let pages: Vec<Option<Vec<StoreRecord>>> = pool.install(|| {
        targets
            .par_iter()
            .map(|target| {
                let page = fetch_page(game, target, overrides, fetcher);
                pb.inc(1);
                page
            })
            .collect()
    });
    pb.finish_and_clear();

    let failed = pages.iter().filter(|x| x.is_none()).count();
    let records: Vec<StoreRecord> = pages.into_iter().flatten().flatten().collect();
    info!(
        game = %game.name,
        stores = records.len(),
        failed,
        "finished crawl"
    );

    Ok(records)
}

fn fetch_page(
    game: &Game,
    target: &Target,
    overrides: &Overrides,
    fetcher: &impl Fetch,
) -> Option<Vec<StoreRecord>> {
    match fetcher.fetch(&target.url) {
        Ok(markup) => {
            let records = page::parse(&markup, target.country, overrides);
            debug!(
                game = %game.name,
                country = %target.country,
                id = target.id,
                stores = records.len(),
                "fetched page"
            );
            Some(records)
        }
        Err(e) => {
            warn!(
                game = %game.name,
                country = %target.country,
                id = target.id,
                url = %target.url,
                "failed to fetch page: {e}"
            );
            None
        }
    }
}

/// Crawls the selected games (all of them when `only` is empty) and writes one
/// catalog file per game into `dir`.
pub fn run(
    games: &GameTable,
    overrides: &Overrides,
    options: &CrawlOptions,
    only: &[String],
    dir: &Path,
) -> Result<()> {
    for name in only {
        if games.get(name).is_none() {
            bail!("Unknown game: {name}");
        }
    }

    let agent = agent(options.timeout);
    for game in games.all() {
        if !only.is_empty() && !only.contains(&game.name) {
            continue;
        }

        let records = crawl(game, overrides, &agent, options)?;
        let path = catalog::save(dir, &game.name, &records)?;
        info!(game = %game.name, path = %path.display(), "wrote catalog");
    }

    Ok(())
}
