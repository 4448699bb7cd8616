use std::{
    fs::{create_dir_all, read_to_string, write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{error::CatalogError, StoreRecord};

pub const DUPLICATES: &str = "duplicate";

pub fn path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.json"))
}

pub fn load(dir: &Path, game: &str) -> Result<Vec<StoreRecord>> {
    let path = path(dir, game);
    if !path.exists() {
        return Err(CatalogError::Missing {
            game: game.to_string(),
            path,
        }
        .into());
    }

    let contents =
        read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("invalid catalog {}", path.display()))
}

/// Writes records as pretty JSON. The output only depends on the records, so
/// unchanged input gives a byte-identical file.
pub fn save(dir: &Path, name: &str, records: &[StoreRecord]) -> Result<PathBuf> {
    create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = path(dir, name);

    let mut contents = serde_json::to_string_pretty(records)?;
    contents.push('\n');
    write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use super::*;
    use crate::Country;

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("json");
        let records = vec![StoreRecord {
            name: "タイトーステーション".to_string(),
            address: "東京都新宿区歌舞伎町1-26-1".to_string(),
            location: Point::new(35.6938, 139.7034),
            country: Country::Jp,
        }];

        let path = save(&out, "ongeki", &records).unwrap();
        let contents = read_to_string(&path).unwrap();
        assert!(contents.contains("東京都新宿区"));
        assert!(contents.ends_with("]\n"));

        assert_eq!(load(&out, "ongeki").unwrap(), records);
    }

    #[test]
    fn missing_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path(), "maimai").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::Missing { game, .. }) if game == "maimai"
        ));
    }
}
