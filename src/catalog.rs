use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::key::AccountKey;
use crate::domain::track::Track;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("track catalog not found at \"{}\"", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read track catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog row: {0}")]
    Csv(#[from] csv::Error),

    #[error("tracks \"{first}\" and \"{second}\" both map to account key \"{key}\"")]
    KeyCollision {
        key: AccountKey,
        first: String,
        second: String,
    },
}

/// Reads the headerless 4-column track catalog, preserving row order.
pub fn read_catalog(path: &Path) -> Result<Vec<Track>, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::NotFound {
            path: path.to_path_buf(),
        });
    }
    parse_catalog(File::open(path)?)
}

/// Two rows whose (title, album) normalize to the same account key
/// would end up sharing one deposit address, so parsing rejects the
/// second row instead of letting it alias the first.
fn parse_catalog<R: Read>(rdr: R) -> Result<Vec<Track>, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(rdr);

    let mut tracks = Vec::new();
    let mut seen: HashMap<AccountKey, String> = HashMap::new();
    for row in reader.deserialize() {
        let track: Track = row?;
        let key = track.account_key();
        let label = format!("{} / {}", track.title, track.album);
        if let Some(first) = seen.insert(key.clone(), label.clone()) {
            return Err(CatalogError::KeyCollision {
                key,
                first,
                second: label,
            });
        }
        tracks.push(track);
    }
    Ok(tracks)
}
