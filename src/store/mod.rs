use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::debug;

pub mod error;

use crate::domain::key::AccountKey;
use crate::store::error::StoreError;

/// Persistent map from account key to deposit address.
///
/// Backed by a flat JSON object on disk. The daemon owns the accounts
/// and addresses themselves; this book is the only local record of
/// which address belongs to which track.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AddressBook {
    addresses: BTreeMap<String, String>,
}

impl AddressBook {
    /// Loads the book, treating an absent file as an empty book.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!("no address book at {}, starting empty", path.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let addresses = serde_json::from_str(&contents)?;
        Ok(Self { addresses })
    }

    /// Writes the whole book, going through a sibling temp file and a
    /// rename so a crash mid-write cannot leave a truncated book.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&self.addresses)?)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    pub fn get(&self, key: &AccountKey) -> Option<&str> {
        self.addresses.get(key.as_str()).map(String::as_str)
    }

    /// Records a newly provisioned address. An existing entry is never
    /// replaced.
    pub fn insert(&mut self, key: &AccountKey, address: String) {
        self.addresses
            .entry(key.as_str().to_string())
            .or_insert(address);
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}
