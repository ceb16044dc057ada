use std::fmt;

/// Wallet account name derived from a catalog entry.
///
/// The daemon takes plain strings as account names, so the key keeps
/// only the ASCII letters and digits of the track's title and album,
/// in order. The same (title, album) pair always yields the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountKey(String);

impl AccountKey {
    pub fn from_title_album(title: &str, album: &str) -> Self {
        let mut key = String::with_capacity(title.len() + album.len());
        key.extend(title.chars().filter(char::is_ascii_alphanumeric));
        key.extend(album.chars().filter(char::is_ascii_alphanumeric));
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
