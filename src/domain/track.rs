use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::key::AccountKey;

/// One catalog row, as read from the CSV.
///
/// The year is carried verbatim for display and never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track {
    pub track: String,
    pub title: String,
    pub album: String,
    pub year: String,
}

impl Track {
    pub fn account_key(&self) -> AccountKey {
        AccountKey::from_title_album(&self.title, &self.album)
    }
}

/// What the index template sees for a single track.
#[derive(Debug, Clone, Serialize)]
pub struct RankedTrack {
    pub track: String,
    pub title: String,
    pub album: String,
    pub year: String,
    pub address: String,
    pub balance: Decimal,
    pub balance_text: String,
}

impl RankedTrack {
    pub fn new(track: &Track, address: &str, balance: Decimal) -> Self {
        Self {
            track: track.track.clone(),
            title: track.title.clone(),
            album: track.album.clone(),
            year: track.year.clone(),
            address: address.to_string(),
            balance,
            balance_text: format!("{balance:.2}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn track() -> Track {
        Track {
            track: "2".to_string(),
            title: "Stronger".to_string(),
            album: "Graduation".to_string(),
            year: "2007".to_string(),
        }
    }

    #[test]
    fn test_balance_text_has_two_decimals() {
        let ranked = RankedTrack::new(&track(), "mo5W6jkZeNpLtQEVM1hWqE7S8avDL4p4TW", dec!(10));
        assert_eq!(ranked.balance_text, "10.00");

        let ranked = RankedTrack::new(&track(), "mo5W6jkZeNpLtQEVM1hWqE7S8avDL4p4TW", dec!(2.5));
        assert_eq!(ranked.balance_text, "2.50");
    }

    #[test]
    fn test_account_key_joins_title_and_album() {
        assert_eq!(track().account_key().as_str(), "StrongerGraduation");
    }
}
