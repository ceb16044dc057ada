use anyhow::Context;
use log::info;

use crate::domain::track::Track;
use crate::rpc::WalletApi;
use crate::store::AddressBook;

/// Ensures every catalog track has a wallet account and a recorded
/// deposit address. Returns how many accounts were newly provisioned.
///
/// The wallet's getaccountaddress call mints a fresh address when
/// repeated for an account that already has one, which would break the
/// 1:1 mapping between track key and deposit address. So the decision
/// to provision is driven by the daemon's own account list, fetched
/// once up front, not by the local address book.
///
/// The book is only mutated in memory; the caller persists it after
/// this returns. An RPC failure mid-loop therefore aborts the run
/// without saving partial progress.
pub fn create_accounts(
    tracks: &[Track],
    wallet: &impl WalletApi,
    book: &mut AddressBook,
) -> anyhow::Result<usize> {
    let existing = wallet
        .list_accounts()
        .context("listing existing wallet accounts")?;
    info!("wallet knows {} accounts", existing.len());

    let mut created = 0;
    for track in tracks {
        let key = track.account_key();
        if existing.contains(key.as_str()) {
            continue;
        }
        let address = wallet
            .account_address(key.as_str())
            .with_context(|| format!("creating account \"{key}\""))?;
        println!("Created account {key} with address {address}");
        book.insert(&key, address);
        created += 1;
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::key::AccountKey;
    use crate::rpc::error::RpcError;
    use rust_decimal::Decimal;
    use std::cell::{Cell, RefCell};
    use std::collections::HashSet;

    struct FakeWallet {
        accounts: RefCell<HashSet<String>>,
        minted: Cell<u32>,
    }

    impl FakeWallet {
        fn with_accounts(names: &[&str]) -> Self {
            Self {
                accounts: RefCell::new(names.iter().map(|n| n.to_string()).collect()),
                minted: Cell::new(0),
            }
        }
    }

    impl WalletApi for FakeWallet {
        fn list_accounts(&self) -> Result<HashSet<String>, RpcError> {
            Ok(self.accounts.borrow().clone())
        }

        fn account_address(&self, account: &str) -> Result<String, RpcError> {
            self.accounts.borrow_mut().insert(account.to_string());
            self.minted.set(self.minted.get() + 1);
            Ok(format!("addr-{}", self.minted.get()))
        }

        fn balance(&self, _account: &str) -> Result<Decimal, RpcError> {
            Ok(Decimal::ZERO)
        }
    }

    fn track(n: &str, title: &str, album: &str, year: &str) -> Track {
        Track {
            track: n.to_string(),
            title: title.to_string(),
            album: album.to_string(),
            year: year.to_string(),
        }
    }

    fn key(title: &str, album: &str) -> AccountKey {
        AccountKey::from_title_album(title, album)
    }

    #[test]
    fn test_provisions_only_unknown_accounts() -> anyhow::Result<()> {
        let tracks = vec![
            track("1", "Black Skinhead", "Yeezus", "2013"),
            track("2", "Stronger", "Graduation", "2007"),
        ];
        let wallet = FakeWallet::with_accounts(&["BlackSkinheadYeezus"]);
        let mut book = AddressBook::default();
        book.insert(&key("Black Skinhead", "Yeezus"), "addr-old".to_string());

        let created = create_accounts(&tracks, &wallet, &mut book)?;

        assert_eq!(created, 1);
        assert_eq!(book.len(), 2);
        assert_eq!(book.get(&key("Black Skinhead", "Yeezus")), Some("addr-old"));
        assert_eq!(book.get(&key("Stronger", "Graduation")), Some("addr-1"));
        Ok(())
    }

    #[test]
    fn test_second_run_provisions_nothing() -> anyhow::Result<()> {
        let tracks = vec![
            track("1", "Black Skinhead", "Yeezus", "2013"),
            track("2", "Stronger", "Graduation", "2007"),
        ];
        let wallet = FakeWallet::with_accounts(&[]);
        let mut book = AddressBook::default();

        let created = create_accounts(&tracks, &wallet, &mut book)?;
        assert_eq!(created, 2);
        let after_first = book.clone();

        // the wallet now reports both accounts, so nothing is re-minted
        let created = create_accounts(&tracks, &wallet, &mut book)?;
        assert_eq!(created, 0);
        assert_eq!(book, after_first);
        assert_eq!(wallet.minted.get(), 2);
        Ok(())
    }

    #[test]
    fn test_known_account_with_lost_book_entry_is_not_rehealed() -> anyhow::Result<()> {
        // the wallet already has the account but the local book lost
        // its entry; provisioning skips it rather than minting a
        // second address, so the entry stays lost
        let tracks = vec![track("1", "Stronger", "Graduation", "2007")];
        let wallet = FakeWallet::with_accounts(&["StrongerGraduation"]);
        let mut book = AddressBook::default();

        let created = create_accounts(&tracks, &wallet, &mut book)?;

        assert_eq!(created, 0);
        assert!(book.is_empty());
        assert_eq!(wallet.minted.get(), 0);
        Ok(())
    }

    struct BrokenWallet;

    impl WalletApi for BrokenWallet {
        fn list_accounts(&self) -> Result<HashSet<String>, RpcError> {
            Ok(HashSet::new())
        }

        fn account_address(&self, account: &str) -> Result<String, RpcError> {
            Err(RpcError::MissingResult {
                method: format!("getaccountaddress {account}"),
            })
        }

        fn balance(&self, _account: &str) -> Result<Decimal, RpcError> {
            Ok(Decimal::ZERO)
        }
    }

    #[test]
    fn test_rpc_failure_aborts_provisioning() {
        let tracks = vec![track("1", "Stronger", "Graduation", "2007")];
        let mut book = AddressBook::default();

        let err = create_accounts(&tracks, &BrokenWallet, &mut book).unwrap_err();
        assert!(err.to_string().contains("StrongerGraduation"));
        assert!(book.is_empty());
    }
}
