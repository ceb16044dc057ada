use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::RpcCredentials;
use crate::rpc::WalletRpc;
use crate::store::AddressBook;
use crate::{catalog, index, provision};

#[derive(Parser)]
#[command(name = "coinrank")]
#[command(version = "0.1")]
#[command(about = "Rank catalog tracks by crypto donations to per-track deposit addresses")]
pub struct Cli {
    /// Path to the wallet daemon's conf file (rpcuser/rpcpassword)
    #[arg(long, default_value = "~/.coinrank/wallet.conf")]
    pub conf: PathBuf,

    /// Path to the persisted account-key to address book
    #[arg(long, default_value = "addresses.json")]
    pub addresses: PathBuf,

    /// Path to the track catalog CSV (track, title, album, year)
    #[arg(long, default_value = "tracks.csv")]
    pub catalog: PathBuf,

    /// Path to the index page template
    #[arg(long, default_value = "templates/index.html")]
    pub template: PathBuf,

    /// Where the rendered index page is written
    #[arg(long, default_value = "output/index.html")]
    pub output: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Provision one wallet account and deposit address per catalog track
    CreateAccounts,
    /// Fetch balances and render the ranked index page
    GenerateIndex,
}

/// Entrypoint for CLI
pub fn run() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let conf_path = expand_home(&cli.conf);
    let creds = RpcCredentials::load(&conf_path)
        .with_context(|| format!("loading wallet config from \"{}\"", conf_path.display()))?;

    let mut book = AddressBook::load(&cli.addresses)?;
    println!(
        "Read {} addresses from \"{}\".",
        book.len(),
        cli.addresses.display()
    );

    let tracks = catalog::read_catalog(&cli.catalog)?;
    println!(
        "Read {} tracks from \"{}\".",
        tracks.len(),
        cli.catalog.display()
    );

    let wallet = WalletRpc::new(&creds.user, &creds.password, creds.port)?;

    match cli.command {
        Commands::CreateAccounts => {
            let created = provision::create_accounts(&tracks, &wallet, &mut book)?;
            book.save(&cli.addresses)?;
            println!(
                "Wrote {} addresses to \"{}\" ({} new).",
                book.len(),
                cli.addresses.display(),
                created
            );
        }

        Commands::GenerateIndex => {
            let rendered =
                index::generate_index(&tracks, &wallet, &book, &cli.template, &cli.output)?;
            println!(
                "Wrote {} ranked tracks to \"{}\".",
                rendered,
                cli.output.display()
            );
        }
    }
    Ok(())
}

/// Expands a leading `~` using $HOME; other paths pass through.
fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(rest),
        None => path.to_path_buf(),
    }
}
