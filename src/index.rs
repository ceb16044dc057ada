use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use tera::{Context as TemplateContext, Tera};

use crate::domain::track::{RankedTrack, Track};
use crate::rpc::WalletApi;
use crate::store::AddressBook;

/// Joins each catalog track with its deposit address and current
/// balance, ranked by balance descending.
///
/// Every track must already be provisioned: a key with no address in
/// the book is a hard error, never skipped or defaulted.
pub fn ranked_tracks(
    tracks: &[Track],
    wallet: &impl WalletApi,
    book: &AddressBook,
) -> anyhow::Result<Vec<RankedTrack>> {
    let mut views = Vec::with_capacity(tracks.len());
    for track in tracks {
        let key = track.account_key();
        let Some(address) = book.get(&key) else {
            bail!(
                "no deposit address recorded for \"{}\" (account key \"{key}\"); \
                 run create-accounts first",
                track.title
            );
        };
        let balance = wallet
            .balance(key.as_str())
            .with_context(|| format!("fetching balance for \"{key}\""))?;
        views.push(RankedTrack::new(track, address, balance));
    }
    // sort_by is stable, so equal balances keep catalog order
    views.sort_by(|a, b| b.balance.cmp(&a.balance));
    Ok(views)
}

/// Renders the ranked index page over the output file. Returns the
/// number of tracks rendered.
pub fn generate_index(
    tracks: &[Track],
    wallet: &impl WalletApi,
    book: &AddressBook,
    template_path: &Path,
    output_path: &Path,
) -> anyhow::Result<usize> {
    let views = ranked_tracks(tracks, wallet, book)?;

    let mut tera = Tera::default();
    tera.add_template_file(template_path, Some("index"))
        .with_context(|| format!("reading template \"{}\"", template_path.display()))?;
    let mut context = TemplateContext::new();
    context.insert("tracks", &views);
    let html = tera
        .render("index", &context)
        .context("rendering index template")?;

    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory \"{}\"", parent.display()))?;
    }
    let tmp = output_path.with_extension("html.tmp");
    fs::write(&tmp, html)
        .with_context(|| format!("writing \"{}\"", tmp.display()))?;
    fs::rename(&tmp, output_path)
        .with_context(|| format!("writing \"{}\"", output_path.display()))?;
    Ok(views.len())
}
