//! Decode a saved `getProgramAccounts` response and dump the records as JSON.
//!
//! Usage: `cargo run --example dump -- <accounts.json> [records.json]`
//!
//! The input is the `result` array of a `getProgramAccounts` call made with `"encoding":
//! "base64"`. Decoded records go to the output file, or stdout if none is given. Set `RUST_LOG`
//! to see per-account failures.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};

use sas_decode::*;
use serde::Deserialize;

#[derive(Deserialize)]
struct ProgramAccount {
    pubkey: String,
    account: Account,
}

#[derive(Deserialize)]
struct Account {
    data: AccountData,
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .ok_or("usage: dump <accounts.json> [records.json]")?;
    let output = args.next();

    let accounts: Vec<ProgramAccount> = serde_json::from_reader(BufReader::new(File::open(input)?))?;
    tracing::info!(count = accounts.len(), "found accounts, decoding");

    let report = BatchDecoder::new()
        .decode_accounts(accounts.into_iter().map(|a| (a.pubkey, a.account.data)));

    match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(&path)?);
            report.write_json(&mut writer)?;
            writer.flush()?;
            tracing::info!(%path, "wrote records");
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            report.write_json(&mut writer)?;
            writeln!(writer)?;
        }
    }

    for failure in report.failures.iter() {
        eprintln!("failed {}", failure);
    }
    eprintln!("{}", report.summary());
    Ok(())
}
