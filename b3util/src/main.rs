//! Command-line wrapper around the treehash session API: hashes files (or
//! standard input) by feeding a streaming session and printing hex digests.

use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use treehash::{Blake3Hasher, StreamingHash};

#[derive(Parser)]
#[clap(
    name = "b3util",
    version,
    about = "Computes BLAKE3 digests of files or standard input."
)]
struct B3UtilArgs {
    /// Files to hash; standard input is hashed when none are given.
    files: Vec<PathBuf>,
}

fn initialize_tracing_subscriber() -> Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_file(true)
        .with_target(false);

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer.compact().with_writer(io::stderr))
        .init();

    Ok(())
}

fn main() -> Result<()> {
    initialize_tracing_subscriber()?;
    let args = B3UtilArgs::parse();

    let mut hasher = Blake3Hasher::new();

    if args.files.is_empty() {
        let read = hasher.feed_from(&mut io::stdin().lock())?;
        debug!("hashed {read} bytes from stdin");
        println!("{}  -", hasher.finalize()?);
        return Ok(());
    }

    for path in &args.files {
        let mut file =
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        let read = hasher
            .feed_from(&mut file)
            .with_context(|| format!("error reading {}", path.display()))?;
        debug!("hashed {read} bytes from {}", path.display());
        println!("{}  {}", hasher.finalize()?, path.display());
        hasher.reset();
    }

    Ok(())
}
