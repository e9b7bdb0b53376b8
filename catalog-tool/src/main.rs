//! Packaging step that regenerates the streaming assets manifest.
//!
//! Run it over the asset directory right before a build is packaged:
//!
//! ```text
//! build-catalog ./StreamingAssets
//! build-catalog ./StreamingAssets --stdout > catalog.txt
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use streaming_assets::{CatalogBuilder, VfsError};

#[derive(Parser, Debug)]
#[command(
    name = "build-catalog",
    about = "Write the __catalog__.txt manifest for a streaming assets directory",
    long_about = "Walks ROOT recursively and records every file as a root-relative path, \
        one per line, in ROOT/__catalog__.txt. An existing manifest is always overwritten.\n\n\
        Packaging sidecars (*.meta) and the manifest itself are never listed.",
    version
)]
struct Args {
    /// Asset directory to catalog.
    root: PathBuf,

    /// Print the entries instead of writing the manifest.
    #[arg(long)]
    stdout: bool,
}

fn run(args: &Args) -> Result<(), VfsError> {
    let builder = CatalogBuilder::new(&args.root);
    if args.stdout {
        print!("{}", builder.build()?.to_manifest());
    } else {
        builder.write()?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Failed to catalog {}: {e}", args.root.display());
            ExitCode::FAILURE
        }
    }
}
