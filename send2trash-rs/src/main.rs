use std::path::{self, Path, PathBuf};
use std::process;

use clap::Parser;
use send2trash::prelude::*;

/// Tool to send files to trash
#[derive(Parser, Debug)]
#[command(name = "send2trash", version)]
struct Cli {
    /// Files or directories to move to the trash
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print trashed files
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();
}

/// Windows recycles only fully qualified paths, so relative arguments are
/// resolved against the working directory first.
fn absolutize(file: &Path) -> Result<PathBuf> {
    path::absolute(file)
        .map_err(|err| TrashError::invalid_path(file.display().to_string(), err.to_string()))
}

fn run(cli: &Cli) -> Result<()> {
    for file in &cli.files {
        let target = absolutize(file)?;
        log::debug!("{} resolved to {}", file.display(), target.display());
        send_path_to_trash(&target)?;
        if cli.verbose {
            println!("Trashed «{}»", file.display());
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("send2trash: {err}");
        process::exit(1);
    }
}
