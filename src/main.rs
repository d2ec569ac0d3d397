use clap::{CommandFactory, Parser};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use check4duplicates::logging::init_logging;
use check4duplicates::prelude::*;

#[derive(Parser)]
#[command(name = "check4duplicates", version)]
#[command(about = "Search for an identical file in any of the supplied directories")]
#[command(long_about = "Search for an identical file in any of the supplied directories.\n\n\
    Exits 0 if no duplicate is found, 1 if a duplicate is found and 2 on any error.\n\
    The reference file is tagged \"Duplicate\" (red) or \"Unique\" (green).")]
struct Cli {
    /// Directory to search (can be given multiple times). If one does not
    /// exist the program exits 1 and the reference file is left untagged
    #[arg(short, long, value_name = "DIRECTORY")]
    directory: Vec<PathBuf>,

    /// Display the file found to be identical
    #[arg(short, long)]
    verbose: bool,

    /// Do not read or write file tags
    #[arg(long)]
    no_tags: bool,

    /// File to look for copies of
    reference_file: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let reference_file = cli.reference_file;
    let config = match ResolvedConfig::resolve(reference_file.clone(), cli.directory, cli.verbose) {
        Ok(config) => config,
        Err(ConfigError::NoDirectories) => {
            let _ = Cli::command().print_help();
            return ExitCode::from(EXIT_ERROR);
        }
        Err(e) => {
            let outcome = ScanOutcome::from(e);
            let _ = report_outcome(&outcome, &reference_file, cli.verbose, &mut io::stdout());
            return outcome.exit_code();
        }
    };
    debug!("Resolved configuration: {:?}", config);

    let mut tags: Box<dyn TagStore> = if cli.no_tags {
        Box::new(NoopTagStore)
    } else {
        platform_tag_store()
    };

    let stdout = io::stdout();
    match check_reference(&config, tags.as_mut(), &mut stdout.lock()) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
