//! Entry point: parse arguments, validate the database, run the scan, and
//! translate failures into process exit codes.

use std::process;

use fwscan::{cli, logging, reporter::Reporter, scanner::Scanner, transform::IdentityTransform, AppError};
use magic::{SignatureEngine, StringSearcher};

fn run() -> Result<(), AppError> {
    let config = cli::parse(std::env::args_os())?;

    logging::init(false);
    better_panic::install();

    println!("fwscan {} -- firmware filesystem scanner", env!("CARGO_PKG_VERSION"));

    let database = magic::database::builtin();
    magic::validate(&database).map_err(AppError::Database)?;

    let image = std::fs::read(&config.file).map_err(|source| AppError::Io {
        path: config.file.clone(),
        source,
    })?;

    log::info!(
        "scanning {:?} ({} bytes) with blocksize {}",
        config.file,
        image.len(),
        config.blocksize
    );

    let engine = if config.nosearch {
        None
    } else {
        Some(SignatureEngine::new(database))
    };
    let searcher = config
        .pattern
        .map(|bytes| StringSearcher::new(bytes, config.match_word));

    let mut scanner = Scanner::new(
        &image,
        config.blocksize,
        Box::new(IdentityTransform::default()),
        engine.as_ref(),
        searcher,
    );
    let mut reporter = Reporter::new(config.show_invalid);
    scanner.run(&mut reporter);

    log::info!("scan complete");
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("fwscan: {}", e);
        process::exit(e.exit_code());
    }
}
