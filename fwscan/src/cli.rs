//! Command-line surface. clap 2.33's builder API, in the style this
//! workspace's `Cargo.toml` already pins `clap` for.

use clap::{App, Arg};

use crate::error::AppError;
use crate::pattern;

/// Fully validated run configuration. Everything a usage error could catch
/// has already been caught by the time a `Config` exists.
pub struct Config {
    pub file: String,
    pub blocksize: usize,
    pub nosearch: bool,
    pub show_invalid: bool,
    pub pattern: Option<Vec<u8>>,
    pub match_word: bool,
}

const MIN_BLOCKSIZE: usize = 128;
const DEFAULT_BLOCKSIZE: usize = 2048;
const MIN_PATTERN_LEN: usize = 2;

fn app() -> App<'static, 'static> {
    App::new("fwscan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Scans a firmware image for embedded filesystems under a per-block transform.")
        .arg(
            Arg::with_name("file")
                .long("file")
                .takes_value(true)
                .required(true)
                .help("Path to the firmware image"),
        )
        .arg(
            Arg::with_name("blocksize")
                .long("blocksize")
                .takes_value(true)
                .help("Window size in bytes (default 2048, minimum 128)"),
        )
        .arg(
            Arg::with_name("nosearch")
                .long("nosearch")
                .help("Disable signature-database matching"),
        )
        .arg(
            Arg::with_name("show-invalid")
                .long("show-invalid")
                .help("Also report invalid matches"),
        )
        .arg(
            Arg::with_name("string")
                .long("string")
                .takes_value(true)
                .help("Enable string search for this literal (length >= 2, backslash escapes allowed)"),
        )
        .arg(
            Arg::with_name("match-word")
                .long("match-word")
                .requires("string")
                .help("Require the pattern to be null-terminated in the window"),
        )
        .arg(
            Arg::with_name("usage")
                .long("usage")
                .help("Print usage and exit (alias for --help)"),
        )
}

/// Parses `argv`, validating every constraint that counts as a usage error
/// (a missing `--file`, a too-small `--blocksize`, a too-short `--string`).
/// `--version`/`--help`/`--usage` print their message and exit 0 directly,
/// without reaching a usage error.
pub fn parse<I, T>(args: I) -> Result<Config, AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = app().get_matches_from_safe(args).map_err(|e| match e.kind {
        clap::ErrorKind::HelpDisplayed | clap::ErrorKind::VersionDisplayed => e.exit(),
        _ => AppError::Usage(e.message),
    })?;

    if matches.is_present("usage") {
        // the original tool treats --usage as a separate long option that
        // behaves exactly like --help: print and exit 0.
        app().print_long_help().ok();
        println!();
        std::process::exit(0);
    }

    let file = matches
        .value_of("file")
        .expect("--file is required by clap")
        .to_string();
    let file = shellexpand::tilde(&file).into_owned();

    let blocksize = match matches.value_of("blocksize") {
        None => DEFAULT_BLOCKSIZE,
        Some(raw) => {
            let n: usize = raw
                .parse()
                .map_err(|_| AppError::Usage(format!("--blocksize {:?} is not an integer", raw)))?;
            if n < MIN_BLOCKSIZE {
                return Err(AppError::Usage(format!(
                    "--blocksize must be >= {}, got {}",
                    MIN_BLOCKSIZE, n
                )));
            }
            n
        }
    };

    let pattern = match matches.value_of("string") {
        None => None,
        Some(raw) => {
            let bytes = pattern::parse(raw)
                .map_err(|e| AppError::Usage(format!("--string: {}", e)))?;
            if bytes.len() < MIN_PATTERN_LEN {
                return Err(AppError::Usage(format!(
                    "--string must be at least {} bytes, got {}",
                    MIN_PATTERN_LEN,
                    bytes.len()
                )));
            }
            Some(bytes)
        }
    };

    Ok(Config {
        file,
        blocksize,
        nosearch: matches.is_present("nosearch"),
        show_invalid: matches.is_present("show-invalid"),
        pattern,
        match_word: matches.is_present("match-word"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(args: &[&str]) -> Config {
        parse(args).unwrap_or_else(|e| panic!("expected success, got {:?}", e))
    }

    #[test]
    fn defaults_apply_when_only_file_given() {
        let cfg = parse_ok(&["fwscan", "--file", "image.bin"]);
        assert_eq!(cfg.blocksize, DEFAULT_BLOCKSIZE);
        assert!(!cfg.nosearch);
        assert!(!cfg.show_invalid);
        assert!(cfg.pattern.is_none());
        assert!(!cfg.match_word);
    }

    #[test]
    fn blocksize_below_minimum_is_a_usage_error() {
        let err = parse(&["fwscan", "--file", "image.bin", "--blocksize", "64"]).unwrap_err();
        assert!(matches!(err, AppError::Usage(_)));
    }

    #[test]
    fn string_shorter_than_minimum_is_a_usage_error() {
        let err = parse(&["fwscan", "--file", "image.bin", "--string", "x"]).unwrap_err();
        assert!(matches!(err, AppError::Usage(_)));
    }

    #[test]
    fn string_with_escapes_is_parsed_to_raw_bytes() {
        let cfg = parse_ok(&["fwscan", "--file", "image.bin", "--string", "a\\0b"]);
        assert_eq!(cfg.pattern, Some(vec![b'a', 0, b'b']));
    }

    #[test]
    fn match_word_sets_flag() {
        let cfg = parse_ok(&["fwscan", "--file", "image.bin", "--string", "needle", "--match-word"]);
        assert!(cfg.match_word);
    }
}
