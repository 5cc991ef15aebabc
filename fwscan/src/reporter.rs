//! Formats engine/string-search results to standard output in the classic
//! `0x<offset-hex> (<offset-dec>):<message>` shape. This is the only module
//! in the workspace allowed to write match lines to stdout; the `magic`
//! crate returns plain data.

use magic::{Match, StringMatch};

pub struct Reporter {
    show_invalid: bool,
    any_match_reported: bool,
}

impl Reporter {
    pub fn new(show_invalid: bool) -> Reporter {
        Reporter {
            show_invalid,
            any_match_reported: false,
        }
    }

    pub fn any_match_reported(&self) -> bool {
        self.any_match_reported
    }

    /// `0x<offset-hex> (<offset-dec>):<concatenated-fragments>`, prefixed
    /// `[INVALID]: ` for invalid matches, which are only emitted at all
    /// when `--show-invalid` was given.
    ///
    /// An invalid match is not a real finding — it's a rule the database
    /// flags as unreliable — so printing one does not count toward the
    /// "nothing found" hint below, matching the original tool's
    /// `success` bookkeeping, which is only ever set by a valid match.
    pub fn report_signature_matches(&mut self, matches: &[Match]) {
        for m in matches {
            if m.invalid {
                if !self.show_invalid {
                    continue;
                }
                println!("[INVALID]: 0x{:x} ({}):{}", m.offset, m.offset, m.message);
            } else {
                println!("0x{:x} ({}):{}", m.offset, m.offset, m.message);
                self.any_match_reported = true;
            }
        }
    }

    pub fn report_string_matches(&mut self, matches: &[StringMatch]) {
        for m in matches {
            println!("0x{:x} ({}):{}", m.offset, m.offset, m.suffix);
            self.any_match_reported = true;
        }
    }

    /// Emitted once, after the scan loop, iff nothing was ever reported.
    pub fn report_nothing_found(&self) {
        if !self.any_match_reported {
            log::info!("nothing found");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_match_counts_as_reported() {
        let mut reporter = Reporter::new(false);
        reporter.report_signature_matches(&[Match {
            offset: 0,
            message: " four letters".to_string(),
            invalid: false,
        }]);
        assert!(reporter.any_match_reported());
    }

    #[test]
    fn invalid_match_alone_does_not_count_as_reported() {
        let mut reporter = Reporter::new(true);
        reporter.report_signature_matches(&[Match {
            offset: 0,
            message: " flagged".to_string(),
            invalid: true,
        }]);
        assert!(!reporter.any_match_reported());
    }

    #[test]
    fn invalid_match_suppressed_without_show_invalid_still_does_not_count() {
        let mut reporter = Reporter::new(false);
        reporter.report_signature_matches(&[Match {
            offset: 0,
            message: " flagged".to_string(),
            invalid: true,
        }]);
        assert!(!reporter.any_match_reported());
    }
}
