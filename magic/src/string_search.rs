//! The String Search component: finds all occurrences of a user byte
//! pattern in a window, with optional neighborhood context.
//!
//! The original tool keeps its "last reported offset" dedup cursor as a
//! function-static `last_pos`, which is awkward to reason about and hostile
//! to any future parallel scanner. Here it's a field on `StringSearcher`
//! instead. One `StringSearcher` is constructed per scan and threaded
//! through every window, so its dedup cursor naturally persists across
//! entries and windows for that one run, matching the original tool's
//! observed (if perhaps accidental) behaviour.

const CONTEXT_LEN: usize = 10;
const STRIDE_PAST_CONTEXT_MATCH: usize = 20; // NB_CHARS_BEFORE + NB_CHARS_AFTER

pub struct StringMatch {
    pub offset: u64,
    /// Rendered as ` stringmatch: <context><pattern><context>` (or, under
    /// `match_entire_word`, ` stringmatch: <pattern>` with no context).
    pub suffix: String,
}

pub struct StringSearcher {
    pattern: Vec<u8>,
    needle: Vec<u8>,
    match_entire_word: bool,
    last_reported: Option<u64>,
}

impl StringSearcher {
    pub fn new(pattern: Vec<u8>, match_entire_word: bool) -> StringSearcher {
        let mut needle = pattern.clone();
        if match_entire_word {
            needle.push(0);
        }
        StringSearcher {
            pattern,
            needle,
            match_entire_word,
            last_reported: None,
        }
    }

    /// Search `window` (which starts at absolute file offset `startpos`)
    /// for every occurrence of the configured pattern.
    pub fn search(&mut self, window: &[u8], startpos: u64) -> Vec<StringMatch> {
        let mut results = Vec::new();
        let blocksize = window.len();
        let mut offset = 0usize;

        loop {
            let rel = match find_subslice(&window[offset..], &self.needle) {
                Some(rel) => rel,
                None => break,
            };
            let abs_in_window = offset + rel;
            let found_pos = startpos + abs_in_window as u64;

            if self.last_reported == Some(found_pos) {
                // don't spam the user with the same absolute offset twice.
                offset = abs_in_window + 1;
            } else {
                let suffix = self.render(window, abs_in_window);
                results.push(StringMatch {
                    offset: found_pos,
                    suffix,
                });
                self.last_reported = Some(found_pos);

                // the two modes advance differently: match-word mode has no
                // context to skip past, so it only needs to clear the needle
                // itself, while context mode skips the extra bytes it just
                // rendered as neighborhood context.
                offset = if self.match_entire_word {
                    abs_in_window + self.needle.len()
                } else {
                    abs_in_window + self.pattern.len() + STRIDE_PAST_CONTEXT_MATCH
                };
            }

            if offset >= blocksize {
                break;
            }
        }

        results
    }

    fn render(&self, window: &[u8], idx: usize) -> String {
        let pattern_text = String::from_utf8_lossy(&self.pattern);
        if self.match_entire_word {
            return format!(" stringmatch: {}", pattern_text);
        }

        let before_start = idx.saturating_sub(CONTEXT_LEN);
        let before = mask_unprintable(&window[before_start..idx]);

        let after_start = idx + self.pattern.len();
        let after_end = (after_start + CONTEXT_LEN).min(window.len());
        let after = mask_unprintable(&window[after_start..after_end]);

        format!(" stringmatch: {}{}{}", before, pattern_text, after)
    }
}

fn mask_unprintable(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if (0x20..=0x7E).contains(&b) { b as char } else { '?' })
        .collect()
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
