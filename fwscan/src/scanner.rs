//! The Window Scanner: slides a blocksize-wide window over every byte
//! offset of the image, driving the user transform, the signature engine,
//! and the string searcher. Byte-by-byte, not block-aligned, because the
//! whole point is finding filesystems whose alignment inside the image is
//! unknown.

use magic::{SignatureEngine, StringSearcher};

use crate::reporter::Reporter;
use crate::transform::Transform;

pub struct Scanner<'a> {
    image: &'a [u8],
    blocksize: usize,
    transform: Box<dyn Transform>,
    engine: Option<&'a SignatureEngine>,
    searcher: Option<StringSearcher>,
    scratch: Vec<u8>,
}

impl<'a> Scanner<'a> {
    pub fn new(
        image: &'a [u8],
        blocksize: usize,
        transform: Box<dyn Transform>,
        engine: Option<&'a SignatureEngine>,
        searcher: Option<StringSearcher>,
    ) -> Scanner<'a> {
        Scanner {
            image,
            blocksize,
            transform,
            engine,
            searcher,
            scratch: vec![0u8; blocksize],
        }
    }

    /// Number of starting offsets this scan will visit: `max(0, F - B + 1)`.
    pub fn iteration_count(&self) -> usize {
        if self.image.len() < self.blocksize {
            0
        } else {
            self.image.len() - self.blocksize + 1
        }
    }

    /// Runs the full byte-by-byte scan, reporting every match found through
    /// `reporter`. The transform is invoked exactly once per starting
    /// offset.
    pub fn run(&mut self, reporter: &mut Reporter) {
        self.transform.init(self.blocksize);

        let iterations = self.iteration_count();
        for startpos in 0..iterations {
            self.scratch.copy_from_slice(&self.image[startpos..startpos + self.blocksize]);
            self.transform.apply(&mut self.scratch);

            if let Some(searcher) = self.searcher.as_mut() {
                let found = searcher.search(&self.scratch, startpos as u64);
                reporter.report_string_matches(&found);
            }

            if let Some(engine) = self.engine {
                let found = engine.scan(&self.scratch, self.blocksize, startpos as u64);
                reporter.report_signature_matches(&found);
            }
        }

        self.transform.teardown();
        reporter.report_nothing_found();
    }
}
