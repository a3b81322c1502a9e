use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::error::SpellError;
use crate::index::{IndexOptions, WordIndex};
use crate::lexer::{Lexer, Token};

/// Runs the words of a text through an index.
pub struct Speller<'a> {
    index: &'a WordIndex,
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    pub misspelled: Vec<Token>,
    pub words_in_text: usize,
    pub words_in_dictionary: usize,
}

impl Report {
    pub fn words_misspelled(&self) -> usize {
        self.misspelled.len()
    }
}

/// Time spent in each phase of a full load/check/size/unload cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timings {
    pub load: Duration,
    pub check: Duration,
    pub size: Duration,
    pub unload: Duration,
}

impl Timings {
    pub fn total(&self) -> Duration {
        self.load + self.check + self.size + self.unload
    }
}

impl<'a> Speller<'a> {
    pub fn new(index: &'a WordIndex) -> Speller<'a> {
        Speller { index }
    }

    pub fn run(&self, text: &str) -> Report {
        let mut report = Report {
            words_in_dictionary: self.index.size(),
            ..Default::default()
        };

        let max_len = self.index.options().max_word_length.get();
        for token in Lexer::with_max_len(text, max_len) {
            report.words_in_text += 1;
            if !self.index.check(&token.lexeme) {
                report.misspelled.push(token);
            }
        }

        debug!(
            "checked {} words, {} misspelled",
            report.words_in_text,
            report.words_misspelled()
        );
        report
    }
}

/// Loads `dictionary`, checks every word of `text` against it, then unloads it.
pub fn check_file(
    dictionary: &Path,
    text: &Path,
    options: IndexOptions,
) -> Result<(Report, Timings), SpellError> {
    let mut timings = Timings::default();
    let mut index = WordIndex::with_options(options);

    let before = Instant::now();
    let loaded = index.load_file(dictionary)?;
    timings.load = before.elapsed();
    info!("loaded {} words from {}", loaded, dictionary.display());

    let contents = fs::read(text).map_err(|source| SpellError::Text {
        path: text.to_path_buf(),
        source,
    })?;
    let contents = String::from_utf8_lossy(&contents);

    let before = Instant::now();
    let mut report = Speller::new(&index).run(&contents);
    timings.check = before.elapsed();

    let before = Instant::now();
    report.words_in_dictionary = index.size();
    timings.size = before.elapsed();

    let before = Instant::now();
    index.unload();
    timings.unload = before.elapsed();

    Ok((report, timings))
}
