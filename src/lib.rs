pub mod config;
pub mod error;
pub mod index;
pub mod lexer;
pub mod shared;
pub mod speller;

pub use config::Config;
pub use error::{ConfigError, LoadError, SpellError};
pub use index::{
    hash, normalize, IndexOptions, OversizePolicy, WordIndex, BUCKETS, DEFAULT_MAX_WORD_LENGTH,
    MAX_WORD_LENGTH,
};
pub use shared::SharedIndex;
pub use speller::{Report, Speller, Timings};
