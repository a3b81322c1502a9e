use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error};
use wordcheck::speller::check_file;
use wordcheck::{Config, OversizePolicy, Report, Timings};

#[derive(Parser, Debug)]
#[command(version, about = "Checks the spelling of a text against a word list")]
struct Args {
    /// Word list to load, one word per line; overrides the config file
    #[arg(long, short)]
    dictionary: Option<PathBuf>,

    /// Config file to read instead of the default location
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Longest word, in bytes, the dictionary stores
    #[arg(long, value_name = "BYTES")]
    max_length: Option<NonZeroUsize>,

    /// What to do with over-long words in the word list: skip, truncate or reject
    #[arg(long, value_name = "POLICY")]
    oversize: Option<OversizePolicy>,

    /// Print the line and column of every misspelled word
    #[arg(long, short)]
    positions: bool,

    /// Text to check
    text: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("wordcheck: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut config =
        Config::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(dictionary) = args.dictionary {
        config.dictionary = dictionary;
    }
    if let Some(max_length) = args.max_length {
        config.max_word_length = max_length;
    }
    if let Some(oversize) = args.oversize {
        config.oversize = oversize;
    }
    debug!("{:?}", config);

    let (report, timings) = check_file(&config.dictionary, &args.text, config.index_options())
        .with_context(|| {
            format!(
                "failed to check {} against {}",
                args.text.display(),
                config.dictionary.display()
            )
        })?;
    print_report(&report, &timings, args.positions);
    Ok(())
}

fn print_report(report: &Report, timings: &Timings, positions: bool) {
    println!("\nMISSPELLED WORDS\n");
    for token in &report.misspelled {
        if positions {
            println!(
                "{}:{}\t{}",
                token.start.line() + 1,
                token.start.column() + 1,
                token.lexeme
            );
        } else {
            println!("{}", token.lexeme);
        }
    }

    println!("\nWORDS MISSPELLED:     {}", report.words_misspelled());
    println!("WORDS IN DICTIONARY:  {}", report.words_in_dictionary);
    println!("WORDS IN TEXT:        {}", report.words_in_text);
    println!("TIME IN load:         {}", seconds(timings.load));
    println!("TIME IN check:        {}", seconds(timings.check));
    println!("TIME IN size:         {}", seconds(timings.size));
    println!("TIME IN unload:       {}", seconds(timings.unload));
    println!("TIME IN TOTAL:        {}\n", seconds(timings.total()));
}

fn seconds(d: Duration) -> String {
    format!("{:.2}", d.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_flags() {
        let args = Args::try_parse_from([
            "wordcheck",
            "--dictionary",
            "/tmp/words",
            "--oversize",
            "truncate",
            "--max-length",
            "20",
            "-p",
            "essay.txt",
        ])
        .unwrap();
        assert_eq!(args.dictionary, Some(PathBuf::from("/tmp/words")));
        assert_eq!(args.oversize, Some(OversizePolicy::Truncate));
        assert_eq!(args.max_length.map(NonZeroUsize::get), Some(20));
        assert!(args.positions);
        assert_eq!(args.text, PathBuf::from("essay.txt"));
    }

    #[test]
    fn bad_policy_is_rejected() {
        assert!(Args::try_parse_from(["wordcheck", "--oversize", "maybe", "t.txt"]).is_err());
    }

    #[test]
    fn zero_max_length_is_rejected() {
        assert!(Args::try_parse_from(["wordcheck", "--max-length", "0", "t.txt"]).is_err());
    }

    fn args_in(dir: &std::path::Path, extra: &[&str]) -> Args {
        let config = dir.join("config.json");
        std::fs::write(&config, "{}").unwrap();
        let mut argv = vec!["wordcheck".to_string(), "--config".to_string()];
        argv.push(config.display().to_string());
        argv.extend(extra.iter().map(|s| s.to_string()));
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn missing_dictionary_names_the_failed_step() {
        let dir = tempfile::tempdir().unwrap();
        let text = dir.path().join("text.txt");
        std::fs::write(&text, "hello").unwrap();
        let dict = dir.path().join("absent");
        let args = args_in(
            dir.path(),
            &["--dictionary", dict.to_str().unwrap(), text.to_str().unwrap()],
        );

        let err = run(args).unwrap_err();
        assert!(err.to_string().starts_with("failed to check"));
        assert!(format!("{err:#}").contains("cannot open word list"));
    }

    #[test]
    fn bad_config_names_the_failed_step() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("broken.json");
        std::fs::write(&config, "{ nope").unwrap();
        let args = Args::try_parse_from([
            "wordcheck",
            "--config",
            config.to_str().unwrap(),
            "t.txt",
        ])
        .unwrap();

        let err = run(args).unwrap_err();
        assert_eq!(err.to_string(), "failed to load configuration");
        assert!(format!("{err:#}").contains("invalid config"));
    }

    #[test]
    fn run_checks_text() {
        let dir = tempfile::tempdir().unwrap();
        let dict = dir.path().join("words");
        let text = dir.path().join("text.txt");
        std::fs::write(&dict, "hello\nworld\n").unwrap();
        std::fs::write(&text, "Hello wrld").unwrap();
        let args = args_in(
            dir.path(),
            &["-d", dict.to_str().unwrap(), text.to_str().unwrap()],
        );
        assert!(run(args).is_ok());
    }

    #[test]
    fn seconds_are_two_decimals() {
        assert_eq!(seconds(Duration::from_millis(1234)), "1.23");
        assert_eq!(seconds(Duration::ZERO), "0.00");
    }
}
