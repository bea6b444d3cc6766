mod cli;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use cli::{CasePolicy, Cli};
use lexi_core::{LoadError, LookupEngine, SearchConfig, SearchResult};
use lexi_source::{FileSource, open_engine};
use thiserror::Error;
use tracing::{info, warn};

/// 自动补全展示条数。
const COMPLETION_LIMIT: usize = 10;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

fn init_tracing(cli: &Cli) {
    // --quiet：关闭；--verbose：RUST_LOG 或 info；默认：只认 RUST_LOG。
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "off".into())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let dict_path = cli.dict.clone().unwrap_or_else(default_dict_path);
    let config = SearchConfig {
        max_results: cli.max_results,
        min_score: cli.cutoff,
    };
    let engine = open_engine(&dict_path, config)?;

    let stdin = io::stdin();
    let mut out = io::stdout();
    writeln!(
        out,
        "lexi | dict: {} ({} words) | case: {:?}",
        dict_path.display(),
        engine.vocabulary().len(),
        cli.case
    )?;
    writeln!(out, "Type a word and press Enter. :help for commands, :q to quit.")?;
    repl(&engine, stdin.lock(), &mut out, cli.case)
}

fn default_dict_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("asset").join("dict.json")
}

/// REPL 中的一行输入。
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Help,
    /// 换词典文件（失败时保留原词典）
    Open(&'a str),
    /// 重新展示上一次命中的释义
    Again,
    Complete(&'a str),
    Words,
    Lookup(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let line = line.trim();
    let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    match head {
        ":q" | ":quit" | ":exit" => Command::Quit,
        ":help" | ":h" => Command::Help,
        ":open" => Command::Open(rest),
        ":again" => Command::Again,
        ":complete" => Command::Complete(rest),
        ":words" => Command::Words,
        _ => Command::Lookup(line),
    }
}

fn repl(
    engine: &LookupEngine,
    input: impl BufRead,
    out: &mut impl Write,
    case: CasePolicy,
) -> Result<(), CliError> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Command::Quit => break,
            Command::Help => print_help(out)?,
            Command::Open(path) if path.is_empty() => writeln!(out, "usage: :open <path>")?,
            Command::Open(path) => {
                let source = FileSource::new(path);
                match engine.reload_from(&source) {
                    Ok(()) => {
                        info!(path, "dictionary switched");
                        writeln!(out, "loaded {} ({} words)", path, engine.vocabulary().len())?;
                    }
                    Err(e) => {
                        warn!(path, error = %e, "dictionary reload failed");
                        writeln!(out, "could not load {path}: {e} (keeping current dictionary)")?;
                    }
                }
            }
            Command::Again => match engine.last_found() {
                Some(found) => writeln!(out, "{}:{}", found.word, found.definition)?,
                None => writeln!(out, "nothing to repeat yet")?,
            },
            Command::Complete(prefix) => {
                let words = engine.completions(&case.apply(prefix), COMPLETION_LIMIT);
                if words.is_empty() {
                    writeln!(out, "(no completions)")?;
                } else {
                    writeln!(out, "{}", words.join(" "))?;
                }
            }
            Command::Words => writeln!(out, "{} words", engine.vocabulary().len())?,
            Command::Lookup(word) => {
                let word = case.apply(word);
                let result = engine.search(&word);
                render(out, &word, &result)?;
            }
        }
        out.flush()?;
    }
    Ok(())
}

fn render(out: &mut impl Write, word: &str, result: &SearchResult) -> io::Result<()> {
    match result {
        SearchResult::Found(found) => writeln!(out, "{word}:{}", found.definition),
        SearchResult::Suggested(list) => {
            let words: Vec<&str> = list.words().collect();
            writeln!(out, "Did you mean: {}", words.join(" "))
        }
        SearchResult::NotFound => writeln!(out, "No matching words"),
    }
}

fn print_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "<word>             look up a word")?;
    writeln!(out, ":open <path>       switch to another dictionary file")?;
    writeln!(out, ":again             show the last definition again")?;
    writeln!(out, ":complete <prefix> list words starting with prefix")?;
    writeln!(out, ":words             number of words in the dictionary")?;
    writeln!(out, ":q                 quit")
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn engine() -> LookupEngine {
        let engine = LookupEngine::new().max_results(5).min_score(0.5);
        engine
            .reload(br#"{"pot": "1. a vessel 2. a sum", "pit": "a hole", "rain": "water"}"#)
            .unwrap();
        engine
    }

    fn run_session(engine: &LookupEngine, input: &str, case: CasePolicy) -> String {
        let mut out = Vec::new();
        repl(engine, Cursor::new(input), &mut out, case).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command(":q"), Command::Quit);
        assert_eq!(parse_command(" :open  other.json "), Command::Open("other.json"));
        assert_eq!(parse_command(":complete ra"), Command::Complete("ra"));
        assert_eq!(parse_command("rain"), Command::Lookup("rain"));
        assert_eq!(parse_command("ice cream"), Command::Lookup("ice cream"));
    }

    #[test]
    fn lookup_suggest_and_miss() {
        let out = run_session(&engine(), "RAIN\npott\nzzzz\n", CasePolicy::Lower);
        assert_eq!(
            out,
            "rain:\n1. water\nDid you mean: pot pit\nNo matching words\n"
        );
    }

    #[test]
    fn preserve_policy_keeps_case() {
        let out = run_session(&engine(), "RAIN\n", CasePolicy::Preserve);
        assert_eq!(out, "No matching words\n");
    }

    #[test]
    fn again_repeats_last_hit() {
        let out = run_session(&engine(), ":again\npot\npott\n:again\n", CasePolicy::Lower);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "nothing to repeat yet");
        assert_eq!(lines.last().copied(), Some("2. a sum"));
        assert!(out.ends_with("pot:\n1. a vessel \n2. a sum\n"));
    }

    #[test]
    fn failed_open_keeps_dictionary() {
        let out = run_session(
            &engine(),
            ":open /definitely/not/here.json\nrain\n:q\npot\n",
            CasePolicy::Lower,
        );
        assert!(out.contains("keeping current dictionary"));
        assert!(out.contains("rain:\n1. water"));
        assert!(!out.contains("pot:"));
    }

    #[test]
    fn completions_follow_case_policy() {
        let out = run_session(&engine(), ":complete P\n:complete x\n:words\n", CasePolicy::Lower);
        assert_eq!(out, "pot pit\n(no completions)\n3 words\n");
    }
}
