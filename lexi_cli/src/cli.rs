use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lexi", about = "Look up word definitions, with suggestions for misspellings", version)]
pub struct Cli {
    /// Dictionary JSON file (defaults to the bundled asset/dict.json)
    #[arg(long, short = 'd', env = "LEXI_DICT")]
    pub dict: Option<PathBuf>,

    /// Maximum number of suggestions shown for a miss
    #[arg(long, default_value_t = 5)]
    pub max_results: usize,

    /// Minimum similarity (0.0-1.0) a suggestion must reach
    #[arg(long, default_value_t = 0.6)]
    pub cutoff: f64,

    /// How queries are cased before lookup
    #[arg(long, value_enum, default_value_t = CasePolicy::Lower)]
    pub case: CasePolicy,

    /// Enable verbose output
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress all logs, even when RUST_LOG is set
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,
}

/// 查询词进入引擎前的大小写策略（引擎本身区分大小写）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CasePolicy {
    /// Lower-case every query (the dictionary is expected to use lower-case keys)
    Lower,
    /// Pass queries through unchanged
    Preserve,
}

impl CasePolicy {
    pub fn apply(self, word: &str) -> String {
        match self {
            CasePolicy::Lower => word.to_lowercase(),
            CasePolicy::Preserve => word.to_owned(),
        }
    }
}
