//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::RawSettings;

/// Random tree generator for hierarchical test fixtures
#[derive(Parser, Debug)]
#[command(name = "treegen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (TOML, or INI with NodeCount/MinDepth/MinWidth)
    #[arg(short, long, global = true, env = "TREEGEN_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Requested number of nodes
    #[arg(short, long, global = true, allow_negative_numbers = true)]
    pub node_count: Option<i64>,

    /// Length of the guaranteed deep branch
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub min_depth: Option<i64>,

    /// Fan-out of the guaranteed wide branch
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub min_width: Option<i64>,

    /// Seed for reproducible trees
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Flags given on the command line, highest precedence over all config layers.
    pub fn overrides(&self) -> RawSettings {
        RawSettings {
            node_count: self.node_count,
            min_depth: self.min_depth,
            min_width: self.min_width,
            seed: self.seed,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all nodes in pre-order (default)
    List,

    /// Show generated tree
    Tree,

    /// Show size, depth and fan-out of a generated tree
    Stats,

    /// Show effective settings
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
