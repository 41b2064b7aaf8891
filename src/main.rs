//! Flowchart - flowchart DSL converter
//!
//! Converts between flowchart text and laid-out graph JSON.
//!
//! # Usage
//!
//! ```bash
//! flowchart parse diagram.mmd --seed 1 > diagram.json
//! flowchart generate diagram.json
//! cat diagram.mmd | flowchart format -
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand};
use flowchart_core::{
    dsl::{self, GenerateConfig, ParseConfig},
    error::{FlowError, Result},
    graph::Graph,
    layout::{DepthPolicy, LayoutConfig, CELL_HEIGHT, CELL_WIDTH, JITTER},
    store::Flow,
};

/// Flowchart DSL converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log parser and layout decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse flowchart text into graph JSON
    Parse {
        /// Flowchart file, or '-' for stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Emit single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Render graph JSON as flowchart text
    Generate {
        /// Graph or saved flow JSON file, or '-' for stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Parse flowchart text and write it back in canonical form
    Format {
        /// Flowchart file, or '-' for stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(ClapArgs, Debug)]
struct LayoutArgs {
    /// Horizontal grid spacing
    #[arg(long, default_value_t = CELL_WIDTH)]
    cell_width: f64,

    /// Vertical grid spacing
    #[arg(long, default_value_t = CELL_HEIGHT)]
    cell_height: f64,

    /// Maximum random offset per coordinate (0 disables)
    #[arg(long, default_value_t = JITTER)]
    jitter: f64,

    /// Seed for reproducible jitter
    #[arg(long)]
    seed: Option<u64>,

    /// Layer by true longest path instead of first visit
    #[arg(long)]
    longest_path: bool,
}

impl LayoutArgs {
    fn to_config(&self) -> LayoutConfig {
        let policy = if self.longest_path {
            DepthPolicy::LongestPath
        } else {
            DepthPolicy::FirstVisit
        };
        let mut config = LayoutConfig::new()
            .with_cell_size(self.cell_width, self.cell_height)
            .with_jitter(self.jitter)
            .with_depth_policy(policy);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

#[derive(ClapArgs, Debug)]
struct OutputArgs {
    /// Direction written in the header line
    #[arg(short, long, default_value = "TD")]
    direction: String,

    /// Spaces to indent body lines
    #[arg(long, default_value_t = 0)]
    indent: usize,
}

impl OutputArgs {
    fn to_config(&self) -> GenerateConfig {
        GenerateConfig::new()
            .with_direction(&self.direction)
            .with_indent(self.indent)
    }
}

fn parse_input(path: &Path, config: &ParseConfig) -> Result<Graph> {
    if path == Path::new("-") {
        Ok(dsl::parse_with(&read_input(path)?, config))
    } else {
        dsl::parse_file(path, config)
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| FlowError::file_read(Path::new("<stdin>"), e))?;
        Ok(content)
    } else {
        std::fs::read_to_string(path).map_err(|e| FlowError::file_read(path, e))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    match args.command {
        Command::Parse {
            input,
            layout,
            compact,
        } => {
            let config = ParseConfig::new().with_layout(layout.to_config());
            let graph = parse_input(&input, &config)?;
            let json = if compact {
                serde_json::to_string(&graph)?
            } else {
                serde_json::to_string_pretty(&graph)?
            };
            println!("{}", json);
        }
        Command::Generate { input, output } => {
            let flow: Flow = serde_json::from_str(&read_input(&input)?)?;
            let graph = flow.into_graph();
            if let Err(e) = graph.validate() {
                tracing::warn!(error = %e, "input graph violates invariants");
            }
            print!("{}", dsl::generate_with(&graph, &output.to_config()));
        }
        Command::Format { input, output } => {
            let config = ParseConfig::new().with_layout(LayoutConfig::new().with_jitter(0.0));
            let graph = parse_input(&input, &config)?;
            print!("{}", dsl::generate_with(&graph, &output.to_config()));
        }
    }

    Ok(())
}
