// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use clap::{Parser, Subcommand};
use opr_cli::commands::{grade, version};

#[derive(Parser)]
#[command(name = "opr")]
#[command(about = "Grade OPR blocks straight from a factomd node", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and grade the OPR block at a height.
    ///
    /// Grading uses the bundled difficulty grader, which reads JSON OPR
    /// records. Mainnet entries are protobuf encoded and are all rejected by
    /// it, so point --factomd at a node carrying JSON records.
    Grade {
        /// Directory block height to grade
        #[arg(long)]
        height: u32,

        /// factomd v2 API endpoint (overrides OPR_FACTOMD_URL, default is mainnet)
        #[arg(long)]
        factomd: Option<String>,

        /// Concurrent entry fetches
        #[arg(long, short)]
        workers: Option<usize>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the protocol version in force at a height
    Version {
        #[arg(long)]
        height: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    opr_node::telemetry::init_logging("opr_node=info,opr_cli=info");

    let cli = Cli::parse();

    match cli.command {
        Commands::Grade { height, factomd, workers, json } => {
            grade::run(grade::GradeArgs { height, factomd, workers, json }).await
        }
        Commands::Version { height } => version::run(height),
    }
}
