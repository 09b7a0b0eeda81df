use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use klaxer_rules::rule::RuleKind;

/// Per-service alert rules: classify, exclude, enrich and route.
///
/// Loads the YAML rules file, compiles every service and either reports the
/// compiled rule sets or evaluates a single alert against them.
#[derive(Parser, Debug)]
#[command(name = "klaxer", version, about = "Per-service alert rules engine")]
pub struct CliArgs {
    /// Path to the rules file (default: RULES_PATH from the environment, then config/klaxer.yml)
    #[arg(long, global = true, env = "KLAXER_RULES_PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile the rules file and print rule counts per service
    Check(CheckArgs),
    /// Evaluate one alert and print the result as JSON
    Eval(EvalArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Only report one rule kind (classification, exclusion, enrichment, routing)
    #[arg(long)]
    pub kind: Option<RuleKind>,
}

#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Service whose rules apply (taken from the event when reading --stdin)
    #[arg(long)]
    pub service: Option<String>,

    /// Alert message text
    #[arg(long, conflicts_with = "stdin", required_unless_present = "stdin")]
    pub message: Option<String>,

    /// Read a JSON alert event ({"service": ..., "message": ...}) from stdin
    #[arg(long)]
    pub stdin: bool,
}
