mod cli;

use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use klaxer_core::{config::load_dotenv, AlertEvent, Config};
use klaxer_rules::{RuleEvaluator, RuleLoader, RuleStore};

use crate::cli::{CheckArgs, CliArgs, Command, EvalArgs};

fn main() -> Result<()> {
    load_dotenv();
    let config = Config::from_env();

    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    config.log_summary();

    let path = args.config.unwrap_or_else(|| config.rules.path.clone());
    let store = RuleLoader::new(&path)
        .compile()
        .with_context(|| format!("failed to load rules from {}", path.display()))?;

    match args.command {
        Command::Check(check_args) => check(&store, check_args),
        Command::Eval(eval) => evaluate(&store, eval),
    }
}

fn check(store: &RuleStore, args: CheckArgs) -> Result<()> {
    for name in store.services() {
        let counts = store.get(name.as_str())?.counts();
        match args.kind {
            Some(kind) => println!("{name}: {kind}={}", counts.get(kind)),
            None => println!("{name}: {counts}"),
        }
    }
    info!(services = store.len(), "rules configuration is valid");
    Ok(())
}

fn evaluate(store: &RuleStore, args: EvalArgs) -> Result<()> {
    let alert = if args.stdin {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("failed to read alert from stdin")?;
        let mut event: AlertEvent =
            serde_json::from_str(&input).context("failed to parse alert event JSON")?;
        if let Some(service) = args.service {
            event.service = service;
        }
        event
    } else {
        let service = args
            .service
            .context("--service is required together with --message")?;
        let message = args.message.context("--message is required")?;
        AlertEvent::new(service, message)
    };

    let evaluation = RuleEvaluator::evaluate(store, &alert.service, &alert)
        .with_context(|| format!("failed to evaluate alert {}", alert.id))?;
    println!("{}", serde_json::to_string_pretty(&evaluation)?);
    Ok(())
}
