// ABOUTME: Entry point for the apiary binary.
// ABOUTME: Wires config, logging, prober, and reporter together for one run.

mod cli;

use apiary::config::Config;
use apiary::error::Result;
use apiary::logging::{self, LogSink};
use apiary::probe::{ProbePolicy, Prober};
use apiary::report::{self, Reporter};
use clap::Parser;
use cli::Cli;
use std::env;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(path) => Config::load(&path)?,
        None => {
            let cwd = env::current_dir()?;
            Config::discover(&cwd)?
        }
    };

    let sink = LogSink::open(&config.log_file)?;
    logging::init(sink.clone(), cli.verbose);

    tracing::info!("healthcheck started");

    let policy = ProbePolicy::from_config(&config)?;
    let prober = Prober::new(policy);
    let results = prober.run(&config.cowrie.hosts, config.cowrie.port).await;

    let summary = report::summarize(&results);

    let mut reporter = Reporter::new(Box::new(sink));
    reporter.emit(&summary)?;

    Ok(())
}
