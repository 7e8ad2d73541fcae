use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use feed_cli::cli::Cli;
use thinking_feed::{init_logging, EnvConfig};

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        let _ = writeln!(io::stderr(), "Error: {err:?}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

#[tokio::main]
async fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let env = EnvConfig::from_env();
    init_logging(cli.log.as_deref().or(env.log_filter.as_deref()));

    feed_cli::app::run(cli, env).await
}
