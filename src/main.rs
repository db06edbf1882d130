use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use launch_board::cli::CriteriaArgs;
use launch_board::config;
use launch_board::console::{Command, Flow, Session};
use launch_board::fetch::SpaceXClient;
use launch_board::route::Route;

#[derive(Debug, Parser)]
#[command(author, version, about = "Browse SpaceX launches as a grid, a filterable list or a detail page")]
struct Cli {
    /// Path to YAML config file (defaults apply when it does not exist)
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Render one page and exit
    Open {
        /// Page path: /, /grid, /grid-filter, /list or /launch/<id>
        path: Route,

        #[command(flatten)]
        criteria: CriteriaArgs,

        /// Show the full details of item N (repeatable)
        #[arg(long = "expand", value_name = "N")]
        expand: Vec<usize>,
    },
    /// Interactive session reading commands from stdin (the default)
    Console {
        /// Page to start on
        #[arg(long, default_value = "/")]
        start: Route,
    },
    /// Print an example config file
    ExampleConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Cmd::Console { start: Route::Home });
    if let Cmd::ExampleConfig = command {
        print!("{}", config::example());
        return Ok(());
    }

    let cfg = config::load(Some(&cli.config))
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    let client = SpaceXClient::from_config(&cfg).context("failed to build HTTP client")?;
    info!(base_url = %client.base_url(), "using launch data source");
    let mut session = Session::new(&client, cfg.view.clone());

    match command {
        Cmd::Open {
            path,
            criteria,
            expand,
        } => {
            session.navigate(path).await;
            for cmd in criteria.commands() {
                session.execute(cmd).await?;
            }
            for n in expand {
                session.execute(Command::More(n)).await?;
            }
            print!("{}", session.render());
        }
        Cmd::Console { start } => {
            session.navigate(start).await;
            run_console(&mut session).await?;
        }
        Cmd::ExampleConfig => {}
    }
    Ok(())
}

async fn run_console(session: &mut Session<'_>) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout.write_all(session.render().as_bytes()).await?;
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let cmd = match Command::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(err) => {
                stdout.write_all(format!("{}\n", err).as_bytes()).await?;
                continue;
            }
        };
        match session.execute(cmd).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {
                stdout.write_all(session.render().as_bytes()).await?;
            }
            Err(err) => {
                warn!(%err, "command rejected");
                stdout.write_all(format!("{}\n", err).as_bytes()).await?;
            }
        }
    }
    Ok(())
}
