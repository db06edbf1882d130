use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

use launch_board::cli::CriteriaArgs;
use launch_board::config::{self, Config};
use launch_board::export::export_site;
use launch_board::fetch::SpaceXClient;

#[derive(Debug, Parser)]
#[command(
    about = "Export every dashboard page to static HTML. Filter flags apply to the list page; search and outcome also apply to the filterable grid."
)]
struct Args {
    /// Path to YAML config file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Output directory (overrides app.out_dir)
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    criteria: CriteriaArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let mut cfg = config::load(Some(&args.config))?;
    if let Some(out) = &args.out {
        cfg.app.out_dir = out.to_string_lossy().to_string();
    }
    cfg.ensure_dirs()?;
    run(&cfg, &args.criteria).await
}

async fn run(cfg: &Config, flags: &CriteriaArgs) -> Result<()> {
    let client = SpaceXClient::from_config(cfg)?;
    let out_dir = PathBuf::from(&cfg.app.out_dir);
    let written = export_site(&client, cfg, flags, &out_dir).await?;

    println!("Wrote {} pages", written);
    println!("================================");
    println!(
        "Index full path: {}",
        absolute_path(&out_dir.join("index.html")).display()
    );
    Ok(())
}

fn absolute_path(p: &Path) -> PathBuf {
    if p.is_absolute() {
        return p.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(p),
        Err(_) => p.to_path_buf(),
    }
}
