mod stream;
mod telemetry;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use vice_core::config::{ColorMode, Config, SymbolMode};
use vice_render::{Formatter, RenderOptions};

use crate::stream::pump;
use crate::telemetry::init_cli_tracing;

#[derive(Parser, Debug)]
#[command(name = "vice")]
#[command(about = "Pretty-print structured JSON logs for the terminal")]
struct Cli {
    #[arg(help = "Log file to read (stdin when omitted or '-')")]
    file: Option<PathBuf>,

    #[arg(long, help = "auto, always or never")]
    color: Option<ColorMode>,

    #[arg(long, help = "Use emoji level glyphs: auto, always or never")]
    symbols: Option<SymbolMode>,

    #[arg(long, help = "Residual summaries at least this long become a block")]
    detail_threshold: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    fn from_arg(file: Option<PathBuf>) -> Self {
        match file {
            Some(path) if path.as_os_str() != "-" => Self::File(path),
            _ => Self::Stdin,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_cli_tracing();

    let cfg = Config::load().context("load configuration")?;
    let cfg = apply_cli(cfg, &cli);
    let color = cfg.color.resolve(std::io::stdout().is_terminal());
    let symbols = cfg.symbols.resolve();
    debug!(color, symbols, threshold = cfg.detail_threshold, "resolved render options");

    let formatter = Formatter::new(RenderOptions::from_config(&cfg, color, symbols));
    let output = tokio::io::stdout();

    let stats = match Input::from_arg(cli.file) {
        Input::Stdin => {
            debug!("reading stdin");
            pump(tokio::io::stdin(), output, &formatter).await?
        }
        Input::File(path) => {
            debug!(path = %path.display(), "reading file");
            let file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("open {}", path.display()))?;
            pump(file, output, &formatter).await?
        }
    };

    debug!(lines = stats.lines, bytes = stats.bytes_out, "end of input");
    Ok(())
}

fn apply_cli(mut cfg: Config, cli: &Cli) -> Config {
    if let Some(color) = cli.color {
        cfg.color = color;
    }
    if let Some(symbols) = cli.symbols {
        cfg.symbols = symbols;
    }
    if let Some(threshold) = cli.detail_threshold {
        cfg.detail_threshold = threshold;
    }
    cfg
}
