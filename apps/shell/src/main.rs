mod commands;

use clap::{ArgAction, Parser, Subcommand};
use errata::kernel::config::{ErrataConfig, load_config};
use errata::logger::{LevelFilter, Logger};
use errata::CodeRegistry;
use std::path::PathBuf;
use tracing::debug;

/// Browse, describe and resolve errata error codes.
#[derive(Debug, Parser)]
#[command(name = "errata", version, about)]
struct Cli {
    /// Extra descriptions and formatter settings (TOML, JSON or YAML).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List described codes, optionally below a domain prefix.
    List {
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Print the description of a code.
    Describe { code: String },
    /// Resolve a native failure plus an optional code to a canonical code.
    Resolve {
        /// Full (`billing.invoice.overdue`) or partial (`billing`) code.
        #[arg(long)]
        code: Option<String>,
        /// Domain used when nothing more specific is known.
        #[arg(long)]
        domain: String,
        /// Treat the failure as an I/O error of this kind (e.g. `not-found`).
        #[arg(long, value_parser = commands::parse_io_kind)]
        io_kind: Option<std::io::ErrorKind>,
    },
    /// Normalize free text into a code fragment.
    Normalize { text: String },
    /// Render a record the way logs show it.
    Render {
        #[arg(long)]
        code: String,
        #[arg(long)]
        message: String,
        /// `key=value`, repeatable.
        #[arg(long = "context", value_parser = commands::parse_key_value)]
        context: Vec<(String, String)>,
        /// Repeatable.
        #[arg(long = "suggestion")]
        suggestions: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _logger = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .level(level_for(cli.verbose))
        .ansi(false)
        .init()?;

    let registry = CodeRegistry::with_builtins();
    let config = match &cli.config {
        Some(path) => {
            let config: ErrataConfig = load_config(Some(path))?;
            let applied = registry.apply_config(&config)?;
            debug!(applied, path = %path.display(), "Applied configured descriptions");
            config
        },
        None => ErrataConfig::default(),
    };

    let mut out = std::io::stdout().lock();
    match cli.command {
        Command::List { prefix } => commands::list(&mut out, &registry, prefix.as_deref()),
        Command::Describe { code } => commands::describe(&mut out, &registry, &code),
        Command::Resolve { code, domain, io_kind } => {
            commands::resolve(&mut out, &registry, code.as_deref(), &domain, io_kind)
        },
        Command::Normalize { text } => commands::normalize(&mut out, &text),
        Command::Render { code, message, context, suggestions } => commands::render(
            &mut out,
            &config,
            &commands::RenderRequest { code, message, context, suggestions },
        ),
    }
}

const fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
