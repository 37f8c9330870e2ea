//! ---
//! seva_section: "05-external-interfaces"
//! seva_subsection: "binary"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Operator shell for the Apki Seva portal core."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use seva_common::{init_tracing, LoadedPortalConfig, PortalConfig};

mod provision;
mod shell;

const DEFAULT_CONFIG_FILE: &str = "seva.toml";

#[derive(Debug, Parser)]
#[command(
    author,
    disable_version_flag = true,
    about = "Apki Seva operator shell",
    long_about = None
)]
struct Cli {
    #[arg(
        short = 'V',
        long = "version",
        action = ArgAction::SetTrue,
        help = "Print version information and exit"
    )]
    version: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Read portal commands from stdin, one per line")]
    Shell {
        #[arg(long, short = 'c', help = "Configuration file (defaults to ./seva.toml when present)")]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.version {
        println!("sevactl {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    match cli.command {
        Some(Commands::Shell { config }) => {
            let loaded = match config {
                Some(path) => LoadedPortalConfig {
                    config: PortalConfig::from_path(&path)?,
                    source: Some(path),
                },
                None => PortalConfig::load_with_source(&[PathBuf::from(DEFAULT_CONFIG_FILE)])?,
            };
            init_tracing("sevactl", &loaded.config.logging)?;
            if let Some(source) = &loaded.source {
                tracing::info!(config = %source.display(), "configuration loaded");
            }
            let portal = provision::build_portal(&loaded.config)?;
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut shell = shell::Shell::new(portal, loaded.config.auth.auth_latency);
            shell.run(stdin.lock(), BufWriter::new(stdout.lock()))?;
        }
        None => {
            println!("nothing to do; try `sevactl shell` or `sevactl --help`");
        }
    }
    Ok(())
}
