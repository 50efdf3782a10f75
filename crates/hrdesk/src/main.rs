// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HR Desk - an HR policy chat assistant.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod doctor;
mod serve;
mod shutdown;

use clap::{Parser, Subcommand};

/// HR Desk - answers HR policy questions from your own documents.
#[derive(Parser, Debug)]
#[command(name = "hrdesk", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the web chat server (default).
    Serve,
    /// Check configuration and connectivity to every backing service.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match hrdesk_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            hrdesk_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Doctor { plain } => doctor::run_doctor(&config, plain).await,
    };

    if let Err(e) = result {
        eprintln!("hrdesk: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc supports advancing the stats epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["hrdesk"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn doctor_accepts_plain_flag() {
        let cli = Cli::try_parse_from(["hrdesk", "doctor", "--plain"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Doctor { plain: true })));
    }

    #[test]
    fn compiled_defaults_are_valid() {
        let config = hrdesk_config::load_and_validate_str("").unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.retrieval.top_k, 4);
    }
}
