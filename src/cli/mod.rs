//! CLI module
//!
//! Zabbix runs the binary once per alert with positional arguments; this
//! module parses them, sets up logging and hands off to [`CommandHandler`].

pub mod commands;
pub mod context;
pub mod handlers;

use anyhow::Result;
use clap::Parser;

pub use commands::Cli;
pub use context::CliContext;
pub use handlers::CommandHandler;

pub struct CliApp;

impl CliApp {
    /// Parse command line arguments and send the notification
    pub fn run() -> Result<()> {
        let cli = Cli::parse();

        let context = CliContext::new(cli.config.clone(), cli.verbose)?;
        context.init_logging()?;

        let handler = CommandHandler::new(&context);
        if let Err(err) = handler.handle(&cli) {
            tracing::error!(category = err.category(), "{err}");
            return Err(err.into());
        }

        Ok(())
    }
}
