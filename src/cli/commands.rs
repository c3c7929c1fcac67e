//! Command line definition
//!
//! Arguments follow the order of the Zabbix media type "Script parameters":
//! `{ALERT.SENDTO}`, `{ALERT.MESSAGE}`, then the HipChat account, token and
//! Zabbix frontend URL, then the two optional icon URLs.

use clap::Parser;
use std::path::PathBuf;
use zabbix_hipcard::config::MAX_TIMEOUT_SECS;

#[derive(Parser, Debug)]
#[command(name = "zabbix-hipcard")]
#[command(about = "Zabbix alert script that posts HipChat card notifications")]
#[command(version)]
pub struct Cli {
    /// HipChat room id or name ({ALERT.SENDTO})
    pub room_id: String,

    /// Alert message body ({ALERT.MESSAGE})
    pub message: String,

    /// HipChat account name, as in https://<tenant>.hipchat.com
    pub tenant: String,

    /// HipChat v2 API token with the send_notification scope
    pub token: String,

    /// Base URL of the Zabbix frontend, e.g. https://zabbix.example.com
    pub zabbix_url: String,

    /// Icon URL for OK (recovery) cards
    pub ok_icon: Option<String>,

    /// Icon URL for PROBLEM cards
    pub problem_icon: Option<String>,

    /// Settings file (default: ~/.zabbix-hipcard/config.toml when present)
    #[arg(short, long, env = "ZABBIX_HIPCARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// HTTP timeout in seconds, overriding the settings file
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SECS))]
    pub timeout_secs: Option<u64>,

    /// Print the request instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
