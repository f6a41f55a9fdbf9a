//! Command implementations for the GSC CLI.
//!
//! Provides subcommands for exporting Search Console search analytics
//! to CSV and for listing the properties a service account can access.

use clap::Subcommand;

pub mod retrieve;
pub mod sites;

#[derive(Subcommand)]
pub enum Command {
    /// Export search analytics for a property to CSV
    Retrieve {
        /// Property URL exactly as registered in Search Console
        /// (e.g. https://example.com/ or sc-domain:example.com)
        #[arg(short, long)]
        site_url: String,

        /// Path to the service account JSON key file
        #[arg(short, long, default_value = "service-account-key.json")]
        key_file: String,

        /// Lookback horizon in months
        #[arg(short, long, default_value_t = gsc_api::date_window::DEFAULT_HORIZON_MONTHS)]
        months: u32,

        /// Output CSV path (defaults to gsc_data_<YYYYMMDD>.csv, named
        /// after the run date)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List the properties the service account has access to
    Sites {
        /// Path to the service account JSON key file
        #[arg(short, long, default_value = "creds.json")]
        key_file: String,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Retrieve {
            site_url,
            key_file,
            months,
            output,
        } => retrieve::run_retrieve(&site_url, &key_file, months, output.as_deref()).await,
        Command::Sites { key_file } => sites::run_sites(&key_file).await,
    }
}
