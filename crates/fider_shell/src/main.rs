mod platform;

use std::path::PathBuf;

use clap::Parser;
use platform::{LogDestination, ShellOptions};

/// Line-driven shell over the feedback site's routing and post search.
#[derive(Parser, Debug)]
#[command(name = "fider_shell", version)]
struct Cli {
    /// Location to open, e.g. `/` or `/?view=recent&tags=bug`.
    #[arg(default_value = "/")]
    location: String,
    /// RON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON bootstrap document the server embeds into the page.
    #[arg(long)]
    server_data: Option<PathBuf>,
    /// Overrides the configured log destination.
    #[arg(long, value_enum)]
    log: Option<LogDestination>,
    /// Writes the effective configuration to this path and exits.
    #[arg(long)]
    write_config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    platform::run_app(ShellOptions {
        location: cli.location,
        config_path: cli.config,
        server_data: cli.server_data,
        log: cli.log,
        write_config: cli.write_config,
    })
}
