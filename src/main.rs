use anyhow::Result;
use clap::{Parser, Subcommand};
use dulcevida_shared::Weekday;

mod cli {
    pub mod palette;
    pub mod schedule;
}

/// dulcevida - weekly shirt color schedule
#[derive(Parser)]
#[command(name = "dulcevida")]
#[command(about = "Plan the shirt color for each day of the week", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the week, marking today
    Show,
    /// Print today's color
    Today,
    /// Assign a color to a day
    Set {
        /// Day key (monday, tuesday, ...)
        day: Weekday,

        /// Palette color name or hex token
        color: String,

        /// Color name, required when the color is not in the palette
        #[arg(long)]
        name: Option<String>,
    },
    /// Push the whole week to the server
    Save,
    /// Restore the default schedule locally
    Reset {
        /// Also push the defaults to the server
        #[arg(long)]
        push: bool,
    },
    /// List the available colors
    Palette,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = dulcevida::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    dulcevida::observability::init_observability(
        &config.observability.log_level,
        config.observability.json,
    )?;

    match cli.command {
        Commands::Show => cli::schedule::show(config).await,
        Commands::Today => cli::schedule::today(config).await,
        Commands::Set { day, color, name } => {
            cli::schedule::set(config, day, color, name).await
        }
        Commands::Save => cli::schedule::save(config).await,
        Commands::Reset { push } => cli::schedule::reset(config, push).await,
        Commands::Palette => {
            cli::palette::list();
            Ok(())
        }
    }
}
