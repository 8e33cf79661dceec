use clap::{Parser, Subcommand};

mod audio;
mod commands;

#[derive(Parser)]
#[command(name = "cadence-cli", version, about = "Cadence step-sequence timer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a sequence in the terminal
    Run(commands::run::RunArgs),
    /// User preset management
    Preset {
        #[command(subcommand)]
        action: commands::preset::PresetAction,
    },
    /// Theme catalog
    Theme {
        #[command(subcommand)]
        action: commands::theme::ThemeAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Preset { action } => commands::preset::run(action),
        Commands::Theme { action } => commands::theme::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
