use clap::Parser;
use hearth_core::engine;
use hearth_core::logger::Logger;
use hearth_core::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let logger = Logger::new();

    let result = match cli.command {
        Commands::Configure { config } => engine::configure(&config, &logger),
        Commands::Build { arch, build } => engine::build(&arch, &build, &logger),
    };

    if let Err(err) = result {
        logger.error(&format!("{:#}", err));
        std::process::exit(1);
    }
}
