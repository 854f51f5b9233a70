use apivault::cli::{Cli, Commands};
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => apivault::cli::commands::init::execute(&cli),
        Commands::Add { ref name } => apivault::cli::commands::add::execute(&cli, name),
        Commands::Get { ref name } => apivault::cli::commands::get::execute(&cli, name),
        Commands::GetId { ref name } => apivault::cli::commands::get_id::execute(&cli, name),
        Commands::List => apivault::cli::commands::list::execute(&cli),
        Commands::Remove { ref name, force } => {
            apivault::cli::commands::remove::execute(&cli, name, force)
        }
        Commands::Rotate { ref name } => apivault::cli::commands::rotate::execute(&cli, name),
        Commands::RotateMasterKey => apivault::cli::commands::rotate_master::execute(&cli),
        Commands::Version => apivault::cli::commands::version::execute(),
    };

    if let Err(e) = result {
        match e {
            apivault::errors::ApiVaultError::UserCancelled => {
                apivault::cli::output::info("Cancelled.")
            }
            _ => apivault::cli::output::error(&e.to_string()),
        }
        std::process::exit(1);
    }
}
