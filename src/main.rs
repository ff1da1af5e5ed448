//! contactbook - terminal client for a contacts server
//!
#![doc = "Main entry point for the contactbook client."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use contactbook::cli::{Cli, Commands};
use contactbook::commands;
use contactbook::config::Config;
use contactbook::forms::ContactField;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    let mut app = commands::build_app(&config)?;

    match cli.command {
        Commands::Login { username, password } => {
            tracing::info!("Signing in as {}", username);
            commands::login(&mut app, username, password).await
        }
        Commands::Register {
            email,
            username,
            password,
        } => {
            tracing::info!("Registering {}", username);
            commands::register(&mut app, email, username, password).await
        }
        Commands::Logout => commands::logout(&mut app),
        Commands::Whoami => {
            commands::whoami(&app);
            Ok(())
        }
        Commands::List { search } => commands::list(&mut app, search).await,
        Commands::Edit {
            id,
            first_name,
            last_name,
            phone_number,
            email,
            address,
            note,
        } => {
            let changes = [
                (ContactField::FirstName, first_name),
                (ContactField::LastName, last_name),
                (ContactField::PhoneNumber, phone_number),
                (ContactField::Email, email),
                (ContactField::Address, address),
                (ContactField::Note, note),
            ]
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .collect();
            commands::edit(&mut app, id, changes).await
        }
        Commands::Delete { id } => commands::delete(&mut app, id).await,
        Commands::Language { code } => commands::language(&mut app, code),
        Commands::Shell => {
            tracing::info!("Starting interactive shell");
            commands::shell::run_shell(app).await
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// `RUST_LOG` wins; otherwise `--verbose` selects debug output.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "contactbook=debug"
    } else {
        "contactbook=info"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
