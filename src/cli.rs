//! Command-line interface definition for contactbook
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand};

/// contactbook - manage your contacts from the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "contactbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the API base URL from config
    #[arg(long)]
    pub api_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Sign in and store the access token
    Login {
        /// Account username
        #[arg(short, long)]
        username: String,

        /// Account password
        #[arg(short, long, env = "CONTACTBOOK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account
    Register {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Account username
        #[arg(short, long)]
        username: String,

        /// Account password (at least 5 characters)
        #[arg(short, long, env = "CONTACTBOOK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored access token
    Logout,

    /// Show whether a token is stored and which language is active
    Whoami,

    /// List contacts
    List {
        /// Only show contacts whose first or last name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Edit a contact; omitted fields keep their current value
    Edit {
        /// Contact id
        id: i64,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        phone_number: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        note: Option<String>,
    },

    /// Delete a contact
    Delete {
        /// Contact id
        id: i64,
    },

    /// Show or set the display language (en, sk)
    Language {
        /// Language code to store
        code: Option<String>,
    },

    /// Start the interactive dashboard
    Shell,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            api_url: None,
            command: Commands::Shell,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default() {
        let cli = Cli::default();
        assert_eq!(cli.config, Some("config/config.yaml".to_string()));
        assert!(!cli.verbose);
        assert!(cli.api_url.is_none());
        assert!(matches!(cli.command, Commands::Shell));
    }

    #[test]
    fn test_cli_parse_login() {
        let cli =
            Cli::try_parse_from(["contactbook", "login", "-u", "ann", "-p", "secret"]).unwrap();
        if let Commands::Login { username, password } = cli.command {
            assert_eq!(username, "ann");
            assert_eq!(password, "secret");
        } else {
            panic!("Expected Login command");
        }
    }

    #[test]
    fn test_cli_parse_list_with_search() {
        let cli = Cli::try_parse_from(["contactbook", "list", "--search", "an"]).unwrap();
        if let Commands::List { search } = cli.command {
            assert_eq!(search, Some("an".to_string()));
        } else {
            panic!("Expected List command");
        }
    }

    #[test]
    fn test_cli_parse_edit_partial() {
        let cli = Cli::try_parse_from([
            "contactbook",
            "edit",
            "7",
            "--email",
            "a@b.com",
            "--note",
            "vip",
        ])
        .unwrap();
        if let Commands::Edit {
            id,
            first_name,
            email,
            note,
            ..
        } = cli.command
        {
            assert_eq!(id, 7);
            assert_eq!(first_name, None);
            assert_eq!(email, Some("a@b.com".to_string()));
            assert_eq!(note, Some("vip".to_string()));
        } else {
            panic!("Expected Edit command");
        }
    }

    #[test]
    fn test_cli_parse_delete() {
        let cli = Cli::try_parse_from(["contactbook", "delete", "3"]).unwrap();
        assert!(matches!(cli.command, Commands::Delete { id: 3 }));
    }

    #[test]
    fn test_cli_parse_api_url_override() {
        let cli =
            Cli::try_parse_from(["contactbook", "--api-url", "http://h:1", "whoami"]).unwrap();
        assert_eq!(cli.api_url, Some("http://h:1".to_string()));
        assert!(matches!(cli.command, Commands::Whoami));
    }

    #[test]
    fn test_cli_delete_requires_numeric_id() {
        assert!(Cli::try_parse_from(["contactbook", "delete", "abc"]).is_err());
    }
}
