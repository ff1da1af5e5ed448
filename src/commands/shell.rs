//! Interactive dashboard shell
//!
//! A readline loop over an [`App`]. Input is parsed by
//! [`parse_shell_command`]; words are case-insensitive and the rest of the
//! line is taken verbatim where a command expects free text.

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use thiserror::Error;

use super::render::{print_contacts, report_failure};
use crate::api::ContactId;
use crate::app::App;
use crate::error::Result;
use crate::forms::{ContactField, EditForm, SignInForm, SignUpForm};
use crate::i18n::Locale;
use crate::session::View;

/// Source of prompted input inside a command (edit fields, password)
pub trait LineReader {
    /// Read one line with `initial` prefilled; `Ok(None)` when the user
    /// cancels with Ctrl-C or end of input
    fn read_line(&mut self, prompt: &str, initial: &str) -> Result<Option<String>>;
}

impl LineReader for DefaultEditor {
    fn read_line(&mut self, prompt: &str, initial: &str) -> Result<Option<String>> {
        match self.readline_with_initial(prompt, (initial, "")) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Errors from parsing a shell line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType 'help' to see available commands")]
    UnknownCommand(String),

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },

    /// Argument could not be interpreted
    #[error("Invalid argument for {command}: {arg}")]
    InvalidArgument { command: String, arg: String },
}

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Show the filtered list
    List,
    /// Reload from the server
    Refresh,
    /// Set the search text (empty clears it)
    Search(String),
    /// Open the edit form for a contact
    Edit(ContactId),
    /// Delete a contact
    Delete(ContactId),
    /// Sign in; the password is prompted for when omitted
    Login {
        username: String,
        password: Option<String>,
    },
    /// Create an account
    Register {
        email: String,
        username: String,
        password: String,
    },
    /// Sign out
    Logout,
    /// Show or switch the language
    Language(Option<Locale>),
    /// Navigate to a view
    Open(View),
    /// Print usage
    Help,
    /// Leave the shell
    Exit,
    /// Blank line
    Empty,
}

fn parse_id(command: &str, arg: &str) -> std::result::Result<ContactId, ShellError> {
    if arg.is_empty() {
        return Err(ShellError::MissingArgument {
            command: command.to_string(),
            usage: format!("{} <id>", command),
        });
    }
    arg.parse().map_err(|_| ShellError::InvalidArgument {
        command: command.to_string(),
        arg: arg.to_string(),
    })
}

/// Parse one line of shell input
///
/// # Examples
///
/// ```
/// use contactbook::commands::shell::{parse_shell_command, ShellCommand};
///
/// assert_eq!(parse_shell_command("DELETE 4"), Ok(ShellCommand::Delete(4)));
/// assert_eq!(
///     parse_shell_command("search ann lee"),
///     Ok(ShellCommand::Search("ann lee".to_string()))
/// );
/// ```
pub fn parse_shell_command(input: &str) -> std::result::Result<ShellCommand, ShellError> {
    let trimmed = input.trim();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    match word.to_lowercase().as_str() {
        "" => Ok(ShellCommand::Empty),
        "help" | "?" => Ok(ShellCommand::Help),
        "exit" | "quit" => Ok(ShellCommand::Exit),
        "list" | "ls" => Ok(ShellCommand::List),
        "refresh" => Ok(ShellCommand::Refresh),
        "search" => Ok(ShellCommand::Search(rest.to_string())),
        "edit" => parse_id("edit", rest).map(ShellCommand::Edit),
        "delete" | "rm" => parse_id("delete", rest).map(ShellCommand::Delete),
        "login" => match args.as_slice() {
            [username] => Ok(ShellCommand::Login {
                username: username.to_string(),
                password: None,
            }),
            [username, password] => Ok(ShellCommand::Login {
                username: username.to_string(),
                password: Some(password.to_string()),
            }),
            _ => Err(ShellError::MissingArgument {
                command: "login".to_string(),
                usage: "login <username> [password]".to_string(),
            }),
        },
        "register" => match args.as_slice() {
            [email, username, password] => Ok(ShellCommand::Register {
                email: email.to_string(),
                username: username.to_string(),
                password: password.to_string(),
            }),
            _ => Err(ShellError::MissingArgument {
                command: "register".to_string(),
                usage: "register <email> <username> <password>".to_string(),
            }),
        },
        "logout" => Ok(ShellCommand::Logout),
        "language" | "lang" => {
            if rest.is_empty() {
                return Ok(ShellCommand::Language(None));
            }
            Locale::parse(rest)
                .map(|locale| ShellCommand::Language(Some(locale)))
                .ok_or_else(|| ShellError::InvalidArgument {
                    command: "language".to_string(),
                    arg: rest.to_string(),
                })
        }
        "open" => match rest.to_lowercase().as_str() {
            "login" | "signin" => Ok(ShellCommand::Open(View::SignIn)),
            "register" | "signup" => Ok(ShellCommand::Open(View::SignUp)),
            "dashboard" => Ok(ShellCommand::Open(View::Dashboard)),
            "" => Err(ShellError::MissingArgument {
                command: "open".to_string(),
                usage: "open <login|register|dashboard>".to_string(),
            }),
            other => Err(ShellError::InvalidArgument {
                command: "open".to_string(),
                arg: other.to_string(),
            }),
        },
        other => Err(ShellError::UnknownCommand(other.to_string())),
    }
}

fn print_help() {
    println!(
        "\n{}\n  list | refresh | search [text] | edit <id> | delete <id>\n  \
         login <username> [password] | register <email> <username> <password> | logout\n  \
         language [en|sk] | open <login|register|dashboard> | help | exit\n",
        "Commands:".bold()
    );
}

fn print_banner(app: &App) {
    println!(
        "\n{} {}\n",
        app.t("title").bold().cyan(),
        format!("[{}]", app.view()).dimmed()
    );
}

fn print_dashboard(app: &App) {
    let controller = app.contacts();
    if !controller.query().is_empty() {
        println!("{}: {}", app.t("search"), controller.query().cyan());
    }
    print_contacts(app, controller.filtered());
}

fn require_dashboard(app: &App) -> bool {
    if app.view() == View::Dashboard {
        return true;
    }
    println!("{}", app.t("notSignedIn").yellow());
    false
}

/// Run the edit form for `id` until it is saved or cancelled with Ctrl-C
async fn edit_contact<R: LineReader + ?Sized>(
    reader: &mut R,
    app: &mut App,
    id: ContactId,
) -> Result<()> {
    let contact = match app.contacts().find(id).cloned() {
        Some(contact) => contact,
        None => {
            println!("{}", app.t("notFound").yellow());
            return Ok(());
        }
    };

    let mut form = EditForm::open(app.contacts_mut(), contact);
    println!("\n{}", app.t("editTitle").bold());

    loop {
        for field in ContactField::ALL {
            let prompt = format!("{}: ", app.t(field.name()));
            match reader.read_line(&prompt, form.draft().get(field))? {
                Some(line) => form.set(field, line),
                None => {
                    app.contacts_mut().end_edit();
                    println!();
                    return Ok(());
                }
            }
        }

        match form.submit(app.contacts_mut()).await {
            Ok(_) => {
                println!("{}", app.t("saved").green());
                print_dashboard(app);
                return Ok(());
            }
            Err(e) => report_failure(app, &e),
        }
    }
}

/// Execute one command; returns `false` when the shell should exit
///
/// Command failures are reported and the shell keeps running; only input
/// errors from `reader` are returned.
pub async fn dispatch<R: LineReader + ?Sized>(
    reader: &mut R,
    app: &mut App,
    command: ShellCommand,
) -> Result<bool> {
    match command {
        ShellCommand::Empty => {}
        ShellCommand::Exit => return Ok(false),
        ShellCommand::Help => print_help(),
        ShellCommand::List => {
            if require_dashboard(app) {
                print_dashboard(app);
            }
        }
        ShellCommand::Refresh => {
            if require_dashboard(app) {
                match app.contacts_mut().refresh().await {
                    Ok(()) => print_dashboard(app),
                    Err(e) => report_failure(app, &e),
                }
            }
        }
        ShellCommand::Search(text) => {
            if require_dashboard(app) {
                app.contacts_mut().search(&text);
                print_dashboard(app);
            }
        }
        ShellCommand::Edit(id) => {
            if require_dashboard(app) {
                edit_contact(reader, app, id).await?;
            }
        }
        ShellCommand::Delete(id) => {
            if require_dashboard(app) {
                match app.contacts_mut().remove(id).await {
                    Ok(()) => {
                        println!("{}", app.t("deleted").green());
                        print_dashboard(app);
                    }
                    Err(e) => report_failure(app, &e),
                }
            }
        }
        ShellCommand::Login { username, password } => {
            let password = match password {
                Some(password) => password,
                None => match reader.read_line(&format!("{}: ", app.t("loginPassword")), "")? {
                    Some(line) => line,
                    None => return Ok(true),
                },
            };
            match app.sign_in(&SignInForm::new(username, password)).await {
                Ok(_) => {
                    println!("{}", app.t("signedIn").green());
                    print_dashboard(app);
                }
                Err(e) => report_failure(app, &e),
            }
        }
        ShellCommand::Register {
            email,
            username,
            password,
        } => match app.sign_up(&SignUpForm::new(email, username, password)).await {
            Ok(_) => println!("{}", app.t("registered").green()),
            Err(e) => report_failure(app, &e),
        },
        ShellCommand::Logout => match app.logout() {
            Ok(_) => println!("{}", app.t("signedOut")),
            Err(e) => report_failure(app, &e),
        },
        ShellCommand::Language(None) => {
            println!("{}: {}", app.t("language"), app.locale());
        }
        ShellCommand::Language(Some(locale)) => match app.set_locale(locale) {
            Ok(()) => println!("{}: {}", app.t("language"), locale),
            Err(e) => report_failure(app, &e),
        },
        ShellCommand::Open(view) => {
            let landed = app.navigate(view).await;
            print_banner(app);
            if landed == View::Dashboard {
                print_dashboard(app);
            }
        }
    }
    Ok(true)
}

/// Run the interactive shell until `exit` or end of input
pub async fn run_shell(mut app: App) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    if app.view() == View::Dashboard {
        app.navigate(View::Dashboard).await;
    }
    print_banner(&app);
    if app.view() == View::Dashboard {
        print_dashboard(&app);
    } else {
        println!("{}", app.t("loginTitle"));
    }
    print_help();

    loop {
        let prompt = format!("{}> ", app.view());
        match rl.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                match parse_shell_command(&line) {
                    Ok(command) => {
                        if !dispatch(&mut rl, &mut app, command).await? {
                            break;
                        }
                    }
                    Err(e) => eprintln!("{}\n", e.to_string().red()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                tracing::error!("Readline error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
