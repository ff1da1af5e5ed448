//! Terminal rendering of contacts and failures

use colored::Colorize;
use prettytable::{format, Cell, Row, Table};

use crate::api::Contact;
use crate::app::App;
use crate::error::ContactbookError;
use crate::forms::edit::ContactField;
use crate::forms::ValidationErrors;

/// Print contacts as a table with translated headers
pub fn print_contacts(app: &App, contacts: &[Contact]) {
    if contacts.is_empty() {
        println!("{}", app.t("noResults").yellow());
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    let mut header = vec![Cell::new(app.t("id")).style_spec("b")];
    header.extend(
        ContactField::ALL
            .iter()
            .map(|field| Cell::new(app.t(field.name())).style_spec("b")),
    );
    table.set_titles(Row::new(header));

    for contact in contacts {
        table.add_row(prettytable::row![
            contact.id.to_string().cyan(),
            contact.first_name,
            contact.last_name,
            contact.phone_number,
            contact.email,
            contact.address,
            contact.note
        ]);
    }

    table.printstd();
}

/// Print one line per invalid field
pub fn print_validation_errors(app: &App, errors: &ValidationErrors) {
    for (field, message) in errors.iter() {
        println!("  {}: {}", app.t(field).bold(), app.t(message).red());
    }
}

/// Tell the user why an action did not happen
pub fn report_failure(app: &App, error: &anyhow::Error) {
    match error.downcast_ref::<ContactbookError>() {
        Some(ContactbookError::Validation(errors)) => print_validation_errors(app, errors),
        Some(ContactbookError::ContactNotFound(_)) => println!("{}", app.t("notFound").yellow()),
        Some(ContactbookError::Authentication(_)) if !app.session().is_authenticated() => {
            println!("{}", app.t("notSignedIn").yellow());
        }
        _ => println!("{} ({})", app.t("requestFailed").red(), error),
    }
}
