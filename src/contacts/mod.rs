//! Contact list: cached state, search, and the controller driving it

pub mod controller;
pub mod state;

pub use controller::ContactListController;
pub use state::{filter_contacts, ContactEvent, ContactListState};
