//! Personal budget panel: a login screen and an expense panel ("Wydatki")
//! over one budget document that is saved whole after every change.

pub mod api;
pub mod budget;
pub mod cli;
pub mod config;
pub mod error;
pub mod login;
pub mod persist;
