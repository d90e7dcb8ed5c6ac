//! Hermit, a graphical front end for chess engines.
//!
//! The heart of the crate is a declarative dialog engine: a dialog is a table
//! of [`Descriptor`](option::Descriptor)s, [`Dialog::update`](dialog::Dialog::update)
//! copies values into controls and [`Dialog::readout`](dialog::Dialog::readout)
//! copies them back, optionally telling an engine about every change. The
//! settings dialogs of the front ends are tables over a
//! [`Session`](session::Session).

/// Showing and reading out dialogs.
pub mod dialog;
/// Talking to engines about their options.
pub mod engine;
/// Errors.
pub mod error;
/// The move history window.
pub mod history;
/// Window placement.
pub mod layout;
/// Setting up `tracing`.
pub mod logging;
/// The settings dialogs.
pub mod menus;
/// Option descriptors and tables.
pub mod option;
/// The engine output window.
pub mod output;
/// One instance of each kind of auxiliary window.
pub mod registry;
/// State shared by the settings dialogs.
pub mod session;
/// The settings file.
pub mod settings;
/// The main window title.
pub mod title;
/// Controls, as the dialog engine sees them.
pub mod widget;
