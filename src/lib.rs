pub mod app;
pub mod commands;
pub mod common;
pub mod entry;
pub mod error;
pub mod launch;
pub mod logging;
pub mod menu;
pub mod notice_log;
pub mod picker;
pub mod prompt;
pub mod registry;
pub mod settings;
pub mod terminal;
pub mod view;
