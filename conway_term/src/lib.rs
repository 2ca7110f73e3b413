// lib.rs - Terminal front end for the conway engine

pub mod cli;
pub mod controller;
pub mod error;
pub mod headless;
pub mod input;
pub mod prompt;
pub mod render;
pub mod session;
pub mod state;
pub mod surface;

pub use controller::{Controller, Flow, Options};
pub use error::{AppError, TerminalError};
