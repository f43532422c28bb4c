//! create-game - scaffolding CLI for Pixi.js browser-game projects
//!
//! Prompts for a project name, a template, and a target directory, then
//! materializes a new project from the bundled template catalog.
//!
//! ## Architecture
//!
//! ```text
//! prompt collector → project materializer → terminal report
//! ```

mod cli;
mod error;
mod exec;
mod project;
mod prompt;
mod template;
mod utils;

use clap::Parser;

use cli::Cli;
use error::CreateError;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = cli.execute() {
        match err.downcast_ref::<CreateError>() {
            Some(create_err) => create_err.display_with_hints(),
            None => utils::terminal::print_error(&format!("{err:#}")),
        }
        std::process::exit(1);
    }
}
