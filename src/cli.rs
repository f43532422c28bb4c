//! CLI argument parsing using clap derive macros

use std::path::Path;

use anyhow::Result;

use crate::project::{Materialized, Materializer};
use crate::prompt::{Collected, PromptCollector};
use crate::template::{TemplateCatalog, TEMPLATES};
use crate::utils::terminal;

/// create-game - scaffold a new Pixi.js game project
///
/// Values not given as flags are collected interactively.
#[derive(clap::Parser, Debug)]
#[command(name = "create-game")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project name (letters, numbers, hyphens, underscores)
    pub name: Option<String>,

    /// Template id (see --list-templates)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Directory to create the project in (defaults to ./<name>)
    #[arg(long, value_name = "PATH")]
    pub target_dir: Option<String>,

    /// Initialize a git repository
    #[arg(long, overrides_with = "no_git")]
    pub git: bool,

    /// Skip git initialization
    #[arg(long, overrides_with = "git")]
    pub no_git: bool,

    /// Run npm install after scaffolding
    #[arg(long, overrides_with = "no_install")]
    pub install: bool,

    /// Skip dependency installation
    #[arg(long, overrides_with = "install")]
    pub no_install: bool,

    /// Accept defaults for any value not given on the command line
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// List available templates and exit
    #[arg(long)]
    pub list_templates: bool,

    /// Show git and npm output instead of suppressing it
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Execute the CLI
    pub fn execute(self) -> Result<()> {
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        if self.list_templates {
            for info in TEMPLATES {
                println!("{:<12} {} - {}", info.id, info.label, info.hint);
            }
            return Ok(());
        }

        let catalog = TemplateCatalog::locate()?;

        let collector = PromptCollector::new();
        let request = match collector.collect(&self)? {
            Collected::Request(request) => request,
            Collected::Cancelled => {
                terminal::print_info("Operation cancelled");
                return Ok(());
            }
        };

        let installed = request.install_dependencies;
        let spinner = terminal::create_spinner("Creating your game project...");
        let materializer = Materializer::new(&catalog, self.verbose);
        match materializer.materialize(&request) {
            Ok(outcome) => {
                spinner.finish_with_message("Project created successfully!");
                report_success(&outcome, installed);
                Ok(())
            }
            Err(err) => {
                spinner.finish_with_message("Failed to create project");
                Err(err.into())
            }
        }
    }
}

fn report_success(outcome: &Materialized, installed: bool) {
    for warning in &outcome.warnings {
        terminal::print_warning(warning);
    }

    println!();
    terminal::print_success("Your game project is ready!");
    println!();
    println!("Next steps:");
    println!("  cd {}", display_path(&outcome.project_path));
    if !installed {
        println!("  npm install");
    }
    println!("  npm run dev");
    println!();
}

/// Prefer a path relative to the current directory for the cd hint.
fn display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(&cwd).ok())
        .unwrap_or(path)
        .display()
        .to_string()
}
