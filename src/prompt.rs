//! Interactive prompt collector
//!
//! Gathers the five materialization inputs, honoring command-line flags
//! first so a fully-flagged invocation never prompts. Cancelling any
//! prompt (Ctrl-C or escape) is a first-class outcome, not an error.

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::cli::Cli;
use crate::error::CreateError;
use crate::project::MaterializationRequest;
use crate::template::TEMPLATES;

const DEFAULT_PROJECT_NAME: &str = "my-awesome-game";

/// Outcome of the collection step
pub enum Collected {
    Request(MaterializationRequest),
    Cancelled,
}

/// Validate a project name: non-empty, restricted character set.
pub fn validate_project_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Project name is required".to_string());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(
            "Project name can only contain letters, numbers, hyphens, and underscores".to_string(),
        );
    }
    Ok(())
}

/// Dialoguer-backed collector. Constructed explicitly and passed the
/// parsed CLI; holds no global state.
pub struct PromptCollector {
    theme: ColorfulTheme,
}

impl PromptCollector {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    /// Collect all five inputs, prompting only for values the flags left
    /// open. With `--yes`, missing values fall back to defaults instead.
    pub fn collect(&self, cli: &Cli) -> Result<Collected> {
        let name = match &cli.name {
            Some(name) => {
                validate_project_name(name)
                    .map_err(|reason| CreateError::invalid_project_name(name, reason))?;
                name.clone()
            }
            None if cli.yes => DEFAULT_PROJECT_NAME.to_string(),
            None => match self.prompt_name()? {
                Some(name) => name,
                None => return Ok(Collected::Cancelled),
            },
        };

        let template_id = match &cli.template {
            // Unknown ids fail later at template resolution, before any copy.
            Some(id) => id.clone(),
            None if cli.yes => TEMPLATES[0].id.to_string(),
            None => match self.prompt_template()? {
                Some(id) => id,
                None => return Ok(Collected::Cancelled),
            },
        };

        let target_dir = match &cli.target_dir {
            Some(dir) => dir.clone(),
            None if cli.yes => format!("./{name}"),
            None => match self.prompt_target_dir(&name)? {
                Some(dir) => dir,
                None => return Ok(Collected::Cancelled),
            },
        };

        let init_git = if cli.git {
            true
        } else if cli.no_git {
            false
        } else if cli.yes {
            true
        } else {
            match self.prompt_confirm("Initialize git repository?")? {
                Some(answer) => answer,
                None => return Ok(Collected::Cancelled),
            }
        };

        let install_dependencies = if cli.install {
            true
        } else if cli.no_install {
            false
        } else if cli.yes {
            true
        } else {
            match self.prompt_confirm("Install dependencies?")? {
                Some(answer) => answer,
                None => return Ok(Collected::Cancelled),
            }
        };

        Ok(Collected::Request(MaterializationRequest {
            project_name: name,
            template_id,
            target_dir,
            init_git,
            install_dependencies,
        }))
    }

    fn prompt_name(&self) -> Result<Option<String>> {
        let result = Input::with_theme(&self.theme)
            .with_prompt("What is your project name?")
            .default(DEFAULT_PROJECT_NAME.to_string())
            .validate_with(|input: &String| validate_project_name(input))
            .interact_text();
        flatten_cancel(result)
    }

    fn prompt_template(&self) -> Result<Option<String>> {
        let items: Vec<String> = TEMPLATES
            .iter()
            .map(|t| format!("{} - {}", t.label, t.hint))
            .collect();
        let result = Select::with_theme(&self.theme)
            .with_prompt("Choose a project template")
            .items(&items)
            .default(0)
            .interact_opt();
        match flatten_cancel(result)? {
            Some(Some(index)) => Ok(Some(TEMPLATES[index].id.to_string())),
            _ => Ok(None),
        }
    }

    fn prompt_target_dir(&self, name: &str) -> Result<Option<String>> {
        let result = Input::with_theme(&self.theme)
            .with_prompt("Where should we create your project?")
            .default(format!("./{name}"))
            .validate_with(|input: &String| -> Result<(), String> {
                if input.trim().is_empty() {
                    Err("Target directory is required".to_string())
                } else {
                    Ok(())
                }
            })
            .interact_text();
        flatten_cancel(result)
    }

    fn prompt_confirm(&self, message: &str) -> Result<Option<bool>> {
        let result = Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(true)
            .interact_opt();
        match flatten_cancel(result)? {
            Some(Some(answer)) => Ok(Some(answer)),
            _ => Ok(None),
        }
    }
}

/// Map Ctrl-C (reported by dialoguer as an interrupted read) to None;
/// pass through everything else.
fn flatten_cancel<T>(result: dialoguer::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if is_interrupt(&err) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn is_interrupt(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names_accepted() {
        for name in ["my-awesome-game", "Game_01", "x", "UPPER-lower_123"] {
            assert!(validate_project_name(name).is_ok(), "rejected {name}");
        }
    }

    #[test]
    fn test_invalid_names_rejected() {
        for name in ["", "my game", "game!", "näme", "a/b", "a.b"] {
            assert!(validate_project_name(name).is_err(), "accepted {name:?}");
        }
    }
}
