//! Error types and helpers for user-friendly error messages
//!
//! Fatal materialization errors carry actionable hints so users can recover
//! without digging through stack traces. Non-fatal problems (git init) are
//! not errors at all; they travel as warnings on the success value.

use std::path::PathBuf;

use thiserror::Error;

/// Custom error types with helpful context and suggestions
#[derive(Error, Debug)]
pub enum CreateError {
    /// Project name failed validation
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName {
        name: String,
        reason: String,
        hint: String,
    },

    /// Target directory exists and contains entries
    #[error("Directory {} already exists and is not empty", path.display())]
    DirectoryNotEmpty { path: PathBuf, hint: String },

    /// Requested template has no matching directory in the catalog
    #[error("Template '{template}' not found in {}", catalog_dir.display())]
    TemplateNotFound {
        template: String,
        catalog_dir: PathBuf,
        available: Vec<String>,
        hint: String,
    },

    /// The bundled template catalog itself could not be located
    #[error("Template catalog not found")]
    CatalogUnavailable {
        searched: Vec<PathBuf>,
        hint: String,
    },

    /// I/O failure while preparing the target or copying the template tree
    #[error("{message}")]
    CopyFailed {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },

    /// A substitution-target file exists but could not be rewritten
    #[error("Failed to rewrite {}: {message}", file.display())]
    Substitution {
        file: PathBuf,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Dependency installation exited non-zero or could not be started
    #[error("Failed to install dependencies: {message}")]
    InstallFailed { message: String, hint: String },
}

impl CreateError {
    /// Create an invalid project name error
    pub fn invalid_project_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProjectName {
            name: name.into(),
            reason: reason.into(),
            hint: hints::project_name().to_string(),
        }
    }

    /// Create a non-empty directory error
    pub fn directory_not_empty(path: PathBuf) -> Self {
        Self::DirectoryNotEmpty {
            path,
            hint: hints::directory_not_empty().to_string(),
        }
    }

    /// Create a template-not-found error listing the known ids
    pub fn template_not_found(
        template: impl Into<String>,
        catalog_dir: PathBuf,
        available: Vec<String>,
    ) -> Self {
        Self::TemplateNotFound {
            template: template.into(),
            catalog_dir,
            available,
            hint: hints::list_templates().to_string(),
        }
    }

    /// Create a missing catalog error
    pub fn catalog_unavailable(searched: Vec<PathBuf>) -> Self {
        Self::CatalogUnavailable {
            searched,
            hint: hints::catalog_missing().to_string(),
        }
    }

    /// Create a copy failure from an underlying I/O error
    pub fn copy_failed(
        message: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::CopyFailed {
            message: message.into(),
            source,
            hint: Some(hints::partial_copy().to_string()),
        }
    }

    /// Create a substitution failure from an underlying error
    pub fn substitution(
        file: impl Into<PathBuf>,
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Substitution {
            file: file.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a substitution failure without an underlying error
    pub fn substitution_message(
        file: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self::Substitution {
            file: file.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create an install failure
    pub fn install_failed(message: impl Into<String>) -> Self {
        Self::InstallFailed {
            message: message.into(),
            hint: hints::npm_install().to_string(),
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);

        match self {
            CreateError::InvalidProjectName { hint, .. }
            | CreateError::DirectoryNotEmpty { hint, .. }
            | CreateError::TemplateNotFound { hint, .. }
            | CreateError::CatalogUnavailable { hint, .. }
            | CreateError::InstallFailed { hint, .. } => {
                eprintln!("\n{} {}", style("HINT:").yellow().bold(), hint);
            }
            CreateError::CopyFailed { hint, .. } => {
                if let Some(h) = hint {
                    eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
                }
            }
            CreateError::Substitution { .. } => {}
        }

        // List the known template ids for typo recovery
        if let CreateError::TemplateNotFound { available, .. } = self {
            if !available.is_empty() {
                eprintln!("\n{}", style("AVAILABLE:").cyan().bold());
                for id in available {
                    eprintln!("  • {}", id);
                }
            }
        }

        // Show where the catalog was looked for
        if let CreateError::CatalogUnavailable { searched, .. } = self {
            if !searched.is_empty() {
                eprintln!("\n{}", style("SEARCHED:").cyan().bold());
                for path in searched {
                    eprintln!("  • {}", path.display());
                }
            }
        }

        eprintln!();
    }
}

/// Common hints for recoverable situations
pub mod hints {
    /// Hint for an invalid project name
    pub fn project_name() -> &'static str {
        "Project names can only contain letters, numbers, hyphens, and underscores\n\
         (for example: my-awesome-game)."
    }

    /// Hint for a non-empty target directory
    pub fn directory_not_empty() -> &'static str {
        "Choose a different target directory, or remove the existing contents first.\n\
         create-game never overwrites or merges into a non-empty directory."
    }

    /// Hint for an unknown template id
    pub fn list_templates() -> &'static str {
        "Run `create-game --list-templates` to see the available templates."
    }

    /// Hint for a missing template catalog
    pub fn catalog_missing() -> &'static str {
        "The templates directory ships alongside the create-game executable.\n\
         Reinstall the tool, or point the CREATE_GAME_TEMPLATES environment\n\
         variable at a template catalog."
    }

    /// Hint for a failed or interrupted copy
    pub fn partial_copy() -> &'static str {
        "Partially copied files may remain in the target directory.\n\
         Remove it before retrying."
    }

    /// Hint for a failed dependency installation
    pub fn npm_install() -> &'static str {
        "The project files were created. You can install dependencies manually:\n\
         • cd into the project directory\n\
         • Run: npm install"
    }
}
