//! Placeholder substitution in the known template files
//!
//! Only three files are ever touched: package.json (structured rewrite of
//! the name field), README.md ({{PROJECT_NAME}} and {{TEMPLATE}} tokens),
//! and index.html ({{PROJECT_NAME}} tokens). A missing file is skipped;
//! a present file that cannot be rewritten is fatal.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::CreateError;

const PROJECT_NAME_TOKEN: &str = "{{PROJECT_NAME}}";
const TEMPLATE_TOKEN: &str = "{{TEMPLATE}}";

pub(crate) fn apply(
    project_path: &Path,
    project_name: &str,
    template_id: &str,
) -> Result<(), CreateError> {
    rewrite_manifest(&project_path.join("package.json"), project_name)?;
    rewrite_tokens(
        &project_path.join("README.md"),
        &[
            (PROJECT_NAME_TOKEN, project_name),
            (TEMPLATE_TOKEN, template_id),
        ],
    )?;
    rewrite_tokens(
        &project_path.join("index.html"),
        &[(PROJECT_NAME_TOKEN, project_name)],
    )?;
    Ok(())
}

/// Parse package.json, overwrite its name field, and write it back with
/// stable 2-space indentation. Unknown fields pass through untouched.
fn rewrite_manifest(path: &Path, project_name: &str) -> Result<(), CreateError> {
    if !path.exists() {
        return Ok(());
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| CreateError::substitution(path, "failed to read", e))?;
    let mut manifest: Value = serde_json::from_str(&raw)
        .map_err(|e| CreateError::substitution(path, "invalid JSON", e))?;

    match manifest.as_object_mut() {
        Some(fields) => {
            fields.insert(
                "name".to_string(),
                Value::String(project_name.to_string()),
            );
        }
        None => {
            return Err(CreateError::substitution_message(
                path,
                "manifest root is not a JSON object",
            ))
        }
    }

    let mut rendered = serde_json::to_string_pretty(&manifest)
        .map_err(|e| CreateError::substitution(path, "failed to serialize", e))?;
    rendered.push('\n');
    fs::write(path, rendered)
        .map_err(|e| CreateError::substitution(path, "failed to write", e))
}

/// Replace every occurrence of each token, whole-file.
fn rewrite_tokens(path: &Path, replacements: &[(&str, &str)]) -> Result<(), CreateError> {
    if !path.exists() {
        return Ok(());
    }

    let mut content = fs::read_to_string(path)
        .map_err(|e| CreateError::substitution(path, "failed to read", e))?;
    for (token, value) in replacements {
        content = content.replace(token, value);
    }
    fs::write(path, content)
        .map_err(|e| CreateError::substitution(path, "failed to write", e))
}
