//! Bundled template catalog
//!
//! Templates are fixed, read-only directory trees shipped with the tool.
//! The catalog directory is resolved once at startup; individual template
//! ids map to subdirectories of it.

use std::path::PathBuf;

use crate::error::CreateError;

/// Metadata for one bundled template
#[derive(Debug, Clone, Copy)]
pub struct TemplateInfo {
    /// Directory name under the catalog root
    pub id: &'static str,
    /// Display label shown in the template prompt
    pub label: &'static str,
    /// One-line description shown next to the label
    pub hint: &'static str,
}

/// The closed set of templates shipped with the tool, in prompt order
pub const TEMPLATES: &[TemplateInfo] = &[
    TemplateInfo {
        id: "basic",
        label: "Basic Game",
        hint: "Simple Pixi.js setup with basic game loop",
    },
    TemplateInfo {
        id: "platformer",
        label: "Platformer",
        hint: "Basic platformer with physics and player controller",
    },
    TemplateInfo {
        id: "top-down",
        label: "Top-down",
        hint: "Top-down game with movement and basic interactions",
    },
];

/// Environment variable overriding the catalog location
pub const CATALOG_ENV: &str = "CREATE_GAME_TEMPLATES";

/// Resolved location of the template catalog on disk
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    root: PathBuf,
}

impl TemplateCatalog {
    /// Locate the catalog: env override, then next to the executable,
    /// then the development checkout.
    pub fn locate() -> Result<Self, CreateError> {
        if let Ok(dir) = std::env::var(CATALOG_ENV) {
            let root = PathBuf::from(dir);
            if root.is_dir() {
                return Ok(Self::at(root));
            }
            return Err(CreateError::catalog_unavailable(vec![root]));
        }

        let mut candidates = Vec::new();
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                candidates.push(dir.join("templates"));
            }
        }
        candidates.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates"));

        for candidate in &candidates {
            if candidate.is_dir() {
                return Ok(Self::at(candidate.clone()));
            }
        }

        Err(CreateError::catalog_unavailable(candidates))
    }

    /// Use an explicit catalog directory
    pub fn at(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve a template id to its directory, before any copy I/O
    pub fn resolve(&self, template_id: &str) -> Result<PathBuf, CreateError> {
        // Ids are bare directory names; anything path-like is rejected
        // rather than resolved outside the catalog.
        let path_like = template_id.contains(['/', '\\']) || template_id == ".." || template_id == ".";
        if !path_like {
            let dir = self.root.join(template_id);
            if dir.is_dir() {
                return Ok(dir);
            }
        }

        Err(CreateError::template_not_found(
            template_id,
            self.root.clone(),
            TEMPLATES.iter().map(|t| t.id.to_string()).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn catalog_with(ids: &[&str]) -> (TempDir, TemplateCatalog) {
        let dir = TempDir::new().unwrap();
        for id in ids {
            std::fs::create_dir(dir.path().join(id)).unwrap();
        }
        let catalog = TemplateCatalog::at(dir.path().to_path_buf());
        (dir, catalog)
    }

    #[test]
    fn test_catalog_ids_in_prompt_order() {
        let ids: Vec<&str> = TEMPLATES.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["basic", "platformer", "top-down"]);
    }

    #[test]
    fn test_resolve_known_template() {
        let (dir, catalog) = catalog_with(&["basic"]);
        let resolved = catalog.resolve("basic").unwrap();
        assert_eq!(resolved, dir.path().join("basic"));
    }

    #[test]
    fn test_resolve_unknown_template() {
        let (_dir, catalog) = catalog_with(&["basic"]);
        let err = catalog.resolve("slot-machine").unwrap_err();
        match err {
            CreateError::TemplateNotFound { template, available, .. } => {
                assert_eq!(template, "slot-machine");
                assert!(available.contains(&"basic".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_rejects_path_like_ids() {
        let (dir, catalog) = catalog_with(&["basic"]);
        // A sibling directory outside the catalog must not be reachable.
        std::fs::create_dir(dir.path().join("basic").join("nested")).unwrap();
        assert!(catalog.resolve("basic/nested").is_err());
        assert!(catalog.resolve("..").is_err());
        assert!(catalog.resolve("../templates").is_err());
    }
}
