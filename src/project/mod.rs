//! Project materialization pipeline
//!
//! Five sequential phases, each able to short-circuit the rest:
//! validate the target, resolve the template, copy the tree, rewrite
//! placeholders, then the optional git init and npm install steps.
//! Cheapest checks run first so an unknown template or occupied target
//! never costs a tree copy.

mod copy;
mod substitute;

use std::path::{Path, PathBuf};

use crate::error::CreateError;
use crate::exec::subprocess;
use crate::template::TemplateCatalog;
use crate::utils::paths;

/// Validated inputs for one materialization, supplied by the prompt
/// collector or command-line flags.
#[derive(Debug, Clone)]
pub struct MaterializationRequest {
    pub project_name: String,
    pub template_id: String,
    pub target_dir: String,
    pub init_git: bool,
    pub install_dependencies: bool,
}

/// Successful outcome: where the project landed, plus any non-fatal
/// warnings collected along the way (git init failures land here).
#[derive(Debug)]
pub struct Materialized {
    pub project_path: PathBuf,
    pub warnings: Vec<String>,
}

/// Runs materializations against one catalog.
///
/// The git and npm program names are injected so tests can stand in
/// failing or absent tools without touching the environment.
pub struct Materializer<'a> {
    catalog: &'a TemplateCatalog,
    git_program: String,
    npm_program: String,
    verbose: bool,
}

impl<'a> Materializer<'a> {
    pub fn new(catalog: &'a TemplateCatalog, verbose: bool) -> Self {
        Self {
            catalog,
            git_program: "git".to_string(),
            npm_program: "npm".to_string(),
            verbose,
        }
    }

    /// Materialize a new project directory from the request.
    ///
    /// On failure no rollback is attempted: a partially populated target
    /// is left in place for inspection, and the error hint says so.
    pub fn materialize(
        &self,
        request: &MaterializationRequest,
    ) -> Result<Materialized, CreateError> {
        // Phase 1: the target must be absent or empty before any other I/O.
        let project_path = paths::absolutize(Path::new(&request.target_dir))
            .map_err(|e| CreateError::copy_failed("Failed to resolve target directory", Some(e)))?;
        if project_path.exists() {
            let occupied = !project_path.is_dir()
                || !paths::dir_is_empty(&project_path)
                    .map_err(|e| CreateError::copy_failed("Failed to inspect target directory", Some(e)))?;
            if occupied {
                return Err(CreateError::directory_not_empty(project_path));
            }
        }
        paths::ensure_dir(&project_path).map_err(|e| {
            CreateError::copy_failed(
                format!("Failed to create directory {}", project_path.display()),
                Some(e),
            )
        })?;

        // Phase 2: resolve the template before any copy I/O so an unknown
        // id never leaves partial files behind.
        let template_dir = self.catalog.resolve(&request.template_id)?;

        // Phase 3: recursive copy.
        copy::copy_tree(&template_dir, &project_path)?;

        // Phase 4: placeholder substitution on the known files.
        substitute::apply(&project_path, &request.project_name, &request.template_id)?;

        let mut warnings = Vec::new();

        // Phase 5: git init is best effort. A missing or failing git does
        // not compromise the project, so failures become warnings.
        if request.init_git {
            if let Err(reason) = self.init_git_repo(&project_path) {
                warnings.push(format!("Failed to initialize git repository: {reason}"));
            }
        }

        // Phase 6: a broken install leaves the project non-functional, so
        // unlike git this failure is fatal. The directory stays on disk.
        if request.install_dependencies {
            self.install_dependencies(&project_path)?;
        }

        Ok(Materialized {
            project_path,
            warnings,
        })
    }

    fn init_git_repo(&self, project_path: &Path) -> Result<(), String> {
        if !subprocess::command_exists(&self.git_program) {
            return Err(format!("{} executable not found in PATH", self.git_program));
        }

        let steps: [&[&str]; 3] = [&["init"], &["add", "."], &["commit", "-m", "Initial commit"]];
        for args in steps {
            let result =
                subprocess::run_command(&self.git_program, args, project_path, self.verbose)
                    .map_err(|e| format!("{e:#}"))?;
            if !result.success {
                return Err(format!(
                    "`{} {}` exited with status {}",
                    self.git_program,
                    args.join(" "),
                    result.exit_code
                ));
            }
        }
        Ok(())
    }

    fn install_dependencies(&self, project_path: &Path) -> Result<(), CreateError> {
        match subprocess::run_command(&self.npm_program, &["install"], project_path, self.verbose) {
            Ok(result) if result.success => Ok(()),
            Ok(result) => {
                let mut message = format!(
                    "{} install exited with status {}",
                    self.npm_program, result.exit_code
                );
                if let Some(line) = result.stderr.lines().find(|l| !l.trim().is_empty()) {
                    message.push_str(&format!(" ({})", line.trim()));
                }
                Err(CreateError::install_failed(message))
            }
            Err(err) => Err(CreateError::install_failed(format!("{err:#}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture_catalog() -> (TempDir, TemplateCatalog) {
        let dir = TempDir::new().unwrap();
        let basic = dir.path().join("basic");
        std::fs::create_dir_all(basic.join("src")).unwrap();
        std::fs::write(basic.join("package.json"), "{\n  \"name\": \"template\"\n}\n").unwrap();
        std::fs::write(basic.join("README.md"), "# {{PROJECT_NAME}} ({{TEMPLATE}})\n").unwrap();
        std::fs::write(
            basic.join("index.html"),
            "<title>{{PROJECT_NAME}}</title>\n",
        )
        .unwrap();
        std::fs::write(basic.join("src").join("main.ts"), "export {}\n").unwrap();
        let catalog = TemplateCatalog::at(dir.path().to_path_buf());
        (dir, catalog)
    }

    fn request(target: &Path) -> MaterializationRequest {
        MaterializationRequest {
            project_name: "my-awesome-game".to_string(),
            template_id: "basic".to_string(),
            target_dir: target.to_string_lossy().into_owned(),
            init_git: false,
            install_dependencies: false,
        }
    }

    #[test]
    fn test_non_empty_target_is_rejected() {
        let (_catalog_dir, catalog) = fixture_catalog();
        let target = TempDir::new().unwrap();
        std::fs::write(target.path().join("existing"), "x").unwrap();

        let materializer = Materializer::new(&catalog, false);
        let err = materializer.materialize(&request(target.path())).unwrap_err();
        assert!(matches!(err, CreateError::DirectoryNotEmpty { .. }));

        // Nothing beyond the check itself was written.
        let entries: Vec<_> = std::fs::read_dir(target.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_existing_file_target_is_rejected() {
        let (_catalog_dir, catalog) = fixture_catalog();
        let parent = TempDir::new().unwrap();
        let target = parent.path().join("occupied");
        std::fs::write(&target, "not a directory").unwrap();

        let materializer = Materializer::new(&catalog, false);
        let err = materializer.materialize(&request(&target)).unwrap_err();
        assert!(matches!(err, CreateError::DirectoryNotEmpty { .. }));
    }

    #[test]
    fn test_missing_ancestors_are_created() {
        let (_catalog_dir, catalog) = fixture_catalog();
        let parent = TempDir::new().unwrap();
        let target = parent.path().join("deep").join("nested").join("project");

        let materializer = Materializer::new(&catalog, false);
        let outcome = materializer.materialize(&request(&target)).unwrap();
        assert!(outcome.project_path.join("package.json").is_file());
    }

    #[test]
    fn test_empty_existing_target_is_accepted() {
        let (_catalog_dir, catalog) = fixture_catalog();
        let target = TempDir::new().unwrap();

        let materializer = Materializer::new(&catalog, false);
        materializer.materialize(&request(target.path())).unwrap();
    }

    #[test]
    fn test_unknown_template_leaves_target_empty() {
        let (_catalog_dir, catalog) = fixture_catalog();
        let parent = TempDir::new().unwrap();
        let target = parent.path().join("project");

        let mut req = request(&target);
        req.template_id = "slot-machine".to_string();

        let materializer = Materializer::new(&catalog, false);
        let err = materializer.materialize(&req).unwrap_err();
        assert!(matches!(err, CreateError::TemplateNotFound { .. }));
        if target.exists() {
            assert!(paths::dir_is_empty(&target).unwrap());
        }
    }

    #[test]
    fn test_copy_fidelity_and_substitution() {
        let (catalog_dir, catalog) = fixture_catalog();
        let parent = TempDir::new().unwrap();
        let target = parent.path().join("my-awesome-game");

        let materializer = Materializer::new(&catalog, false);
        let outcome = materializer.materialize(&request(&target)).unwrap();

        // Untouched files are byte-identical.
        let copied = std::fs::read(outcome.project_path.join("src").join("main.ts")).unwrap();
        let original =
            std::fs::read(catalog_dir.path().join("basic").join("src").join("main.ts")).unwrap();
        assert_eq!(copied, original);

        // Targeted files were rewritten.
        let manifest = std::fs::read_to_string(outcome.project_path.join("package.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&manifest).unwrap();
        assert_eq!(parsed["name"], "my-awesome-game");

        let readme = std::fs::read_to_string(outcome.project_path.join("README.md")).unwrap();
        assert_eq!(readme, "# my-awesome-game (basic)\n");

        let html = std::fs::read_to_string(outcome.project_path.join("index.html")).unwrap();
        assert_eq!(html, "<title>my-awesome-game</title>\n");

        assert!(outcome.warnings.is_empty());
        assert!(outcome.project_path.is_absolute());
    }

    #[test]
    fn test_git_failure_is_a_warning_not_an_error() {
        let (_catalog_dir, catalog) = fixture_catalog();
        let parent = TempDir::new().unwrap();
        let target = parent.path().join("project");

        let mut req = request(&target);
        req.init_git = true;

        let materializer = Materializer {
            catalog: &catalog,
            git_program: "definitely-not-git".to_string(),
            npm_program: "npm".to_string(),
            verbose: false,
        };
        let outcome = materializer.materialize(&req).unwrap();
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("git"));
        assert!(outcome.project_path.join("package.json").is_file());
    }

    #[test]
    fn test_install_failure_is_fatal_but_keeps_project() {
        let (_catalog_dir, catalog) = fixture_catalog();
        let parent = TempDir::new().unwrap();
        let target = parent.path().join("project");

        let mut req = request(&target);
        req.install_dependencies = true;

        // `false` exists and always exits 1, standing in for a broken npm.
        let materializer = Materializer {
            catalog: &catalog,
            git_program: "git".to_string(),
            npm_program: "false".to_string(),
            verbose: false,
        };
        let err = materializer.materialize(&req).unwrap_err();
        assert!(matches!(err, CreateError::InstallFailed { .. }));
        assert!(target.join("package.json").is_file());
        assert!(target.join("index.html").is_file());
    }

    #[test]
    fn test_missing_installer_is_fatal() {
        let (_catalog_dir, catalog) = fixture_catalog();
        let parent = TempDir::new().unwrap();
        let target = parent.path().join("project");

        let mut req = request(&target);
        req.install_dependencies = true;

        let materializer = Materializer {
            catalog: &catalog,
            git_program: "git".to_string(),
            npm_program: "definitely-not-npm".to_string(),
            verbose: false,
        };
        let err = materializer.materialize(&req).unwrap_err();
        assert!(matches!(err, CreateError::InstallFailed { .. }));
    }

    #[test]
    fn test_relative_target_resolves_to_absolute() {
        let (_catalog_dir, catalog) = fixture_catalog();
        let target = TempDir::new().unwrap();

        let mut req = request(target.path());
        // Inject a `.` component; the returned path must come back clean.
        req.target_dir = format!("{}/./.", target.path().display());

        let materializer = Materializer::new(&catalog, false);
        let outcome = materializer.materialize(&req).unwrap();
        assert!(outcome.project_path.is_absolute());
        assert!(!outcome.project_path.to_string_lossy().contains("/./"));
    }
}
