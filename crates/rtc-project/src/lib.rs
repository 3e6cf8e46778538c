//! Project files for readme2confluence.
//!
//! Locates the package manifest and readme of a project and reads them.
//! The two reads are independent and run in parallel on the rayon pool.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), rtc_project::ProjectError> {
//! use rtc_project::ProjectLoader;
//!
//! let project = ProjectLoader::new(".").load()?;
//! println!("{} ({} bytes of readme)", project.title, project.readme.len());
//! # Ok(())
//! # }
//! ```

mod manifest;
mod readme;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Error loading project files.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// File could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No manifest in the project directory.
    #[error("no package.json or Cargo.toml found in {}", .0.display())]
    ManifestNotFound(PathBuf),

    /// Manifest is not valid JSON.
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        /// Manifest path.
        path: PathBuf,
        /// Parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Manifest is not valid TOML.
    #[error("invalid TOML in {}: {source}", path.display())]
    Toml {
        /// Manifest path.
        path: PathBuf,
        /// Parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Manifest has no package name.
    #[error("{} does not declare a package name", .0.display())]
    MissingName(PathBuf),
}

/// Loaded project files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFiles {
    /// Package name from the manifest.
    pub name: String,
    /// Page title: the override if one was given, otherwise `name`.
    pub title: String,
    /// Readme markdown.
    pub readme: String,
    /// Manifest that was read.
    pub manifest_path: PathBuf,
    /// Readme that was read.
    pub readme_path: PathBuf,
}

/// Builder for loading [`ProjectFiles`].
#[derive(Clone, Debug)]
pub struct ProjectLoader {
    dir: PathBuf,
    readme: Option<PathBuf>,
    manifest: Option<PathBuf>,
    title: Option<String>,
}

impl ProjectLoader {
    /// Create a loader for the project rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            readme: None,
            manifest: None,
            title: None,
        }
    }

    /// Use an explicit readme path instead of discovery.
    #[must_use]
    pub fn readme(mut self, path: Option<impl Into<PathBuf>>) -> Self {
        self.readme = path.map(Into::into);
        self
    }

    /// Use an explicit manifest path instead of discovery.
    #[must_use]
    pub fn manifest(mut self, path: Option<impl Into<PathBuf>>) -> Self {
        self.manifest = path.map(Into::into);
        self
    }

    /// Override the page title.
    #[must_use]
    pub fn title(mut self, title: Option<impl Into<String>>) -> Self {
        self.title = title.map(Into::into);
        self
    }

    /// Locate and read the manifest and readme.
    ///
    /// Both files are read in parallel. Errors from the manifest take
    /// precedence over errors from the readme.
    pub fn load(&self) -> Result<ProjectFiles, ProjectError> {
        let manifest_path = match &self.manifest {
            Some(path) => path.clone(),
            None => manifest::find_manifest(&self.dir)?,
        };
        let readme_path = self
            .readme
            .clone()
            .unwrap_or_else(|| readme::find_readme(&self.dir));

        debug!(
            manifest = %manifest_path.display(),
            readme = %readme_path.display(),
            "Reading project files"
        );

        let (manifest_content, readme_content) =
            rayon::join(|| read(&manifest_path), || read(&readme_path));

        let name = manifest::package_name(&manifest_path, &manifest_content?)?;
        let readme = readme_content?;
        let title = self
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| name.clone());

        Ok(ProjectFiles {
            name,
            title,
            readme,
            manifest_path,
            readme_path,
        })
    }
}

fn read(path: &Path) -> Result<String, ProjectError> {
    fs::read_to_string(path).map_err(|source| ProjectError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn project_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    #[test]
    fn test_load_npm_project() {
        let dir = project_dir(&[
            ("package.json", r#"{"name": "widgets"}"#),
            ("readme.MD", "# Widgets\n\nUsage."),
        ]);

        let project = ProjectLoader::new(dir.path()).load().unwrap();

        assert_eq!(
            project,
            ProjectFiles {
                name: "widgets".to_owned(),
                title: "widgets".to_owned(),
                readme: "# Widgets\n\nUsage.".to_owned(),
                manifest_path: dir.path().join("package.json"),
                readme_path: dir.path().join("readme.MD"),
            }
        );
    }

    #[test]
    fn test_load_cargo_project_with_uppercase_readme() {
        let dir = project_dir(&[
            ("Cargo.toml", "[package]\nname = \"gadget\"\n"),
            ("README.md", "Gadget docs"),
        ]);

        let project = ProjectLoader::new(dir.path()).load().unwrap();
        assert_eq!(project.name, "gadget");
        assert_eq!(project.readme, "Gadget docs");
        assert_eq!(project.readme_path, dir.path().join("README.md"));
    }

    #[test]
    fn test_title_override() {
        let dir = project_dir(&[
            ("package.json", r#"{"name": "widgets"}"#),
            ("README.md", ""),
        ]);

        let project = ProjectLoader::new(dir.path())
            .title(Some("Widgets Handbook"))
            .load()
            .unwrap();
        assert_eq!(project.name, "widgets");
        assert_eq!(project.title, "Widgets Handbook");
    }

    #[test]
    fn test_blank_title_override_ignored() {
        let dir = project_dir(&[
            ("package.json", r#"{"name": "widgets"}"#),
            ("README.md", ""),
        ]);

        let project = ProjectLoader::new(dir.path())
            .title(Some(" "))
            .load()
            .unwrap();
        assert_eq!(project.title, "widgets");
    }

    #[test]
    fn test_explicit_paths() {
        let dir = project_dir(&[
            ("app.json", r#"{"name": "explicit"}"#),
            ("GUIDE.md", "guide"),
        ]);

        let project = ProjectLoader::new("/unused")
            .manifest(Some(dir.path().join("app.json")))
            .readme(Some(dir.path().join("GUIDE.md")))
            .load()
            .unwrap();
        assert_eq!(project.name, "explicit");
        assert_eq!(project.readme, "guide");
    }

    #[test]
    fn test_missing_readme_names_path() {
        let dir = project_dir(&[("package.json", r#"{"name": "widgets"}"#)]);

        let err = ProjectLoader::new(dir.path()).load().unwrap_err();
        match err {
            ProjectError::Io { path, .. } => assert_eq!(path, dir.path().join("readme.MD")),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_manifest() {
        let dir = project_dir(&[("README.md", "docs")]);

        let err = ProjectLoader::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, ProjectError::ManifestNotFound(_)));
    }

    #[test]
    fn test_manifest_error_wins_over_readme_error() {
        let dir = project_dir(&[("package.json", "not json")]);

        let err = ProjectLoader::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, ProjectError::Json { .. }));
    }
}
