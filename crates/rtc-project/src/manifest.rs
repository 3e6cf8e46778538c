//! Package manifest parsing.
//!
//! The page title comes from the package name declared in the project
//! manifest. Both npm (`package.json`) and cargo (`Cargo.toml`) manifests
//! are understood.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ProjectError;

/// Manifest file names tried in order when no explicit path is given.
pub(crate) const MANIFEST_CANDIDATES: &[&str] = &["package.json", "Cargo.toml"];

/// Manifest flavour, decided by file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    /// npm `package.json`.
    PackageJson,
    /// cargo `Cargo.toml`.
    CargoToml,
}

impl ManifestKind {
    /// Detect the manifest kind from its path.
    ///
    /// Anything with a `.toml` extension is read as a cargo manifest;
    /// everything else as JSON.
    pub fn from_path(path: &Path) -> Self {
        if path.extension().is_some_and(|ext| ext == "toml") {
            Self::CargoToml
        } else {
            Self::PackageJson
        }
    }
}

#[derive(Deserialize)]
struct PackageJson {
    name: Option<String>,
}

#[derive(Deserialize)]
struct CargoManifest {
    package: Option<CargoPackage>,
}

#[derive(Deserialize)]
struct CargoPackage {
    name: Option<String>,
}

/// Locate the manifest in `dir`.
pub(crate) fn find_manifest(dir: &Path) -> Result<PathBuf, ProjectError> {
    MANIFEST_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| ProjectError::ManifestNotFound(dir.to_path_buf()))
}

/// Extract the package name from manifest content.
pub(crate) fn package_name(path: &Path, content: &str) -> Result<String, ProjectError> {
    let name = match ManifestKind::from_path(path) {
        ManifestKind::PackageJson => {
            let manifest: PackageJson =
                serde_json::from_str(content).map_err(|source| ProjectError::Json {
                    path: path.to_path_buf(),
                    source,
                })?;
            manifest.name
        }
        ManifestKind::CargoToml => {
            let manifest: CargoManifest =
                toml::from_str(content).map_err(|source| ProjectError::Toml {
                    path: path.to_path_buf(),
                    source,
                })?;
            manifest.package.and_then(|p| p.name)
        }
    };

    name.filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ProjectError::MissingName(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_path() {
        assert_eq!(
            ManifestKind::from_path(Path::new("/p/package.json")),
            ManifestKind::PackageJson
        );
        assert_eq!(
            ManifestKind::from_path(Path::new("/p/Cargo.toml")),
            ManifestKind::CargoToml
        );
        assert_eq!(
            ManifestKind::from_path(Path::new("/p/manifest")),
            ManifestKind::PackageJson
        );
    }

    #[test]
    fn test_package_json_name() {
        let content = r#"{"name": "@acme/widgets", "version": "1.2.0"}"#;
        let name = package_name(Path::new("package.json"), content).unwrap();
        assert_eq!(name, "@acme/widgets");
    }

    #[test]
    fn test_cargo_toml_name() {
        let content = "[package]\nname = \"widgets\"\nversion = \"0.1.0\"\n";
        let name = package_name(Path::new("Cargo.toml"), content).unwrap();
        assert_eq!(name, "widgets");
    }

    #[test]
    fn test_cargo_workspace_without_package() {
        let content = "[workspace]\nmembers = [\"crates/*\"]\n";
        let err = package_name(Path::new("Cargo.toml"), content).unwrap_err();
        assert!(matches!(err, ProjectError::MissingName(_)));
    }

    #[test]
    fn test_package_json_without_name() {
        let err = package_name(Path::new("package.json"), r#"{"private": true}"#).unwrap_err();
        assert!(matches!(err, ProjectError::MissingName(_)));
    }

    #[test]
    fn test_package_json_blank_name() {
        let err = package_name(Path::new("package.json"), r#"{"name": "  "}"#).unwrap_err();
        assert!(matches!(err, ProjectError::MissingName(_)));
    }

    #[test]
    fn test_invalid_json() {
        let err = package_name(Path::new("package.json"), "{name:").unwrap_err();
        assert!(matches!(err, ProjectError::Json { .. }));
        assert!(err.to_string().contains("package.json"));
    }

    #[test]
    fn test_invalid_toml() {
        let err = package_name(Path::new("Cargo.toml"), "[package\n").unwrap_err();
        assert!(matches!(err, ProjectError::Toml { .. }));
    }

    #[test]
    fn test_find_manifest_prefers_package_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Cargo.toml"), "").unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();

        let found = find_manifest(dir.path()).unwrap();
        assert_eq!(found, dir.path().join("package.json"));
    }

    #[test]
    fn test_find_manifest_falls_back_to_cargo() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Cargo.toml"), "").unwrap();

        let found = find_manifest(dir.path()).unwrap();
        assert_eq!(found, dir.path().join("Cargo.toml"));
    }

    #[test]
    fn test_find_manifest_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_manifest(dir.path()).unwrap_err();
        assert!(matches!(err, ProjectError::ManifestNotFound(_)));
    }
}
