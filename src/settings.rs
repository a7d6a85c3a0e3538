//! Settings infrastructure for rxlsp.
//!
//! This module provides support for loading and parsing `rxlsp.toml` files to
//! configure block markers and diagnostics.

use std::path::Path;

use serde::Deserialize;

use crate::document::{Markers, Scanner};
use crate::error::{Result, SettingsError};

/// Name of the settings file looked up around the workspace root.
pub const SETTINGS_FILE: &str = "rxlsp.toml";

/// Root settings structure loaded from rxlsp.toml.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Block marker overrides.
    pub markers: Option<MarkerSettings>,

    /// Diagnostic toggles.
    pub diagnostics: Option<DiagnosticsSettings>,
}

/// Marker overrides; unset markers keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkerSettings {
    /// Open marker for Python blocks (default `{{py:`).
    pub python: Option<String>,
    /// Open marker for LaTeX blocks (default `{{tex:`).
    pub latex: Option<String>,
    /// Shared close marker (default `}}`).
    pub close: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticsSettings {
    /// Warn about a block left open at end of file (default: true).
    pub unterminated_blocks: Option<bool>,
}

impl Settings {
    /// The effective markers, with defaults filled in.
    pub fn markers(&self) -> Markers {
        let defaults = Markers::default();
        let Some(overrides) = &self.markers else {
            return defaults;
        };
        Markers {
            python: overrides.python.clone().unwrap_or(defaults.python),
            latex: overrides.latex.clone().unwrap_or(defaults.latex),
            close: overrides.close.clone().unwrap_or(defaults.close),
        }
    }

    /// Whether unterminated blocks are reported.
    pub fn warn_unterminated_blocks(&self) -> bool {
        self.diagnostics
            .as_ref()
            .and_then(|d| d.unterminated_blocks)
            .unwrap_or(true)
    }
}

/// Read and parse a settings file.
pub fn read_settings(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Load settings from a settings file.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(path: &Path) -> Settings {
    match read_settings(path) {
        Ok(settings) => settings,
        Err(SettingsError::Io { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            Settings::default()
        }
        Err(e) => {
            log::warn!("{}", e);
            Settings::default()
        }
    }
}

/// Discover rxlsp.toml by searching up the directory tree, then direct children.
///
/// Search order:
/// 1. Walk up from `start_dir` to filesystem root
/// 2. If not found, check immediate child directories of `start_dir`
///
/// Returns `Settings::default()` if no file is found.
pub fn discover_settings(start_dir: &Path) -> Settings {
    // Phase 1: Walk up from start_dir
    let mut current = Some(start_dir);
    while let Some(dir) = current {
        let candidate = dir.join(SETTINGS_FILE);
        if candidate.is_file() {
            log::info!("using settings from {}", candidate.display());
            return load_settings(&candidate);
        }
        current = dir.parent();
    }

    // Phase 2: Check immediate child directories
    if let Ok(entries) = std::fs::read_dir(start_dir) {
        for entry in entries.flatten() {
            if entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
                let candidate = entry.path().join(SETTINGS_FILE);
                if candidate.is_file() {
                    log::info!("using settings from {}", candidate.display());
                    return load_settings(&candidate);
                }
            }
        }
    }

    Settings::default()
}

/// Build a scanner from settings.
///
/// Falls back to the default markers if the configured ones are unusable.
pub fn build_scanner(settings: &Settings) -> Scanner {
    match Scanner::new(settings.markers()) {
        Ok(scanner) => scanner,
        Err(e) => {
            log::warn!("{}; falling back to default markers", e);
            Scanner::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_use_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.markers(), Markers::default());
        assert!(settings.warn_unterminated_blocks());
    }

    #[test]
    fn partial_marker_overrides() {
        let settings: Settings = toml::from_str(
            r#"
            [markers]
            python = "{{python:"
            "#,
        )
        .unwrap();
        let markers = settings.markers();
        assert_eq!(markers.python, "{{python:");
        assert_eq!(markers.latex, "{{tex:");
        assert_eq!(markers.close, "}}");
    }

    #[test]
    fn diagnostics_toggle() {
        let settings: Settings = toml::from_str(
            r#"
            [diagnostics]
            unterminated_blocks = false
            "#,
        )
        .unwrap();
        assert!(!settings.warn_unterminated_blocks());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: std::result::Result<Settings, _> = toml::from_str("[markers]\nopen = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn invalid_markers_fall_back_to_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [markers]
            python = "{{x"
            latex = "{{x"
            "#,
        )
        .unwrap();
        let scanner = build_scanner(&settings);
        assert_eq!(scanner.markers(), &Markers::default());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let settings = load_settings(Path::new("/nonexistent/rxlsp.toml"));
        assert!(settings.markers.is_none());
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "[markers\npython =").unwrap();
        assert!(matches!(read_settings(&path), Err(SettingsError::Parse(_))));
        assert!(load_settings(&path).markers.is_none());
    }

    #[test]
    fn discovers_settings_in_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            "[markers]\nclose = \"]]\"\n",
        )
        .unwrap();
        let nested = dir.path().join("MANUSCRIPT").join("FIGURES");
        std::fs::create_dir_all(&nested).unwrap();

        let settings = discover_settings(&nested);
        assert_eq!(settings.markers().close, "]]");
    }

    #[test]
    fn discovers_settings_in_child_directory() {
        let dir = tempfile::tempdir().unwrap();
        let child = dir.path().join("MANUSCRIPT");
        std::fs::create_dir_all(&child).unwrap();
        std::fs::write(
            child.join(SETTINGS_FILE),
            "[diagnostics]\nunterminated_blocks = false\n",
        )
        .unwrap();

        let settings = discover_settings(dir.path());
        assert!(!settings.warn_unterminated_blocks());
    }
}
