use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::SheetDialect;
use crate::SwError;
use crate::SwResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["swdocs.toml", ".swdocs.toml", ".config/swdocs.toml"];

/// Definitions directory used when the config does not name one.
pub const DEFAULT_DEFINITIONS_DIR: &str = "definitions";

/// Configuration loaded from a `swdocs.toml` file.
///
/// ```toml
/// definitions = "definitions"
///
/// [overlays]
/// label = "label.toml"
/// lang = "language.tsv"
/// ctx = "ctx.toml"
///
/// [exclude]
/// patterns = ["legacy/", "*_old.xml"]
///
/// [sheet]
/// dialect = "tsv"
/// ```
///
/// Every path is relative to the project root.
#[derive(Debug, Deserialize)]
pub struct SwdocsConfig {
	/// Directory scanned for `*.xml` definition files.
	#[serde(default = "default_definitions_dir")]
	pub definitions: PathBuf,
	/// Optional label, language and context files.
	#[serde(default)]
	pub overlays: OverlaysConfig,
	/// Exclusion configuration using gitignore-style patterns.
	#[serde(default)]
	pub exclude: ExcludeConfig,
	/// Sheet export settings.
	#[serde(default)]
	pub sheet: SheetConfig,
}

impl Default for SwdocsConfig {
	fn default() -> Self {
		Self {
			definitions: default_definitions_dir(),
			overlays: OverlaysConfig::default(),
			exclude: ExcludeConfig::default(),
			sheet: SheetConfig::default(),
		}
	}
}

fn default_definitions_dir() -> PathBuf {
	PathBuf::from(DEFAULT_DEFINITIONS_DIR)
}

/// Paths of the overlay files. Each overlay is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverlaysConfig {
	/// TOML table of label keys.
	#[serde(default)]
	pub label: Option<PathBuf>,
	/// Tab separated language file.
	#[serde(default)]
	pub lang: Option<PathBuf>,
	/// TOML table of template variables.
	#[serde(default)]
	pub ctx: Option<PathBuf>,
}

/// Configuration for excluding definition files from scanning.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExcludeConfig {
	/// Gitignore-style patterns relative to the definitions directory.
	///
	/// Examples: `"legacy/"`, `"*_old.xml"`, `"!keep_old.xml"`.
	#[serde(default)]
	pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SheetConfig {
	#[serde(default)]
	pub dialect: SheetDialect,
}

impl SwdocsConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> SwResult<Option<SwdocsConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::parse(&content)?;
		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	pub fn parse(content: &str) -> SwResult<SwdocsConfig> {
		toml::from_str(content).map_err(|e| SwError::ConfigParse(e.to_string()))
	}
}
