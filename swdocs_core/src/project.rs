use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;

use crate::Definition;
use crate::SheetDialect;
use crate::SwError;
use crate::SwResult;
use crate::config::SwdocsConfig;
use crate::overlay::Context;
use crate::overlay::Label;
use crate::overlay::Language;
use crate::parser::load_definition_file;
use crate::text::Overlays;

/// Options for controlling how a definitions directory is scanned.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
	/// Gitignore-style patterns to exclude from scanning.
	pub exclude_patterns: Vec<String>,
}

impl ScanOptions {
	/// Construct [`ScanOptions`] from a [`SwdocsConfig`].
	pub fn from_config(config: Option<&SwdocsConfig>) -> Self {
		Self {
			exclude_patterns: config
				.map(|c| c.exclude.patterns.clone())
				.unwrap_or_default(),
		}
	}
}

/// Paths that take precedence over the config file. Relative paths are used
/// as given, not joined to the project root.
#[derive(Debug, Clone, Default)]
pub struct ProjectOverrides {
	pub definitions: Option<PathBuf>,
	pub label: Option<PathBuf>,
	pub lang: Option<PathBuf>,
	pub ctx: Option<PathBuf>,
}

/// Scanned definitions together with their loaded overlays, ready for
/// generating documents.
#[derive(Debug)]
pub struct ProjectContext {
	pub root: PathBuf,
	/// Directory the definitions were read from.
	pub definitions_dir: PathBuf,
	/// Definitions sorted by file path.
	pub definitions: Vec<Definition>,
	pub label: Option<Label>,
	pub lang: Option<Language>,
	pub ctx: Option<Context>,
	pub dialect: SheetDialect,
}

impl ProjectContext {
	pub fn overlays(&self) -> Overlays<'_> {
		Overlays::new(self.label.as_ref(), self.lang.as_ref(), self.ctx.as_ref())
	}
}

/// Load the discovered config, scan the definitions directory and load the
/// configured overlays.
pub fn scan_project_with_config(root: &Path) -> SwResult<ProjectContext> {
	scan_project_with_overrides(root, &ProjectOverrides::default())
}

/// Like [`scan_project_with_config`], with paths from `overrides` replacing
/// those of the config file.
pub fn scan_project_with_overrides(
	root: &Path,
	overrides: &ProjectOverrides,
) -> SwResult<ProjectContext> {
	let config = SwdocsConfig::load(root)?;
	let options = ScanOptions::from_config(config.as_ref());
	let config = config.unwrap_or_default();

	let definitions_dir = overrides
		.definitions
		.clone()
		.unwrap_or_else(|| root.join(&config.definitions));
	let definitions = scan_definitions(&definitions_dir, &options)?;

	let label_path = overlay_path(root, overrides.label.as_ref(), config.overlays.label.as_ref());
	let lang_path = overlay_path(root, overrides.lang.as_ref(), config.overlays.lang.as_ref());
	let ctx_path = overlay_path(root, overrides.ctx.as_ref(), config.overlays.ctx.as_ref());

	Ok(ProjectContext {
		root: root.to_path_buf(),
		definitions_dir,
		definitions,
		label: label_path.as_deref().map(Label::load).transpose()?,
		lang: lang_path.as_deref().map(Language::load).transpose()?,
		ctx: ctx_path.as_deref().map(Context::load).transpose()?,
		dialect: config.sheet.dialect,
	})
}

fn overlay_path(
	root: &Path,
	override_path: Option<&PathBuf>,
	config_path: Option<&PathBuf>,
) -> Option<PathBuf> {
	override_path
		.cloned()
		.or_else(|| config_path.map(|path| root.join(path)))
}

/// Parse every `*.xml` definition file below `dir`, in path order.
///
/// A missing directory yields no definitions. The first file that fails to
/// parse aborts the scan.
pub fn scan_definitions(dir: &Path, options: &ScanOptions) -> SwResult<Vec<Definition>> {
	let files = collect_files(dir, &options.exclude_patterns)?;
	let mut definitions = Vec::with_capacity(files.len());
	let mut keys: HashMap<String, PathBuf> = HashMap::new();

	for file in files {
		let defn = load_definition_file(&file)?;
		if let Some(key) = &defn.key {
			if let Some(previous) = keys.insert(key.clone(), file.clone()) {
				tracing::warn!(
					key = %key,
					first = %previous.display(),
					second = %file.display(),
					"duplicate definition key, language identifiers will collide"
				);
			}
		}
		definitions.push(defn);
	}

	tracing::debug!(dir = %dir.display(), count = definitions.len(), "scanned definitions");
	Ok(definitions)
}

/// Build a `Gitignore` matcher from the `[exclude]` patterns.
fn build_exclude_matcher(root: &Path, patterns: &[String]) -> SwResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(root);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|e| {
			SwError::ConfigParse(format!("invalid exclude pattern `{pattern}`: {e}"))
		})?;
	}
	builder
		.build()
		.map_err(|e| SwError::ConfigParse(format!("failed to build exclude rules: {e}")))
}

fn collect_files(root: &Path, exclude_patterns: &[String]) -> SwResult<Vec<PathBuf>> {
	let mut files = Vec::new();
	let mut visited_dirs = HashSet::new();
	let exclude = build_exclude_matcher(root, exclude_patterns)?;

	walk_dir(root, &mut files, &exclude, &mut visited_dirs)?;
	// Sort for deterministic ordering.
	files.sort();
	Ok(files)
}

fn walk_dir(
	dir: &Path,
	files: &mut Vec<PathBuf>,
	exclude: &Gitignore,
	visited_dirs: &mut HashSet<PathBuf>,
) -> SwResult<()> {
	if !dir.is_dir() {
		return Ok(());
	}

	// Detect symlink cycles by tracking canonical paths.
	let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
	if !visited_dirs.insert(canonical) {
		return Err(SwError::SymlinkCycle {
			path: dir.display().to_string(),
		});
	}

	for entry in std::fs::read_dir(dir)? {
		let path = entry?.path();

		let is_dir = path.is_dir();
		if is_dir
			&& path
				.file_name()
				.and_then(|n| n.to_str())
				.is_some_and(|name| name.starts_with('.'))
		{
			continue;
		}

		if exclude.matched(&path, is_dir).is_ignore() {
			tracing::trace!(path = %path.display(), "excluded");
			continue;
		}

		if is_dir {
			walk_dir(&path, files, exclude, visited_dirs)?;
		} else if is_definition_file(&path) {
			files.push(path);
		}
	}

	Ok(())
}

/// Check if a file looks like a definition file.
pub fn is_definition_file(path: &Path) -> bool {
	path.extension()
		.and_then(|e| e.to_str())
		.is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}
