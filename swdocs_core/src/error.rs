use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum SwError {
	#[error(transparent)]
	#[diagnostic(code(swdocs::io_error))]
	Io(#[from] std::io::Error),

	#[error("label key not found: `{0}`")]
	#[diagnostic(
		code(swdocs::label_key),
		help("add `{0}` to the label file, or run without a label file to use placeholder keys")
	)]
	LabelKey(String),

	#[error("template key not found: `{0}`")]
	#[diagnostic(
		code(swdocs::template_key),
		help("add `{0}` to the context file referenced by `$[{0}]`")
	)]
	TemplateKey(String),

	#[error("table row has {got} cell(s), expected {expected}")]
	#[diagnostic(
		code(swdocs::table_width),
		help("every row of a table must have as many cells as its header")
	)]
	TableWidth { expected: usize, got: usize },

	#[error("table row must contain at least one cell")]
	#[diagnostic(code(swdocs::empty_table_row))]
	EmptyTableRow,

	#[error("heading level {0} is outside the range 1-6")]
	#[diagnostic(code(swdocs::heading_level))]
	HeadingLevel(i32),

	#[error("failed to parse definition `{path}` at {line}:{column}: {reason}")]
	#[diagnostic(code(swdocs::definition_parse))]
	DefinitionParse {
		path: String,
		line: u32,
		column: u32,
		reason: String,
	},

	#[error("failed to load overlay file `{path}`: {reason}")]
	#[diagnostic(
		code(swdocs::overlay_file),
		help(
			"label and context files are flat TOML string tables; language files are TSV with \
			 `id`, `description`, `en` and `local` columns"
		)
	)]
	OverlayFile { path: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(swdocs::config_parse),
		help("check that swdocs.toml is valid TOML with [overlays], [exclude] and [sheet] sections")
	)]
	ConfigParse(String),

	#[error("failed to write sheet: {0}")]
	#[diagnostic(code(swdocs::sheet_write))]
	SheetWrite(String),

	#[error("symlink cycle detected at: `{path}`")]
	#[diagnostic(
		code(swdocs::symlink_cycle),
		help("remove the circular symlink or exclude this path")
	)]
	SymlinkCycle { path: String },
}

pub type SwResult<T> = Result<T, SwError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
