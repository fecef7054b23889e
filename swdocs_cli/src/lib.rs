use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use swdocs_core::SheetDialect;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Generate markdown pages and spreadsheets from component definition files.",
	long_about = "swdocs reads component definition files and produces a markdown reference \
	              grouped by category, a spreadsheet export with one row per component, and a \
	              language template for translators.\n\nLabel, language and context files \
	              change the generated text without touching the definitions.\n\nQuick start:\n  \
	              swdocs init   Create swdocs.toml and a definitions directory\n  swdocs list   \
	              Show the scanned definitions\n  swdocs doc    Print the markdown reference\n  \
	              swdocs sheet  Print the spreadsheet export"
)]
pub struct SwdocsCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output. Logs scanning and generation details to
	/// stderr unless `SWDOCS_LOG` sets a filter.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,

	/// Directory of definition files. Overrides `definitions` in
	/// `swdocs.toml`.
	#[arg(long, global = true)]
	pub definitions: Option<PathBuf>,

	/// Label file (TOML). Overrides `[overlays] label`.
	#[arg(long, global = true)]
	pub label: Option<PathBuf>,

	/// Language file (TSV). Overrides `[overlays] lang`.
	#[arg(long, global = true)]
	pub lang: Option<PathBuf>,

	/// Template context file (TOML). Overrides `[overlays] ctx`.
	#[arg(long, global = true)]
	pub ctx: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Initialize swdocs in a project.
	///
	/// Writes a sample `swdocs.toml` and creates the `definitions/`
	/// directory. Existing files are left untouched.
	Init,
	/// List every scanned definition in document order.
	///
	/// Prints the category, key and name of each definition followed by a
	/// count.
	List,
	/// Generate the markdown reference.
	///
	/// Components are grouped under one heading per category and sorted by
	/// name. Use `--flat` for the components in scan order without category
	/// headings.
	Doc {
		/// Emit the component pages in scan order without category
		/// headings.
		#[arg(long, default_value_t = false)]
		flat: bool,

		/// Output format. Use `markdown` for the rendered page or `json` for
		/// the document tree.
		#[arg(long, value_enum, default_value_t = DocFormat::Markdown)]
		format: DocFormat,

		/// Write to this file instead of stdout.
		#[arg(long, short)]
		output: Option<PathBuf>,
	},
	/// Generate the spreadsheet export.
	///
	/// One header row followed by one row per component, in the same order
	/// as the markdown reference.
	Sheet {
		/// Field delimiter. Defaults to the `--output` file extension
		/// (`.csv` or `.tsv`), then `[sheet] dialect` from `swdocs.toml`,
		/// then `tsv`.
		#[arg(long, value_enum)]
		dialect: Option<DialectArg>,

		/// Write to this file instead of stdout.
		#[arg(long, short)]
		output: Option<PathBuf>,
	},
	/// Export a language file template.
	///
	/// Lists every translatable text of the scanned definitions with its
	/// identifier and English string. Translations from the current
	/// language file are kept, so the output can replace it.
	Lang {
		/// Write to this file instead of stdout.
		#[arg(long, short)]
		output: Option<PathBuf>,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DocFormat {
	/// Rendered markdown.
	Markdown,
	/// The document tree as JSON.
	Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DialectArg {
	/// Comma separated values.
	Csv,
	/// Tab separated values.
	Tsv,
}

impl From<DialectArg> for SheetDialect {
	fn from(value: DialectArg) -> Self {
		match value {
			DialectArg::Csv => Self::Csv,
			DialectArg::Tsv => Self::Tsv,
		}
	}
}
