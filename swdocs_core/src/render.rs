use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::Block;
use crate::CalloutKind;
use crate::Document;
use crate::HeadingLevel;
use crate::SwError;
use crate::SwResult;
use crate::TableData;
use crate::TableDataRow;
use crate::overlay::Translation;
use crate::overlay::escape_field;

/// Column names of a language file, in order.
pub const LANGUAGE_HEAD: [&str; 4] = ["id", "description", "en", "local"];

/// Render a document as markdown. Blocks are separated by a blank line.
pub fn render_markdown(doc: &Document) -> String {
	doc.iter()
		.map(render_block)
		.collect::<Vec<_>>()
		.join("\n")
}

/// Render a single block. The result always ends with a newline.
pub fn render_block(block: &Block) -> String {
	match block {
		Block::Heading { text, level } => render_heading(text, *level),
		Block::Paragraph { text } => format!("{text}\n"),
		Block::Table(table) => render_table(table),
		Block::Callout { text, kind } => render_callout(text, *kind),
	}
}

fn render_heading(text: &str, level: HeadingLevel) -> String {
	format!("{} {text}\n", "#".repeat(usize::from(level.get())))
}

fn render_table(table: &TableData) -> String {
	let mut result = render_table_row(table.head());
	result.push('|');
	for _ in 0..table.width() {
		result.push_str(" --- |");
	}
	result.push('\n');

	for row in table.rows() {
		result.push_str(&render_table_row(row));
	}

	result
}

fn render_table_row(row: &TableDataRow) -> String {
	let mut line = String::from("|");
	for cell in row.iter() {
		line.push(' ');
		line.push_str(&escape_table_cell(cell));
		line.push_str(" |");
	}
	line.push('\n');
	line
}

/// Keep a cell on one line and stop it from closing the cell early.
fn escape_table_cell(cell: &str) -> String {
	cell.replace('|', "\\|").replace("\r\n", "<br>").replace('\n', "<br>")
}

fn render_callout(text: &str, kind: CalloutKind) -> String {
	let mut lines = vec![format!("> {}", kind.tag())];
	lines.extend(text.split('\n').map(|line| format!("> {line}")));

	let mut result = lines.join("\n");
	result.push('\n');
	result
}

/// Field delimiter of a sheet export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetDialect {
	/// Comma separated values.
	Csv,
	/// Tab separated values.
	#[default]
	Tsv,
}

impl SheetDialect {
	pub fn delimiter(self) -> u8 {
		match self {
			Self::Csv => b',',
			Self::Tsv => b'\t',
		}
	}

	/// Conventional file extension for the dialect.
	pub fn extension(self) -> &'static str {
		match self {
			Self::Csv => "csv",
			Self::Tsv => "tsv",
		}
	}

	/// The dialect whose extension `path` carries, ignoring case.
	pub fn from_extension(path: &Path) -> Option<Self> {
		let extension = path.extension()?.to_str()?;
		[Self::Csv, Self::Tsv]
			.into_iter()
			.find(|dialect| extension.eq_ignore_ascii_case(dialect.extension()))
	}
}

/// Encode sheet records as delimited text. Fields are quoted only when they
/// contain the delimiter, a quote or a line break.
pub fn render_sheet(rows: &[Vec<String>], dialect: SheetDialect) -> SwResult<String> {
	let mut writer = csv::WriterBuilder::new()
		.delimiter(dialect.delimiter())
		.flexible(true)
		.from_writer(Vec::new());

	for row in rows {
		writer
			.write_record(row)
			.map_err(|e| SwError::SheetWrite(e.to_string()))?;
	}

	let bytes = writer
		.into_inner()
		.map_err(|e| SwError::SheetWrite(e.to_string()))?;

	String::from_utf8(bytes).map_err(|e| SwError::SheetWrite(e.to_string()))
}

/// Encode language records as a tab separated language file with a header
/// row. Fields are never quoted; line breaks, tabs and backslashes are
/// escaped so the output reads back with [`Language::parse`].
///
/// [`Language::parse`]: crate::Language::parse
pub fn render_translations(records: &[Translation]) -> SwResult<String> {
	let mut writer = csv::WriterBuilder::new()
		.delimiter(b'\t')
		.quote_style(csv::QuoteStyle::Never)
		.from_writer(Vec::new());

	let write_error = |e: csv::Error| SwError::SheetWrite(e.to_string());
	writer.write_record(LANGUAGE_HEAD).map_err(write_error)?;
	for record in records {
		writer
			.write_record(
				[&record.id, &record.description, &record.en, &record.local]
					.map(|field| escape_field(field)),
			)
			.map_err(write_error)?;
	}

	let bytes = writer
		.into_inner()
		.map_err(|e| SwError::SheetWrite(e.to_string()))?;

	String::from_utf8(bytes).map_err(|e| SwError::SheetWrite(e.to_string()))
}
