//! Overlay tables and their file loaders.
//!
//! - [`Label`]: flat TOML table of label keys to display strings.
//! - [`Context`]: flat TOML table of template variables for `$[name]`
//!   placeholders.
//! - [`Language`]: tab separated translation records with the columns
//!   `id`, `description`, `en` and `local`.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::Path;

use derive_more::Deref;
use serde::Deserialize;
use serde::Serialize;

use crate::SwError;
use crate::SwResult;
use crate::text::Text;

/// Label overrides keyed by label key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct Label(BTreeMap<String, String>);

impl Label {
	pub fn new(entries: BTreeMap<String, String>) -> Self {
		Self(entries)
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	/// Parse a label table from TOML content.
	pub fn parse(content: &str, path_display: &str) -> SwResult<Self> {
		parse_string_table(content, path_display).map(Self)
	}

	pub fn load(path: &Path) -> SwResult<Self> {
		let content = read_overlay(path)?;
		let label = Self::parse(&content, &path.display().to_string())?;
		tracing::debug!(path = %path.display(), entries = label.len(), "loaded label table");
		Ok(label)
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Label {
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		Self(
			iter.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.collect(),
		)
	}
}

/// Template variables keyed by placeholder name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct Context(BTreeMap<String, String>);

impl Context {
	pub fn new(entries: BTreeMap<String, String>) -> Self {
		Self(entries)
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.0.get(name).map(String::as_str)
	}

	/// Parse a context table from TOML content.
	pub fn parse(content: &str, path_display: &str) -> SwResult<Self> {
		parse_string_table(content, path_display).map(Self)
	}

	pub fn load(path: &Path) -> SwResult<Self> {
		let content = read_overlay(path)?;
		let ctx = Self::parse(&content, &path.display().to_string())?;
		tracing::debug!(path = %path.display(), entries = ctx.len(), "loaded template context");
		Ok(ctx)
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Context {
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		Self(
			iter.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.collect(),
		)
	}
}

/// One record of a language file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
	/// Stable text identifier. Empty for literal records.
	pub id: String,
	/// Free-form note for translators.
	pub description: String,
	/// English source string.
	pub en: String,
	/// Localized string. Empty when not translated yet.
	pub local: String,
}

impl Translation {
	pub fn new(
		id: impl Into<String>,
		description: impl Into<String>,
		en: impl Into<String>,
		local: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			description: description.into(),
			en: en.into(),
			local: local.into(),
		}
	}
}

/// A language table.
///
/// Texts with an identifier are found by id. Literal texts are found among
/// the records without id, by their English string. The first record wins
/// when a key repeats.
#[derive(Debug, Clone, Default)]
pub struct Language {
	records: Vec<Translation>,
	by_id: HashMap<String, usize>,
	by_en: HashMap<String, usize>,
}

impl Language {
	pub fn new(records: Vec<Translation>) -> Self {
		let mut by_id = HashMap::new();
		let mut by_en = HashMap::new();

		for (index, record) in records.iter().enumerate() {
			if record.id.is_empty() {
				by_en.entry(record.en.clone()).or_insert(index);
			} else {
				by_id.entry(record.id.clone()).or_insert(index);
			}
		}

		Self {
			records,
			by_id,
			by_en,
		}
	}

	/// Records in file order.
	pub fn records(&self) -> &[Translation] {
		&self.records
	}

	pub fn find(&self, text: &Text) -> Option<&Translation> {
		let index = match &text.id {
			Some(id) => self.by_id.get(id),
			None => self.by_en.get(&text.en),
		}?;
		self.records.get(*index)
	}

	/// The localized string for `text`, if one exists and is not empty.
	pub fn translate(&self, text: &Text) -> Option<&str> {
		self.find(text)
			.map(|record| record.local.as_str())
			.filter(|local| !local.is_empty())
	}

	/// Parse a language table from tab separated content. The first line is
	/// a header and is skipped. Fields may hold the escapes `\n`, `\r`,
	/// `\t` and `\\`.
	pub fn parse(content: &str, path_display: &str) -> SwResult<Self> {
		let mut reader = csv::ReaderBuilder::new()
			.delimiter(b'\t')
			.quoting(false)
			.has_headers(true)
			.flexible(true)
			.from_reader(content.as_bytes());

		let mut records = Vec::new();
		for result in reader.records() {
			let record = result.map_err(|e| {
				SwError::OverlayFile {
					path: path_display.to_string(),
					reason: e.to_string(),
				}
			})?;

			if record.len() < 4 {
				let line = record.position().map_or(0, csv::Position::line);
				return Err(SwError::OverlayFile {
					path: path_display.to_string(),
					reason: format!("line {line}: expected 4 fields, found {}", record.len()),
				});
			}

			records.push(Translation::new(
				unescape_field(&record[0]),
				unescape_field(&record[1]),
				unescape_field(&record[2]),
				unescape_field(&record[3]),
			));
		}

		Ok(Self::new(records))
	}

	pub fn load(path: &Path) -> SwResult<Self> {
		let content = read_overlay(path)?;
		let lang = Self::parse(&content, &path.display().to_string())?;
		tracing::debug!(path = %path.display(), records = lang.records.len(), "loaded language table");
		Ok(lang)
	}
}

/// Escape the characters a language file field cannot hold raw: line
/// breaks, tabs and the backslash itself.
pub(crate) fn escape_field(value: &str) -> String {
	let mut escaped = String::with_capacity(value.len());
	for ch in value.chars() {
		match ch {
			'\\' => escaped.push_str("\\\\"),
			'\n' => escaped.push_str("\\n"),
			'\r' => escaped.push_str("\\r"),
			'\t' => escaped.push_str("\\t"),
			_ => escaped.push(ch),
		}
	}
	escaped
}

/// Reverse [`escape_field`]. Unknown escapes and a trailing backslash are
/// kept as written.
pub(crate) fn unescape_field(value: &str) -> String {
	let mut unescaped = String::with_capacity(value.len());
	let mut chars = value.chars();
	while let Some(ch) = chars.next() {
		if ch != '\\' {
			unescaped.push(ch);
			continue;
		}

		match chars.next() {
			Some('n') => unescaped.push('\n'),
			Some('r') => unescaped.push('\r'),
			Some('t') => unescaped.push('\t'),
			Some('\\') => unescaped.push('\\'),
			Some(other) => {
				unescaped.push('\\');
				unescaped.push(other);
			}
			None => unescaped.push('\\'),
		}
	}
	unescaped
}

fn read_overlay(path: &Path) -> SwResult<String> {
	std::fs::read_to_string(path).map_err(|e| {
		SwError::OverlayFile {
			path: path.display().to_string(),
			reason: e.to_string(),
		}
	})
}

fn parse_string_table(content: &str, path_display: &str) -> SwResult<BTreeMap<String, String>> {
	toml::from_str(content).map_err(|e| {
		SwError::OverlayFile {
			path: path_display.to_string(),
			reason: e.to_string(),
		}
	})
}
