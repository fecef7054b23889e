use serde::Deserialize;
use serde::Serialize;

use crate::SwError;
use crate::SwResult;
use crate::overlay::Context;
use crate::overlay::Label;
use crate::overlay::Language;

/// Opening delimiter of a template placeholder, e.g. `$[vehicle]`.
pub const PLACEHOLDER_OPEN: &str = "$[";
/// Closing delimiter of a template placeholder.
pub const PLACEHOLDER_CLOSE: char = ']';

/// A translatable piece of text.
///
/// `id` is the stable identifier used to look the text up in a [`Language`]
/// table. Literal texts (fixed headings, logic type names) carry no id and
/// are looked up by their English string instead. `en` is always the
/// fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Text {
	pub id: Option<String>,
	pub en: String,
}

impl Text {
	pub fn new(id: impl Into<String>, en: impl Into<String>) -> Self {
		Self {
			id: Some(id.into()),
			en: en.into(),
		}
	}

	/// A text without identifier, translated by matching its English string.
	pub fn literal(en: impl Into<String>) -> Self {
		Self {
			id: None,
			en: en.into(),
		}
	}
}

impl From<&str> for Text {
	fn from(value: &str) -> Self {
		Self::literal(value)
	}
}

impl std::fmt::Display for Text {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.en)
	}
}

/// Look up `key` in the label table.
///
/// Without a table the key itself is returned so that missing configuration
/// shows up as visible placeholder tokens. A table that lacks the key is a
/// configuration error.
pub fn label_get(label: Option<&Label>, key: &str) -> SwResult<String> {
	let Some(label) = label else {
		return Ok(key.to_string());
	};

	label
		.get(key)
		.map(str::to_string)
		.ok_or_else(|| SwError::LabelKey(key.to_string()))
}

/// Translate `text` with the language table, falling back to English.
pub fn lang_translate(lang: Option<&Language>, text: &Text) -> String {
	lang.and_then(|lang| lang.translate(text))
		.unwrap_or(text.en.as_str())
		.to_string()
}

/// Replace every `$[name]` placeholder in `content` with its value from
/// `ctx`.
///
/// Placeholders are resolved left to right and substituted values are not
/// scanned again. Without a context the content is returned unchanged. An
/// unterminated `$[` is kept as is.
pub fn ctx_format(ctx: Option<&Context>, content: &str) -> SwResult<String> {
	let Some(ctx) = ctx else {
		return Ok(content.to_string());
	};

	let mut result = String::with_capacity(content.len());
	let mut rest = content;

	while let Some(start) = rest.find(PLACEHOLDER_OPEN) {
		let after_open = &rest[start + PLACEHOLDER_OPEN.len()..];
		let Some(end) = after_open.find(PLACEHOLDER_CLOSE) else {
			break;
		};

		let name = &after_open[..end];
		let value = ctx
			.get(name)
			.ok_or_else(|| SwError::TemplateKey(name.to_string()))?;

		result.push_str(&rest[..start]);
		result.push_str(value);
		rest = &after_open[end + PLACEHOLDER_CLOSE.len_utf8()..];
	}

	result.push_str(rest);
	Ok(result)
}

/// The optional overlay tables applied while generating documents.
///
/// Every table is independent: any combination may be absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlays<'a> {
	pub label: Option<&'a Label>,
	pub lang: Option<&'a Language>,
	pub ctx: Option<&'a Context>,
}

impl<'a> Overlays<'a> {
	pub fn new(
		label: Option<&'a Label>,
		lang: Option<&'a Language>,
		ctx: Option<&'a Context>,
	) -> Self {
		Self { label, lang, ctx }
	}

	pub fn label(&self, key: &str) -> SwResult<String> {
		label_get(self.label, key)
	}

	pub fn translate(&self, text: &Text) -> String {
		lang_translate(self.lang, text)
	}

	/// Translate, then fill template placeholders. Localized strings may
	/// themselves contain placeholders, so the order matters.
	pub fn resolve(&self, text: &Text) -> SwResult<String> {
		ctx_format(self.ctx, &lang_translate(self.lang, text))
	}
}
