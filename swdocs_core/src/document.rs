use std::ops::RangeBounds;

use derive_more::Deref;
use derive_more::DerefMut;
use serde::Serialize;

use crate::SwError;
use crate::SwResult;

/// An ordered sequence of [`Block`]s.
///
/// Documents are built by appending blocks and sub-documents, then handed to
/// a renderer such as [`render_markdown`](crate::render_markdown).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deref, DerefMut)]
#[serde(transparent)]
pub struct Document(Vec<Block>);

impl Document {
	pub fn new() -> Self {
		Self(Vec::new())
	}

	/// Move every block of `other` to the end of this document.
	pub fn append(&mut self, mut other: Document) {
		self.0.append(&mut other.0);
	}

	/// A new document holding a copy of the blocks in `range`.
	pub fn slice(&self, range: impl RangeBounds<usize>) -> Document {
		let start = match range.start_bound() {
			std::ops::Bound::Included(value) => *value,
			std::ops::Bound::Excluded(value) => *value + 1,
			std::ops::Bound::Unbounded => 0,
		};
		let end = match range.end_bound() {
			std::ops::Bound::Included(value) => *value + 1,
			std::ops::Bound::Excluded(value) => *value,
			std::ops::Bound::Unbounded => self.0.len(),
		};
		let end = end.min(self.0.len());
		let start = start.min(end);

		Self(self.0[start..end].to_vec())
	}

	/// Add `delta` to the level of every heading.
	///
	/// All levels are checked before any is changed, so a shift that would
	/// leave a heading outside 1-6 returns an error and leaves the document
	/// untouched.
	pub fn shift_headings(&mut self, delta: i32) -> SwResult<()> {
		let shifted = self
			.0
			.iter()
			.map(|block| {
				match block {
					Block::Heading { level, .. } => level.shifted(delta).map(Some),
					_ => Ok(None),
				}
			})
			.collect::<SwResult<Vec<_>>>()?;

		for (block, new_level) in self.0.iter_mut().zip(shifted) {
			if let (Block::Heading { level, .. }, Some(new_level)) = (block, new_level) {
				*level = new_level;
			}
		}

		Ok(())
	}

	/// Consuming variant of [`Document::shift_headings`].
	pub fn shifted(mut self, delta: i32) -> SwResult<Self> {
		self.shift_headings(delta)?;
		Ok(self)
	}
}

impl From<Vec<Block>> for Document {
	fn from(blocks: Vec<Block>) -> Self {
		Self(blocks)
	}
}

impl FromIterator<Block> for Document {
	fn from_iter<T: IntoIterator<Item = Block>>(iter: T) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl Extend<Block> for Document {
	fn extend<T: IntoIterator<Item = Block>>(&mut self, iter: T) {
		self.0.extend(iter);
	}
}

impl IntoIterator for Document {
	type IntoIter = std::vec::IntoIter<Block>;
	type Item = Block;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<'a> IntoIterator for &'a Document {
	type IntoIter = std::slice::Iter<'a, Block>;
	type Item = &'a Block;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

/// A single element of a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum Block {
	Heading { text: String, level: HeadingLevel },
	Paragraph { text: String },
	Table(TableData),
	Callout { text: String, kind: CalloutKind },
}

impl Block {
	pub fn heading(text: impl Into<String>, level: i32) -> SwResult<Self> {
		Ok(Self::Heading {
			text: text.into(),
			level: HeadingLevel::new(level)?,
		})
	}

	pub fn paragraph(text: impl Into<String>) -> Self {
		Self::Paragraph { text: text.into() }
	}

	pub fn callout(text: impl Into<String>, kind: CalloutKind) -> Self {
		Self::Callout {
			text: text.into(),
			kind,
		}
	}
}

/// A markdown heading level, always within 1-6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
	pub const MAX: u8 = 6;
	pub const MIN: u8 = 1;

	pub fn new(level: i32) -> SwResult<Self> {
		if (i32::from(Self::MIN)..=i32::from(Self::MAX)).contains(&level) {
			Ok(Self(level as u8))
		} else {
			Err(SwError::HeadingLevel(level))
		}
	}

	pub fn get(self) -> u8 {
		self.0
	}

	pub fn shifted(self, delta: i32) -> SwResult<Self> {
		Self::new(i32::from(self.0).saturating_add(delta))
	}
}

impl std::fmt::Display for HeadingLevel {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalloutKind {
	Note,
	Warning,
}

impl CalloutKind {
	/// The alert marker used by GitHub flavoured markdown.
	pub fn tag(self) -> &'static str {
		match self {
			Self::Note => "[!NOTE]",
			Self::Warning => "[!WARNING]",
		}
	}
}

/// A non-empty row of table cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deref)]
#[serde(transparent)]
pub struct TableDataRow(Vec<String>);

impl TableDataRow {
	pub fn new<I, S>(cells: I) -> SwResult<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let cells: Vec<String> = cells.into_iter().map(Into::into).collect();
		if cells.is_empty() {
			return Err(SwError::EmptyTableRow);
		}

		Ok(Self(cells))
	}
}

/// A table: a header row and body rows that all share the header's width.
///
/// Every mutation checks the width first and leaves the table unchanged when
/// the check fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableData {
	head: TableDataRow,
	rows: Vec<TableDataRow>,
}

impl TableData {
	pub fn new(head: TableDataRow) -> Self {
		Self {
			head,
			rows: Vec::new(),
		}
	}

	pub fn with_rows(head: TableDataRow, rows: Vec<TableDataRow>) -> SwResult<Self> {
		let mut table = Self::new(head);
		for row in &rows {
			table.check_width(row)?;
		}
		table.rows = rows;

		Ok(table)
	}

	pub fn head(&self) -> &TableDataRow {
		&self.head
	}

	pub fn rows(&self) -> &[TableDataRow] {
		&self.rows
	}

	/// Number of cells in every row.
	pub fn width(&self) -> usize {
		self.head.len()
	}

	pub fn push_row(&mut self, row: TableDataRow) -> SwResult<()> {
		self.check_width(&row)?;
		self.rows.push(row);
		Ok(())
	}

	/// Insert a body row at `index`, clamped to the current number of rows.
	pub fn insert_row(&mut self, index: usize, row: TableDataRow) -> SwResult<()> {
		self.check_width(&row)?;
		let index = index.min(self.rows.len());
		self.rows.insert(index, row);
		Ok(())
	}

	/// Replace the body row at `index` and return the previous one. Returns
	/// `None` without touching the table when `index` is out of bounds.
	pub fn replace_row(&mut self, index: usize, row: TableDataRow) -> SwResult<Option<TableDataRow>> {
		self.check_width(&row)?;
		Ok(self
			.rows
			.get_mut(index)
			.map(|current| std::mem::replace(current, row)))
	}

	/// Replace the header. With body rows present the width must not change.
	pub fn set_head(&mut self, head: TableDataRow) -> SwResult<()> {
		if !self.rows.is_empty() && head.len() != self.width() {
			return Err(SwError::TableWidth {
				expected: self.width(),
				got: head.len(),
			});
		}

		self.head = head;
		Ok(())
	}

	fn check_width(&self, row: &TableDataRow) -> SwResult<()> {
		if row.len() == self.width() {
			Ok(())
		} else {
			Err(SwError::TableWidth {
				expected: self.width(),
				got: row.len(),
			})
		}
	}
}
