use std::collections::HashSet;

use crate::Block;
use crate::CalloutKind;
use crate::Definition;
use crate::Document;
use crate::LogicMode;
use crate::LogicNode;
use crate::LogicType;
use crate::SwResult;
use crate::TableData;
use crate::TableDataRow;
use crate::overlay::Label;
use crate::overlay::Language;
use crate::overlay::Translation;
use crate::text::Overlays;
use crate::text::Text;
use crate::text::label_get;

/// Heading of the property section of a component.
pub const PROPERTIES_HEADING: &str = "PROPERTIES";
/// Heading of the logic input table.
pub const LOGIC_INPUTS_HEADING: &str = "logic inputs";
/// Heading of the logic output table.
pub const LOGIC_OUTPUTS_HEADING: &str = "logic outputs";
/// Heading of the physical connection table.
pub const CONNECTIONS_HEADING: &str = "connections";

/// Label keys of the sheet header, in column order.
pub const SHEET_HEAD_KEYS: [&str; 12] = [
	"SHEET_HEAD_NAME",
	"SHEET_HEAD_FILE",
	"SHEET_HEAD_CATEGORY",
	"SHEET_HEAD_TAGS",
	"SHEET_HEAD_DEPRECATED",
	"SHEET_HEAD_MASS",
	"SHEET_HEAD_COST",
	"SHEET_HEAD_WIDTH",
	"SHEET_HEAD_DEPTH",
	"SHEET_HEAD_HEIGHT",
	"SHEET_HEAD_SDESC",
	"SHEET_HEAD_DESC",
];

/// Every label key the generators may ask for. A label file used for all
/// outputs needs each of them.
pub const LABEL_KEYS: [&str; 21] = [
	"LABEL_HEAD",
	"VALUE_HEAD",
	"MASS_LABEL",
	"DIMS_LABEL",
	"COST_LABEL",
	"TAGS_LABEL",
	"FILE_LABEL",
	"TYPE_HEAD",
	"DESC_HEAD",
	"SHEET_HEAD_NAME",
	"SHEET_HEAD_FILE",
	"SHEET_HEAD_CATEGORY",
	"SHEET_HEAD_TAGS",
	"SHEET_HEAD_DEPRECATED",
	"SHEET_HEAD_MASS",
	"SHEET_HEAD_COST",
	"SHEET_HEAD_WIDTH",
	"SHEET_HEAD_DEPTH",
	"SHEET_HEAD_HEIGHT",
	"SHEET_HEAD_SDESC",
	"SHEET_HEAD_DESC",
];

/// Label key of the deprecation warning. Only needed for deprecated
/// components.
pub const DEPRECATED_TEXT_KEY: &str = "DEPRECATED_TEXT";

/// Build the property table of one component.
///
/// Value cells are structural and are never translated or templated.
pub fn generate_property_table(defn: &Definition, label: Option<&Label>) -> SwResult<TableData> {
	let head = TableDataRow::new([label_get(label, "LABEL_HEAD")?, label_get(label, "VALUE_HEAD")?])?;
	let rows = vec![
		TableDataRow::new([label_get(label, "MASS_LABEL")?, defn.mass.to_string()])?,
		TableDataRow::new([label_get(label, "DIMS_LABEL")?, defn.dimensions()])?,
		TableDataRow::new([label_get(label, "COST_LABEL")?, defn.value.to_string()])?,
		TableDataRow::new([label_get(label, "TAGS_LABEL")?, defn.tags.clone()])?,
		TableDataRow::new([label_get(label, "FILE_LABEL")?, defn.file_name()])?,
	];

	TableData::with_rows(head, rows)
}

/// Build the logic section of one component: a heading and a table for each
/// non-empty bucket, in the order inputs, outputs, connections.
///
/// Signal nodes are split by mode. Physical connections share one bucket
/// whatever their mode. Nodes keep their relative order.
pub fn generate_logic_document(nodes: &[LogicNode], overlays: &Overlays<'_>) -> SwResult<Document> {
	let mut inputs = Vec::new();
	let mut outputs = Vec::new();
	let mut connections = Vec::new();

	for node in nodes {
		if node.r#type.is_connection() {
			connections.push(node);
			continue;
		}

		match node.mode {
			LogicMode::Input => inputs.push(node),
			LogicMode::Output => outputs.push(node),
		}
	}

	let mut doc = Document::new();
	for (heading, bucket) in [
		(LOGIC_INPUTS_HEADING, inputs),
		(LOGIC_OUTPUTS_HEADING, outputs),
		(CONNECTIONS_HEADING, connections),
	] {
		if bucket.is_empty() {
			continue;
		}

		doc.push(Block::heading(overlays.translate(&Text::literal(heading)), 1)?);
		doc.push(Block::Table(generate_logic_table(&bucket, overlays)?));
	}

	Ok(doc)
}

fn generate_logic_table(nodes: &[&LogicNode], overlays: &Overlays<'_>) -> SwResult<TableData> {
	let head = TableDataRow::new([
		overlays.label("TYPE_HEAD")?,
		overlays.label("LABEL_HEAD")?,
		overlays.label("DESC_HEAD")?,
	])?;
	let mut table = TableData::new(head);

	for node in nodes {
		table.push_row(TableDataRow::new([
			overlays.translate(&Text::literal(node.r#type.name())),
			overlays.resolve(&node.label)?,
			overlays.resolve(&node.description)?,
		])?)?;
	}

	Ok(table)
}

/// Build the document of a single component with its title at level 1.
///
/// The properties and logic sections sit one level below the title, so the
/// result can be shifted as a whole when nested in a larger document.
pub fn generate_document_component(defn: &Definition, overlays: &Overlays<'_>) -> SwResult<Document> {
	let mut doc = Document::new();
	// Names are translated but never templated.
	doc.push(Block::heading(overlays.translate(&defn.name), 1)?);

	if defn.is_deprecated() {
		doc.push(Block::callout(
			overlays.label(DEPRECATED_TEXT_KEY)?,
			CalloutKind::Warning,
		));
	}

	for description in [&defn.tooltip_short, &defn.tooltip_long] {
		let text = overlays.resolve(description)?;
		if !text.is_empty() {
			doc.push(Block::paragraph(text));
		}
	}

	let mut properties = Document::new();
	properties.push(Block::heading(
		overlays.translate(&Text::literal(PROPERTIES_HEADING)),
		1,
	)?);
	properties.push(Block::Table(generate_property_table(defn, overlays.label)?));
	doc.append(properties.shifted(1)?);

	doc.append(generate_logic_document(&defn.logic_nodes, overlays)?.shifted(1)?);

	Ok(doc)
}

/// Concatenate the documents of every component, in input order, without
/// grouping.
pub fn generate_document_component_list<'a>(
	defs: impl IntoIterator<Item = &'a Definition>,
	overlays: &Overlays<'_>,
) -> SwResult<Document> {
	let mut doc = Document::new();
	for defn in defs {
		doc.append(generate_document_component(defn, overlays)?);
	}

	Ok(doc)
}

/// Build the full document: one level 1 heading per non-empty category, in
/// canonical category order, followed by the documents of its components
/// shifted one level down.
pub fn generate_document<'a>(
	defs: impl IntoIterator<Item = &'a Definition>,
	overlays: &Overlays<'_>,
) -> SwResult<Document> {
	let sorted = sort_definitions(defs);
	let mut doc = Document::new();

	for group in sorted.chunk_by(|a, b| a.category == b.category) {
		let category = group[0].category;
		tracing::debug!(%category, components = group.len(), "generating category section");

		doc.push(Block::heading(category.label(), 1)?);
		for defn in group {
			doc.append(generate_document_component(defn, overlays)?.shifted(1)?);
		}
	}

	Ok(doc)
}

/// Order definitions by category, then stored English name, then key.
///
/// The order ignores any language table so that every translation of a
/// document has the same structure. The sort is stable, so definitions that
/// compare equal keep their input order.
pub fn sort_definitions<'a>(defs: impl IntoIterator<Item = &'a Definition>) -> Vec<&'a Definition> {
	let mut sorted: Vec<&Definition> = defs.into_iter().collect();
	sorted.sort_by(|a, b| {
		a.category
			.cmp(&b.category)
			.then_with(|| a.name.en.cmp(&b.name.en))
			.then_with(|| a.key.cmp(&b.key))
	});
	sorted
}

/// Flatten one component into a sheet record.
///
/// Columns: name, file, category, tags, deprecated, mass, cost, width,
/// depth, height, short description, long description.
pub fn generate_sheet_row(defn: &Definition, overlays: &Overlays<'_>) -> SwResult<Vec<String>> {
	let deprecated = if defn.is_deprecated() { "TRUE" } else { "FALSE" };

	Ok(vec![
		overlays.resolve(&defn.name)?,
		defn.file_name(),
		defn.category.label().to_string(),
		defn.tags.clone(),
		deprecated.to_string(),
		defn.mass.to_string(),
		defn.value.to_string(),
		defn.width().to_string(),
		defn.depth().to_string(),
		defn.height().to_string(),
		overlays.resolve(&defn.tooltip_short)?,
		overlays.resolve(&defn.tooltip_long)?,
	])
}

/// Build the sheet: a header record followed by one record per component,
/// in the same order as [`generate_document`].
pub fn generate_sheet<'a>(
	defs: impl IntoIterator<Item = &'a Definition>,
	overlays: &Overlays<'_>,
) -> SwResult<Vec<Vec<String>>> {
	let head = SHEET_HEAD_KEYS
		.iter()
		.map(|key| overlays.label(key))
		.collect::<SwResult<Vec<_>>>()?;

	let mut rows = vec![head];
	for defn in sort_definitions(defs) {
		rows.push(generate_sheet_row(defn, overlays)?);
	}

	tracing::debug!(rows = rows.len() - 1, "generated sheet");
	Ok(rows)
}

/// List every translatable text as language records: the fixed headings
/// and logic type names first, then the texts of each definition in
/// document order.
///
/// Existing translations from `lang` are carried over, so the result can be
/// written back as an updated language file. Each identifier appears once.
pub fn collect_translations<'a>(
	defs: impl IntoIterator<Item = &'a Definition>,
	lang: Option<&Language>,
) -> Vec<Translation> {
	let literals = [
		PROPERTIES_HEADING,
		LOGIC_INPUTS_HEADING,
		LOGIC_OUTPUTS_HEADING,
		CONNECTIONS_HEADING,
	]
	.into_iter()
	.chain(LogicType::ALL.iter().map(|r#type| r#type.name()))
	.map(Text::literal);

	let definition_texts = sort_definitions(defs).into_iter().flat_map(|defn| {
		[&defn.name, &defn.tooltip_short, &defn.tooltip_long]
			.into_iter()
			.chain(
				defn.logic_nodes
					.iter()
					.flat_map(|node| [&node.label, &node.description]),
			)
			.cloned()
	});

	let mut seen_ids = HashSet::new();
	let mut seen_literals = HashSet::new();
	let mut records = Vec::new();

	for text in literals.chain(definition_texts) {
		let is_new = match &text.id {
			Some(id) => seen_ids.insert(id.clone()),
			None => seen_literals.insert(text.en.clone()),
		};
		if !is_new {
			continue;
		}

		let local = lang
			.and_then(|lang| lang.find(&text))
			.map(|record| record.local.clone())
			.unwrap_or_default();
		records.push(Translation::new(
			text.id.unwrap_or_default(),
			"",
			text.en,
			local,
		));
	}

	records
}
