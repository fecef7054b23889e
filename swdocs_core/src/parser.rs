use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use roxmltree::Node;

use crate::Category;
use crate::Definition;
use crate::DefinitionFlags;
use crate::LogicMode;
use crate::LogicType;
use crate::SwError;
use crate::SwResult;
use crate::Voxel;

/// Name shown in errors for definitions that were not read from a file.
const IN_MEMORY_SOURCE: &str = "<memory>";

/// Parse the XML of one component definition.
///
/// `key` seeds the language identifiers of every text in the definition.
/// Missing attributes and elements fall back to empty strings and zeroes.
pub fn parse_definition(xml: &str, key: Option<&str>, file: Option<&Path>) -> SwResult<Definition> {
	let path = file.map_or_else(|| IN_MEMORY_SOURCE.to_string(), |p| p.display().to_string());
	let doc = roxmltree::Document::parse(xml).map_err(|e| {
		let pos = e.pos();
		SwError::DefinitionParse {
			path: path.clone(),
			line: pos.row,
			column: pos.col,
			reason: e.to_string(),
		}
	})?;

	let reader = ElementReader {
		doc: &doc,
		path: &path,
	};
	let root = doc.root_element();
	if root.tag_name().name() != "definition" {
		return Err(reader.error(
			root,
			format!(
				"expected a `definition` root element, found `{}`",
				root.tag_name().name()
			),
		));
	}

	let mut defn = Definition::new(key, attribute_string(root, "name"));
	defn.file = file.map(Path::to_path_buf);

	let category = reader.number(root, "category")?.unwrap_or(0_i64);
	defn.category = Category::from_value(category)
		.ok_or_else(|| reader.error(root, format!("unknown category `{category}`")))?;
	defn.mass = reader.number(root, "mass")?.unwrap_or(0.0_f64).into();
	defn.value = reader.number(root, "value")?.unwrap_or(0);
	defn.flags = DefinitionFlags::from_bits_retain(reader.number(root, "flags")?.unwrap_or(0));
	defn.tags = attribute_string(root, "tags");

	if let Some(tooltip) = child_element(root, "tooltip_properties") {
		defn.tooltip_short.en = attribute_string(tooltip, "short_description");
		defn.tooltip_long.en = attribute_string(tooltip, "description");
	}

	if let Some(logic_nodes) = child_element(root, "logic_nodes") {
		for node in logic_nodes
			.children()
			.filter(|n| n.is_element() && n.tag_name().name() == "logic_node")
		{
			let mode = reader.number(node, "mode")?.unwrap_or(0_i64);
			let mode = LogicMode::from_value(mode)
				.ok_or_else(|| reader.error(node, format!("unknown logic node mode `{mode}`")))?;
			let type_value = reader.number(node, "type")?.unwrap_or(0_i64);
			let r#type = LogicType::from_value(type_value).ok_or_else(|| {
				reader.error(node, format!("unknown logic node type `{type_value}`"))
			})?;

			defn.push_logic_node(
				mode,
				r#type,
				attribute_string(node, "label"),
				attribute_string(node, "description"),
			);
		}
	}

	if let Some(voxel) = child_element(root, "voxel_min") {
		defn.voxel_min = reader.voxel(voxel)?;
	}
	if let Some(voxel) = child_element(root, "voxel_max") {
		defn.voxel_max = reader.voxel(voxel)?;
	}

	tracing::trace!(path = %path, nodes = defn.logic_nodes.len(), "parsed definition");
	Ok(defn)
}

/// Read and parse a definition file. The file stem becomes the key.
pub fn load_definition_file(path: &Path) -> SwResult<Definition> {
	let xml = std::fs::read_to_string(path)?;
	let key = path.file_stem().map(|stem| stem.to_string_lossy().into_owned());
	parse_definition(&xml, key.as_deref(), Some(path))
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
	node.children()
		.find(|child| child.is_element() && child.tag_name().name() == name)
}

fn attribute_string(node: Node<'_, '_>, name: &str) -> String {
	node.attribute(name).unwrap_or_default().to_string()
}

/// Attribute access with errors that point at the offending element.
struct ElementReader<'a, 'input> {
	doc: &'a roxmltree::Document<'input>,
	path: &'a str,
}

impl ElementReader<'_, '_> {
	fn number<T>(&self, node: Node<'_, '_>, name: &str) -> SwResult<Option<T>>
	where
		T: FromStr,
		T::Err: Display,
	{
		let Some(raw) = node.attribute(name) else {
			return Ok(None);
		};

		raw.trim().parse::<T>().map(Some).map_err(|e| {
			self.error(
				node,
				format!("invalid value `{raw}` for attribute `{name}`: {e}"),
			)
		})
	}

	fn voxel(&self, node: Node<'_, '_>) -> SwResult<Voxel> {
		Ok(Voxel::new(
			self.number(node, "x")?.unwrap_or(0),
			self.number(node, "y")?.unwrap_or(0),
			self.number(node, "z")?.unwrap_or(0),
		))
	}

	fn error(&self, node: Node<'_, '_>, reason: String) -> SwError {
		let pos = self.doc.text_pos_at(node.range().start);
		SwError::DefinitionParse {
			path: self.path.to_string(),
			line: pos.row,
			column: pos.col,
			reason,
		}
	}
}
