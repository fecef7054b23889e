use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::text::Text;

/// One component definition.
///
/// Definitions are built once (by [`parse_definition`](crate::parse_definition)
/// or by hand) and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Definition {
	/// Stable key, usually the stem of the source file name.
	pub key: Option<String>,
	/// Path of the source file, when the definition was loaded from disk.
	pub file: Option<PathBuf>,
	pub name: Text,
	pub category: Category,
	pub mass: Mass,
	/// Cost of the component.
	pub value: i64,
	pub flags: DefinitionFlags,
	/// Free-text, comma separated tags.
	pub tags: String,
	pub tooltip_short: Text,
	pub tooltip_long: Text,
	pub logic_nodes: Vec<LogicNode>,
	pub voxel_min: Voxel,
	pub voxel_max: Voxel,
}

impl Definition {
	/// Create an empty definition whose text identifiers are derived from
	/// `key`.
	pub fn new(key: Option<&str>, name: impl Into<String>) -> Self {
		let id_key = key.unwrap_or_default();

		Self {
			key: key.map(str::to_string),
			name: Text::new(text_id(id_key, "name"), name),
			tooltip_short: Text::new(text_id(id_key, "s_desc"), ""),
			tooltip_long: Text::new(text_id(id_key, "desc"), ""),
			..Self::default()
		}
	}

	pub fn is_deprecated(&self) -> bool {
		self.flags.contains(DefinitionFlags::DEPRECATED)
	}

	/// Extent along the X axis.
	pub fn width(&self) -> i64 {
		i64::from(self.voxel_max.x) - i64::from(self.voxel_min.x) + 1
	}

	/// Extent along the Z axis.
	pub fn depth(&self) -> i64 {
		i64::from(self.voxel_max.z) - i64::from(self.voxel_min.z) + 1
	}

	/// Extent along the Y axis.
	pub fn height(&self) -> i64 {
		i64::from(self.voxel_max.y) - i64::from(self.voxel_min.y) + 1
	}

	/// Dimensions formatted as `{width}x{depth}x{height}`.
	pub fn dimensions(&self) -> String {
		format!("{}x{}x{}", self.width(), self.depth(), self.height())
	}

	/// Base name of the source file, or an empty string.
	pub fn file_name(&self) -> String {
		self.file
			.as_deref()
			.and_then(Path::file_name)
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_default()
	}

	/// Append a logic node, deriving its index and text identifiers from its
	/// position.
	pub fn push_logic_node(
		&mut self,
		mode: LogicMode,
		r#type: LogicType,
		label: impl Into<String>,
		description: impl Into<String>,
	) {
		let index = self.logic_nodes.len();
		let id_key = self.key.as_deref().unwrap_or_default();
		self.logic_nodes.push(LogicNode {
			index,
			label: Text::new(node_text_id(id_key, index, "label"), label),
			mode,
			r#type,
			description: Text::new(node_text_id(id_key, index, "desc"), description),
		});
	}
}

/// Language identifier of a definition level text, e.g. `def_clock_name`.
pub fn text_id(key: &str, field: &str) -> String {
	format!("def_{key}_{field}")
}

/// Language identifier of a logic node text, e.g. `def_clock_node_0_label`.
pub fn node_text_id(key: &str, index: usize, field: &str) -> String {
	format!("def_{key}_node_{index}_{field}")
}

/// Mass of a component. Compared approximately and displayed in its
/// shortest decimal form (`10`, `0.5`, `0.25`).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mass(pub f64);

impl PartialEq for Mass {
	fn eq(&self, other: &Self) -> bool {
		float_cmp::approx_eq!(f64, self.0, other.0)
	}
}

impl std::fmt::Display for Mass {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<f64> for Mass {
	fn from(value: f64) -> Self {
		Self(value)
	}
}

bitflags::bitflags! {
	/// Definition flag bits. Unknown bits are kept as they were read.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
	pub struct DefinitionFlags: u64 {
		const DEPRECATED = 1 << 29;
		const _ = !0;
	}
}

impl Default for DefinitionFlags {
	fn default() -> Self {
		Self::empty()
	}
}

/// Integer voxel coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Voxel {
	pub x: i32,
	pub y: i32,
	pub z: i32,
}

impl Voxel {
	pub const fn new(x: i32, y: i32, z: i32) -> Self {
		Self { x, y, z }
	}
}

/// Component category. The declaration order is the canonical order used
/// when grouping components.
#[derive(
	Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
	#[default]
	Blocks,
	VehicleControl,
	Mechanics,
	Propulsion,
	SpecialistEquipment,
	Logic,
	Displays,
	Sensors,
	Decorative,
	Fluid,
	Electric,
	JetEngines,
	Weapons,
	ModularEngines,
	Industry,
	Windows,
}

impl Category {
	pub const ALL: [Category; 16] = [
		Self::Blocks,
		Self::VehicleControl,
		Self::Mechanics,
		Self::Propulsion,
		Self::SpecialistEquipment,
		Self::Logic,
		Self::Displays,
		Self::Sensors,
		Self::Decorative,
		Self::Fluid,
		Self::Electric,
		Self::JetEngines,
		Self::Weapons,
		Self::ModularEngines,
		Self::Industry,
		Self::Windows,
	];

	/// The numeric value used in definition files.
	pub fn value(self) -> u8 {
		self as u8
	}

	pub fn from_value(value: i64) -> Option<Self> {
		usize::try_from(value)
			.ok()
			.and_then(|index| Self::ALL.get(index).copied())
	}

	/// Canonical English label.
	pub fn label(self) -> &'static str {
		match self {
			Self::Blocks => "Blocks",
			Self::VehicleControl => "Vehicle Control",
			Self::Mechanics => "Mechanics",
			Self::Propulsion => "Propulsion",
			Self::SpecialistEquipment => "Specialist Equipment",
			Self::Logic => "Logic",
			Self::Displays => "Displays",
			Self::Sensors => "Sensors",
			Self::Decorative => "Decorative",
			Self::Fluid => "Fluid",
			Self::Electric => "Electric",
			Self::JetEngines => "Jet Engines",
			Self::Weapons => "Weapons",
			Self::ModularEngines => "Modular Engines",
			Self::Industry => "Industry",
			Self::Windows => "Windows",
		}
	}
}

impl std::fmt::Display for Category {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.label())
	}
}

/// One logic node of a definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicNode {
	/// Position within the parent definition.
	pub index: usize,
	pub label: Text,
	pub mode: LogicMode,
	pub r#type: LogicType,
	pub description: Text,
}

/// Direction of a logic node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogicMode {
	/// Value `0` in definition files.
	#[default]
	Output,
	/// Value `1` in definition files.
	Input,
}

impl LogicMode {
	pub fn from_value(value: i64) -> Option<Self> {
		match value {
			0 => Some(Self::Output),
			1 => Some(Self::Input),
			_ => None,
		}
	}
}

/// Kind of value carried by a logic node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogicType {
	#[default]
	Bool,
	Float,
	Torque,
	Water,
	Electric,
	Composite,
	Video,
	Audio,
	Rope,
}

impl LogicType {
	pub const ALL: [LogicType; 9] = [
		Self::Bool,
		Self::Float,
		Self::Torque,
		Self::Water,
		Self::Electric,
		Self::Composite,
		Self::Video,
		Self::Audio,
		Self::Rope,
	];

	pub fn from_value(value: i64) -> Option<Self> {
		usize::try_from(value)
			.ok()
			.and_then(|index| Self::ALL.get(index).copied())
	}

	/// Canonical English word shown in logic tables.
	pub fn name(self) -> &'static str {
		match self {
			Self::Bool => "on/off",
			Self::Float => "number",
			Self::Torque => "power",
			Self::Water => "fluid",
			Self::Electric => "electric",
			Self::Composite => "composite",
			Self::Video => "video",
			Self::Audio => "audio",
			Self::Rope => "rope",
		}
	}

	/// Physical connections are listed together regardless of their mode.
	pub fn is_connection(self) -> bool {
		matches!(
			self,
			Self::Torque | Self::Water | Self::Electric | Self::Rope
		)
	}
}

impl std::fmt::Display for LogicType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}
