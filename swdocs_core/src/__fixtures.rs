use std::path::PathBuf;

use crate::Category;
use crate::Definition;
use crate::DefinitionFlags;
use crate::LABEL_KEYS;
use crate::Label;
use crate::LogicMode;
use crate::LogicType;
use crate::Mass;
use crate::Voxel;
use crate::generator::DEPRECATED_TEXT_KEY;

/// A small display with one node in each logic bucket.
pub fn clock_definition() -> Definition {
	let mut defn = Definition::new(Some("clock"), "Clock");
	defn.category = Category::Displays;
	defn.mass = Mass(1.0);
	defn.value = 100;
	defn.tags = "basic".to_string();
	defn.tooltip_short.en = "Shows the time.".to_string();
	defn.voxel_min = Voxel::new(0, 0, 0);
	defn.voxel_max = Voxel::new(0, 1, 0);
	defn.push_logic_node(
		LogicMode::Output,
		LogicType::Float,
		"Time",
		"The current time",
	);
	defn.push_logic_node(
		LogicMode::Input,
		LogicType::Bool,
		"Enabled",
		"Whether the clock runs",
	);
	defn.push_logic_node(
		LogicMode::Input,
		LogicType::Electric,
		"Electric",
		"Power supply",
	);
	defn
}

pub fn deprecated_clock_definition() -> Definition {
	let mut defn = clock_definition();
	defn.flags = DefinitionFlags::DEPRECATED;
	defn
}

/// A definition without logic nodes or descriptions.
pub fn plain_definition(key: &str, name: &str, category: Category) -> Definition {
	let mut defn = Definition::new(Some(key), name);
	defn.category = category;
	defn
}

/// A label table holding every key the generators can ask for, each mapped
/// to a lowercase display string.
pub fn full_label() -> Label {
	LABEL_KEYS
		.iter()
		.copied()
		.chain([DEPRECATED_TEXT_KEY])
		.map(|key| (key, key.to_ascii_lowercase()))
		.collect()
}

pub fn label_without(missing: &str) -> Label {
	LABEL_KEYS
		.iter()
		.copied()
		.chain([DEPRECATED_TEXT_KEY])
		.filter(|key| *key != missing)
		.map(|key| (key, key.to_ascii_lowercase()))
		.collect()
}

pub const CLOCK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<definition name="Clock" category="6" type="0" mass="1" value="100" flags="0" tags="basic">
	<tooltip_properties short_description="Shows the time." description="Counts $[unit] since midnight."/>
	<logic_nodes>
		<logic_node label="Time" mode="0" type="1" description="The current time"/>
		<logic_node label="Enabled" mode="1" type="0" description="Whether the clock runs"/>
		<logic_node label="Electric" mode="1" type="4" description="Power supply"/>
	</logic_nodes>
	<voxel_min x="0" y="0" z="0"/>
	<voxel_max x="0" y="1" z="0"/>
</definition>
"#;

pub const LANGUAGE_TSV: &str = "id\tdescription\ten\tlocal
def_clock_name\t\tClock\tHorloge
def_clock_s_desc\t\tShows the time.\tAffiche l'heure en $[unit].
def_clock_node_0_label\t\tTime\tHeure
\t\tlogic inputs\tentrées logiques
\t\ton/off\tmarche/arrêt
\t\tPROPERTIES\t
";

pub fn fixture_path(name: &str) -> PathBuf {
	PathBuf::from("definitions").join(name)
}
