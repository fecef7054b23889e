#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use swdocs_core::AnyEmptyResult;

pub const CLOCK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<definition name="Clock" category="6" mass="1" value="100" tags="basic">
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

/// Deprecated, no descriptions, no logic nodes.
pub const PLATE_XML: &str = r#"<definition name="Plate" category="0" mass="0.5" value="5" flags="536870912" tags="basic,block"/>"#;

/// Every label key `swdocs doc` asks for.
pub const DOC_LABEL_TOML: &str = r#"LABEL_HEAD = "Property"
VALUE_HEAD = "Value"
MASS_LABEL = "Mass"
DIMS_LABEL = "Size"
COST_LABEL = "Cost"
TAGS_LABEL = "Tags"
FILE_LABEL = "File"
TYPE_HEAD = "Type"
DESC_HEAD = "Description"
DEPRECATED_TEXT = "This component is deprecated."
"#;

pub const FRENCH_TSV: &str = "id\tdescription\ten\tlocal
def_clock_name\t\tClock\tHorloge
def_clock_desc\t\tCounts $[unit] since midnight.\tCompte les $[unit] depuis minuit.
\t\tlogic inputs\tentrées logiques
";

pub fn swdocs_cmd() -> Command {
	let mut cmd = Command::cargo_bin("swdocs").expect("the swdocs binary is built for tests");
	cmd.env("NO_COLOR", "1").env_remove("SWDOCS_LOG");
	cmd
}

/// Write the clock and plate definitions to `root/definitions`.
pub fn write_project(root: &Path) -> AnyEmptyResult {
	let definitions = root.join("definitions");
	std::fs::create_dir_all(&definitions)?;
	std::fs::write(definitions.join("clock.xml"), CLOCK_XML)?;
	std::fs::write(definitions.join("plate.xml"), PLATE_XML)?;
	Ok(())
}

pub fn stdout_of(cmd: &mut Command) -> String {
	let output = cmd.assert().success().get_output().stdout.clone();
	String::from_utf8_lossy(&output).into_owned()
}
