use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use swdocs_cli::Commands;
use swdocs_cli::DialectArg;
use swdocs_cli::DocFormat;
use swdocs_cli::SwdocsCli;
use swdocs_core::AnyEmptyResult;
use swdocs_core::DEFAULT_DEFINITIONS_DIR;
use swdocs_core::SheetDialect;
use swdocs_core::SwdocsConfig;
use swdocs_core::collect_translations;
use swdocs_core::generate_document;
use swdocs_core::generate_document_component_list;
use swdocs_core::generate_sheet;
use swdocs_core::project::ProjectContext;
use swdocs_core::project::ProjectOverrides;
use swdocs_core::project::scan_project_with_overrides;
use swdocs_core::render_markdown;
use swdocs_core::render_sheet;
use swdocs_core::render_translations;
use swdocs_core::sort_definitions;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "SWDOCS_LOG";

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = SwdocsCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::List) => run_list(&args),
		Some(Commands::Doc {
			flat,
			format,
			output,
		}) => run_doc(&args, *flat, *format, output.as_deref()),
		Some(Commands::Sheet { dialect, output }) => run_sheet(&args, *dialect, output.as_deref()),
		Some(Commands::Lang { output }) => run_lang(&args, output.as_deref()),
		None => {
			eprintln!("No subcommand specified. Run `swdocs --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Render library errors through miette for the error code and help
		// text.
		match e.downcast::<swdocs_core::SwError>() {
			Ok(sw_err) => {
				let report: miette::Report = (*sw_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `SWDOCS_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_directive = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.init();
}

fn resolve_root(args: &SwdocsCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}

fn scan_project(args: &SwdocsCli) -> swdocs_core::SwResult<ProjectContext> {
	let root = resolve_root(args);
	let overrides = ProjectOverrides {
		definitions: args.definitions.clone(),
		label: args.label.clone(),
		lang: args.lang.clone(),
		ctx: args.ctx.clone(),
	};

	let ctx = scan_project_with_overrides(&root, &overrides)?;
	if ctx.definitions.is_empty() {
		tracing::warn!(
			dir = %ctx.definitions_dir.display(),
			"no definition files found"
		);
	}

	Ok(ctx)
}

/// Print `content` to stdout, or write it to `output`.
fn write_output(output: Option<&Path>, content: &str) -> AnyEmptyResult {
	let Some(path) = output else {
		print!("{content}");
		return Ok(());
	};

	std::fs::write(path, content)?;
	println!("{} {}", colored!("Wrote", green), path.display());
	Ok(())
}

fn run_init(args: &SwdocsCli) -> AnyEmptyResult {
	let root = resolve_root(args);
	let config_path = root.join("swdocs.toml");
	let definitions_dir = root.join(DEFAULT_DEFINITIONS_DIR);

	let existing_config = SwdocsConfig::resolve_path(&root);
	let definitions_exist = definitions_dir.is_dir();

	if let Some(existing) = &existing_config {
		println!("Config file already exists: {}", existing.display());
	} else {
		let sample_config = "# swdocs configuration\n\n# Directory scanned for *.xml definition \
		                     files.\ndefinitions = \"definitions\"\n\n# Optional overlay files, \
		                     relative to the project root.\n# [overlays]\n# label = \
		                     \"label.toml\"\n# lang = \"language.tsv\"\n# ctx = \
		                     \"ctx.toml\"\n\n# Gitignore-style patterns of definition files to \
		                     skip.\n# [exclude]\n# patterns = [\"legacy/\"]\n\n# Spreadsheet \
		                     field delimiter: \"tsv\" or \"csv\".\n[sheet]\ndialect = \"tsv\"\n";

		std::fs::write(&config_path, sample_config)?;
		println!("Created swdocs.toml");
	}

	if definitions_exist {
		println!(
			"Definitions directory already exists: {}",
			definitions_dir.display()
		);
	} else {
		std::fs::create_dir_all(&definitions_dir)?;
		println!(
			"Created definitions directory: {}",
			make_relative(&definitions_dir, &root)
		);
	}

	if existing_config.is_none() || !definitions_exist {
		println!();
		println!("Next steps:");
		println!(
			"  1. Copy component definition files into {}",
			definitions_dir.display()
		);
		println!("  2. Run `swdocs list` to check they are found");
		println!("  3. Run `swdocs doc --output components.md` to generate the reference");
	}

	Ok(())
}

fn run_list(args: &SwdocsCli) -> AnyEmptyResult {
	let ctx = scan_project(args)?;

	if args.verbose {
		println!(
			"Definitions: {}",
			make_relative(&ctx.definitions_dir, &ctx.root)
		);
	}

	if ctx.definitions.is_empty() {
		println!("No definitions found.");
		return Ok(());
	}

	println!(
		"{}",
		colored!(format!("{:<22} {:<24} {}", "CATEGORY", "KEY", "NAME"), bold)
	);

	let sorted = sort_definitions(&ctx.definitions);
	let categories: BTreeSet<_> = sorted.iter().map(|defn| defn.category).collect();
	for defn in &sorted {
		println!(
			"{:<22} {:<24} {}",
			defn.category.label(),
			defn.key.as_deref().unwrap_or("-"),
			defn.name
		);
	}

	println!(
		"\n{} definition(s) in {} categor{}",
		sorted.len(),
		categories.len(),
		if categories.len() == 1 { "y" } else { "ies" }
	);

	Ok(())
}

fn run_doc(args: &SwdocsCli, flat: bool, format: DocFormat, output: Option<&Path>) -> AnyEmptyResult {
	let ctx = scan_project(args)?;
	let overlays = ctx.overlays();

	let doc = if flat {
		generate_document_component_list(&ctx.definitions, &overlays)?
	} else {
		generate_document(&ctx.definitions, &overlays)?
	};

	let content = match format {
		DocFormat::Markdown => render_markdown(&doc),
		DocFormat::Json => {
			let mut json = serde_json::to_string_pretty(&doc)?;
			json.push('\n');
			json
		}
	};

	write_output(output, &content)
}

fn run_sheet(args: &SwdocsCli, dialect: Option<DialectArg>, output: Option<&Path>) -> AnyEmptyResult {
	let ctx = scan_project(args)?;
	let dialect = dialect
		.map(SheetDialect::from)
		.or_else(|| output.and_then(SheetDialect::from_extension))
		.unwrap_or(ctx.dialect);

	let rows = generate_sheet(&ctx.definitions, &ctx.overlays())?;
	let content = render_sheet(&rows, dialect)?;

	write_output(output, &content)
}

fn run_lang(args: &SwdocsCli, output: Option<&Path>) -> AnyEmptyResult {
	let ctx = scan_project(args)?;

	let records = collect_translations(&ctx.definitions, ctx.lang.as_ref());
	let untranslated = records.iter().filter(|record| record.local.is_empty()).count();
	tracing::debug!(records = records.len(), untranslated, "collected translations");

	let content = render_translations(&records)?;
	write_output(output, &content)
}
