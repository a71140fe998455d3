use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use diamond_pattern::assets::{AssetCategory, AssetLoader};
use diamond_pattern::models::{load_palette, AppConfig};
use diamond_pattern::services::{LabelEdit, PatternService};

#[derive(Parser)]
#[command(name = "diamond-pattern")]
#[command(about = "Numbered diamond painting patterns from photographs")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a pattern from a photograph
    Generate {
        /// Source photograph (PNG, JPEG or BMP)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long, default_value = "diamond-painting-pattern.png")]
        output: PathBuf,

        /// Also write the SVG pattern to this path
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Write the legend as JSON to this path
        #[arg(long)]
        legend: Option<PathBuf>,

        /// Config file (overrides CONFIG_FILE)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Palette file (overrides PALETTE_FILE and the config)
        #[arg(long)]
        palette: Option<PathBuf>,

        /// Maximum number of colors (overrides grid.capacity)
        #[arg(short = 'k', long)]
        capacity: Option<usize>,

        /// Hide labels of the region containing cell X,Y (repeatable)
        #[arg(long, value_name = "X,Y")]
        hide_region: Vec<String>,

        /// Hide labels inside a stage-pixel polygon "x,y x,y x,y ..." (repeatable)
        #[arg(long, value_name = "POLYGON")]
        hide_lasso: Vec<String>,

        /// Restore labels of the region containing cell X,Y (repeatable)
        #[arg(long, value_name = "X,Y")]
        restore_region: Vec<String>,

        /// Restore labels inside a stage-pixel polygon (repeatable)
        #[arg(long, value_name = "POLYGON")]
        restore_lasso: Vec<String>,
    },
    /// List the palette catalog
    Palette {
        /// Palette file (overrides PALETTE_FILE and the config)
        #[arg(long)]
        palette: Option<PathBuf>,
    },
    /// Extract embedded assets to filesystem for customization
    Init {
        /// Extract config.yaml
        #[arg(long)]
        config: bool,

        /// Extract palette.yaml
        #[arg(long)]
        palette: bool,

        /// Extract the SVG template
        #[arg(long)]
        templates: bool,

        /// Extract all assets
        #[arg(long)]
        all: bool,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

/// Scripted edits in command-line order across all edit flags
///
/// clap keeps each flag's values in order but not their interleaving, so
/// the flags are merged by their argument indices.
fn scripted_edits(
    matches: &ArgMatches,
    flags: [(&'static str, Vec<String>); 4],
) -> anyhow::Result<Vec<LabelEdit>> {
    let mut flagged = Vec::new();
    for (flag, values) in flags {
        let indices = matches.indices_of(&flag.replace('-', "_")).into_iter().flatten();
        flagged.extend(indices.zip(values).map(|(index, value)| (index, flag, value)));
    }
    flagged.sort_by_key(|(index, _, _)| *index);

    flagged
        .into_iter()
        .map(|(_, flag, value)| LabelEdit::from_flag(flag, &value).map_err(anyhow::Error::from))
        .collect()
}

fn main() -> anyhow::Result<()> {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    match cli.command {
        Some(Commands::Generate {
            input,
            output,
            svg,
            legend,
            config,
            palette,
            capacity,
            hide_region,
            hide_lasso,
            restore_region,
            restore_lasso,
        }) => {
            init_tracing();
            let generate = matches
                .subcommand_matches("generate")
                .ok_or_else(|| anyhow::anyhow!("missing generate arguments"))?;
            let edits = scripted_edits(
                generate,
                [
                    ("hide-region", hide_region),
                    ("hide-lasso", hide_lasso),
                    ("restore-region", restore_region),
                    ("restore-lasso", restore_lasso),
                ],
            )?;
            let loader = AssetLoader::from_env()
                .with_config_file(config)
                .with_palette_file(palette);
            run_generate_command(&loader, &input, &output, svg.as_deref(), legend.as_deref(), capacity, &edits)
        }
        Some(Commands::Palette { palette }) => {
            init_tracing();
            let loader = AssetLoader::from_env().with_palette_file(palette);
            run_palette_command(&loader)
        }
        Some(Commands::Init {
            config,
            palette,
            templates,
            all,
            force,
            list,
        }) => run_init_command(config, palette, templates, all, force, list),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "diamond_pattern=info,pattern_engine=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Generate a pattern, apply the scripted edits and write the outputs
fn run_generate_command(
    loader: &AssetLoader,
    input: &Path,
    output: &Path,
    svg_path: Option<&Path>,
    legend_path: Option<&Path>,
    capacity: Option<usize>,
    edits: &[LabelEdit],
) -> anyhow::Result<()> {
    let mut config = AppConfig::load_from_assets(loader);
    if let Some(capacity) = capacity {
        config.grid.capacity = capacity;
    }
    let palette = load_palette(loader, config.palette.as_deref())?;
    let service = PatternService::new(config, palette, loader)?;

    let image = std::fs::read(input)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", input.display()))?;
    let mut session = service.generate(&image)?;

    for edit in edits {
        let report = service.apply(&mut session, edit);
        println!(
            "{} {:?}: {} selected, {} changed",
            report.action, edit.target, report.selected, report.changed
        );
    }

    let rendered = service.render(&session)?;
    std::fs::write(output, &rendered.png)?;
    println!("Rendered {} ({} bytes)", output.display(), rendered.png.len());

    if let Some(path) = svg_path {
        std::fs::write(path, &rendered.svg)?;
        println!("Wrote SVG {}", path.display());
    }

    if let Some(path) = legend_path {
        std::fs::write(path, rendered.legend.to_json()?)?;
        println!("Wrote legend {}", path.display());
    }

    println!("\nLegend:");
    for line in rendered.legend.lines() {
        println!("  {line}");
    }

    Ok(())
}

/// Print the palette catalog in order
fn run_palette_command(loader: &AssetLoader) -> anyhow::Result<()> {
    let config = AppConfig::load_from_assets(loader);
    let palette = load_palette(loader, config.palette.as_deref())?;

    println!("{} colors:\n", palette.len());
    for entry in palette.iter() {
        println!("  {:<8} {}  ({})", entry.id, entry.rgb.to_hex(), entry.rgb);
    }
    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(
    config: bool,
    palette: bool,
    templates: bool,
    all: bool,
    force: bool,
    list: bool,
) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        println!("Config:");
        for f in AssetLoader::list_embedded(AssetCategory::Config) {
            println!("  {f}");
        }
        println!("\nPalette:");
        for f in AssetLoader::list_embedded(AssetCategory::Palette) {
            println!("  {f}");
        }
        println!("\nTemplates:");
        for f in AssetLoader::list_embedded(AssetCategory::Templates) {
            println!("  {f}");
        }
        return Ok(());
    }

    let mut categories = Vec::new();
    if all || config {
        categories.push(AssetCategory::Config);
    }
    if all || palette {
        categories.push(AssetCategory::Palette);
    }
    if all || templates {
        categories.push(AssetCategory::Templates);
    }

    if categories.is_empty() {
        eprintln!("No categories specified. Use --all, --config, --palette, or --templates");
        eprintln!("\nRun 'diamond-pattern init --list' to see embedded assets.");
        std::process::exit(1);
    }

    let report = AssetLoader::from_env().init(&categories, force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let loader = AssetLoader::from_env();

    println!("Diamond Pattern v{VERSION}");
    println!("Numbered diamond painting patterns from photographs\n");

    println!("Environment Variables:");
    for (name, value) in [
        ("CONFIG_FILE ", loader.config_file()),
        ("PALETTE_FILE", loader.palette_file()),
        ("FONTS_DIR   ", loader.fonts_dir()),
    ] {
        let value = value
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string());
        println!("  {name} = {value}");
    }

    println!("\nAsset Sources:");
    let source = |path: Option<&Path>| match path {
        Some(p) if p.exists() => p.display().to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("  Config:  {}", source(loader.config_file()));
    println!("  Palette: {}", source(loader.palette_file()));
    let fonts = loader.get_fonts().len();
    println!(
        "  Fonts:   system{}",
        if fonts > 0 {
            format!(" + {fonts} from FONTS_DIR")
        } else {
            String::new()
        }
    );

    let config = AppConfig::load_from_assets(&loader);
    println!("\nGrid:");
    println!(
        "  {}x{} cells, up to {} colors, {} px per cell",
        config.grid.width, config.grid.height, config.grid.capacity, config.grid.scale
    );

    println!("\nCommands:");
    println!("  diamond-pattern generate   Generate a pattern from a photograph");
    println!("  diamond-pattern palette    List the palette catalog");
    println!("  diamond-pattern init       Extract embedded assets");
    println!("\nRun 'diamond-pattern --help' for more details.");
}
