use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use sitemark::designer::geometry::Bounds;
use sitemark::{
    init_logging, render, Config, EditorContext, InteractionController, JsonFileStore,
    LayoutStore, MeasurementSystem, SettingsManager, SiteSummary, BUILD_DATE, VERSION,
};

#[derive(Parser, Debug)]
#[command(name = "sitemark", version, about = "Solar site-markup layouts from the command line")]
struct Cli {
    /// Engine config file (.toml or .json); defaults to the platform config dir
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a layout to a PNG image
    Render {
        layout: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, default_value_t = 1200)]
        width: u32,
        #[arg(long, default_value_t = 800)]
        height: u32,
        /// Background image; its pixels are the layout's world units
        #[arg(long)]
        background: Option<PathBuf>,
    },
    /// Print roof areas, counts and cable lengths of a layout
    Summary {
        layout: PathBuf,
        /// Override the configured measurement system
        #[arg(long)]
        units: Option<MeasurementSystem>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the layouts stored in a directory
    List { dir: PathBuf },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let manager = match path {
        Some(path) => SettingsManager::load_or_default(path)?,
        None => SettingsManager::load()?,
    };
    Ok(manager.config().clone())
}

fn load_editor(layout: &Path, config: Config) -> anyhow::Result<EditorContext> {
    let mut ctx = EditorContext::new(config);
    ctx.scene
        .load_from_file(layout)
        .with_context(|| format!("Failed to load {}", layout.display()))?;
    ctx.scene.set_read_only(true);
    Ok(ctx)
}

fn run_render(
    config: Config,
    layout: &Path,
    output: &Path,
    size: (u32, u32),
    background: Option<&Path>,
) -> anyhow::Result<()> {
    let mut ctx = load_editor(layout, config)?;
    let background = background
        .map(|path| {
            image::open(path)
                .with_context(|| format!("Failed to open background {}", path.display()))
                .map(|img| img.to_rgba8())
        })
        .transpose()?;

    ctx.viewport.resize(f64::from(size.0), f64::from(size.1));
    let frame = match &background {
        Some(img) => Some(Bounds::new(0.0, 0.0, f64::from(img.width()), f64::from(img.height()))),
        None => ctx.scene.state().bounds(&ctx.footprint()),
    };
    if let Some(bounds) = frame {
        ctx.viewport.fit_to_view(&bounds);
    }
    tracing::debug!("Viewport {}", ctx.viewport);

    let controller = InteractionController::new();
    let image = render(&ctx, &controller, background.as_ref());
    image
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!("Rendered {} to {}", layout.display(), output.display());
    Ok(())
}

fn run_summary(
    config: Config,
    layout: &Path,
    units: Option<MeasurementSystem>,
    json: bool,
) -> anyhow::Result<()> {
    let system = units.unwrap_or(config.ui.measurement_system);
    let ctx = load_editor(layout, config)?;
    let summary = SiteSummary::from_state(ctx.scene.state(), ctx.scene.meters_per_pixel());
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", ctx.scene.name());
        println!("{}", summary.format(system));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    tracing::debug!("sitemark {} (built {})", VERSION, BUILD_DATE);

    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Render {
            layout,
            output,
            width,
            height,
            background,
        } => run_render(config, &layout, &output, (width, height), background.as_deref()),
        Command::Summary { layout, units, json } => run_summary(config, &layout, units, json),
        Command::List { dir } => {
            for name in JsonFileStore::new(dir).list()? {
                println!("{}", name);
            }
            Ok(())
        }
    }
}
