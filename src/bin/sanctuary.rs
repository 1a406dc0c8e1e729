use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sanctuary::{
    Registry, RevealPhase, SimulatedHost, Site, SiteConfig, TimelineEngine, Viewport, ids,
    zone_color, zone_for,
};

#[derive(Parser, Debug)]
#[command(name = "sanctuary", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mount the page headlessly, scroll, and print the resulting inline styles as JSON.
    Simulate(SimulateArgs),
    /// Print the horizontal-section background color for sampled progress values.
    Zones(ZonesArgs),
    /// Print the content registry as JSON.
    Registry(RegistryArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Virtual scroll offset to ease to, in CSS pixels.
    #[arg(long)]
    scroll: f64,

    /// Site configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Content registry JSON (defaults to the built-in content).
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Viewport width override.
    #[arg(long)]
    width: Option<f64>,

    /// Viewport height override.
    #[arg(long)]
    height: Option<f64>,

    /// Frame interval in milliseconds.
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    frame_ms: f64,
}

#[derive(Parser, Debug)]
struct ZonesArgs {
    /// Site configuration JSON (palette source).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of evenly spaced samples over [0, 1].
    #[arg(long, default_value_t = 11)]
    samples: usize,
}

#[derive(Parser, Debug)]
struct RegistryArgs {
    /// Content registry JSON to validate and echo.
    #[arg(long)]
    registry: Option<PathBuf>,
}

const MAX_SIMULATED_S: f64 = 600.0;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Zones(args) => cmd_zones(args),
        Command::Registry(args) => cmd_registry(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SiteConfig> {
    match path {
        Some(p) => SiteConfig::from_path(p).with_context(|| format!("load config '{}'", p.display())),
        None => Ok(SiteConfig::default()),
    }
}

fn load_registry(path: Option<&Path>) -> anyhow::Result<Registry> {
    match path {
        Some(p) => {
            Registry::from_path(p).with_context(|| format!("load registry '{}'", p.display()))
        }
        None => Ok(Registry::builtin()),
    }
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    let registry = load_registry(args.registry.as_deref())?;
    if args.width.is_some() || args.height.is_some() {
        config.viewport = Viewport::new(
            args.width.unwrap_or(config.viewport.width),
            args.height.unwrap_or(config.viewport.height),
        )
        .context("viewport override")?;
    }
    if !args.frame_ms.is_finite() || args.frame_ms <= 0.0 {
        anyhow::bail!("--frame-ms must be finite and > 0");
    }

    let mut site = Site::mount(config, registry, SimulatedHost::new(true, false))
        .context("mount site")?;
    site.page_loaded(0.0);
    site.first_frame(&ids::id(ids::HERO_VIDEO), 0.0);
    site.scroll_to(args.scroll, false);

    let mut now_ms = 0.0;
    let mut frames = 0u64;
    while let Some(report) = site.frame(now_ms) {
        frames += 1;
        let settled = !site.scroller().is_scrolling()
            && report.reveal == RevealPhase::Done
            && site.engine().running_tweens() == 0;
        if settled || now_ms / 1000.0 > MAX_SIMULATED_S {
            break;
        }
        now_ms += args.frame_ms;
    }

    let out = serde_json::json!({
        "frames": frames,
        "scroll": site.engine().scroll(),
        "limit": site.scroller().limit(),
        "pin_spacing": site.engine().pin_spacing(),
        "regions": site.engine().region_count(),
        "skipped": site.choreography().skipped(),
        "styles": site.engine().styles(),
    });
    let teardown = site.unmount();
    tracing::info!(?teardown, "simulation finished");
    println!(
        "{}",
        serde_json::to_string_pretty(&out).context("serialize simulation output")?
    );
    Ok(())
}

fn cmd_zones(args: ZonesArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    if args.samples < 2 {
        anyhow::bail!("--samples must be >= 2");
    }
    let palette = config.background.palette;
    let rows: Vec<serde_json::Value> = (0..args.samples)
        .map(|i| {
            let p = i as f64 / (args.samples - 1) as f64;
            serde_json::json!({
                "progress": p,
                "zone": zone_for(p),
                "color": zone_color(p, &palette).to_hex(),
            })
        })
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&rows).context("serialize zones")?
    );
    Ok(())
}

fn cmd_registry(args: RegistryArgs) -> anyhow::Result<()> {
    let registry = load_registry(args.registry.as_deref())?;
    println!(
        "{}",
        serde_json::to_string_pretty(&registry).context("serialize registry")?
    );
    Ok(())
}
