use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use explore_islands::groups::GroupMatch;
use explore_islands::source;
use explore_islands::style::{FillMode, OverlayCategory, StyleSpec};
use explore_islands::surface::{HeadlessSurface, MapSurface};
use explore_islands::{Bounds, ClickOutcome, MapConfig, PointerKind, RegionMapController};
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(
    name = "islands",
    version,
    about = "Inspect the Explore Islands region map without a screen"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// JSON config file (defaults to <config dir>/explore-islands/config.json if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Backend base URL.
    #[arg(long, global = true, env = "ISLANDS_BASE_URL")]
    base_url: Option<String>,
    /// Read counties.json / ireland_counties.geojson / me.json from this folder instead.
    #[arg(long, global = true, env = "ISLANDS_DATA_DIR")]
    data_dir: Option<PathBuf>,
    /// How group names are compared.
    #[arg(long, global = true, value_enum)]
    group_match: Option<GroupMatchArg>,
    /// Skip the caller-location request.
    #[arg(long, global = true, default_value_t = false)]
    no_guess: bool,
    /// Print JSON instead of text.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the loaded regions.
    Regions,
    /// Print every region's resting style for a fill mode and overlay.
    Styles(StylesArgs),
    /// Print the combined bounds of a province / region group.
    Focus {
        /// Group name, e.g. Munster.
        group: String,
    },
    /// Simulate clicks or taps on a region and report navigation.
    Click(ClickArgs),
    /// Show the caller-location guess and the region it frames.
    Guess,
}

#[derive(Args, Debug)]
struct StylesArgs {
    #[arg(long, value_enum, default_value_t = ModeArg::Outline)]
    mode: ModeArg,
    #[arg(long, value_enum, default_value_t = OverlayArg::Political)]
    overlay: OverlayArg,
}

#[derive(Args, Debug)]
struct ClickArgs {
    slug: String,
    /// Treat the clicks as touch taps.
    #[arg(long, default_value_t = false)]
    touch: bool,
    /// Number of clicks.
    #[arg(long, default_value_t = 1)]
    taps: u32,
    /// Simulated time between clicks, in milliseconds.
    #[arg(long, default_value_t = 200)]
    interval_ms: u64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Outline,
    Colours,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OverlayArg {
    Political,
    Cultural,
    Geographic,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GroupMatchArg {
    Exact,
    CollapseWhitespace,
}

impl From<ModeArg> for FillMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Outline => FillMode::Outline,
            ModeArg::Colours => FillMode::Colours,
        }
    }
}

impl From<OverlayArg> for OverlayCategory {
    fn from(o: OverlayArg) -> Self {
        match o {
            OverlayArg::Political => OverlayCategory::Political,
            OverlayArg::Cultural => OverlayCategory::Cultural,
            OverlayArg::Geographic => OverlayCategory::Geographic,
        }
    }
}

impl From<GroupMatchArg> for GroupMatch {
    fn from(g: GroupMatchArg) -> Self {
        match g {
            GroupMatchArg::Exact => GroupMatch::Exact,
            GroupMatchArg::CollapseWhitespace => GroupMatch::CollapseWhitespace,
        }
    }
}

fn build_config(args: &GlobalArgs) -> Result<MapConfig> {
    let mut config = MapConfig::load(args.config.as_deref())?;
    if let Some(url) = &args.base_url {
        config.base_url = url.clone();
    }
    if let Some(dir) = &args.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(g) = args.group_match {
        config.group_match = g.into();
    }
    if args.no_guess {
        config.guess_location = false;
    }
    Ok(config)
}

fn fmt_bounds(b: &Bounds) -> String {
    format!(
        "W {:.4}  S {:.4}  E {:.4}  N {:.4}",
        b.west, b.south, b.east, b.north
    )
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = build_config(&cli.global)?;
    let data = source::load_from_config(&config).context("load region data")?;
    let mut map = RegionMapController::new(HeadlessSurface::new(), config);
    map.load(data);

    match cli.cmd {
        Command::Regions => cmd_regions(&map, cli.global.json),
        Command::Styles(args) => cmd_styles(&mut map, args, cli.global.json),
        Command::Focus { group } => cmd_focus(&mut map, &group, cli.global.json),
        Command::Click(args) => cmd_click(&mut map, args, cli.global.json),
        Command::Guess => cmd_guess(&map, cli.global.json),
    }
}

#[derive(Serialize)]
struct RegionRow<'a> {
    slug: &'a str,
    name: Option<&'a str>,
    group: Option<&'a str>,
    colours: Vec<&'a str>,
    bounds: Bounds,
}

fn cmd_regions(map: &RegionMapController<HeadlessSurface>, json: bool) -> Result<()> {
    let rows: Vec<RegionRow> = map
        .regions()
        .iter()
        .map(|r| {
            let meta = map.meta(&r.slug);
            RegionRow {
                slug: &r.slug,
                name: meta.map(|m| m.name.as_str()),
                group: meta.and_then(|m| m.group()),
                colours: meta
                    .map(|m| m.colours.iter().map(String::as_str).collect())
                    .unwrap_or_default(),
                bounds: r.bounds,
            }
        })
        .collect();
    if json {
        return print_json(&rows);
    }
    for row in rows {
        println!(
            "{:<14} {:<20} {:<10} {}",
            row.slug,
            row.name.unwrap_or("-"),
            row.group.unwrap_or("-"),
            row.colours.join(" / ")
        );
    }
    Ok(())
}

fn cmd_styles(
    map: &mut RegionMapController<HeadlessSurface>,
    args: StylesArgs,
    json: bool,
) -> Result<()> {
    map.set_overlay(args.overlay.into());
    map.set_fill_mode(args.mode.into());
    let surface = map.surface();
    let styles: Vec<(&str, Option<&StyleSpec>)> = surface
        .layers()
        .iter()
        .map(|slug| (slug.as_str(), surface.style(slug)))
        .collect();
    if json {
        let by_slug: serde_json::Map<String, serde_json::Value> = styles
            .iter()
            .map(|(slug, style)| Ok(((*slug).to_string(), serde_json::to_value(style)?)))
            .collect::<Result<_>>()?;
        return print_json(&by_slug);
    }
    if !surface.regions_attached() {
        eprintln!("region layer hidden (geographic overlay)");
    }
    for (slug, style) in styles {
        match style {
            Some(s) => println!(
                "{:<14} stroke {} w={} o={}  fill {} o={}",
                slug, s.color, s.weight, s.opacity, s.fill_color, s.fill_opacity
            ),
            None => println!("{:<14} -", slug),
        }
    }
    Ok(())
}

fn cmd_focus(
    map: &mut RegionMapController<HeadlessSurface>,
    group: &str,
    json: bool,
) -> Result<()> {
    let bounds = map.focus_group(group);
    if json {
        return print_json(&bounds);
    }
    match bounds {
        Some(b) => println!("{}  {}", group, fmt_bounds(&b)),
        None => println!("no regions in group {group}"),
    }
    Ok(())
}

fn cmd_click(
    map: &mut RegionMapController<HeadlessSurface>,
    args: ClickArgs,
    json: bool,
) -> Result<()> {
    let pointer = if args.touch {
        PointerKind::Touch
    } else {
        PointerKind::Mouse
    };
    let start = Instant::now();
    let outcomes: Vec<String> = (0..args.taps)
        .map(|i| {
            let at = start + Duration::from_millis(args.interval_ms * u64::from(i));
            match map.click(&args.slug, pointer, at) {
                ClickOutcome::Ignored => "ignored".to_string(),
                ClickOutcome::Preview => "preview".to_string(),
                ClickOutcome::Navigated(url) => format!("navigate {url}"),
            }
        })
        .collect();
    if json {
        return print_json(&outcomes);
    }
    for (i, o) in outcomes.iter().enumerate() {
        println!("tap {}: {}", i + 1, o);
    }
    Ok(())
}

fn cmd_guess(map: &RegionMapController<HeadlessSurface>, json: bool) -> Result<()> {
    let guessed = map
        .guessed_region()
        .and_then(|slug| map.region(slug))
        .map(|r| (r.slug.as_str(), r.bounds));
    if json {
        return print_json(&guessed.map(|(slug, bounds)| {
            serde_json::json!({ "slug": slug, "bounds": bounds })
        }));
    }
    match guessed {
        Some((slug, b)) => println!("{slug}  {}", fmt_bounds(&b)),
        None => println!("no guessed region"),
    }
    Ok(())
}
