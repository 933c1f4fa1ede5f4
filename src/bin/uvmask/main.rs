//! uvmask CLI - UV island inspection and mask export.
//!
//! Usage: uvmask <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `uvmask --help` for available commands.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand};
use nalgebra::Point2;

use uvmask::analysis::{analyze, BorderKind, IslandSelection, UvAnalysis};
use uvmask::composite::{
    composite_vertex_colors, render_mask_with_progress, selected_vertices, ChannelFlags,
    ExportOptions, VertexBakeOptions,
};
use uvmask::io;
use uvmask::Progress;

#[derive(Parser)]
#[command(name = "uvmask")]
#[command(author, version, about = "UV island mask CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Which islands to act on.
#[derive(clap::Args)]
struct SelectionArgs {
    /// Island indices to select (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    islands: Vec<usize>,

    /// Select every island
    #[arg(long, conflicts_with = "islands")]
    all: bool,

    /// Select the island under a UV point (repeatable)
    #[arg(long, value_name = "U,V", value_parser = parse_uv)]
    pick: Vec<Point2<f64>>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display UV island information
    Info {
        /// Input mesh file
        input: PathBuf,

        /// UV channel to analyze
        #[arg(short, long, default_value = "0")]
        channel: usize,

        /// List every island with its statistics
        #[arg(long)]
        islands: bool,
    },

    /// Render a selection of islands to a PNG mask
    Mask {
        /// Input mesh file
        input: PathBuf,

        /// Output PNG file
        output: PathBuf,

        /// UV channel to analyze
        #[arg(short, long, default_value = "0")]
        channel: usize,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Texture size in pixels (clamped to 8..=8192)
        #[arg(short, long, default_value = "1024")]
        size: usize,

        /// Seam padding in pixels
        #[arg(short, long, default_value = "4")]
        margin: usize,

        /// Invert the mask
        #[arg(long)]
        invert: bool,

        /// Write only these channels, e.g. "r", "ga" or "rgba"
        #[arg(long)]
        channels: Option<String>,

        /// Base image to write the channels onto
        #[arg(long, requires = "channels")]
        base: Option<PathBuf>,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },

    /// Bake a selection of islands into vertex colors
    Bake {
        /// Input mesh file
        input: PathBuf,

        /// Output PLY file
        output: PathBuf,

        /// UV channel to analyze
        #[arg(short, long, default_value = "0")]
        channel: usize,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Channels to write
        #[arg(long, default_value = "rgb")]
        channels: String,

        /// Invert the selection
        #[arg(long)]
        invert: bool,

        /// Write onto the mesh's existing vertex colors
        #[arg(long)]
        keep_colors: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info {
            input,
            channel,
            islands,
        } => {
            cmd_info(&input, channel, islands)?;
        }

        Commands::Mask {
            input,
            output,
            channel,
            selection,
            size,
            margin,
            invert,
            channels,
            base,
            sequential,
        } => {
            let mut options = ExportOptions::default()
                .with_size(size)
                .with_margin(margin)
                .with_invert(invert)
                .with_parallel(!sequential);
            if let Some(channels) = channels {
                options = options.with_channels(channels.parse()?);
            }
            if let Some(base) = base {
                options = options.with_base_image(io::texture::load_image(&base)?);
            }
            cmd_mask(&input, &output, channel, &selection, &options)?;
        }

        Commands::Bake {
            input,
            output,
            channel,
            selection,
            channels,
            invert,
            keep_colors,
        } => {
            let options = VertexBakeOptions::default()
                .with_channels(channels.parse::<ChannelFlags>()?)
                .with_invert(invert);
            cmd_bake(&input, &output, channel, &selection, &options, keep_colors)?;
        }
    }

    Ok(())
}

fn parse_uv(s: &str) -> Result<Point2<f64>, String> {
    let (u, v) = s
        .split_once(',')
        .ok_or_else(|| format!("expected U,V but got '{}'", s))?;
    let u: f64 = u.trim().parse().map_err(|e| format!("bad u '{}': {}", u, e))?;
    let v: f64 = v.trim().parse().map_err(|e| format!("bad v '{}': {}", v, e))?;
    Ok(Point2::new(u, v))
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    let max_percent = Arc::new(AtomicUsize::new(0)); // Track highest percent seen (monotonic)

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }

        let raw_percent = if current >= total {
            100
        } else {
            ((current * 100) + (total / 2)) / total
        };

        // Only increase, never decrease
        let previous = max_percent.fetch_max(raw_percent, Ordering::Relaxed);
        if raw_percent <= previous && raw_percent != 100 {
            return;
        }

        let bar_width = 30;
        let filled = (raw_percent * bar_width) / 100;
        let bar = "=".repeat(filled);
        let space = " ".repeat(bar_width - filled);

        // Pad the stage name so a shorter one fully overwrites a longer one
        eprint!("\r[{}{}] {:3}% {:<24}", bar, space, raw_percent, message);
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

fn load_analysis(input: &Path, channel: usize) -> Result<UvAnalysis, Box<dyn std::error::Error>> {
    let mesh = io::load(input)?;
    println!(
        "Loaded: {} vertices, {} triangles",
        mesh.num_vertices(),
        mesh.num_triangles()
    );
    Ok(analyze(&mesh, channel)?)
}

fn build_selection(analysis: &UvAnalysis, args: &SelectionArgs) -> IslandSelection {
    if args.all {
        return IslandSelection::all(analysis);
    }

    let mut selection = IslandSelection::from_indices(args.islands.iter().copied());
    for uv in &args.pick {
        match analysis.island_at_uv(uv) {
            Some(id) => {
                selection.insert(id);
            }
            None => log::warn!("no island at uv ({}, {})", uv.x, uv.y),
        }
    }

    let dropped = selection.retain_valid(analysis);
    if dropped > 0 {
        eprintln!(
            "Warning: ignoring {} island indices (mesh has {} islands)",
            dropped,
            analysis.num_islands()
        );
    }
    selection
}

fn describe_selection(selection: &IslandSelection) -> String {
    if selection.is_empty() {
        return "nothing".to_string();
    }
    let ids: Vec<String> = selection.iter().map(|id| id.index().to_string()).collect();
    format!("islands [{}]", ids.join(", "))
}

fn cmd_info(input: &Path, channel: usize, list_islands: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = io::load(input)?;

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Triangles: {}", mesh.num_triangles());
    let channels: Vec<String> = mesh.uv_channels().map(|c| c.to_string()).collect();
    println!("UV channels: [{}]", channels.join(", "));

    let analysis = analyze(&mesh, channel)?;
    let seams = analysis
        .border_edges()
        .iter()
        .filter(|e| e.kind == BorderKind::Seam)
        .count();
    let boundaries = analysis.border_edges().len() - seams;

    println!("\nUV channel {}:", analysis.uv_channel());
    println!("  Islands: {}", analysis.num_islands());
    println!("  Seam edges: {}", seams);
    println!("  Boundary edges: {}", boundaries);

    let total_area: f64 = analysis.triangles().iter().map(|t| t.uv_area()).sum();
    println!("  UV coverage: {:.2}%", total_area * 100.0);

    if list_islands {
        println!();
        for id in analysis.island_ids() {
            if let Some(stats) = analysis.island_stats(id) {
                println!(
                    "  {:>4}: {:>6} triangles, area {:.5}, uv ({:.3}, {:.3}) to ({:.3}, {:.3})",
                    id.index(),
                    stats.triangle_count,
                    stats.uv_area,
                    stats.uv_min.x,
                    stats.uv_min.y,
                    stats.uv_max.x,
                    stats.uv_max.y
                );
            }
        }
    }

    Ok(())
}

fn cmd_mask(
    input: &Path,
    output: &Path,
    channel: usize,
    selection_args: &SelectionArgs,
    options: &ExportOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let analysis = load_analysis(input, channel)?;
    let selection = build_selection(&analysis, selection_args);

    let mode = if options.parallel { "parallel" } else { "sequential" };
    println!(
        "Rendering {} at {}x{}, margin {} ({})...",
        describe_selection(&selection),
        options.width,
        options.height,
        options.margin,
        mode
    );

    let progress = create_progress();
    let start = Instant::now();
    let image = render_mask_with_progress(&analysis, &selection, options, &progress);
    let elapsed = start.elapsed();

    io::texture::save_png(&image, output)?;
    println!("Saved: {} ({:.2?})", output.display(), elapsed);

    Ok(())
}

fn cmd_bake(
    input: &Path,
    output: &Path,
    channel: usize,
    selection_args: &SelectionArgs,
    options: &VertexBakeOptions,
    keep_colors: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = io::load(input)?;
    println!(
        "Loaded: {} vertices, {} triangles",
        mesh.num_vertices(),
        mesh.num_triangles()
    );
    let analysis = analyze(&mesh, channel)?;
    let selection = build_selection(&analysis, selection_args);

    let base = if keep_colors {
        if mesh.colors().is_none() {
            eprintln!("Warning: mesh has no vertex colors, baking onto white");
        }
        mesh.colors()
    } else {
        None
    };

    println!(
        "Baking {} into channels {}...",
        describe_selection(&selection),
        options.channels
    );
    let colors = composite_vertex_colors(&analysis, &selection, mesh.num_vertices(), base, options);
    let touched = selected_vertices(&analysis, &selection, mesh.num_vertices())
        .into_iter()
        .filter(|&selected| selected)
        .count();
    log::debug!("{} of {} vertices in selection", touched, colors.len());

    io::ply::save_with_colors(&mesh, &colors, output)?;
    println!("Saved: {}", output.display());

    Ok(())
}
