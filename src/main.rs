use clap::Parser;
use rayon::prelude::*;

use dungeon_generator::ascii;
use dungeon_generator::export;
use dungeon_generator::generator::{build_with_options, Options, Stage};
use dungeon_generator::results::Results;
use dungeon_generator::rng::generate_slug;

#[derive(Parser, Debug)]
#[command(name = "dungeon_generator")]
#[command(about = "Generate seeded grid dungeons with rooms, winding mazes and doors")]
struct Args {
    /// Width of the stage in tiles
    #[arg(short = 'W', long, default_value = "51")]
    width: usize,

    /// Height of the stage in tiles
    #[arg(short = 'H', long, default_value = "31")]
    height: usize,

    /// Seed string (uses a random slug if not specified)
    #[arg(short, long)]
    seed: Option<String>,

    /// Number of room placement attempts
    #[arg(long, default_value = "50")]
    room_tries: u32,

    /// Raises the room size draw ceiling
    #[arg(long, default_value = "0")]
    room_extra_size: u32,

    /// Probability (0-100) that corridors keep their direction when they can
    #[arg(long, default_value = "50")]
    winding_percent: u32,

    /// Attempts and inverse acceptance chance for doors per region pair
    #[arg(long, default_value = "50")]
    door_chance: u32,

    /// Maximum doors between a pair of regions
    #[arg(long, default_value = "5")]
    max_doors: u32,

    /// Scale factor applied to the normalized stage dimensions
    #[arg(long, default_value = "1")]
    multiplier: usize,

    /// Prune corridors that lead nowhere
    #[arg(long)]
    remove_dead_ends: bool,

    /// Print the map to stdout
    #[arg(short = 'p', long)]
    print: bool,

    /// Print the region view instead of the tile view
    #[arg(long)]
    regions: bool,

    /// Export the map as ASCII text to this file
    #[arg(long)]
    ascii_export: Option<String>,

    /// Export the map as PNG to this file
    #[arg(long)]
    png: Option<String>,

    /// Pixels per tile in PNG output
    #[arg(long, default_value = "8")]
    png_scale: usize,

    /// Export the full result as JSON to this file
    #[arg(long)]
    json: Option<String>,

    /// Generate this many dungeons from derived seeds, in parallel
    #[arg(long, default_value = "1")]
    count: usize,
}

fn main() {
    let args = Args::parse();

    let options = Options {
        door_chance: args.door_chance,
        max_doors: args.max_doors,
        room_tries: args.room_tries,
        room_extra_size: args.room_extra_size,
        winding_percent: args.winding_percent,
        multiplier: args.multiplier,
        remove_dead_ends: args.remove_dead_ends,
    };

    if args.count > 1 {
        run_batch(&args, &options);
    } else if let Err(err) = run_single(&args, options.clone(), args.seed.clone(), None) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

/// Generate one dungeon and write the requested outputs
fn run_single(
    args: &Args,
    options: Options,
    seed: Option<String>,
    output_tag: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let stage = Stage {
        width: args.width,
        height: args.height,
        seed,
    };
    let results = build_with_options(stage, options)?;

    println!(
        "Generated {}x{} dungeon: {} rooms, {} regions, {} doors (seed={})",
        results.width(),
        results.height(),
        results.rooms.len(),
        results.region_count(),
        results.door_count(),
        results.seed
    );

    if args.print {
        let rendered = if args.regions {
            ascii::render_regions(&results)
        } else {
            ascii::render(&results)
        };
        print!("{}", rendered);
    }

    if let Some(path) = &args.ascii_export {
        let path = tagged_path(path, output_tag);
        ascii::export_ascii(&results, &path)?;
        println!("ASCII map written to {}", path);
    }

    if let Some(path) = &args.png {
        let path = tagged_path(path, output_tag);
        export::export_png(&results, &path, args.png_scale)?;
        println!("PNG map written to {}", path);
    }

    if let Some(path) = &args.json {
        let path = tagged_path(path, output_tag);
        write_json(&results, &path)?;
        println!("JSON written to {}", path);
    }

    Ok(())
}

/// Generate `count` dungeons from derived seeds, one rayon task each.
/// Generation is only ever parallel across dungeons, never within one.
fn run_batch(args: &Args, options: &Options) {
    let base = args.seed.clone().unwrap_or_else(generate_slug);
    println!("Generating {} dungeons from base seed {}...", args.count, base);

    let failures: Vec<String> = (0..args.count)
        .into_par_iter()
        .filter_map(|i| {
            let seed = format!("{}-{}", base, i);
            run_single(args, options.clone(), Some(seed.clone()), Some(i))
                .err()
                .map(|err| format!("{}: {}", seed, err))
        })
        .collect();

    for failure in &failures {
        eprintln!("{}", failure);
    }
    if !failures.is_empty() {
        std::process::exit(1);
    }
}

fn write_json(results: &Results, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, results)?;
    Ok(())
}

/// Suffix batch outputs with the dungeon index: `map.png` -> `map.3.png`
fn tagged_path(path: &str, tag: Option<usize>) -> String {
    match tag {
        None => path.to_string(),
        Some(i) => match path.rsplit_once('.') {
            Some((stem, ext)) => format!("{}.{}.{}", stem, i, ext),
            None => format!("{}.{}", path, i),
        },
    }
}
