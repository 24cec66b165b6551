//! JSON Resource Splitter CLI
//!
//! Split oversized three.js JSON mesh resources of a WebGL export.

use clap::{Parser, Subcommand};
use json_resource_splitter::config::DEFAULT_SIZE_LIMIT;
use json_resource_splitter::{
    load_resource, scan_manifest, split_manifest, splitter::write_chunks, ResourceSplitter,
    SplitterConfig,
};
use std::path::{Path, PathBuf};

/// Exit status when the manifest file does not exist.
const EXIT_MISSING_MANIFEST: i32 = 3;

#[derive(Parser)]
#[command(name = "json-resource-splitter")]
#[command(author, version, about = "Split large three.js JSON mesh resources into chunks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split every oversized resource of a WebGL manifest
    Split {
        /// WebGL metadata (manifest) file
        manifest: PathBuf,

        /// Resources larger than this many bytes are split
        #[arg(short, long, default_value_t = DEFAULT_SIZE_LIMIT)]
        size_limit: u64,

        /// Delete the original resources that were split
        #[arg(short, long)]
        delete: bool,

        /// Prefix for the rewritten manifest's file name
        #[arg(long, default_value = "split_")]
        prefix: String,

        /// Split resources one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// List the resources of a manifest that would be split
    Scan {
        /// WebGL metadata (manifest) file
        manifest: PathBuf,

        /// Resources larger than this many bytes are split
        #[arg(short, long, default_value_t = DEFAULT_SIZE_LIMIT)]
        size_limit: u64,
    },

    /// Split a single resource file into a fixed number of parts
    Resource {
        /// Mesh resource file
        input: PathBuf,

        /// Number of parts to aim for
        #[arg(short = 'n', long)]
        splits: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Split {
            manifest,
            size_limit,
            delete,
            prefix,
            sequential,
        } => {
            require_manifest(&manifest);
            let config = SplitterConfig::default()
                .with_size_limit(size_limit)
                .with_delete_originals(delete)
                .with_manifest_prefix(prefix)
                .with_parallel(!sequential);
            run_split(&manifest, &config)?;
        }
        Commands::Scan {
            manifest,
            size_limit,
        } => {
            require_manifest(&manifest);
            let config = SplitterConfig::default().with_size_limit(size_limit);
            run_scan(&manifest, &config)?;
        }
        Commands::Resource { input, splits } => {
            split_single_resource(&input, splits)?;
        }
    }

    Ok(())
}

fn require_manifest(path: &Path) {
    if !path.is_file() {
        eprintln!("Manifest not found: {:?}", path);
        std::process::exit(EXIT_MISSING_MANIFEST);
    }
}

fn run_split(manifest: &Path, config: &SplitterConfig) -> Result<(), Box<dyn std::error::Error>> {
    let report = split_manifest(manifest, config)?;

    for resource in &report.resources {
        if resource.chunks.is_empty() {
            println!("  {}: no faces, removed from manifest", resource.resource.url);
        } else {
            println!(
                "  {} ({} bytes) -> {} chunks",
                resource.resource.url,
                resource.resource.size,
                resource.chunks.len()
            );
        }
    }
    println!(
        "Wrote {} chunk files and {:?}",
        report.chunk_count(),
        report.manifest_path
    );

    Ok(())
}

fn run_scan(manifest: &Path, config: &SplitterConfig) -> Result<(), Box<dyn std::error::Error>> {
    let large = scan_manifest(manifest, config)?;

    if large.is_empty() {
        println!("No resources above {} bytes", config.size_limit);
        return Ok(());
    }

    println!("Resources above {} bytes:", config.size_limit);
    for resource in &large {
        println!(
            "  {} ({} bytes, {} parts)",
            resource.url, resource.size, resource.splits_required
        );
    }

    Ok(())
}

fn split_single_resource(input: &Path, splits: usize) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = load_resource(input)?;
    let reference = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or("Input path has no file name")?;
    let base_dir = input.parent().unwrap_or_else(|| Path::new(""));

    let chunks = ResourceSplitter::new(&mesh, &reference).split(splits)?;
    for chunk in write_chunks(base_dir, &chunks)? {
        println!("{}", chunk);
    }

    Ok(())
}
