use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use gnest::config::GAConfig;
use gnest::io;
use gnest::io::cli::Cli;
use gnest::io::output::NestOutput;
use gnest::opt::GAOptimizer;
use log::{info, warn};
use rand::SeedableRng;
use rand::prelude::SmallRng;
use shelfnest::io::import::Importer;
use shelfnest::io::svg::layout_to_svg;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let mut config = match &args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            GAConfig::default()
        }
        Some(config_file) => io::read_config(config_file)?,
    };
    if let Some(seed) = args.seed {
        config.prng_seed = Some(seed);
    }
    config.validate().context("invalid configuration")?;

    info!("[MAIN] Successfully parsed GAConfig: {config:?}");

    let paths = io::collect_svg_paths(&args.input)?;
    info!("[MAIN] {} input documents", paths.len());
    let documents = io::read_documents(&paths)?;
    let items = Importer
        .import_items(&documents)
        .context("could not extract the shape of every document")?;

    if !args.output_folder.exists() {
        fs::create_dir_all(&args.output_folder).with_context(|| {
            format!(
                "could not create output folder: {}",
                args.output_folder.display()
            )
        })?;
    }

    let rng = match config.prng_seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let solution = GAOptimizer::new(items.clone(), config, rng)?.solve();

    {
        let output = NestOutput::new(config, &items, &solution);
        let json_path = args.output_folder.join("nested.json");
        io::write_json(&output, Path::new(&json_path))?;
    }

    {
        let svg_path = args.output_folder.join("nested.svg");
        let svg = layout_to_svg(&solution.layout, &documents, config.svg_export_options);
        io::write_svg(&svg, Path::new(&svg_path))?;
    }

    Ok(())
}
