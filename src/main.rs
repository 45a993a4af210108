use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use imgsniff::cli::{Cli, Commands, ProgressReporter, gallery_options, probe_paths};
use imgsniff::gallery;
use imgsniff::logging::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Probe {
            paths,
            json,
            head_bytes,
        } => run_probe(&paths, json, head_bytes),
        Commands::Gallery {
            dir,
            output,
            src_prefix,
            head_bytes,
            sequential,
        } => run_gallery(gallery_options(dir, output, src_prefix, head_bytes, sequential)),
    }
}

fn run_probe(paths: &[std::path::PathBuf], json: bool, head_bytes: usize) -> Result<()> {
    let records = probe_paths(paths, head_bytes);

    if json {
        let out = serde_json::to_string_pretty(&records).context("Failed to encode results")?;
        println!("{out}");
        return Ok(());
    }

    for record in &records {
        if record.error.is_some() {
            eprintln!("[!] {}", style(record.render_line()).yellow());
        } else {
            println!("{}", record.render_line());
        }
    }
    Ok(())
}

fn run_gallery(options: gallery::GalleryOptions) -> Result<()> {
    println!(
        "{} {}",
        style("Generating gallery manifest from").cyan(),
        options.images_dir.display()
    );

    let progress = ProgressReporter::for_gallery();
    let progress_cb = |finished: usize, total: usize| progress.file_done(finished, total);

    let report = gallery::generate(&options, Some(&progress_cb))
        .with_context(|| format!("Failed to write {}", options.output.display()))?;
    progress.finish();

    if !report.directory_read {
        println!(
            "[!] {}",
            style("Images directory unreadable, wrote an empty manifest").yellow()
        );
    }

    println!(
        "{} {} images ({} with dimensions)",
        style("Done:").green().bold(),
        report.items.len(),
        report.with_dimensions()
    );
    if report.without_dimensions() > 0 {
        println!(
            "Without size:  {}",
            style(report.without_dimensions()).yellow()
        );
    }
    println!("Output:        {}", report.output.display());

    Ok(())
}
