use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;

use crate::gallery::{DEFAULT_IMAGES_DIR, DEFAULT_OUTPUT, DEFAULT_SRC_PREFIX, GalleryOptions};
use crate::io::{DEFAULT_HEAD_BYTES, HeaderReader};
use crate::sniff::sniff_path_format;
use crate::types::ImageFormat;

#[derive(Parser, Debug)]
#[command(name = "imgsniff")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Read image dimensions from file headers", long_about = None)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the format and pixel size of each file
    Probe {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Emit a JSON array instead of tab-separated lines
        #[arg(long)]
        json: bool,

        #[arg(long, default_value_t = DEFAULT_HEAD_BYTES)]
        head_bytes: usize,
    },

    /// Write the gallery manifest for a directory of images
    Gallery {
        #[arg(short, long, default_value = DEFAULT_IMAGES_DIR)]
        dir: PathBuf,

        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        #[arg(long, default_value = DEFAULT_SRC_PREFIX)]
        src_prefix: String,

        #[arg(long, default_value_t = DEFAULT_HEAD_BYTES)]
        head_bytes: usize,

        /// Sniff files one at a time instead of on the thread pool
        #[arg(long)]
        sequential: bool,
    },
}

pub fn gallery_options(
    dir: PathBuf,
    output: PathBuf,
    src_prefix: String,
    head_bytes: usize,
    sequential: bool,
) -> GalleryOptions {
    let options = GalleryOptions::new(dir, output)
        .with_src_prefix(src_prefix)
        .with_head_bytes(head_bytes);
    if sequential {
        options.sequential()
    } else {
        options
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeRecord {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ImageFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeRecord {
    pub fn render_line(&self) -> String {
        match (&self.error, self.format, self.width, self.height) {
            (Some(e), ..) => format!("{}\terror: {}", self.path, e),
            (None, Some(format), Some(w), Some(h)) => {
                format!("{}\t{}\t{}x{}", self.path, format, w, h)
            }
            _ => format!("{}\tunknown", self.path),
        }
    }
}

/// Sniffs every path. Results keep the input order.
pub fn probe_paths(paths: &[PathBuf], head_bytes: usize) -> Vec<ProbeRecord> {
    let reader = HeaderReader::new(head_bytes);

    paths
        .par_iter()
        .map(|path| {
            let display = path.display().to_string();
            match sniff_path_format(path, &reader) {
                Ok(found) => ProbeRecord {
                    path: display,
                    format: found.map(|(format, _)| format),
                    width: found.map(|(_, d)| d.width),
                    height: found.map(|(_, d)| d.height),
                    error: None,
                },
                Err(e) => ProbeRecord {
                    path: display,
                    format: None,
                    width: None,
                    height: None,
                    error: Some(e.to_string()),
                },
            }
        })
        .collect()
}

pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn for_gallery() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.cyan/blue}] {pos}/{len} images ({percent}%)")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        Self { bar }
    }

    /// Progress callback for `gallery::generate`.
    pub fn file_done(&self, _finished: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_probe() {
        let cli = Cli::parse_from(["imgsniff", "probe", "a.png", "b.jpg", "--json"]);
        match cli.command {
            Commands::Probe {
                paths,
                json,
                head_bytes,
            } => {
                assert_eq!(paths, vec![PathBuf::from("a.png"), PathBuf::from("b.jpg")]);
                assert!(json);
                assert_eq!(head_bytes, DEFAULT_HEAD_BYTES);
            }
            Commands::Gallery { .. } => panic!("expected probe"),
        }
    }

    #[test]
    fn test_parse_gallery_defaults() {
        let cli = Cli::parse_from(["imgsniff", "-vv", "gallery"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Gallery {
                dir,
                output,
                src_prefix,
                sequential,
                ..
            } => {
                assert_eq!(dir, PathBuf::from(DEFAULT_IMAGES_DIR));
                assert_eq!(output, PathBuf::from(DEFAULT_OUTPUT));
                assert_eq!(src_prefix, DEFAULT_SRC_PREFIX);
                assert!(!sequential);
            }
            Commands::Probe { .. } => panic!("expected gallery"),
        }
    }

    #[test]
    fn test_probe_requires_paths() {
        assert!(Cli::try_parse_from(["imgsniff", "probe"]).is_err());
    }

    #[test]
    fn test_probe_missing_path_reports_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("x.png");

        let records = probe_paths(std::slice::from_ref(&missing), DEFAULT_HEAD_BYTES);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.path, missing.display().to_string());
        assert!(record.format.is_none());
        assert!(record.width.is_none());
        assert!(record.height.is_none());
        let error = record.error.as_deref().unwrap();
        assert!(error.starts_with("Failed to read header of"), "{error}");

        let json = serde_json::to_value(record).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["error".to_string(), "path".to_string()]);

        assert!(record.render_line().starts_with(&format!("{}\terror: ", record.path)));
    }

    #[test]
    fn test_render_line() {
        let record = ProbeRecord {
            path: "a.gif".into(),
            format: Some(ImageFormat::Gif),
            width: Some(120),
            height: Some(80),
            error: None,
        };
        assert_eq!(record.render_line(), "a.gif\tGIF\t120x80");

        let unknown = ProbeRecord {
            format: None,
            width: None,
            height: None,
            ..record
        };
        assert_eq!(unknown.render_line(), "a.gif\tunknown");
    }
}
