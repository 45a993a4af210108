//! Gallery manifest generation.
//!
//! Lists an image directory, sniffs every image's header and writes a JSON
//! array of `{id, src, width?, height?}` records for front-end layout. Missing
//! dimensions never fail the run: the record is written without them.

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;
use std::sync::atomic::{self, AtomicUsize};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::GalleryError;
use crate::io::{DEFAULT_HEAD_BYTES, HeaderReader};
use crate::sniff::sniff_path_format;
use crate::types::{Dimensions, ImageFormat};

pub const DEFAULT_IMAGES_DIR: &str = "public/images/stories";
pub const DEFAULT_OUTPUT: &str = "src/generated/story-gallery-items.json";
pub const DEFAULT_SRC_PREFIX: &str = "/images/stories";

pub type ProgressFn<'a> = dyn Fn(usize, usize) + Sync + 'a;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryItem {
    pub id: usize,
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl GalleryItem {
    pub fn new(id: usize, src: String, dimensions: Option<Dimensions>) -> Self {
        Self {
            id,
            src,
            width: dimensions.map(|d| d.width),
            height: dimensions.map(|d| d.height),
        }
    }

    #[inline]
    pub fn has_dimensions(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }
}

/// Options for a manifest run
#[derive(Debug, Clone)]
pub struct GalleryOptions {
    /// Directory holding the gallery images
    pub images_dir: PathBuf,
    /// Where the JSON manifest is written
    pub output: PathBuf,
    /// URL prefix joined with each file name to form `src`
    pub src_prefix: String,
    /// Bytes read from the start of each file
    pub head_bytes: usize,
    /// Sniff files on the rayon pool
    pub parallel: bool,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT),
            src_prefix: DEFAULT_SRC_PREFIX.to_string(),
            head_bytes: DEFAULT_HEAD_BYTES,
            parallel: true,
        }
    }
}

impl GalleryOptions {
    pub fn new(images_dir: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
            output: output.into(),
            ..Default::default()
        }
    }

    pub fn with_src_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.src_prefix = prefix.into();
        self
    }

    pub fn with_head_bytes(mut self, bytes: usize) -> Self {
        self.head_bytes = bytes;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

#[derive(Debug)]
pub struct GalleryReport {
    pub items: Vec<GalleryItem>,
    pub output: PathBuf,
    /// False when the images directory could not be listed and an empty
    /// manifest was written in its place.
    pub directory_read: bool,
}

impl GalleryReport {
    pub fn with_dimensions(&self) -> usize {
        self.items.iter().filter(|i| i.has_dimensions()).count()
    }

    pub fn without_dimensions(&self) -> usize {
        self.items.len() - self.with_dimensions()
    }
}

/// Hidden files are skipped even when their extension matches.
pub fn is_gallery_image(name: &str) -> bool {
    !name.starts_with('.') && ImageFormat::from_file_name(name).is_some()
}

/// Regular files in `dir` that look like gallery images, in natural order.
/// Only failing to open `dir` is an error; unreadable entries are skipped.
pub fn list_images(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        let Ok(name) = entry.file_name().into_string() else {
            debug!(path = %entry.path().display(), "skipping non UTF-8 file name");
            continue;
        };
        if !is_gallery_image(&name) || !entry.path().is_file() {
            continue;
        }
        names.push(name);
    }

    names.sort_by(|a, b| natural_cmp(a, b));
    Ok(names)
}

/// Sniffs each named file under `dir`. The result keeps the order of
/// `names` and `id` is the position in it. `progress` receives
/// `(finished, total)` once per file, possibly from several threads.
pub fn build_items(
    dir: &Path,
    names: &[String],
    options: &GalleryOptions,
    progress: Option<&ProgressFn<'_>>,
) -> Vec<GalleryItem> {
    let reader = HeaderReader::new(options.head_bytes);
    let finished = AtomicUsize::new(0);
    let total = names.len();

    let describe = |(id, name): (usize, &String)| {
        let item = describe_image(dir, id, name, &options.src_prefix, &reader);
        if let Some(cb) = progress {
            cb(finished.fetch_add(1, atomic::Ordering::Relaxed) + 1, total);
        }
        item
    };

    if options.parallel {
        names.par_iter().enumerate().map(describe).collect()
    } else {
        names.iter().enumerate().map(describe).collect()
    }
}

fn describe_image(
    dir: &Path,
    id: usize,
    name: &str,
    src_prefix: &str,
    reader: &HeaderReader,
) -> GalleryItem {
    let path = dir.join(name);

    let dimensions = match sniff_path_format(&path, reader) {
        Ok(Some((format, dims))) => {
            debug!(file = name, %format, %dims, "read dimensions");
            Some(dims)
        }
        Ok(None) => {
            debug!(file = name, "no recognizable header");
            None
        }
        Err(e) => {
            warn!(file = name, error = %e, "writing record without dimensions");
            None
        }
    };

    GalleryItem::new(id, image_src(src_prefix, name), dimensions)
}

pub fn image_src(prefix: &str, name: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), name)
}

/// Lists, sniffs and writes the manifest. An unreadable images directory
/// produces an empty manifest; only failing to write the output is an error.
pub fn generate(
    options: &GalleryOptions,
    progress: Option<&ProgressFn<'_>>,
) -> Result<GalleryReport, GalleryError> {
    let (items, directory_read) = match list_images(&options.images_dir) {
        Ok(names) => {
            info!(
                dir = %options.images_dir.display(),
                count = names.len(),
                "generating gallery manifest"
            );
            (
                build_items(&options.images_dir, &names, options, progress),
                true,
            )
        }
        Err(e) => {
            error!(
                dir = %options.images_dir.display(),
                error = %e,
                "cannot read images directory, writing empty manifest"
            );
            (Vec::new(), false)
        }
    };

    write_manifest(&options.output, &items)?;

    let report = GalleryReport {
        items,
        output: options.output.clone(),
        directory_read,
    };
    info!(
        output = %report.output.display(),
        items = report.items.len(),
        with_dimensions = report.with_dimensions(),
        "gallery manifest written"
    );

    Ok(report)
}

/// Pretty-printed with two-space indentation. Parent directories are created.
pub fn write_manifest(output: &Path, items: &[GalleryItem]) -> Result<(), GalleryError> {
    let write_err = |source| GalleryError::Write {
        path: output.to_path_buf(),
        source,
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let json = serde_json::to_string_pretty(items)?;
    fs::write(output, json).map_err(write_err)
}

/// Case-insensitive comparison that orders digit runs by numeric value, so
/// `img2.jpg` sorts before `img10.jpg`. Names equal under that rule fall back
/// to plain byte order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        let ord = match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                compare_digit_runs(&take_digits(&mut left), &take_digits(&mut right))
            }
            (Some(x), Some(y)) => {
                left.next();
                right.next();
                Iterator::cmp(x.to_lowercase(), y.to_lowercase())
            }
        };

        if ord != Ordering::Equal {
            return ord;
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
