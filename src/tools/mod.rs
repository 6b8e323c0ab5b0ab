use crate::error::LoadError;
use crate::models::{BallColor, PixelBuffer};
use crate::utils::quantize::{Quantizer, ThresholdQuantizer};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Synthetic quantized scenes for tests and benches
pub mod synthetic;

/// Load an image as RGBA bytes along with its dimensions.
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<(Vec<u8>, usize, usize), image::ImageError> {
    let rgba = image::open(path)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok((rgba.into_raw(), width as usize, height as usize))
}

/// Load an image into a [`PixelBuffer`].
///
/// With `quantize` set, raw camera colors are first mapped onto the
/// four-color palette by [`ThresholdQuantizer`]; otherwise the file is
/// expected to be quantized already.
pub fn load_buffer<P: AsRef<Path>>(path: P, quantize: bool) -> Result<PixelBuffer, LoadError> {
    let (rgba, width, height) = load_rgba(path)?;
    let buffer = if quantize {
        ThresholdQuantizer::default().quantize(&rgba, width, height)?
    } else {
        PixelBuffer::new(width, height, rgba)?
    };
    Ok(buffer)
}

/// Ground-truth totals carried in a file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedCounts {
    /// Expected blue balls
    pub blue: u32,
    /// Expected red balls
    pub red: u32,
}

impl ExpectedCounts {
    /// Expected total for one color
    pub fn for_color(&self, color: BallColor) -> u32 {
        match color {
            BallColor::Red => self.red,
            BallColor::Blue => self.blue,
        }
    }
}

/// Parse expected counts from a file stem of the form `<B>B_<R>R...`.
///
/// The pattern must start the stem; anything after the `R` is ignored, so
/// `10B_3R_side` parses as 10 blue and 3 red.
pub fn parse_expected_counts(stem: &str) -> Option<ExpectedCounts> {
    let (blue, rest) = leading_number(stem)?;
    let rest = rest.strip_prefix("B_")?;
    let (red, rest) = leading_number(rest)?;
    rest.starts_with('R').then_some(ExpectedCounts { blue, red })
}

fn leading_number(s: &str) -> Option<(u32, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let value = s[..end].parse().ok()?;
    Some((value, &s[end..]))
}

/// Expected counts for an image path, from its file stem.
pub fn expected_counts_for(path: &Path) -> Option<ExpectedCounts> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(parse_expected_counts)
}

/// Default dataset root from environment variables.
pub fn dataset_root_from_env() -> PathBuf {
    env::var("ROBOSCORE_DATASET_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("benches/images"))
}

/// Default bench limit from environment variables.
///
/// Returns `None` (full dataset) when `ROBOSCORE_BENCH_LIMIT` is unset or `0`.
pub fn bench_limit_from_env() -> Option<usize> {
    env::var("ROBOSCORE_BENCH_LIMIT")
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&v| v != 0)
}

/// Sorted image paths under `root`, optionally truncated to `limit`.
pub fn dataset_iter<P: AsRef<Path>>(root: P, limit: Option<usize>) -> impl Iterator<Item = PathBuf> {
    let mut images = collect_images(root.as_ref());
    images.sort();
    if let Some(limit) = limit {
        images.truncate(limit);
    }
    images.into_iter()
}

fn collect_images(root: &Path) -> Vec<PathBuf> {
    let mut stack = vec![root.to_path_buf()];
    let mut images = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if let Some(ext) = path.extension() {
                let ext = ext.to_string_lossy().to_lowercase();
                if ext == "png" || ext == "jpg" || ext == "jpeg" || ext == "bmp" {
                    images.push(path);
                }
            }
        }
    }

    images
}
