use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail, ensure};
use clap::Parser;
use imagecraft_core::pipeline::Filter;
use imagecraft_core::pipeline::modules::{
    BoxBlur, Crop, DEFAULT_VIGNETTE_INTENSITY, EdgeDetect, GaussianBlur, Median, Vignette,
};

const FILTER_HELP: &str = "\
Filters (applied left to right, after any --recipe filters):
  -crop <width> <height>    Keep the top-left region
  -gs                       Grayscale
  -neg                      Negative
  -sharp                    Sharpen
  -edge <threshold>         Edge detection, threshold in [0, 1]
  -med <window>             Median filter, odd window size
  -blur <sigma>             Gaussian blur
  -sepia                    Sepia tone
  -vignette [intensity]     Vignette, intensity in [0, 1] (default 0.8)
  -emboss                   Emboss
  -box <radius>             Box blur

Filters may also be written with two dashes (--crop, --gs, ...).

Examples:
  imagecraft input.bmp output.bmp -gs
  imagecraft input.bmp output.bmp -crop 800 600 -gs -blur 0.5
  imagecraft input.bmp output.bmp -edge 0.1 -neg
  imagecraft input.bmp output.bmp -sepia -vignette 0.7";

/// Apply a chain of filters to a 24-bit uncompressed BMP image.
#[derive(Parser, Debug)]
#[command(name = "imagecraft", version, after_help = FILTER_HELP)]
pub struct Cli {
    /// Input image (24-bit uncompressed BMP)
    pub input: PathBuf,

    /// Output image (BMP)
    #[arg(required_unless_present = "info")]
    pub output: Option<PathBuf>,

    /// Filters and their parameters, in application order
    #[arg(
        value_name = "FILTER",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub filters: Vec<String>,

    /// JSON recipe with filters to run before the command-line filters
    #[arg(long, value_name = "FILE")]
    pub recipe: Option<PathBuf>,

    /// Print the input dimensions and exit
    #[arg(long)]
    pub info: bool,

    /// Decode the input and print the filter plan without writing output
    #[arg(long)]
    pub dry_run: bool,

    /// Log at debug level unless RUST_LOG is set
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    /// Check file extensions and parse the filter chain.
    pub fn validate(&self) -> Result<Vec<Filter>> {
        ensure!(
            has_bmp_extension(&self.input),
            "input file must have .bmp extension: {}",
            self.input.display()
        );
        if let Some(output) = &self.output {
            ensure!(
                has_bmp_extension(output),
                "output file must have .bmp extension: {}",
                output.display()
            );
        }
        parse_filters(&self.filters)
    }
}

pub fn has_bmp_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("bmp"))
}

/// Turn `-crop 800 600 -gs -blur 0.5 ...` into filters, keeping order.
///
/// Parameters are validated here so a bad value is rejected before any
/// image is decoded.
pub fn parse_filters(tokens: &[String]) -> Result<Vec<Filter>> {
    let mut filters = Vec::new();
    let mut iter = tokens.iter().peekable();

    while let Some(token) = iter.next() {
        let Some(flag) = token.strip_prefix("--").or_else(|| token.strip_prefix('-')) else {
            bail!("unexpected argument: {token}");
        };

        let filter = match flag {
            "crop" => {
                let width = parse_num(
                    next_value(&mut iter, flag, "width and height")?,
                    "crop width",
                )?;
                let height = parse_num(
                    next_value(&mut iter, flag, "width and height")?,
                    "crop height",
                )?;
                Filter::Crop(Crop::new(width, height)?)
            }
            "gs" => Filter::Grayscale,
            "neg" => Filter::Negative,
            "sharp" => Filter::Sharpen,
            "edge" => {
                let threshold = parse_num(
                    next_value(&mut iter, flag, "a threshold")?,
                    "edge threshold",
                )?;
                Filter::EdgeDetect(EdgeDetect::new(threshold)?)
            }
            "med" => {
                let window = parse_num(
                    next_value(&mut iter, flag, "a window size")?,
                    "median window size",
                )?;
                Filter::Median(Median::new(window)?)
            }
            "blur" => {
                let sigma = parse_num(
                    next_value(&mut iter, flag, "sigma")?,
                    "blur sigma",
                )?;
                Filter::GaussianBlur(GaussianBlur::new(sigma)?)
            }
            "sepia" => Filter::Sepia,
            "vignette" => {
                let intensity = match iter.next_if(|t| !t.starts_with('-')) {
                    Some(raw) => parse_num(raw, "vignette intensity")?,
                    None => DEFAULT_VIGNETTE_INTENSITY,
                };
                Filter::Vignette(Vignette::new(intensity)?)
            }
            "emboss" => Filter::Emboss,
            "box" => {
                let radius = parse_num(
                    next_value(&mut iter, flag, "a radius")?,
                    "box blur radius",
                )?;
                Filter::BoxBlur(BoxBlur::new(radius)?)
            }
            _ => bail!("unknown filter: {token}"),
        };
        filters.push(filter);
    }

    Ok(filters)
}

fn next_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
    what: &str,
) -> Result<&'a str> {
    iter.next()
        .map(String::as_str)
        .with_context(|| format!("-{flag} requires {what}"))
}

fn parse_num<T>(raw: &str, what: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse()
        .with_context(|| format!("invalid {what}: {raw:?}"))
}
