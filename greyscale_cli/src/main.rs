mod io;

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use greyscale::prelude::*;

const EXAMPLES: &str = "\
Examples:
  greyscale input.ppm -o output.pgm
  greyscale input.ppm -o output.pgm --coeffs 0.3,0.59,0.11 --brightness 20 --contrast 10
  greyscale input.ppm -o output.pgm -V 1 -B2";

/// Converts binary PPM (P6) images to grayscale PGM (P5) images.
///
/// The grey value is the weighted sum of the red, green and blue channels.
/// Brightness and contrast adjustments are optional.
#[derive(Parser, Debug)]
#[command(name = "greyscale", after_help = EXAMPLES)]
struct Cli {
    /// Input image (binary PPM)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output image
    #[arg(short = 'o', value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Variant of the algorithm: 0 simd, 1 normalized, 2 naive
    #[arg(short = 'V', value_name = "N", default_value = "0", value_parser = parse_integer, allow_negative_numbers = true)]
    variant: i32,

    /// Measure the runtime over N repetitions, written `-BN` (`-B` alone means 1)
    #[arg(short = 'B', value_name = "N", value_parser = parse_repeat)]
    repeat: Option<i32>,

    /// Grayscale coefficients for red, green and blue
    #[arg(long = "coeffs", value_name = "A,B,C", value_parser = parse_coefficients)]
    coefficients: Option<Coefficients>,

    /// Brightness offset in [-255, 255]
    #[arg(long, value_name = "N", default_value = "0", value_parser = parse_integer, allow_negative_numbers = true)]
    brightness: i32,

    /// Contrast strength in [-255, 255]
    #[arg(long, value_name = "N", value_parser = parse_integer, allow_negative_numbers = true)]
    contrast: Option<i32>,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, value_name = "FILTER", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn into_options(self) -> RunOptions {
        RunOptions {
            version: self.variant,
            repeat: self.repeat.unwrap_or(0),
            input: self.input,
            output: Some(self.output),
            coefficients: self.coefficients.unwrap_or_default(),
            brightness: self.brightness,
            contrast: self.contrast,
        }
    }
}

/// `-B` accepts any integer except zero; the sign is checked later.
fn parse_repeat(text: &str) -> std::result::Result<i32, ValidationError> {
    match parse_integer(text)? {
        0 => Err(ValidationError::ZeroRepeatCount),
        repeat => Ok(repeat),
    }
}

/// `-B` takes its count only when attached (`-B5`). A bare `-B` is
/// rewritten to `-B1` so the next token stays free for `INPUT`.
fn attach_repeat_count<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut options_ended = false;
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            if options_ended {
                arg
            } else if arg == "--" {
                options_ended = true;
                arg
            } else if arg == "-B" {
                OsString::from("-B1")
            } else {
                arg
            }
        })
        .collect()
}

fn main() -> ExitCode {
    let cli = Cli::parse_from(attach_repeat_count(std::env::args_os()));

    let _logger = match common::setup_logging(&cli.log_level) {
        Ok(handle) => handle,
        Err(err) => {
            eprintln!("Failed to start logging: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli.into_options()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(options: RunOptions) -> Result<()> {
    let config = options.validate()?;

    let input = io::read_ppm(&config.input)?;
    log::info!(
        "Read {}x{} image from '{}'",
        input.width(),
        input.height(),
        config.input.display()
    );

    let mut output = GreyImage::for_source(&input);
    let elapsed = convert(&config, &input, &mut output)?;

    if config.repeat > 0 {
        println!("{}", timing_report(elapsed, config.repeat, config.version));
    }

    io::write_pgm(&config.output, &output)?;
    log::info!("Wrote '{}'", config.output.display());

    Ok(())
}

/// Runs the transform once, or `repeat` times when timing, and returns the
/// total time spent in it.
fn convert(config: &RunConfig, input: &RgbImage, output: &mut GreyImage) -> Result<Duration> {
    let iterations = config.repeat.max(1);

    let start = Instant::now();
    for _ in 0..iterations {
        config
            .params
            .apply(config.version, input, output)
            .with_context(|| format!("Execution failed with version {}", config.version.id()))?;
    }
    let elapsed = start.elapsed();

    log::debug!("{iterations} iteration(s) took {elapsed:?}");
    Ok(elapsed)
}

fn timing_report(elapsed: Duration, repeat: u32, version: Version) -> String {
    let total = elapsed.as_secs_f64();
    format!(
        "The implementation takes {total:.6} seconds for {repeat} iteration(s) of version {} \
         of the implementation. Average: {:.6} seconds (excluding reading and writing the file)",
        version.id(),
        total / f64::from(repeat)
    )
}
