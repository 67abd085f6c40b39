use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use deborder::{
    BorderLog, CropConfig, EmptyImagePolicy, Envelope, ImageFormat, PngCompression,
    ProcessedImage, ScanObserver,
};

const DEFAULT_QUALITY: u8 = 85;

#[derive(Parser)]
#[command(name = "deborder")]
#[command(about = "Crop uniform black borders from an image", long_about = None)]
#[command(version)]
struct Args {
    /// Input image, or `-` to read from stdin
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file, or `-` for stdout [default: <INPUT stem>.cropped.<ext>]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output image format
    #[arg(long, value_enum)]
    image_format: Option<ImageFormatArg>,

    /// JPEG/WebP quality (0-100) [default: 85]
    #[arg(long, value_name = "QUALITY")]
    quality: Option<u8>,

    /// PNG compression level [default: default]
    #[arg(long, value_enum)]
    png_compression: Option<PngCompressionArg>,

    /// What to do with an image that is entirely black
    #[arg(long, value_enum)]
    on_empty: Option<OnEmptyArg>,

    /// Scan rows in parallel
    #[arg(long, default_value_t)]
    parallel: bool,

    /// Write the classification of every pixel to this file
    #[arg(long, value_name = "FILE")]
    border_log: Option<PathBuf>,

    /// Only log border pixels
    #[arg(long, default_value_t)]
    border_only: bool,

    /// Print a JSON status envelope
    #[arg(long, default_value_t)]
    json: bool,

    /// Config file (defaults to ~/.config/deborder/config.json when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, default_value_t)]
    verbose: bool,

    /// Quiet mode (minimal output)
    #[arg(short, long, default_value_t)]
    quiet: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ImageFormatArg {
    Png,
    Jpeg,
    Webp,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PngCompressionArg {
    Fast,
    Default,
    Best,
}

impl From<PngCompressionArg> for PngCompression {
    fn from(arg: PngCompressionArg) -> Self {
        match arg {
            PngCompressionArg::Fast => PngCompression::Fast,
            PngCompressionArg::Default => PngCompression::Default,
            PngCompressionArg::Best => PngCompression::Best,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OnEmptyArg {
    Fail,
    Keep,
}

impl From<OnEmptyArg> for EmptyImagePolicy {
    fn from(arg: OnEmptyArg) -> Self {
        match arg {
            OnEmptyArg::Fail => EmptyImagePolicy::Fail,
            OnEmptyArg::Keep => EmptyImagePolicy::KeepOriginal,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    setup_logging(args.verbose, args.quiet);

    let result = build_config(&args).and_then(|config| run(&args, &config));

    if args.json {
        let envelope = match &result {
            Ok((img, output)) => Envelope::ok(
                format!(
                    "Successfully cropped the image. Saved as '{}'.",
                    output.display()
                ),
                img,
            ),
            Err(e) => envelope_for(e),
        };
        print_envelope(&envelope, &args);
    }

    result.map(|_| ())
}

fn run(args: &Args, config: &CropConfig) -> Result<(ProcessedImage, PathBuf)> {
    let data = read_input(&args.input)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, config.image_format));

    let mut border_log = match &args.border_log {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create border log {}", path.display()))?;
            Some(BorderLog::new(BufWriter::new(file)).border_only(config.log_border_only))
        }
        None => None,
    };

    log::debug!(
        "Processing {} ({} bytes) with config: {:?}",
        args.input.display(),
        data.len(),
        config
    );

    let observer = border_log
        .as_mut()
        .map(|sink| sink as &mut dyn ScanObserver);
    let img = deborder::process(&data, config, observer)?;

    if let Some(sink) = border_log {
        log::debug!(
            "Border log: {} border, {} content pixels",
            sink.border_count(),
            sink.content_count()
        );
        sink.finish().context("Failed to write border log")?;
    }

    write_output(&output, &img.data)?;

    if !args.quiet {
        match img.rect {
            Some(rect) => log::info!("Content rectangle {rect}"),
            None => log::info!("No content found, image kept as is"),
        }
        log::info!("Done: {}", output.display());
    }

    Ok((img, output))
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(input: &Path) -> Result<Vec<u8>> {
    if is_stdio(input) {
        let mut data = Vec::new();
        std::io::stdin()
            .read_to_end(&mut data)
            .context("Failed to read image from stdin")?;
        return Ok(data);
    }

    // Validate input file
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }
    std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))
}

fn write_output(output: &Path, data: &[u8]) -> Result<()> {
    if is_stdio(output) {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(data)
            .context("Failed to write image to stdout")?;
        return stdout.flush().context("Failed to write image to stdout");
    }

    // Create output directory if it doesn't exist
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).context("Failed to create output directory")?;
    }
    std::fs::write(output, data).context("Failed to write output file")
}

/// `<dir>/<stem>.cropped.<ext>` next to the input, stdout when reading stdin.
fn default_output_path(input: &Path, format: ImageFormat) -> PathBuf {
    if is_stdio(input) {
        return PathBuf::from("-");
    }

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{stem}.cropped.{}", format.extension()))
}

fn envelope_for(err: &anyhow::Error) -> Envelope {
    match err.chain().find_map(|e| e.downcast_ref::<deborder::Error>()) {
        Some(err) => Envelope::from_error(err),
        None => Envelope::internal(err.to_string(), err.root_cause()),
    }
}

fn print_envelope(envelope: &Envelope, args: &Args) {
    let json = envelope.to_json();
    let writes_image_to_stdout = args
        .output
        .as_deref()
        .map_or(is_stdio(&args.input), is_stdio);

    if writes_image_to_stdout {
        eprintln!("{json}");
    } else {
        println!("{json}");
    }
}

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn build_config(args: &Args) -> Result<CropConfig> {
    // Validate quality
    if args.quality.is_some_and(|quality| quality > 100) {
        anyhow::bail!("Quality must be between 0 and 100");
    }

    let mut config = match &args.config {
        Some(path) => CropConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CropConfig::load().unwrap_or_default(),
    };

    // Switch format, carrying over the configured quality or compression
    if let Some(format) = args.image_format {
        let (quality, compression) = match config.image_format {
            ImageFormat::Png { compression } => (DEFAULT_QUALITY, compression),
            ImageFormat::Jpeg { quality } | ImageFormat::WebP { quality } => {
                (quality, PngCompression::Default)
            }
        };
        config.image_format = match format {
            ImageFormatArg::Png => ImageFormat::Png { compression },
            ImageFormatArg::Jpeg => ImageFormat::Jpeg { quality },
            ImageFormatArg::Webp => ImageFormat::WebP { quality },
        };
    }

    // Quality and compression flags apply to whichever format is in effect
    match &mut config.image_format {
        ImageFormat::Png { compression } => {
            if let Some(level) = args.png_compression {
                *compression = level.into();
            }
        }
        ImageFormat::Jpeg { quality } | ImageFormat::WebP { quality } => {
            if let Some(value) = args.quality {
                *quality = value;
            }
        }
    }

    if let Some(on_empty) = args.on_empty {
        config.empty_policy = on_empty.into();
    }
    config.parallel |= args.parallel;
    config.log_border_only |= args.border_only;

    if config.parallel && args.border_log.is_some() {
        log::warn!("Border log requires a sequential scan, ignoring --parallel");
    }

    Ok(config)
}
