use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use roboscore_vision::tools::{
    bench_limit_from_env, dataset_iter, dataset_root_from_env, expected_counts_for, load_buffer,
};
use roboscore_vision::utils::scale::{DEFAULT_MIN_WIDTH, auto_scale_factor};
use roboscore_vision::{BallColor, Detection, DetectionParameters, Detector, PipeType, PixelBuffer};
use std::path::{Path, PathBuf};
use std::time::Instant;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "scoretool", version, about = "Ball counting tools for goal-pipe captures")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Clone)]
struct RunArgs {
    /// JSON parameter file; missing fields keep their defaults
    #[arg(long)]
    params: Option<PathBuf>,
    /// Pipe type: short, long or none
    #[arg(long)]
    pipe: Option<PipeType>,
    /// Principal-angle correction in radians
    #[arg(long, default_value_t = 0.0)]
    angle: f32,
    /// Pick an integer downscale that keeps the width at or above 1000 px
    #[arg(long)]
    auto_scale: bool,
    /// Quantize raw camera colors before detection
    #[arg(long)]
    quantize: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Count balls in a single image
    Detect {
        #[arg(long)]
        image: PathBuf,
        #[command(flatten)]
        run: RunArgs,
        /// Write the review overlay to this path
        #[arg(long)]
        overlay: Option<PathBuf>,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Explain what the detector sees at one point
    Inspect {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        x: f32,
        #[arg(long)]
        y: f32,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Run detection over a directory and compare with labeled file names
    Batch {
        #[arg(long)]
        dir: Option<PathBuf>,
        #[arg(long)]
        limit: Option<usize>,
        #[command(flatten)]
        run: RunArgs,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Detect {
            image,
            run,
            overlay,
            json,
        } => detect_cmd(&image, &run, overlay.as_deref(), json),
        Command::Inspect { image, x, y, run } => inspect_cmd(&image, x, y, &run),
        Command::Batch { dir, limit, run } => batch_cmd(dir, limit, &run),
    }
}

fn base_params(run: &RunArgs) -> CliResult<DetectionParameters> {
    let params = match &run.params {
        Some(path) => DetectionParameters::from_json_file(path)?,
        None => DetectionParameters::default(),
    };
    let mut params = params.with_env_overrides();
    if let Some(pipe) = run.pipe {
        params.pipe_type = pipe;
    }
    Ok(params)
}

fn detector_for(buffer: &PixelBuffer, params: &DetectionParameters, run: &RunArgs) -> Detector {
    let mut params = params.clone();
    if run.auto_scale {
        params.image_scale = auto_scale_factor(buffer.width(), DEFAULT_MIN_WIDTH);
        tracing::debug!(scale = params.image_scale, "auto scale");
    }
    Detector::new(params).with_principal_angle(run.angle)
}

fn load(image: &Path, run: &RunArgs) -> CliResult<PixelBuffer> {
    load_buffer(image, run.quantize)
        .map_err(|e| -> CliError { format!("{}: {}", image.display(), e).into() })
}

fn print_counts(detection: &Detection) {
    let c = &detection.counts;
    println!(
        "  red:  {} middle, {} outside ({} total)",
        c.red_middle,
        c.red_outside,
        c.red_total()
    );
    println!(
        "  blue: {} middle, {} outside ({} total)",
        c.blue_middle,
        c.blue_outside,
        c.blue_total()
    );
    println!("  lines: {}", detection.lines.len());
}

fn detect_cmd(image: &Path, run: &RunArgs, overlay: Option<&Path>, json: bool) -> CliResult<()> {
    let params = base_params(run)?;
    let buffer = load(image, run)?;
    let detector = detector_for(&buffer, &params, run);

    let start = Instant::now();
    let detection = detector.detect(&buffer);
    let elapsed = start.elapsed();

    if json {
        println!("{}", serde_json::to_string_pretty(&detection)?);
    } else {
        println!(
            "Image: {} ({}x{}) in {:.1} ms",
            image.display(),
            buffer.width(),
            buffer.height(),
            elapsed.as_secs_f64() * 1000.0
        );
        print_counts(&detection);
        for (i, ball) in detection.balls.iter().enumerate() {
            println!(
                "  ball {}: {} at ({:.1}, {:.1}) r={:.1}{}",
                i,
                ball.color.name(),
                ball.center.x,
                ball.center.y,
                ball.radius,
                if ball.in_middle { " middle" } else { "" }
            );
        }
    }

    if let Some(out) = overlay {
        if let Some(img) = detection.render_overlay(&buffer) {
            img.save(out)?;
            tracing::info!("overlay written to {}", out.display());
        }
    }
    Ok(())
}

fn inspect_cmd(image: &Path, x: f32, y: f32, run: &RunArgs) -> CliResult<()> {
    let params = base_params(run)?;
    let buffer = load(image, run)?;
    let detection = detector_for(&buffer, &params, run).detect(&buffer);
    let report = detection.inspect(x, y);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

struct BatchRow {
    path: PathBuf,
    detection: Option<Detection>,
}

fn batch_cmd(dir: Option<PathBuf>, limit: Option<usize>, run: &RunArgs) -> CliResult<()> {
    let params = base_params(run)?;
    let root = dir.unwrap_or_else(dataset_root_from_env);
    let limit = limit.or_else(bench_limit_from_env);
    let paths: Vec<PathBuf> = dataset_iter(&root, limit).collect();
    if paths.is_empty() {
        return Err(format!("no images found under {}", root.display()).into());
    }

    let start = Instant::now();
    let rows: Vec<BatchRow> = paths
        .into_par_iter()
        .map(|path| {
            let detection = match load(&path, run) {
                Ok(buffer) => Some(detector_for(&buffer, &params, run).detect(&buffer)),
                Err(err) => {
                    tracing::warn!("{err}");
                    None
                }
            };
            BatchRow { path, detection }
        })
        .collect();

    let mut labeled = 0usize;
    let mut exact = 0usize;
    for row in &rows {
        let name = row.path.display();
        let Some(detection) = &row.detection else {
            println!("{name}: failed to load");
            continue;
        };
        let found = |color| detection.counts.total_for(color);
        match expected_counts_for(&row.path) {
            Some(expected) => {
                labeled += 1;
                let ok = BallColor::ALL
                    .iter()
                    .all(|&c| found(c) == expected.for_color(c));
                if ok {
                    exact += 1;
                }
                println!(
                    "{name}: blue {}/{} red {}/{}{}",
                    found(BallColor::Blue),
                    expected.blue,
                    found(BallColor::Red),
                    expected.red,
                    if ok { "" } else { "  MISMATCH" }
                );
            }
            None => println!(
                "{name}: blue {} red {}",
                found(BallColor::Blue),
                found(BallColor::Red)
            ),
        }
    }

    println!(
        "Processed {} images in {:.2}s",
        rows.len(),
        start.elapsed().as_secs_f64()
    );
    if labeled > 0 {
        println!(
            "Exact matches: {}/{} ({:.1}%)",
            exact,
            labeled,
            exact as f64 * 100.0 / labeled as f64
        );
    }
    Ok(())
}
