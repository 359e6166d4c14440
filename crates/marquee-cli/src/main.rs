use std::io::Read;

use marquee_core::{ChartConfig, SalesNode};
use marquee_render::SvgRenderOptions;

mod cache;
mod loader;

use cache::DiskCache;
use loader::{CacheMode, LoadState, Loader};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Core(marquee_core::Error),
    Render(marquee_render::Error),
    Json(serde_json::Error),
    Fetch(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Fetch(message) => write!(f, "{message}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<marquee_core::Error> for CliError {
    fn from(value: marquee_core::Error) -> Self {
        Self::Core(value)
    }
}

impl From<marquee_render::Error> for CliError {
    fn from(value: marquee_render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Render,
    Layout,
    Fetch,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    out: Option<String>,
    pretty: bool,
    chart_id: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
    legend_height: Option<f64>,
    padding: Option<f64>,
    no_cache: bool,
    refresh: bool,
}

fn usage() -> &'static str {
    "marquee-cli\n\
\n\
USAGE:\n\
  marquee-cli [render] [--out <path>] [--id <chart-id>] [--width <n>] [--height <n>] [--legend-height <n>] [--padding <n>] [--no-cache] [--refresh] [<path>|-]\n\
  marquee-cli layout [--pretty] [--width <n>] [--height <n>] [--legend-height <n>] [--padding <n>] [--no-cache] [--refresh] [<path>|-]\n\
  marquee-cli fetch [--refresh]\n\
\n\
NOTES:\n\
  - With no <path>, the dataset is served from the local cache, or fetched\n\
    from the remote source and cached. '-' reads a dataset from stdin.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - layout prints the computed chart layout as JSON.\n\
  - fetch populates the cache and prints its path.\n\
  - --refresh refetches even when a cache entry exists; --no-cache fetches\n\
    without touching the cache.\n\
"
}

fn parse_f64<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<f64, CliError> {
    let Some(raw) = it.next() else {
        return Err(CliError::Usage(usage()));
    };
    let value = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(CliError::Usage(usage()));
    }
    Ok(value)
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "layout" => args.command = Command::Layout,
            "fetch" => args.command = Command::Fetch,
            "--pretty" => args.pretty = true,
            "--no-cache" => args.no_cache = true,
            "--refresh" => args.refresh = true,
            "--out" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(path.clone());
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.chart_id = Some(id.clone());
            }
            "--width" => args.width = Some(parse_f64(&mut it)?),
            "--height" => args.height = Some(parse_f64(&mut it)?),
            "--legend-height" => args.legend_height = Some(parse_f64(&mut it)?),
            "--padding" => args.padding = Some(parse_f64(&mut it)?),
            "-" => args.input = Some("-".to_string()),
            other if other.starts_with("--") => return Err(CliError::Usage(usage())),
            other => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(other.to_string());
            }
        }
    }

    Ok(args)
}

fn chart_config(args: &Args) -> ChartConfig {
    let mut config = ChartConfig::default();
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(legend_height) = args.legend_height {
        config.legend_height = legend_height;
    }
    if let Some(padding) = args.padding {
        config.padding_inner = padding;
    }
    config
}

fn read_input(path: &str) -> Result<String, CliError> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn obtain_dataset(args: &Args) -> Result<SalesNode, CliError> {
    if let Some(input) = &args.input {
        let text = read_input(input)?;
        return Ok(marquee_core::parse_dataset(&text)?);
    }

    let cache = if args.no_cache {
        None
    } else {
        DiskCache::default_location()
    };
    let loader = Loader::new(cache).map_err(|err| CliError::Fetch(err.to_string()))?;
    let mode = if args.no_cache {
        CacheMode::Bypass
    } else if args.refresh {
        CacheMode::Refresh
    } else {
        CacheMode::ReadWrite
    };

    match loader.load(mode) {
        LoadState::Ready(data) => Ok(data),
        LoadState::Failed(message) => Err(CliError::Fetch(message)),
        LoadState::Unloaded | LoadState::Loading => {
            Err(CliError::Fetch("loader did not complete".to_string()))
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    match args.command {
        Command::Fetch => {
            let Some(cache) = DiskCache::default_location() else {
                return Err(CliError::Fetch(
                    "no cache directory available on this platform".to_string(),
                ));
            };
            let loader =
                Loader::new(Some(cache.clone())).map_err(|err| CliError::Fetch(err.to_string()))?;
            let mode = if args.refresh {
                CacheMode::Refresh
            } else {
                CacheMode::ReadWrite
            };
            match loader.load(mode) {
                LoadState::Ready(_) => {
                    println!("{}", cache.path().display());
                    Ok(())
                }
                LoadState::Failed(message) => Err(CliError::Fetch(message)),
                LoadState::Unloaded | LoadState::Loading => {
                    Err(CliError::Fetch("loader did not complete".to_string()))
                }
            }
        }
        Command::Layout => {
            let data = obtain_dataset(args)?;
            let layout = marquee_render::layout_chart(&data, &chart_config(args))?;
            let text = if args.pretty {
                serde_json::to_string_pretty(&layout)?
            } else {
                serde_json::to_string(&layout)?
            };
            println!("{text}");
            Ok(())
        }
        Command::Render => {
            let data = obtain_dataset(args)?;
            let options = SvgRenderOptions {
                chart_id: args.chart_id.clone(),
                include_tooltips: true,
            };
            let svg = marquee_render::render_dataset_svg(&data, &chart_config(args), &options)?;
            match &args.out {
                Some(path) => std::fs::write(path, svg)?,
                None => print!("{svg}"),
            }
            Ok(())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let argv: Vec<String> = std::env::args().collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(&args) {
        match err {
            CliError::Usage(msg) => {
                eprintln!("{msg}");
                std::process::exit(2);
            }
            CliError::Fetch(message) => {
                eprintln!("Sorry, but needed data can't be fetched: {message}");
                std::process::exit(1);
            }
            other => {
                eprintln!("error: {other}");
                std::process::exit(1);
            }
        }
    }
}
