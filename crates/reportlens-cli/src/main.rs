use reportlens::render::raster::{RasterError, RasterOptions};
use reportlens::render::{
    AnalysisView, ComparisonView, HeadlessError, HeadlessRenderer, LayoutView, UsageChart,
    diff_layouts,
};
use reportlens::upload::{UploadStatus, ingest_upload};
use reportlens::{
    ConfigError, FileStore, LensConfig, MetadataStore, Preferences, StoreError, describe_page,
    summarize_report, try_resolve_alternate_page,
};
use serde::Serialize;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

const STORE_DIR_ENV: &str = "REPORTLENS_STORE_DIR";
const DEFAULT_STORE_DIR: &str = ".reportlens";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Store(StoreError),
    Config(ConfigError),
    Headless(HeadlessError),
    Raster(RasterError),
    Json(serde_json::Error),
    NoData,
    AlternateUnavailable(String),
    UploadFailed(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Store(err) => write!(f, "{err}"),
            CliError::Config(err) => write!(f, "{err}"),
            CliError::Headless(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::NoData => write!(f, "{}", reportlens::render::NO_DATA_TEXT),
            CliError::AlternateUnavailable(reason) => {
                write!(f, "alternate layout unavailable: {reason}")
            }
            CliError::UploadFailed(detail) => write!(f, "upload failed: {detail}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Headless(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ingest,
    Inspect,
    Usage,
    Chart,
    Compare,
    Diff,
    Theme,
    Clear,
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ingest" => Ok(Self::Ingest),
            "inspect" => Ok(Self::Inspect),
            "usage" => Ok(Self::Usage),
            "chart" => Ok(Self::Chart),
            "compare" => Ok(Self::Compare),
            "diff" => Ok(Self::Diff),
            "theme" => Ok(Self::Theme),
            "clear" => Ok(Self::Clear),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Svg,
    Json,
    Png,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "json" => Ok(Self::Json),
            "png" => Ok(Self::Png),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Option<Command>,
    positional: Vec<String>,
    store: Option<PathBuf>,
    config: Option<PathBuf>,
    pretty: bool,
    page: Option<usize>,
    top: Option<usize>,
    scale: Option<f64>,
    format: Option<OutputFormat>,
    status: Option<u16>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "reportlens-cli\n\
\n\
USAGE:\n\
  reportlens-cli [--store <dir>] [--config <path>] <command> [options]\n\
\n\
COMMANDS:\n\
  ingest [--status <http-status>] [<path>|-]\n\
  inspect [--page <n>] [--pretty]\n\
  usage [--top <n>] [--pretty]\n\
  chart most|least [--format svg|png] [--out <path>]\n\
  compare <page-index> [--scale <s>] [--format svg|json|png] [--out <path>] [--pretty]\n\
  diff <page-index> [--pretty]\n\
  theme [dark|light|toggle]\n\
  clear\n\
\n\
NOTES:\n\
  - The store directory defaults to $REPORTLENS_STORE_DIR, then ./.reportlens.\n\
  - ingest reads an upload response envelope (or bare report metadata) from <path> or stdin.\n\
    A non-2xx --status marks the upload as failed; stored metadata is never overwritten then.\n\
  - compare renders a no-data placeholder for SVG/PNG when the page does not exist.\n\
  - SVG is printed to stdout unless --out is given; PNG defaults to ./out.png.\n\
  - Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--pretty" => args.pretty = true,
            "--store" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.store = Some(PathBuf::from(dir));
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(PathBuf::from(path));
            }
            "--page" => {
                let Some(page) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.page =
                    Some(reportlens::parse_page_index(page).ok_or(CliError::Usage(usage()))?);
            }
            "--top" => {
                let Some(top) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.top = Some(top.parse::<usize>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let scale = scale.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !scale.is_finite() {
                    return Err(CliError::Usage(usage()));
                }
                args.scale = Some(scale);
            }
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = Some(
                    fmt.parse::<OutputFormat>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--status" => {
                let Some(status) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.status = Some(status.parse::<u16>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "-" => args.positional.push("-".to_string()),
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            word => match args.command {
                None => {
                    args.command =
                        Some(word.parse::<Command>().map_err(|_| CliError::Usage(usage()))?);
                }
                Some(_) => args.positional.push(word.to_string()),
            },
        }
    }

    if args.command.is_none() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn store_dir(args: &Args) -> PathBuf {
    args.store
        .clone()
        .or_else(|| {
            std::env::var_os(STORE_DIR_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR))
}

fn load_config(path: Option<&PathBuf>) -> Result<LensConfig, CliError> {
    match path {
        None => Ok(LensConfig::defaults()),
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(LensConfig::from_json_str(&text)?)
        }
    }
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn write_png(bytes: &[u8], out: Option<&str>) -> Result<(), CliError> {
    match out.unwrap_or("out.png") {
        "-" => std::io::stdout().lock().write_all(bytes)?,
        path => std::fs::write(path, bytes)?,
    }
    Ok(())
}

/// At most one positional argument after the command word.
fn single_positional(args: &Args) -> Result<Option<&str>, CliError> {
    match args.positional.as_slice() {
        [] => Ok(None),
        [one] => Ok(Some(one.as_str())),
        _ => Err(CliError::Usage(usage())),
    }
}

fn required_positional(args: &Args) -> Result<&str, CliError> {
    single_positional(args)?.ok_or(CliError::Usage(usage()))
}

fn run(args: Args) -> Result<(), CliError> {
    let Some(command) = args.command else {
        return Err(CliError::Usage(usage()));
    };
    let config = load_config(args.config.as_ref())?;
    let dir = store_dir(&args);
    let mut store = MetadataStore::new(FileStore::open(&dir)?);
    tracing::debug!(store = %dir.display(), ?command, "running command");

    match command {
        Command::Ingest => {
            let body = read_input(single_positional(&args)?)?;
            let status = args.status.unwrap_or(200);
            let transport_ok = (200..300).contains(&status);
            let outcome = ingest_upload(&mut store, transport_ok, &body);
            write_json(&outcome, args.pretty)?;
            match outcome.status {
                UploadStatus::Success => {
                    tracing::info!(store = %dir.display(), "report metadata stored");
                    Ok(())
                }
                UploadStatus::Error => Err(CliError::UploadFailed(
                    outcome.detail.unwrap_or(outcome.message),
                )),
            }
        }
        Command::Inspect => {
            single_positional(&args)?;
            let metadata = store.load().ok_or(CliError::NoData)?;
            match args.page {
                None => write_json(&summarize_report(&metadata), args.pretty),
                Some(index) => {
                    let detail = describe_page(&metadata, index).ok_or(CliError::NoData)?;
                    write_json(&detail, args.pretty)
                }
            }
        }
        Command::Usage => {
            single_positional(&args)?;
            let top_n = args.top.unwrap_or_else(|| config.top_n());
            let view = AnalysisView::load(&store, top_n);
            if !view.has_data() {
                return Err(CliError::NoData);
            }
            write_json(view.usage(), args.pretty)
        }
        Command::Chart => {
            let chart = match required_positional(&args)? {
                "most" => UsageChart::MostUsed,
                "least" => UsageChart::LeastUsed,
                _ => return Err(CliError::Usage(usage())),
            };
            let view = AnalysisView::load(&store, args.top.unwrap_or_else(|| config.top_n()));
            if !view.has_data() {
                return Err(CliError::NoData);
            }
            let renderer = HeadlessRenderer::from_config(&config)?
                .with_preferences(view.preferences());
            match args.format.unwrap_or(OutputFormat::Svg) {
                OutputFormat::Svg => {
                    let svg = renderer.render_usage_chart_svg(chart, view.usage());
                    write_text(&svg, args.out.as_deref())
                }
                OutputFormat::Png => {
                    let bytes = renderer.render_usage_chart_png_sync(
                        chart,
                        view.usage(),
                        &RasterOptions::default(),
                    )?;
                    write_png(&bytes, args.out.as_deref())
                }
                OutputFormat::Json => Err(CliError::Usage(usage())),
            }
        }
        Command::Compare => {
            let page_param = required_positional(&args)?;
            let renderer = HeadlessRenderer::from_config(&config)?;
            let mut view = LayoutView::load(&store, page_param, renderer.layout.scale_range);
            if let Some(requested) = args.scale {
                let applied = view.set_scale(requested);
                if applied != requested {
                    tracing::info!(requested, applied, "scale clamped into range");
                }
            }
            let renderer = renderer.with_preferences(view.preferences());
            match args.format.unwrap_or(OutputFormat::Svg) {
                OutputFormat::Svg => {
                    write_text(&renderer.render_layout_view_svg(&view), args.out.as_deref())
                }
                OutputFormat::Json => match view.comparison() {
                    ComparisonView::Ready(layout) => write_json(&layout, args.pretty),
                    ComparisonView::NoData => Err(CliError::NoData),
                },
                OutputFormat::Png => {
                    let bytes = renderer
                        .render_comparison_png_sync(&view.comparison(), &RasterOptions::default())?;
                    write_png(&bytes, args.out.as_deref())
                }
            }
        }
        Command::Diff => {
            let index = reportlens::parse_page_index(required_positional(&args)?)
                .ok_or(CliError::NoData)?;
            let metadata = store.load().ok_or(CliError::NoData)?;
            let original = metadata.page(index).ok_or(CliError::NoData)?;
            let alternate = match try_resolve_alternate_page(&metadata, index) {
                Ok(Some(page)) => page,
                Ok(None) => {
                    return Err(CliError::AlternateUnavailable(format!(
                        "no alternate page at index {index}"
                    )));
                }
                Err(err) => return Err(CliError::AlternateUnavailable(err.to_string())),
            };
            write_json(&diff_layouts(original, &alternate), args.pretty)
        }
        Command::Theme => {
            let current = store.load_preferences();
            let next = match single_positional(&args)? {
                None => current,
                Some("dark") => Preferences { dark_mode: true },
                Some("light") => Preferences { dark_mode: false },
                Some("toggle") => current.toggled(),
                Some(_) => return Err(CliError::Usage(usage())),
            };
            if next != current {
                store.save_preferences(next)?;
            }
            println!("{}", next.theme_literal());
            Ok(())
        }
        Command::Clear => {
            single_positional(&args)?;
            store.clear()?;
            tracing::info!(store = %dir.display(), "stored report metadata cleared");
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(CliError::NoData) => {
            eprintln!("{}", CliError::NoData);
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
