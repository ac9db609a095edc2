// ABOUTME: CLI binary for url2md: converts one article URL to a JSON {title, description, content} object.
// ABOUTME: Errors are reported as {"error": ...} on stderr with exit status 1.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url2md::{normalize_url, Client, ParseError, GENERIC, PLATFORMS};

#[derive(Parser, Debug)]
#[command(name = "url2md")]
#[command(about = "Convert an article page to Markdown and print it as JSON")]
#[command(version)]
struct Args {
    /// Read HTML from this file instead of fetching (URL still picks the platform)
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long = "compact")]
    compact: bool,

    /// Direct fetch timeout in seconds
    #[arg(long = "timeout", default_value_t = 15)]
    timeout: u64,

    /// Archive snapshot fetch timeout in seconds
    #[arg(long = "archive-timeout", default_value_t = 20)]
    archive_timeout: u64,

    /// Archive endpoint prefix; the page URL is appended to it
    #[arg(long = "archive-base")]
    archive_base: Option<String>,

    /// Do not retry through the web archive
    #[arg(long = "no-archive")]
    no_archive: bool,

    /// Extra request header, "Name: Value" (repeatable)
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    /// Print the built-in platform selector table as JSON and exit
    #[arg(long = "list-platforms")]
    list_platforms: bool,

    /// Log to stderr (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Article URL; https:// is assumed when no scheme is given
    #[arg()]
    url: Option<String>,
}

fn init_logging(verbose: u8) {
    let env_filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false))
        .try_init();
}

fn parse_header(raw: &str) -> Result<(String, String), ParseError> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(ParseError::usage("ParseHeader")),
    }
}

fn build_client(args: &Args) -> Result<Client, ParseError> {
    let mut builder = Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .archive_timeout(Duration::from_secs(args.archive_timeout))
        .archive_fallback(!args.no_archive);
    if let Some(base) = &args.archive_base {
        builder = builder.archive_base(base.as_str());
    }
    for raw in &args.headers {
        let (name, value) = parse_header(raw)?;
        builder = builder.header(name, value);
    }
    builder.build()
}

fn platform_listing(pretty: bool) -> Result<String, ParseError> {
    let listing = json!({ "platforms": PLATFORMS, "generic": &GENERIC });
    let rendered = if pretty {
        serde_json::to_string_pretty(&listing)
    } else {
        serde_json::to_string(&listing)
    };
    rendered.map_err(|e| ParseError::unexpected("", "ListPlatforms", e))
}

fn run(args: &Args) -> Result<String, ParseError> {
    if args.list_platforms {
        return platform_listing(!args.compact);
    }

    let raw_url = match args.url.as_deref() {
        Some(url) if !url.trim().is_empty() => url,
        _ => return Err(ParseError::usage("Parse")),
    };
    let url = normalize_url(raw_url);
    let client = build_client(args)?;

    let article = match &args.html {
        Some(path) => {
            debug!(path = %path.display(), "reading html from file");
            let html = fs::read_to_string(path)
                .map_err(|e| ParseError::unexpected(&url, "ReadHtml", e))?;
            client.parse_html(&html, &url)?
        }
        None => client.parse(&url)?,
    };

    article.to_json(!args.compact)
}

fn error_envelope(err: &ParseError) -> String {
    let message = json!(err.to_string());
    format!("{{\"error\": {}}}", message)
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                eprintln!("{}", error_envelope(&ParseError::usage("ParseArgs")));
                return ExitCode::from(1);
            }
        },
    };

    init_logging(args.verbose);

    let output = match run(&args) {
        Ok(output) => output,
        Err(err) => {
            debug!(op = %err.op, code = %err.code, source = ?err.source, "conversion failed");
            eprintln!("{}", error_envelope(&err));
            return ExitCode::from(1);
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, format!("{}\n", output)) {
                let err = ParseError::unexpected("", "WriteOutput", e);
                eprintln!("{}", error_envelope(&err));
                return ExitCode::from(1);
            }
        }
        None => println!("{}", output),
    }

    ExitCode::SUCCESS
}
