use clap::{Parser, Subcommand};
use daybook::config::{self, SiteConfig, StyleVariant};
use daybook::dataset::SiteData;
use daybook::datastore::{self, RestClient};
use daybook::defaults::Defaults;
use daybook::imaging::ResvgRasterizer;
use daybook::{calendar, generate, output};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("DAYBOOK_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("DAYBOOK_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "Static site generator for a daily recovery readings website")]
#[command(long_about = "\
Static site generator for a daily recovery readings website

Fetches the year of readings (plus steps, themes, ratings and member shares)
from the data store and writes the complete site: one page per day, theme,
step and month pages, literature, social preview cards, sitemap and assets.

Environment (a .env file in the working directory is loaded first):

  DAYBOOK_DATASTORE_URL     data store base URL (required)
  DAYBOOK_DATASTORE_KEY     anonymous API key (required)
  RUST_LOG                  log filter, e.g. daybook=debug

Output layout:

  dist/
  ├── index.html                   # Today's reading
  ├── january-1/                   # One directory per day, 366 total
  │   ├── index.html
  │   └── og.png                   # 1200×630 social card
  ├── themes/  steps/  months/  literature/
  ├── about/  privacy/  contact/  admin/
  ├── css/style.css                # From static/css/style-<variant>.css
  ├── sitemap.xml  robots.txt  404.html  CNAME

Note: --version selects the stylesheet variant, not the program version.

Run 'daybook gen-config' to generate a documented daybook.toml.")]
#[command(disable_version_flag = true)]
#[command(before_help = version_string())]
struct Cli {
    /// Stylesheet variant copied to css/style.css
    #[arg(long = "version", value_enum, global = true)]
    style: Option<StyleVariant>,

    /// Prefix for every internal link, e.g. /preview
    #[arg(long, global = true)]
    base_path: Option<String>,

    /// Output directory (overrides [build] output)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Config file
    #[arg(long, default_value = "daybook.toml", global = true)]
    config: PathBuf,

    /// Log progress at info level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Fetch data and generate the full site (default)
    Build,
    /// Fetch and assemble data, print a summary, write nothing
    Check,
    /// Print a stock daybook.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let command = cli.command.unwrap_or(Command::Build);
    if let Command::GenConfig = command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    // A missing .env is fine; the variables may come from the environment.
    let _ = dotenvy::dotenv();

    let config = resolve_config(cli)?;
    init_thread_pool(&config.processing);
    let version = version_string();
    let client = RestClient::from_env(&config.datastore)?;

    match command {
        Command::Build => {
            println!("==> Building {} → {}", config.site.name, config.build.output);
            let rasterizer = ResvgRasterizer::new(Path::new(&config.og.fonts_dir), &config.og);
            let today = calendar::today_day_of_year(chrono::Local::now().date_naive());
            let summary = generate::build(&client, &config, &rasterizer, today, version)?;
            output::print_generate_output(&summary);
        }
        Command::Check => {
            println!("==> Checking {}", config.site.name);
            let fetched = datastore::fetch_all(&client)?;
            output::print_fetch_output(&fetched);
            println!();
            let data = SiteData::assemble(fetched, Defaults::stock());
            output::print_dataset_output(&data);
            println!("==> Data is valid");
        }
        Command::GenConfig => {}
    }

    Ok(())
}

/// Load the config file and apply command-line overrides on top.
fn resolve_config(cli: &Cli) -> Result<SiteConfig, config::ConfigError> {
    let mut config = config::load_config(&cli.config)?;
    if let Some(style) = cli.style {
        config.build.style = style;
    }
    if let Some(base) = &cli.base_path {
        config.build.base_path = config::normalize_base_path(base);
    }
    if let Some(out) = &cli.output {
        config.build.output = out.to_string_lossy().into_owned();
    }
    config.validate()?;
    Ok(config)
}

/// `--verbose` forces info level, otherwise RUST_LOG or warn.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
