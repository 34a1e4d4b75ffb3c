use std::path::PathBuf;

use arxiv_weekly::{
  clients::reddit::PublishTarget, config::Config, window::ReportWindow, RunOptions,
};
use chrono::{Local, NaiveDate};
use clap::{builder::ArgAction, Parser};
use console::{style, Emoji};
use errors::CliError;
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod errors;

static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
static CALENDAR: Emoji<'_, '_> = Emoji("📅 ", "");
static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "");
static SUCCESS: Emoji<'_, '_> = Emoji("✨ ", "");

#[derive(Parser)]
#[command(
  author,
  version,
  about = "Collect last week's arXiv submissions into a markdown digest and post it to Reddit"
)]
struct Cli {
  /// Verbose mode (-v, -vv, -vvv)
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// First day of the report window (YYYY-MM-DD), defaults to last Monday
  #[arg(long)]
  start_date: Option<NaiveDate>,

  /// Day after the report window (YYYY-MM-DD), defaults to last Sunday
  #[arg(long)]
  end_date: Option<NaiveDate>,

  /// TOML file overriding categories, category names, paging and endpoints
  #[arg(long, short)]
  config: Option<PathBuf>,

  /// Directory the markdown report is written to
  #[arg(long, short, default_value = ".")]
  output_dir: PathBuf,

  /// Reddit application name, sent as the user agent
  #[arg(long, env = "REDDIT_APP_NAME")]
  app_name: Option<String>,

  /// Reddit application client id
  #[arg(long, env = "REDDIT_CLIENT_ID")]
  client_id: Option<String>,

  /// Reddit application client secret
  #[arg(long, env = "REDDIT_CLIENT_SECRET", hide_env_values = true)]
  client_secret: Option<String>,

  /// Reddit account username
  #[arg(long, env = "REDDIT_USERNAME")]
  username: Option<String>,

  /// Reddit account password
  #[arg(long, env = "REDDIT_PASSWORD", hide_env_values = true)]
  password: Option<String>,

  /// Subreddit to post the digest to, without the `r/` prefix
  #[arg(long, env = "REDDIT_SUBREDDIT")]
  subreddit: Option<String>,
}

/// Setup logging with the specified verbosity level
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_file(true)
    .with_line_number(true)
    .with_target(true)
    .init();
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let config = match &cli.config {
    Some(path) => {
      trace!("Using configuration at: {}", path.display());
      Config::from_path(path)?
    },
    None => Config::default(),
  };
  debug!("Configuration: {:?}", config);

  let window = ReportWindow::resolve(cli.start_date, cli.end_date, Local::now().date_naive())?;
  println!("{} Report window: {}", style(CALENDAR).cyan(), style(window).yellow());

  let publish = PublishTarget::from_parts(
    cli.app_name,
    cli.client_id,
    cli.client_secret,
    cli.username,
    cli.password,
    cli.subreddit,
  );
  if publish.is_none() {
    println!(
      "{} Reddit credentials or subreddit missing, the digest will only be written to disk",
      style(WARNING).yellow()
    );
  }

  std::fs::create_dir_all(&cli.output_dir)?;

  println!(
    "{} Fetching arXiv submissions in: {}",
    style(LOOKING_GLASS).cyan(),
    style(config.categories.iter().collect::<Vec<_>>().join(", ")).yellow()
  );

  let subreddit = publish.as_ref().map(|target| target.subreddit.clone());
  let options = RunOptions { window, output_dir: cli.output_dir, publish };
  let outcome = arxiv_weekly::run(&config, &options).await?;

  println!(
    "{} Saved {} papers to: {}",
    style(SAVE).green(),
    style(outcome.papers_rendered).yellow(),
    style(outcome.path.display()).yellow()
  );

  if let Some(subreddit) = subreddit.filter(|_| outcome.published) {
    println!("{} Posted digest to r/{}", style(ROCKET).green(), style(subreddit).cyan());
  }

  println!("{} Done!", style(SUCCESS).green());
  Ok(())
}
