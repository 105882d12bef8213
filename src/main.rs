use clap::Parser;
use env_guard::check::{CheckOptions, CheckOutcome, EnvCheck};
use env_guard::config::Settings;
use env_guard::wizard;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
  name = "env-guard",
  about = "Detect and fix missing variables in your env file against a template",
  version,
  author
)]
struct Cli {
  /// Path to the env file to check
  #[arg(short, long)]
  env: Option<PathBuf>,

  /// Path to the template file
  #[arg(short, long)]
  template: Option<PathBuf>,

  /// Regex pattern for keys to ignore (repeatable)
  #[arg(short, long)]
  ignore: Vec<String>,

  /// Prompt for each missing variable and append the answers to the env file
  #[arg(short, long)]
  fix: bool,

  /// Verbose output (-v for verbose, -vv for very verbose)
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

fn setup_tracing(verbose: u8) {
  use tracing_subscriber::fmt;
  use tracing_subscriber::prelude::*;

  let log_level = match verbose {
    1 => "debug",
    2 => "trace",
    _ => "info",
  };

  tracing_subscriber::registry()
    .with(fmt::layer())
    .with(tracing_subscriber::EnvFilter::new(
      std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.into()),
    ))
    .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  let cli = Cli::parse();

  setup_tracing(cli.verbose);

  let settings = Settings::load_from(std::env::current_dir()?)?;

  let template_file = cli
    .template
    .unwrap_or_else(|| PathBuf::from(&settings.template_file));
  let env_file = cli.env.unwrap_or_else(|| PathBuf::from(&settings.env_file));

  let mut ignore_patterns = settings.ignore_patterns;
  ignore_patterns.extend(cli.ignore);

  let outcome = EnvCheck::check_with_options(CheckOptions {
    env_file: Some(env_file),
    template_file,
    ignore_patterns: ignore_patterns.clone(),
  })?;

  let report = match outcome {
    CheckOutcome::TemplateMissing(path) => {
      println!("Template file not found, skipping check: {}", path.display());
      return Ok(());
    }
    CheckOutcome::Report(report) => report,
  };

  if report.missing.is_empty() {
    println!(
      "OK: every template variable is present in {}",
      report.env_path.display()
    );
    return Ok(());
  }

  println!(
    "{} missing variable(s) in {}:",
    report.missing.len(),
    report.env_path.display()
  );
  for entry in &report.missing {
    match &entry.comment {
      Some(comment) => println!("  {} (template line {}) - {}", entry.key, entry.line, comment),
      None => println!("  {} (template line {})", entry.key, entry.line),
    }
  }

  if !cli.fix {
    std::process::exit(1);
  }

  let stdin = std::io::stdin();
  let resolutions = wizard::run(&mut stdin.lock(), &mut std::io::stdout(), &report.missing)?;
  EnvCheck::append_resolutions(&report.env_path, &resolutions)?;

  // Re-check after appending; skipped keys stay commented out and still count
  // as missing.
  let outcome = EnvCheck::check_with_options(CheckOptions {
    env_file: Some(report.env_path),
    template_file: report.template_path,
    ignore_patterns,
  })?;

  if let CheckOutcome::Report(after) = outcome
    && !after.missing.is_empty()
  {
    println!("{} variable(s) still missing.", after.missing.len());
    std::process::exit(1);
  }

  println!("All missing variables resolved.");

  Ok(())
}
