use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use common::logger::init_logging;
use forge::GitLabClient;
use results::{ConsoleProgress, Progress, ResultsFetcher, RunSummary, SilentProgress};
use util::config::AppConfig;
use util::course_config::CourseConfig;
use util::paths::ensure_dir;

#[derive(Parser, Debug)]
#[command(version, about = "Fetch grading results of an assignment into a score script")]
struct Args {
    /// Course name; the course file is `<config dir>/<course>.json`
    course: String,
    /// Assignment name as listed in the course file
    assignment: String,
    /// Restrict the run to these students or groups
    only: Vec<String>,
    /// Directory holding course files. Overrides COURSE_CONFIG_DIR
    #[arg(long)]
    config_dir: Option<PathBuf>,
    /// Directory the results script is written to. Overrides RESULTS_OUTPUT_DIR
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Print the run summary as JSON on stdout
    #[arg(long)]
    json: bool,
    /// Suppress per-repository progress lines
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    exit_code(run(args).await)
}

/// Map the outcome of a run to the process status, printing the error chain on failure.
fn exit_code(result: Result<()>) -> ExitCode {
    ExitCode::from(exit_status(result))
}

fn exit_status(result: Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            1
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = AppConfig::from_env().context("loading configuration")?;
    let _log_guard = init_logging(&config.log_level, &config.log_file, config.log_to_stdout)
        .context("initialising logging")?;
    run_with(args, config).await
}

async fn run_with(args: Args, config: AppConfig) -> Result<()> {
    let config_dir = args.config_dir.unwrap_or(config.course_config_dir);
    let course = CourseConfig::load(&config_dir, &args.course)?;
    let assignment = course.assignment(&args.assignment, &config.gitlab_url, &args.only)?;

    let output_dir = args.output_dir.unwrap_or(config.output_dir);
    let output_dir = ensure_dir(&output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    tracing::info!(
        course = %assignment.course,
        assignment = %assignment.name,
        path = %assignment.path,
        "fetching results"
    );

    let client = GitLabClient::new(&config.gitlab_url, &config.gitlab_token, config.forge_timeout)?;
    let fetcher = ResultsFetcher::new(&client, output_dir);

    let mut progress: Box<dyn Progress> = if args.quiet || args.json {
        Box::new(SilentProgress)
    } else {
        Box::new(ConsoleProgress::stdout())
    };
    let summary = fetcher.run(&assignment, progress.as_mut()).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!(
        "{} {} completed, {} skipped, {} record(s)",
        "done:".green().bold(),
        summary.completed,
        summary.skipped,
        summary.records
    );
    println!("{} {}", "results written to".cyan(), summary.output.display());
}
