//! Resume matcher: compare a resume with a job description

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction, MatchArgs, OutputArgs};
use resume_matcher::example::{example_request, EXAMPLE_JOB_DESCRIPTION, EXAMPLE_RESUME};
use resume_matcher::input::InputManager;
use resume_matcher::output::formatter;
use resume_matcher::{Config, DefaultOrchestrator, MatchOutcome, MatchRequest, RequestId};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;

/// Exit status when the request is rejected by validation
const EXIT_REJECTED: i32 = 2;

/// Line that ends a multi-line field at the prompt
const FIELD_TERMINATOR: &str = ".";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    match run_command(cli.command, config, &config_path).await {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("Command failed: {:#}", e);
            process::exit(1);
        }
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<i32> {
    match command {
        Commands::Match(args) => run_match(args, config).await,

        Commands::Example { show, output } => {
            if show {
                println!("Job description:\n{}\n", EXAMPLE_JOB_DESCRIPTION);
                println!("Job URL:\n(empty)\n");
                println!("Resume:\n{}", EXAMPLE_RESUME);
                return Ok(0);
            }
            execute(example_request(), &output, config).await
        }

        Commands::Interactive { output } => {
            let request = read_form().context("Failed to read input")?;
            execute(request, &output, config).await
        }

        Commands::Config { action } => {
            match action {
                Some(ConfigAction::Show) | None => {
                    let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
                    println!("# {}\n{}", config_path.display(), rendered);
                }
                Some(ConfigAction::Reset) => {
                    Config::default()
                        .save_to(config_path)
                        .context("Failed to reset configuration")?;
                    println!("Configuration reset: {}", config_path.display());
                }
                Some(ConfigAction::Path) => println!("{}", config_path.display()),
            }
            Ok(0)
        }
    }
}

async fn run_match(args: MatchArgs, config: Config) -> Result<i32> {
    let input = InputManager::new();

    let job_description = read_field(&input, args.job, args.job_file.as_deref(), "job description").await?;
    let resume = read_field(&input, args.resume, args.resume_file.as_deref(), "resume").await?;

    let mut request = MatchRequest::new(job_description, args.url.unwrap_or_default(), resume);
    if let Some(id) = args.id {
        request = request.with_id(RequestId::parse(&id)?);
    }

    execute(request, &args.output, config).await
}

/// Inline text wins; otherwise read the file; otherwise the field is empty
async fn read_field(input: &InputManager, text: Option<String>, file: Option<&Path>, what: &str) -> Result<String> {
    match (text, file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => input
            .extract_text(path)
            .await
            .with_context(|| format!("Failed to read {} from {}", what, path.display())),
        (None, None) => Ok(String::new()),
    }
}

async fn execute(request: MatchRequest, output: &OutputArgs, mut config: Config) -> Result<i32> {
    apply_output_args(&mut config, output)?;

    // The credential is read once here and handed to the generator
    let api_key = config.api_key_from_env();
    if api_key.is_none() {
        warn!(
            "{} is not set; the narrative assessment will be replaced by an error message",
            config.llm.api_key_env
        );
    }

    let orchestrator = DefaultOrchestrator::from_config(&config, api_key).context("Failed to initialise")?;
    let outcome = orchestrator.process(request).await.context("Analysis failed")?;

    let rendered = formatter::render(&outcome, config.output.format, config.output.color_output)?;
    print!("{}", rendered);

    Ok(match outcome {
        MatchOutcome::Rejected(_) => EXIT_REJECTED,
        MatchOutcome::Completed(report) => {
            info!("Report saved to {}", report.document.display());
            0
        }
    })
}

fn apply_output_args(config: &mut Config, output: &OutputArgs) -> Result<()> {
    if let Some(dir) = &output.output_dir {
        config.export.output_dir = dir.clone();
    }
    if let Some(format) = &output.output {
        config.output.format = cli::parse_output_format(format).map_err(anyhow::Error::msg)?;
    }
    if output.no_color {
        config.output.color_output = false;
    }
    Ok(())
}

/// Prompt for the three form fields. Multi-line fields end at a line
/// holding only `.` or at end of input; blank lines are kept.
fn read_form() -> Result<MatchRequest> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    read_form_from(&mut lines)
}

fn read_form_from<I>(lines: &mut I) -> Result<MatchRequest>
where
    I: Iterator<Item = io::Result<String>>,
{
    let job_description = prompt_multiline(
        lines,
        "Job description (leave empty to use a URL; finish with a line containing only '.'):",
    )?;
    let job_url = prompt_line(lines, "Job posting URL:")?;
    let resume = prompt_multiline(lines, "Resume (finish with a line containing only '.' or end of input):")?;

    Ok(MatchRequest::new(job_description, job_url, resume))
}

fn prompt_line<I>(lines: &mut I, label: &str) -> Result<String>
where
    I: Iterator<Item = io::Result<String>>,
{
    println!("{}", label);
    io::stdout().flush()?;
    Ok(lines.next().transpose()?.unwrap_or_default().trim().to_string())
}

fn prompt_multiline<I>(lines: &mut I, label: &str) -> Result<String>
where
    I: Iterator<Item = io::Result<String>>,
{
    println!("{}", label);
    io::stdout().flush()?;

    let mut collected = Vec::new();
    for line in lines.by_ref() {
        let line = line?;
        if line.trim() == FIELD_TERMINATOR {
            break;
        }
        collected.push(line);
    }
    Ok(collected.join("\n").trim().to_string())
}
