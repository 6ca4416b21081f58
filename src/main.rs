use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info};

mod cli;
mod command;
mod config;
mod context;
mod error;
mod files;
mod github;
mod llm;
mod logging;
mod report;

use cli::Cli;
use context::TriggerContext;
use error::Halt;
use github::GithubClient;
use llm::{LlmTranslator, Translator};
use report::{ActionsFailure, ErrorReporter, FailureSignal};

/// Translation written.
const OK: u8 = 0;
/// Command rejected, or the run failed on the way.
const FAILED: u8 = 1;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let failure = ActionsFailure::stdout();
    ExitCode::from(status(run(&cli, &failure), &failure))
}

fn run(cli: &Cli, failure: &dyn FailureSignal) -> Result<()> {
    let config = config::load(cli.config.as_deref())?;
    let ctx = TriggerContext::load(&cli.event)?;
    info!(
        issue = ?ctx.issue_number,
        pull_request = ctx.is_pr(),
        "handling comment"
    );

    let poster = GithubClient::new(&config.github, ctx.issue_number)?;
    let reporter = ErrorReporter::new(&poster, failure);

    handle(&ctx, &reporter, || LlmTranslator::new(&config))
}

/// Run one command: validate it, translate the input, write the output.
fn handle<T, F>(ctx: &TriggerContext, reporter: &ErrorReporter<'_>, translator: F) -> Result<()>
where
    T: Translator,
    F: FnOnce() -> Result<T>,
{
    let command = command::extract(ctx, reporter)?;

    let input = Path::new(&command.input_file_path);
    if !files::is_file_exists(input)? {
        return Err(reporter
            .post_error(&format!(
                "Error: File {} does not exist.",
                command.input_file_path
            ))
            .into());
    }

    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    info!(
        input = %command.input_file_path,
        lang = %command.target_lang,
        "translating"
    );
    let translated = translator()?.translate(&content, &command.target_lang)?;

    let output = Path::new(&command.output_file_path);
    files::create_file(&translated, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(output = %command.output_file_path, "translation written");
    Ok(())
}

// A halted run has already been reported; anything else still needs to be.
fn status(result: Result<()>, failure: &dyn FailureSignal) -> u8 {
    let Err(err) = result else {
        return OK;
    };
    match err.downcast::<Halt>() {
        Ok(halt) => {
            info!(reason = halt.message(), "run halted");
            FAILED
        }
        Err(err) => {
            error!("{err:#}");
            failure.set_failed(&format!("{err:#}"));
            FAILED
        }
    }
}
