use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::context::TriggerContext;
use crate::error::{ALLOWED_EXTENSIONS, CommandError, Halt};
use crate::report::ErrorReporter;

static COMMAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(?:gpt-translate|gt)\s+(\S+)\s+(\S+)\s+(\S+)")
        .expect("command pattern compiles")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub input_file_path: String,
    pub output_file_path: String,
    pub target_lang: String,
}

/// Parse the first `/gpt-translate` (or `/gt`) invocation in `comment`.
pub fn parse(comment: &str) -> Result<Command, CommandError> {
    let invalid = || CommandError::Invalid {
        comment: comment.to_string(),
    };
    let caps = COMMAND_RE.captures(comment).ok_or_else(invalid)?;
    let (Some(input), Some(output), Some(lang)) = (caps.get(1), caps.get(2), caps.get(3)) else {
        return Err(invalid());
    };

    let input_ext = extension(input.as_str());
    let output_ext = extension(output.as_str());
    if !ALLOWED_EXTENSIONS.contains(&input_ext) || !ALLOWED_EXTENSIONS.contains(&output_ext) {
        return Err(CommandError::Extension {
            input: input_ext.to_string(),
            output: output_ext.to_string(),
        });
    }

    Ok(Command {
        input_file_path: input.as_str().to_string(),
        output_file_path: output.as_str().to_string(),
        target_lang: lang.as_str().to_string(),
    })
}

/// Read the command from the triggering comment, reporting any problem.
pub fn extract(ctx: &TriggerContext, reporter: &ErrorReporter<'_>) -> Result<Command, Halt> {
    let comment = ctx.comment_body.as_deref().unwrap_or_default();
    let parsed = if comment.is_empty() {
        Err(CommandError::MissingComment)
    } else {
        parse(comment)
    };

    match parsed {
        Ok(command) => {
            debug!(?command, "parsed command");
            Ok(command)
        }
        Err(e) if e.is_user_facing() => Err(reporter.post_error(&e.to_string())),
        Err(e) => Err(reporter.fail(&e.to_string())),
    }
}

// Last `.`-separated segment; a name without a dot is its own extension.
fn extension(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}
