use thiserror::Error;

pub const ALLOWED_EXTENSIONS: [&str; 2] = ["md", "mdx"];

pub const COMMAND_USAGE: &str = "usage:
```
/gpt-translate [input file path] [output file path] [target language]
```
";

/// The run has been reported as failed and must stop.
///
/// Returned by the reporter once the failure is visible to the user. The
/// top-level handler maps it to exit status 1 without reporting again.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{message}")]
#[must_use]
pub struct Halt {
    message: String,
}

impl Halt {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Reasons a comment body does not yield a command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Error: Comment could not be retrieved correctly.")]
    MissingComment,

    #[error("Invalid command: `{comment}`\n{COMMAND_USAGE}")]
    Invalid { comment: String },

    #[error(
        "Error: Both files must have one of the following extensions: {}.\nFound extensions: File1 - .{input}, File2 - .{output}",
        ALLOWED_EXTENSIONS.join(", ")
    )]
    Extension { input: String, output: String },
}

impl CommandError {
    /// Whether the error should be posted back to the comment thread.
    ///
    /// A missing comment leaves nothing to reply to.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, CommandError::MissingComment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_message_includes_command_and_usage() {
        let err = CommandError::Invalid {
            comment: "/foo bar".to_string(),
        };
        let message = err.to_string();
        assert!(message.starts_with("Invalid command: `/foo bar`\n"));
        assert!(message.ends_with(COMMAND_USAGE));
    }

    #[test]
    fn test_extension_message_names_both_extensions() {
        let err = CommandError::Extension {
            input: "md".to_string(),
            output: "txt".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Error: Both files must have one of the following extensions: md, mdx.\nFound extensions: File1 - .md, File2 - .txt"
        );
    }

    #[test]
    fn test_missing_comment_is_not_user_facing() {
        assert!(!CommandError::MissingComment.is_user_facing());
        assert!(
            CommandError::Invalid {
                comment: String::new()
            }
            .is_user_facing()
        );
    }
}
