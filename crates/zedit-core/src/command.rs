//! Ex-style command parsing.
//!
//! The command line accumulates raw text while in command mode; on Enter the
//! session hands it here. Parsing normalizes the prefix first: leading
//! whitespace is dropped, a run of leading colons collapses to one, and
//! whitespace after the colon is skipped. A command that is empty after
//! normalization parses to `None`.

/// A parsed command, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExCommand {
    /// `:q` / `:quit` — quit, refused while unsaved changes exist.
    Quit,
    /// `:q!` / `:quit!` — quit, discarding unsaved changes.
    ForceQuit,
    /// `:w` — write the buffer to its file.
    Write,
    /// `:wq` — write, then quit if the write succeeded.
    WriteQuit,
    /// `:e <path>` / `:e! <path>` — open another file.
    Edit {
        /// Path to open.
        path: String,
        /// Whether unsaved changes may be discarded (`:e!`).
        force: bool,
    },
    /// Anything else; the argument is the normalized input for reporting.
    Unknown(String),
}

/// Normalize `raw` and parse it. Returns `None` for input that is empty or
/// reduces to a bare colon.
pub fn parse_command(raw: &str) -> Option<ExCommand> {
    let trimmed = raw.trim();
    let body = trimmed.trim_start_matches(':').trim_start();
    if body.is_empty() {
        return None;
    }

    let (name, rest) = match body.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (body, ""),
    };

    let command = match (name, rest) {
        ("q" | "quit", "") => ExCommand::Quit,
        ("q!" | "quit!", "") => ExCommand::ForceQuit,
        ("w", "") => ExCommand::Write,
        ("wq" | "sq", "") => ExCommand::WriteQuit,
        ("e" | "edit", path) if !path.is_empty() => ExCommand::Edit {
            path: path.to_string(),
            force: false,
        },
        ("e!" | "edit!", path) if !path.is_empty() => ExCommand::Edit {
            path: path.to_string(),
            force: true,
        },
        _ => ExCommand::Unknown(format!(":{body}")),
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_commands() {
        assert_eq!(parse_command(":q"), Some(ExCommand::Quit));
        assert_eq!(parse_command(":quit"), Some(ExCommand::Quit));
        assert_eq!(parse_command(":q!"), Some(ExCommand::ForceQuit));
        assert_eq!(parse_command(":w"), Some(ExCommand::Write));
        assert_eq!(parse_command(":wq"), Some(ExCommand::WriteQuit));
    }

    #[test]
    fn test_prefix_normalization() {
        // Doubled colons collapse; a bare colon run is ignored.
        assert_eq!(parse_command("::q"), Some(ExCommand::Quit));
        assert_eq!(parse_command("  : w "), Some(ExCommand::Write));
        assert_eq!(parse_command("wq"), Some(ExCommand::WriteQuit));
        assert_eq!(parse_command(":::"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   "), None);
    }

    #[test]
    fn test_edit_takes_a_path() {
        assert_eq!(
            parse_command(":e notes.txt"),
            Some(ExCommand::Edit {
                path: "notes.txt".to_string(),
                force: false,
            })
        );
        assert_eq!(
            parse_command(":e!  notes.txt"),
            Some(ExCommand::Edit {
                path: "notes.txt".to_string(),
                force: true,
            })
        );
        // Missing path is not an edit.
        assert_eq!(
            parse_command(":e"),
            Some(ExCommand::Unknown(":e".to_string()))
        );
    }

    #[test]
    fn test_unknown_reports_normalized_text() {
        assert_eq!(
            parse_command("::frobnicate now"),
            Some(ExCommand::Unknown(":frobnicate now".to_string()))
        );
    }
}
