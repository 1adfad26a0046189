use crate::tasks::error::ValidationError;

/// Shell control and substitution patterns that allow chaining or
/// redirecting commands. Most specific first so the reported fragment is
/// the useful one.
const CONTROL_PATTERNS: [&str; 11] = [
    "&&", ";", "|", "`", "$(", "$@", "$#", "$*", "$", ">", "<",
];

/// Programs and fragments that must never reach the shell, matched
/// case-insensitively as substrings.
const DENYLISTED_PROGRAMS: [&str; 17] = [
    "rm ",
    "mv ",
    "cp ",
    "sudo",
    "chown",
    "chmod",
    "wget",
    "curl",
    "nc",
    "bash",
    "sh",
    "ssh",
    "killall",
    "reboot",
    "shutdown",
    "iptables",
    "cat /etc/passwd",
];

const PATH_TRAVERSAL: &str = "../";

/// Denylist gate every command must pass before it is saved or executed.
///
/// This is pattern matching over the lowercased command string, not a parse
/// of the shell grammar. Exotic encodings, embedded newlines, or unicode
/// lookalikes of denylisted tokens can slip through, and legitimate commands
/// containing a denylisted fragment inside a larger token are rejected.
/// Over-blocking is the accepted failure mode; this gate is a denylist, not
/// a security sandbox.
pub struct CommandValidator;

impl CommandValidator {
    /// Validates a shell command string.
    ///
    /// Checks run in a fixed order and the first match wins: empty command,
    /// shell control characters, denylisted programs, path traversal.
    ///
    /// # Errors
    ///
    /// Returns the matching [`ValidationError`] variant when the command is
    /// rejected.
    ///
    /// # Examples
    /// ```rust
    /// use shelltask::tasks::validator::CommandValidator;
    ///
    /// assert!(CommandValidator::validate("echo hello").is_ok());
    /// assert!(CommandValidator::validate("echo hi && rm -rf /").is_err());
    /// ```
    pub fn validate(command: &str) -> Result<(), ValidationError> {
        let trimmed = command.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCommand);
        }

        let lowered = trimmed.to_lowercase();

        if let Some(pattern) = CONTROL_PATTERNS.iter().find(|p| lowered.contains(**p)) {
            return Err(ValidationError::ControlCharacterDetected(
                (*pattern).to_string(),
            ));
        }

        if let Some(program) = DENYLISTED_PROGRAMS.iter().find(|p| lowered.contains(**p)) {
            return Err(ValidationError::DenylistedCommand((*program).to_string()));
        }

        if lowered.contains(PATH_TRAVERSAL) {
            return Err(ValidationError::PathTraversalDetected);
        }

        Ok(())
    }
}
