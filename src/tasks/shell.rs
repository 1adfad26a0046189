/// Platform shell used to run a command string.
///
/// Chosen once at startup via [`ShellAdapter::host`]; the command is passed
/// verbatim as a single argument to the shell and is not tokenized here.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAdapter {
    /// `sh -c <command>`
    Posix,
    /// `cmd /c <command>`
    Windows,
}

impl ShellAdapter {
    /// The shell matching the host platform.
    pub fn host() -> Self {
        if cfg!(windows) {
            ShellAdapter::Windows
        } else {
            ShellAdapter::Posix
        }
    }

    /// Builds the program and argument list invoking `command` through this
    /// shell.
    pub fn build_invocation<'a>(&self, command: &'a str) -> (&'static str, [&'a str; 2]) {
        match self {
            ShellAdapter::Posix => ("sh", ["-c", command]),
            ShellAdapter::Windows => ("cmd", ["/c", command]),
        }
    }
}

impl Default for ShellAdapter {
    fn default() -> Self {
        Self::host()
    }
}
