use crate::tasks::error::TaskError;
use crate::tasks::shell::ShellAdapter;

/// Default execution timeout when none is configured.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Default bound on concurrently running child processes.
pub const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Configuration for the execution pipeline.
///
/// # Examples
/// ```rust
/// use shelltask::tasks::config::ExecutorConfig;
///
/// let config = ExecutorConfig::default()
///     .timeout_ms(10_000)
///     .max_concurrent(4);
/// assert!(config.validate().is_ok());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorConfig {
    /// Maximum allowed runtime per execution in milliseconds.
    pub timeout_ms: u64,

    /// Shell used to run command strings.
    pub shell: ShellAdapter,

    /// Maximum number of child processes running at the same time. Further
    /// execute calls wait for a slot instead of spawning unboundedly.
    pub max_concurrent: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        ExecutorConfig {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            shell: ShellAdapter::host(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }
}

impl ExecutorConfig {
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn shell(mut self, shell: ShellAdapter) -> Self {
        self.shell = shell;
        self
    }

    pub fn max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    /// # Errors
    ///
    /// Returns [`TaskError::InvalidConfiguration`] if the timeout or the
    /// concurrency bound is zero.
    pub fn validate(&self) -> Result<(), TaskError> {
        if self.timeout_ms == 0 {
            return Err(TaskError::InvalidConfiguration(
                "Timeout must be greater than 0".to_string(),
            ));
        }
        if self.max_concurrent == 0 {
            return Err(TaskError::InvalidConfiguration(
                "Concurrency bound must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ExecutorConfig::default();
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_sets_fields() {
        let config = ExecutorConfig::default()
            .timeout_ms(250)
            .shell(ShellAdapter::Posix)
            .max_concurrent(2);
        assert_eq!(config.timeout_ms, 250);
        assert_eq!(config.shell, ShellAdapter::Posix);
        assert_eq!(config.max_concurrent, 2);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = ExecutorConfig::default().timeout_ms(0);
        match config.validate() {
            Err(TaskError::InvalidConfiguration(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn zero_concurrency_bound_is_rejected() {
        let config = ExecutorConfig::default().max_concurrent(0);
        match config.validate() {
            Err(TaskError::InvalidConfiguration(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
