/// States of a single executor invocation.
///
/// `Completed` is the only state that yields an
/// [`ExecutionOutcome`](crate::tasks::executor::ExecutionOutcome);
/// `TimedOut` and `Failed` are terminal without a history record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Idle,
    Spawning,
    Running,
    Completed,
    TimedOut,
    Failed,
}

impl ExecutionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::TimedOut | Self::Failed)
    }

    /// Legal transitions of one invocation:
    /// `Idle -> Spawning -> Running -> {Completed | TimedOut | Failed}`.
    /// Spawn failure short-circuits `Spawning -> Failed`.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Spawning)
                | (Self::Spawning, Self::Running)
                | (Self::Spawning, Self::Failed)
                | (Self::Running, Self::Completed)
                | (Self::Running, Self::TimedOut)
                | (Self::Running, Self::Failed)
        )
    }
}
