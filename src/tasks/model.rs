use std::time::SystemTime;

use crate::tasks::executor::ExecutionOutcome;

/// A named, owned shell command plus its execution history.
///
/// The `id` is assigned once by the store on first save and never changes.
/// `executions` is append-only and ordered by start time ascending; it is
/// always present, possibly empty. The command itself may be edited between
/// runs but must pass validation before it is saved or executed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub id: Option<String>,

    pub name: String,

    pub owner: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub command: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub executions: Vec<ExecutionRecord>,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        owner: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Task {
            id: None,
            name: name.into(),
            owner: owner.into(),
            command: command.into(),
            executions: Vec::new(),
        }
    }
}

/// One completed execution attempt: when it started, when output draining
/// finished, and the captured combined text.
///
/// Records are immutable once appended. Failed attempts (timeout, spawn
/// failure, runtime failure) never produce a record.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionRecord {
    pub start_time: SystemTime,
    pub end_time: SystemTime,
    pub output: String,
}

impl From<ExecutionOutcome> for ExecutionRecord {
    fn from(outcome: ExecutionOutcome) -> Self {
        ExecutionRecord {
            start_time: outcome.start_time,
            end_time: outcome.end_time,
            output: outcome.output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_has_empty_history_and_no_id() {
        let task = Task::new("daily-report", "alice", "echo report");
        assert!(task.id.is_none());
        assert_eq!(task.name, "daily-report");
        assert_eq!(task.owner, "alice");
        assert!(task.executions.is_empty());
    }

    #[test]
    fn record_from_outcome_keeps_fields() {
        let now = SystemTime::now();
        let outcome = ExecutionOutcome {
            start_time: now,
            end_time: now,
            output: "hello".to_string(),
        };
        let record = ExecutionRecord::from(outcome);
        assert_eq!(record.start_time, now);
        assert_eq!(record.end_time, now);
        assert_eq!(record.output, "hello");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn persisted_shape_uses_camel_case_fields() {
        let mut task = Task::new("greet", "alice", "echo hello");
        task.id = Some("abc-123".to_string());
        task.executions.push(ExecutionRecord {
            start_time: SystemTime::UNIX_EPOCH,
            end_time: SystemTime::UNIX_EPOCH,
            output: "hello".to_string(),
        });

        let value = serde_json::to_value(&task).unwrap();
        let obj = value.as_object().unwrap();
        for key in ["id", "name", "owner", "command", "executions"] {
            assert!(obj.contains_key(key), "missing field: {key}");
        }
        let record = value["executions"][0].as_object().unwrap();
        for key in ["startTime", "endTime", "output"] {
            assert!(record.contains_key(key), "missing field: {key}");
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializing_without_executions_yields_empty_history() {
        let task: Task =
            serde_json::from_str(r#"{"name":"greet","owner":"alice","command":"echo hello"}"#)
                .unwrap();
        assert!(task.executions.is_empty());
        assert!(task.id.is_none());
    }
}
