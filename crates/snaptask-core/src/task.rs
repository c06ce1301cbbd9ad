use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::config::ActionsConfig;

/// Opaque identifier the server renders
/// into a card's `data-task-id`.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash,
)]
pub struct TaskId(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskIdError {
  #[error("task id is empty")]
  Empty
}

impl TaskId {
  pub fn parse(
    raw: &str
  ) -> Result<Self, TaskIdError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      return Err(TaskIdError::Empty);
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for TaskId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(&self.0)
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum TaskPriority {
  Low,
  Medium,
  High
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum TaskStatus {
  Pending,
  InProgress,
  Completed,
  Cancelled
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseLabelError {
  pub kind:  &'static str,
  pub value: String
}

/// Card badges render labels like
/// "In Progress"; the server speaks
/// `in_progress`.
fn normalize_label(raw: &str) -> String {
  raw
    .trim()
    .to_lowercase()
    .split(|c: char| {
      c.is_whitespace() || c == '-'
    })
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join("_")
}

impl TaskPriority {
  pub fn as_str(self) -> &'static str {
    match self {
      | Self::Low => "low",
      | Self::Medium => "medium",
      | Self::High => "high"
    }
  }
}

impl FromStr for TaskPriority {
  type Err = ParseLabelError;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match normalize_label(s).as_str() {
      | "low" => Ok(Self::Low),
      | "medium" => Ok(Self::Medium),
      | "high" => Ok(Self::High),
      | _ => {
        Err(ParseLabelError {
          kind:  "priority",
          value: s.trim().to_string()
        })
      }
    }
  }
}

impl TaskStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      | Self::Pending => "pending",
      | Self::InProgress => "in_progress",
      | Self::Completed => "completed",
      | Self::Cancelled => "cancelled"
    }
  }
}

impl FromStr for TaskStatus {
  type Err = ParseLabelError;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match normalize_label(s).as_str() {
      | "pending" => Ok(Self::Pending),
      | "in_progress" => {
        Ok(Self::InProgress)
      }
      | "completed" => {
        Ok(Self::Completed)
      }
      | "cancelled" | "canceled" => {
        Ok(Self::Cancelled)
      }
      | _ => {
        Err(ParseLabelError {
          kind:  "status",
          value: s.trim().to_string()
        })
      }
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct TaskUpdate {
  pub task_id:     TaskId,
  pub title:       String,
  pub date:        String,
  pub priority:    TaskPriority,
  pub status:      TaskStatus,
  pub description: Option<String>
}

/// A mutation the page asks the server
/// to perform.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum TaskRequest {
  Complete(TaskId),
  Delete(TaskId),
  Update(TaskUpdate)
}

impl TaskRequest {
  pub fn task_id(&self) -> &TaskId {
    match self {
      | Self::Complete(id)
      | Self::Delete(id) => id,
      | Self::Update(update) => {
        &update.task_id
      }
    }
  }

  pub fn kind(&self) -> &'static str {
    match self {
      | Self::Complete(_) => "complete",
      | Self::Delete(_) => "delete",
      | Self::Update(_) => "update"
    }
  }

  pub fn endpoint<'a>(
    &self,
    cfg: &'a ActionsConfig
  ) -> &'a str {
    match self {
      | Self::Complete(_) => {
        &cfg.complete_endpoint
      }
      | Self::Delete(_) => {
        &cfg.delete_endpoint
      }
      | Self::Update(_) => {
        &cfg.update_endpoint
      }
    }
  }

  /// Urlencoded form fields, in the
  /// order the server's form handler
  /// declares them.
  pub fn form_fields(
    &self
  ) -> Vec<(&'static str, String)> {
    match self {
      | Self::Complete(id)
      | Self::Delete(id) => {
        vec![("task_id", id.to_string())]
      }
      | Self::Update(update) => {
        let mut fields = vec![
          (
            "task_id",
            update.task_id.to_string()
          ),
          ("title", update.title.clone()),
          ("date", update.date.clone()),
          (
            "priority",
            update
              .priority
              .as_str()
              .to_string()
          ),
          (
            "status",
            update
              .status
              .as_str()
              .to_string()
          ),
        ];
        if let Some(description) =
          update
            .description
            .as_ref()
            .filter(|d| {
              !d.trim().is_empty()
            })
        {
          fields.push((
            "description",
            description.clone()
          ));
        }
        fields
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{
    TaskId,
    TaskIdError,
    TaskPriority,
    TaskRequest,
    TaskStatus,
    TaskUpdate
  };
  use crate::config::ActionsConfig;

  #[test]
  fn task_id_rejects_blank() {
    assert_eq!(
      TaskId::parse("   "),
      Err(TaskIdError::Empty)
    );
    assert_eq!(
      TaskId::parse(" 65a1f0c2 ")
        .expect("id")
        .as_str(),
      "65a1f0c2"
    );
  }

  #[test]
  fn labels_parse_from_card_text() {
    assert_eq!(
      "High".parse::<TaskPriority>(),
      Ok(TaskPriority::High)
    );
    assert_eq!(
      " In Progress "
        .parse::<TaskStatus>(),
      Ok(TaskStatus::InProgress)
    );
    assert_eq!(
      "in-progress".parse::<TaskStatus>(),
      Ok(TaskStatus::InProgress)
    );
    let err = "urgent"
      .parse::<TaskPriority>()
      .expect_err("unknown priority");
    assert_eq!(
      err.to_string(),
      "unknown priority 'urgent'"
    );
  }

  #[test]
  fn requests_route_to_configured_endpoints()
  {
    let cfg = ActionsConfig::default();
    let id =
      TaskId::parse("t1").expect("id");

    let complete =
      TaskRequest::Complete(id.clone());
    assert_eq!(
      complete.endpoint(&cfg),
      "/tasks/complete"
    );
    assert_eq!(
      complete.form_fields(),
      vec![("task_id", "t1".to_string())]
    );

    let delete = TaskRequest::Delete(id);
    assert_eq!(
      delete.endpoint(&cfg),
      "/tasks/delete"
    );
    assert_eq!(delete.kind(), "delete");
  }

  #[test]
  fn update_omits_blank_description() {
    let update = TaskUpdate {
      task_id:     TaskId::parse("t9")
        .expect("id"),
      title:       "Pay rent".to_string(),
      date:        "2024-02-01"
        .to_string(),
      priority:    TaskPriority::Medium,
      status:      TaskStatus::Pending,
      description: Some(" ".to_string())
    };
    let fields =
      TaskRequest::Update(update)
        .form_fields();
    let names: Vec<_> = fields
      .iter()
      .map(|(name, _)| *name)
      .collect();
    assert_eq!(
      names,
      vec![
        "task_id", "title", "date",
        "priority", "status"
      ]
    );
    assert_eq!(
      fields[3].1,
      "medium".to_string()
    );
  }
}
