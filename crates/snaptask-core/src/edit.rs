use chrono::NaiveDate;
use thiserror::Error;
use tracing::{
  debug,
  warn
};

use crate::task::{
  ParseLabelError,
  TaskId,
  TaskPriority,
  TaskStatus,
  TaskUpdate
};

/// Raw text of the card elements the
/// edit dialog reads. Absent elements
/// stay `None`.
#[derive(Debug, Clone, Default)]
pub struct CardFields {
  pub title:    Option<String>,
  pub date:     Option<String>,
  pub priority: Option<String>,
  pub status:   Option<String>
}

/// Values staged into the modal inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
  pub task_id:  TaskId,
  pub title:    Option<String>,
  pub date:     Option<String>,
  pub priority: Option<String>,
  pub status:   Option<String>
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
  #[error("{0} is required")]
  Missing(&'static str),
  #[error(
    "date '{0}' is not a YYYY-MM-DD date"
  )]
  BadDate(String),
  #[error(transparent)]
  Label(#[from] ParseLabelError)
}

/// The date badge reads like
/// "<icon> 2024-01-15"; the date is the
/// second token. A bare date is taken
/// as is.
pub fn card_date(
  text: &str
) -> Option<String> {
  let trimmed = text.trim();
  let mut tokens = trimmed.split(' ');
  let first = tokens.next()?;
  match tokens.next() {
    | Some(second) => {
      Some(second.to_string())
    }
    | None if !first.is_empty() => {
      Some(first.to_string())
    }
    | None => None
  }
}

impl EditDraft {
  pub fn from_card(
    task_id: TaskId,
    card: &CardFields
  ) -> Self {
    let draft = Self {
      task_id,
      title: card.title.clone(),
      date: card
        .date
        .as_deref()
        .and_then(card_date),
      priority: card
        .priority
        .as_deref()
        .map(|p| p.trim().to_string()),
      status: card
        .status
        .as_deref()
        .map(|s| s.trim().to_string())
    };
    for (name, value) in [
      ("title", &draft.title),
      ("date", &draft.date),
      ("priority", &draft.priority),
      ("status", &draft.status)
    ] {
      if value.is_none() {
        warn!(task_id = %draft.task_id, field = name, "card field missing; leaving modal input untouched");
      }
    }
    draft
  }

  /// Builds the update request from the
  /// modal's current values.
  pub fn into_update(
    self,
    description: Option<String>
  ) -> Result<TaskUpdate, DraftError> {
    let title = self
      .title
      .map(|t| t.trim().to_string())
      .filter(|t| !t.is_empty())
      .ok_or(DraftError::Missing(
        "title"
      ))?;
    let date = self
      .date
      .map(|d| d.trim().to_string())
      .filter(|d| !d.is_empty())
      .ok_or(DraftError::Missing("date"))?;
    NaiveDate::parse_from_str(
      &date, "%Y-%m-%d"
    )
    .map_err(|_| {
      DraftError::BadDate(date.clone())
    })?;
    let priority = self
      .priority
      .ok_or(DraftError::Missing(
        "priority"
      ))?
      .parse::<TaskPriority>()?;
    let status = self
      .status
      .ok_or(DraftError::Missing(
        "status"
      ))?
      .parse::<TaskStatus>()?;

    debug!(task_id = %self.task_id, "built task update");
    Ok(TaskUpdate {
      task_id: self.task_id,
      title,
      date,
      priority,
      status,
      description
    })
  }
}

/// Ties a scheduled hide to the close
/// that requested it.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct CloseTicket(u64);

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ModalPhase {
  Hidden,
  Open,
  Closing(CloseTicket)
}

/// Visibility of the edit modal across
/// its exit transition.
#[derive(Debug)]
pub struct ModalState {
  phase:      ModalPhase,
  generation: u64
}

impl Default for ModalState {
  fn default() -> Self {
    Self {
      phase:      ModalPhase::Hidden,
      generation: 0
    }
  }
}

impl ModalState {
  pub fn phase(&self) -> ModalPhase {
    self.phase
  }

  pub fn open(&mut self) {
    if let ModalPhase::Closing(ticket) =
      self.phase
    {
      debug!(
        ?ticket,
        "reopened during exit \
         transition"
      );
    }
    self.phase = ModalPhase::Open;
  }

  /// Starts the exit transition. The
  /// returned ticket must be passed to
  /// [`ModalState::finish_close`] once
  /// the transition ends.
  pub fn begin_close(
    &mut self
  ) -> CloseTicket {
    self.generation =
      self.generation.wrapping_add(1);
    let ticket =
      CloseTicket(self.generation);
    self.phase =
      ModalPhase::Closing(ticket);
    ticket
  }

  /// True when the modal should now be
  /// hidden.
  pub fn finish_close(
    &mut self,
    ticket: CloseTicket
  ) -> bool {
    if self.phase
      == ModalPhase::Closing(ticket)
    {
      self.phase = ModalPhase::Hidden;
      true
    } else {
      false
    }
  }
}
