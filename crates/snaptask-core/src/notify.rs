use std::fmt;

use tracing::{
  debug,
  trace
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Severity {
  Error,
  Success,
  Info
}

impl Severity {
  /// Inline markup passes free-form type
  /// names; anything unrecognised is
  /// shown as info.
  pub fn from_label(label: &str) -> Self {
    match label
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "error" => Self::Error,
      | "success" => Self::Success,
      | _ => Self::Info
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      | Self::Error => "error",
      | Self::Success => "success",
      | Self::Info => "info"
    }
  }

  /// Font Awesome icon name.
  pub fn icon(self) -> &'static str {
    match self {
      | Self::Error => {
        "exclamation-triangle"
      }
      | Self::Success => "check-circle",
      | Self::Info => "info-circle"
    }
  }

  pub fn accent(self) -> &'static str {
    match self {
      | Self::Error => "#FF6B6B",
      | Self::Success => "#66BB6A",
      | Self::Info => "#967BB6"
    }
  }
}

impl fmt::Display for Severity {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
)]
pub struct NoticeId(u64);

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum NoticePhase {
  Visible,
  Leaving
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub id:       NoticeId,
  pub message:  String,
  pub severity: Severity,
  pub phase:    NoticePhase
}

/// Result of showing a notice: the new
/// one and whatever it displaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shown {
  pub id:       NoticeId,
  pub replaced: Vec<NoticeId>
}

/// Tracks the single visible banner.
/// Timer callbacks carry the id they
/// were scheduled for; calls for an id
/// that is no longer active do nothing.
#[derive(Debug, Default)]
pub struct NotificationCenter {
  active:  Option<Notice>,
  next_id: u64
}

impl NotificationCenter {
  pub fn active(&self) -> Option<&Notice> {
    self.active.as_ref()
  }

  pub fn show(
    &mut self,
    message: impl Into<String>,
    severity: Severity
  ) -> Shown {
    self.next_id =
      self.next_id.wrapping_add(1);
    let id = NoticeId(self.next_id);
    let replaced: Vec<_> = self
      .active
      .take()
      .map(|old| old.id)
      .into_iter()
      .collect();

    let message = message.into();
    debug!(
      ?id,
      %severity,
      replaced = replaced.len(),
      "showing notification"
    );
    self.active = Some(Notice {
      id,
      message,
      severity,
      phase: NoticePhase::Visible
    });
    Shown {
      id,
      replaced
    }
  }

  /// The display window elapsed. True
  /// when the exit animation should play.
  pub fn begin_exit(
    &mut self,
    id: NoticeId
  ) -> bool {
    match self.active.as_mut() {
      | Some(notice)
        if notice.id == id
          && notice.phase
            == NoticePhase::Visible =>
      {
        notice.phase = NoticePhase::Leaving;
        true
      }
      | _ => {
        trace!(
          ?id,
          "exit for inactive notice"
        );
        false
      }
    }
  }

  /// Removes the notice, whether by the
  /// exit timer or the close control.
  /// True when something was removed.
  pub fn remove(
    &mut self,
    id: NoticeId
  ) -> bool {
    if self
      .active
      .as_ref()
      .is_some_and(|n| n.id == id)
    {
      self.active = None;
      debug!(?id, "notification removed");
      true
    } else {
      false
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{
    NoticePhase,
    NotificationCenter,
    Severity
  };

  #[test]
  fn latest_notice_wins() {
    let mut center =
      NotificationCenter::default();
    let first = center
      .show("Uploading", Severity::Info);
    let second = center
      .show("Saved", Severity::Success);

    assert!(first.replaced.is_empty());
    assert_eq!(
      second.replaced,
      vec![first.id]
    );
    let active =
      center.active().expect("active");
    assert_eq!(active.message, "Saved");
    assert_eq!(
      active.severity,
      Severity::Success
    );
  }

  #[test]
  fn timers_of_replaced_notice_are_inert()
  {
    let mut center =
      NotificationCenter::default();
    let first =
      center.show("a", Severity::Info);
    let second =
      center.show("b", Severity::Error);

    assert!(!center.begin_exit(first.id));
    assert!(!center.remove(first.id));
    assert_eq!(
      center
        .active()
        .map(|n| n.id),
      Some(second.id)
    );
  }

  #[test]
  fn exit_then_remove() {
    let mut center =
      NotificationCenter::default();
    let shown =
      center.show("a", Severity::Info);
    assert!(center.begin_exit(shown.id));
    assert!(!center.begin_exit(shown.id));
    assert_eq!(
      center
        .active()
        .map(|n| n.phase),
      Some(NoticePhase::Leaving)
    );
    assert!(center.remove(shown.id));
    assert!(center.active().is_none());
  }

  #[test]
  fn dismiss_before_timeout() {
    let mut center =
      NotificationCenter::default();
    let shown =
      center.show("a", Severity::Info);
    assert!(center.remove(shown.id));
    assert!(!center.begin_exit(shown.id));
  }

  #[test]
  fn severity_styling() {
    assert_eq!(
      Severity::Error.icon(),
      "exclamation-triangle"
    );
    assert_eq!(
      Severity::Success.accent(),
      "#66BB6A"
    );
    assert_eq!(
      Severity::Info.to_string(),
      "info"
    );
  }

  #[test]
  fn unknown_labels_fall_back_to_info() {
    assert_eq!(
      Severity::from_label(" Error "),
      Severity::Error
    );
    assert_eq!(
      Severity::from_label("warning"),
      Severity::Info
    );
  }
}
