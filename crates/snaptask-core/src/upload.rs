use thiserror::Error;
use tracing::{
  debug,
  info
};

use crate::config::UploadConfig;

/// Metadata of the first file in the
/// input's file list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
  pub name:      String,
  pub mime_type: String,
  pub size:      u64
}

/// The `Display` text is what the user
/// sees in the error banner.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadRejection {
  #[error("Please select an image file.")]
  NotAnImage {
    mime_type: String
  },
  #[error(
    "File size must be less than {}.",
    size_label(.limit)
  )]
  TooLarge {
    size:  u64,
    limit: u64
  }
}

const MIB: u64 = 1024 * 1024;

/// Whole megabytes when the limit is
/// one, else whole kilobytes, else one
/// decimal of a megabyte.
fn size_label(limit: &u64) -> String {
  let limit = *limit;
  if limit % MIB == 0 {
    format!("{}MB", limit / MIB)
  } else if limit % 1024 == 0 {
    format!("{}KB", limit / 1024)
  } else {
    let mb = limit as f64 / MIB as f64;
    format!("{mb:.1}MB")
  }
}

pub fn validate_selection(
  file: &SelectedFile,
  cfg: &UploadConfig
) -> Result<(), UploadRejection> {
  if !file
    .mime_type
    .starts_with(&cfg.accepted_mime_prefix)
  {
    return Err(
      UploadRejection::NotAnImage {
        mime_type: file.mime_type.clone()
      }
    );
  }

  if file.size > cfg.max_bytes {
    return Err(
      UploadRejection::TooLarge {
        size:  file.size,
        limit: cfg.max_bytes
      }
    );
  }

  Ok(())
}

/// Identifies one pending read; results
/// for an older ticket are stale.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct ReadTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPhase {
  Idle,
  Reading {
    ticket: ReadTicket,
    file:   SelectedFile
  },
  Previewing(PreviewUpdate)
}

/// Everything the preview region shows
/// once a read completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewUpdate {
  pub image_src:     String,
  pub file_name:     String,
  pub submit_enabled: bool
}

#[derive(Debug)]
pub struct UploadState {
  phase:       UploadPhase,
  next_ticket: u64
}

impl Default for UploadState {
  fn default() -> Self {
    Self {
      phase:       UploadPhase::Idle,
      next_ticket: 1
    }
  }
}

impl UploadState {
  pub fn phase(&self) -> &UploadPhase {
    &self.phase
  }

  /// Starts a new selection. Any read in
  /// flight is superseded whether or not
  /// the new file is accepted.
  #[tracing::instrument(skip(self, cfg, file), fields(name = %file.name, mime = %file.mime_type, size = file.size))]
  pub fn select(
    &mut self,
    file: SelectedFile,
    cfg: &UploadConfig
  ) -> Result<ReadTicket, UploadRejection>
  {
    let ticket = ReadTicket(
      self.next_ticket
    );
    self.next_ticket =
      self.next_ticket.wrapping_add(1);

    if let Err(rejection) =
      validate_selection(&file, cfg)
    {
      info!(%rejection, "file selection rejected");
      self.phase = UploadPhase::Idle;
      return Err(rejection);
    }

    debug!(?ticket, "reading selected file");
    self.phase = UploadPhase::Reading {
      ticket,
      file
    };
    Ok(ticket)
  }

  /// Completes a read. Returns `None`
  /// when the ticket is no longer the
  /// active selection.
  pub fn finish_read(
    &mut self,
    ticket: ReadTicket,
    data_url: String
  ) -> Option<PreviewUpdate> {
    let UploadPhase::Reading {
      ticket: active,
      file
    } = &self.phase
    else {
      debug!(?ticket, "read finished with no selection pending");
      return None;
    };

    if *active != ticket {
      debug!(?ticket, ?active, "discarding stale file read");
      return None;
    }

    let update = PreviewUpdate {
      image_src:      data_url,
      file_name:      file.name.clone(),
      submit_enabled: true
    };
    self.phase = UploadPhase::Previewing(
      update.clone()
    );
    Some(update)
  }

  /// A failed read leaves nothing to
  /// preview. True when `ticket` was the
  /// active read.
  pub fn abandon_read(
    &mut self,
    ticket: ReadTicket
  ) -> bool {
    if matches!(
      &self.phase,
      UploadPhase::Reading { ticket: active, .. } if *active == ticket
    ) {
      self.phase = UploadPhase::Idle;
      true
    } else {
      false
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{
    SelectedFile,
    UploadPhase,
    UploadRejection,
    UploadState,
    validate_selection
  };
  use crate::config::UploadConfig;

  fn file(
    name: &str,
    mime: &str,
    size: u64
  ) -> SelectedFile {
    SelectedFile {
      name:      name.to_string(),
      mime_type: mime.to_string(),
      size
    }
  }

  #[test]
  fn non_image_rejected_before_size() {
    let cfg = UploadConfig::default();
    let err = validate_selection(
      &file(
        "notes.pdf",
        "application/pdf",
        20 * 1024 * 1024
      ),
      &cfg
    )
    .expect_err("pdf rejected");
    assert_eq!(
      err.to_string(),
      "Please select an image file."
    );
  }

  #[test]
  fn size_limit_is_inclusive() {
    let cfg = UploadConfig::default();
    assert!(
      validate_selection(
        &file(
          "a.png",
          "image/png",
          10_485_760
        ),
        &cfg
      )
      .is_ok()
    );
    assert_eq!(
      validate_selection(
        &file(
          "a.png",
          "image/png",
          10_485_761
        ),
        &cfg
      ),
      Err(UploadRejection::TooLarge {
        size:  10_485_761,
        limit: 10_485_760
      })
    );
  }

  #[test]
  fn limit_message_keeps_odd_sizes() {
    let big = file(
      "a.png",
      "image/png",
      6_000_000
    );
    let message = |max_bytes| {
      let cfg = UploadConfig {
        max_bytes,
        ..UploadConfig::default()
      };
      validate_selection(&big, &cfg)
        .expect_err("too large")
        .to_string()
    };
    assert_eq!(
      message(10 * 1024 * 1024 / 2),
      "File size must be less than 5MB."
    );
    assert_eq!(
      message(5_000_000),
      "File size must be less than 4.8MB."
    );
    assert_eq!(
      message(524_288),
      "File size must be less than 512KB."
    );
  }

  #[test]
  fn stale_read_is_discarded() {
    let cfg = UploadConfig::default();
    let mut state =
      UploadState::default();
    let first = state
      .select(
        file("one.png", "image/png", 10),
        &cfg
      )
      .expect("accepted");
    let second = state
      .select(
        file("two.png", "image/png", 10),
        &cfg
      )
      .expect("accepted");

    assert!(
      state
        .finish_read(
          first,
          "data:image/png;base64,AA"
            .to_string()
        )
        .is_none()
    );
    let update = state
      .finish_read(
        second,
        "data:image/png;base64,BB"
          .to_string()
      )
      .expect("current read");
    assert_eq!(update.file_name, "two.png");
    assert!(matches!(
      state.phase(),
      UploadPhase::Previewing(_)
    ));
  }

  #[test]
  fn rejection_supersedes_pending_read() {
    let cfg = UploadConfig::default();
    let mut state =
      UploadState::default();
    let ticket = state
      .select(
        file("ok.png", "image/png", 10),
        &cfg
      )
      .expect("accepted");
    assert!(
      state
        .select(
          file("bad.txt", "text/plain", 10),
          &cfg
        )
        .is_err()
    );
    assert!(
      state
        .finish_read(
          ticket,
          "data:".to_string()
        )
        .is_none()
    );
    assert_eq!(
      state.phase(),
      &UploadPhase::Idle
    );
    assert!(!state.abandon_read(ticket));
  }
}
