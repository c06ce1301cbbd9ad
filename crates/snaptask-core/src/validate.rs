use tracing::debug;

pub const REQUIRED_FIELD_MESSAGE: &str =
  "This field is required";

pub const INCOMPLETE_FORM_MESSAGE: &str =
  "Please fill in all required fields.";

pub const ERROR_TEXT_COLOR: &str =
  "#C62828";

pub const ERROR_BORDER_COLOR: &str =
  "#FF6B6B";

pub const VALID_BORDER_COLOR: &str =
  "#E6E6FA";

/// Outcome for one `[required]` field.
/// Every field is re-evaluated on each
/// pass; a field that was blank last
/// time and is filled now reports
/// `Valid`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum FieldVerdict {
  Valid,
  Missing
}

impl FieldVerdict {
  pub fn of(value: &str) -> Self {
    if value.trim().is_empty() {
      Self::Missing
    } else {
      Self::Valid
    }
  }

  pub fn border_color(
    self
  ) -> &'static str {
    match self {
      | Self::Valid => VALID_BORDER_COLOR,
      | Self::Missing => {
        ERROR_BORDER_COLOR
      }
    }
  }

  pub fn error_label(
    self
  ) -> Option<&'static str> {
    match self {
      | Self::Valid => None,
      | Self::Missing => {
        Some(REQUIRED_FIELD_MESSAGE)
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormReport {
  pub verdicts: Vec<FieldVerdict>
}

impl FormReport {
  pub fn is_valid(&self) -> bool {
    self
      .verdicts
      .iter()
      .all(|v| *v == FieldVerdict::Valid)
  }

  pub fn missing(&self) -> usize {
    self
      .verdicts
      .iter()
      .filter(|v| {
        **v == FieldVerdict::Missing
      })
      .count()
  }

  /// The single banner shown when the
  /// submission is blocked.
  pub fn summary(
    &self
  ) -> Option<&'static str> {
    (!self.is_valid())
      .then_some(INCOMPLETE_FORM_MESSAGE)
  }
}

pub fn validate_required<'a, I>(
  values: I
) -> FormReport
where
  I: IntoIterator<Item = &'a str>
{
  let verdicts: Vec<_> = values
    .into_iter()
    .map(FieldVerdict::of)
    .collect();
  let report = FormReport {
    verdicts
  };
  debug!(
    fields = report.verdicts.len(),
    missing = report.missing(),
    "validated required fields"
  );
  report
}
