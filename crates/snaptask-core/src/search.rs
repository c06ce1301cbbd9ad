use tracing::{
  debug,
  trace
};

/// Text read from one `.task-card`.
/// `None` means the card has no such
/// element, not an empty one.
#[derive(Debug, Clone, Default)]
pub struct CardText {
  pub title:       Option<String>,
  pub description: Option<String>
}

impl CardText {
  pub fn new(
    title: Option<&str>,
    description: Option<&str>
  ) -> Self {
    Self {
      title:       title
        .map(str::to_string),
      description: description
        .map(str::to_string)
    }
  }

  fn haystack(&self) -> Option<String> {
    if self.title.is_none()
      && self.description.is_none()
    {
      return None;
    }
    Some(format!(
      "{} {}",
      self.title.as_deref().unwrap_or(""),
      self
        .description
        .as_deref()
        .unwrap_or("")
    ))
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Highlight {
  Matched,
  Baseline
}

impl Highlight {
  pub fn border(self) -> &'static str {
    match self {
      | Self::Matched => {
        "2px solid #967BB6"
      }
      | Self::Baseline => {
        "1px solid rgba(150, 123, 182, \
         0.1)"
      }
    }
  }

  pub fn box_shadow(
    self
  ) -> &'static str {
    match self {
      | Self::Matched => {
        "0 0 20px rgba(150, 123, 182, \
         0.3)"
      }
      | Self::Baseline => {
        "0 8px 30px rgba(150, 123, 182, \
         0.1)"
      }
    }
  }
}

/// A query long enough to search with,
/// already lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
  /// Returns `None` for queries shorter
  /// than `min_chars`; those leave the
  /// current highlights alone.
  pub fn parse(
    raw: &str,
    min_chars: usize
  ) -> Option<Self> {
    // Browser string length: UTF-16
    // code units.
    let len = raw.encode_utf16().count();
    if len < min_chars {
      trace!(
        len,
        min_chars,
        "query too short; ignoring"
      );
      return None;
    }
    Some(Self(raw.to_lowercase()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// `None` when the card has nothing to
  /// match against.
  pub fn matches(
    &self,
    card: &CardText
  ) -> Option<bool> {
    card.haystack().map(|text| {
      text.to_lowercase().contains(&self.0)
    })
  }

  /// One entry per card, in card order.
  pub fn plan(
    &self,
    cards: &[CardText]
  ) -> Vec<Option<Highlight>> {
    let plan: Vec<_> = cards
      .iter()
      .map(|card| {
        self.matches(card).map(|hit| {
          if hit {
            Highlight::Matched
          } else {
            Highlight::Baseline
          }
        })
      })
      .collect();
    debug!(
      query = %self.0,
      cards = cards.len(),
      matched = plan
        .iter()
        .filter(|h| {
          **h == Some(Highlight::Matched)
        })
        .count(),
      "computed search highlights"
    );
    plan
  }
}

#[cfg(test)]
mod tests {
  use super::{
    CardText,
    Highlight,
    SearchQuery
  };

  #[test]
  fn short_queries_are_ignored() {
    assert!(
      SearchQuery::parse("", 2).is_none()
    );
    assert!(
      SearchQuery::parse("u", 2).is_none()
    );
    assert!(
      SearchQuery::parse("ur", 2).is_some()
    );
  }

  #[test]
  fn length_counts_utf16_units() {
    assert!(
      SearchQuery::parse("é", 2).is_none()
    );
    assert!(
      SearchQuery::parse("🥛", 2).is_some()
    );
  }

  #[test]
  fn matches_title_or_description() {
    let query =
      SearchQuery::parse("Report", 2)
        .expect("query");
    let cards = vec![
      CardText::new(
        Some("Submit project REPORT"),
        None
      ),
      CardText::new(
        Some("Groceries"),
        Some("weekly report of costs")
      ),
      CardText::new(
        Some("Call mom"),
        Some("")
      ),
      CardText::default(),
    ];
    assert_eq!(
      query.plan(&cards),
      vec![
        Some(Highlight::Matched),
        Some(Highlight::Matched),
        Some(Highlight::Baseline),
        None
      ]
    );
  }

  #[test]
  fn match_spans_title_description_join()
  {
    let query =
      SearchQuery::parse("rent due", 2)
        .expect("query");
    let card = CardText::new(
      Some("Pay rent"),
      Some("due friday")
    );
    assert_eq!(
      query.matches(&card),
      Some(true)
    );
  }
}
