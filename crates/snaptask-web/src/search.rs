use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use snaptask_core::config::SearchConfig;
use snaptask_core::search::{
  CardText,
  SearchQuery
};
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{
  Document,
  HtmlElement,
  HtmlInputElement
};

use crate::dom;

pub struct SearchFilter {
  input:   HtmlInputElement,
  cfg:     SearchConfig,
  pending: RefCell<Option<Timeout>>
}

impl SearchFilter {
  pub fn new(
    input: HtmlInputElement,
    cfg: SearchConfig
  ) -> Rc<Self> {
    Rc::new(Self {
      input,
      cfg,
      pending: RefCell::new(None)
    })
  }

  pub fn input(&self) -> &HtmlInputElement {
    &self.input
  }

  /// `input` on the search box. Replacing
  /// the pending timeout cancels it.
  pub fn on_input(self: &Rc<Self>) {
    let this = Rc::clone(self);
    let timeout = Timeout::new(
      self.cfg.debounce_ms,
      move || {
        if let Some(document) =
          dom::document()
        {
          apply_search(
            &document,
            &this.input.value(),
            this.cfg.min_query_chars
          );
        }
      }
    );
    *self.pending.borrow_mut() =
      Some(timeout);
  }
}

/// Restyles every `.task-card` for
/// `raw`. Returns how many cards were
/// restyled; short queries restyle none.
pub fn apply_search(
  document: &Document,
  raw: &str,
  min_chars: usize
) -> usize {
  let Some(query) =
    SearchQuery::parse(raw, min_chars)
  else {
    return 0;
  };

  let cards: Vec<HtmlElement> =
    dom::query_all(document, ".task-card")
      .into_iter()
      .filter_map(|el| {
        el.dyn_into::<HtmlElement>().ok()
      })
      .collect();
  let texts: Vec<CardText> = cards
    .iter()
    .map(|card| CardText {
      title:       dom::text_within(
        card,
        ".task-title"
      ),
      description: dom::text_within(
        card,
        ".task-description"
      )
    })
    .collect();

  let mut restyled = 0;
  for (card, highlight) in
    cards.iter().zip(query.plan(&texts))
  {
    let Some(highlight) = highlight else {
      continue;
    };
    dom::set_style(
      card,
      "border",
      highlight.border()
    );
    dom::set_style(
      card,
      "box-shadow",
      highlight.box_shadow()
    );
    restyled += 1;
  }
  debug!(query = %query.as_str(), restyled, "applied search");
  restyled
}
