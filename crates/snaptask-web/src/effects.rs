//! Presentation-only behavior: the
//! keyframe stylesheet, scroll reveal of
//! cards, and smooth in-page anchors.

use gloo::events::{
  EventListener,
  EventListenerOptions
};
use snaptask_core::config::RevealConfig;
use tracing::{
  debug,
  warn
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{
  JsCast,
  JsValue
};
use web_sys::{
  Document,
  HtmlElement,
  IntersectionObserver,
  IntersectionObserverEntry,
  IntersectionObserverInit,
  ScrollBehavior,
  ScrollIntoViewOptions,
  ScrollLogicalPosition
};

use crate::dom;

const PAGE_CSS: &str =
  include_str!("../assets/page.css");

const STYLESHEET_ID: &str =
  "snaptask-styles";

pub fn install_stylesheet(
  document: &Document
) {
  if document
    .get_element_by_id(STYLESHEET_ID)
    .is_some()
  {
    return;
  }
  let (Some(head), Ok(style)) = (
    document.head(),
    document.create_element("style")
  ) else {
    warn!("cannot install page stylesheet");
    return;
  };
  style.set_id(STYLESHEET_ID);
  style.set_text_content(Some(PAGE_CSS));
  if let Err(error) =
    head.append_child(&style)
  {
    warn!(error = ?error, "failed to append stylesheet");
  }
}

/// Keeps the observer and its callback
/// alive for the page's lifetime.
pub struct Reveal {
  observer: IntersectionObserver,
  _callback: Closure<
    dyn FnMut(
      js_sys::Array,
      IntersectionObserver
    )
  >
}

impl Drop for Reveal {
  fn drop(&mut self) {
    self.observer.disconnect();
  }
}

/// Fades cards in as they scroll into
/// view.
pub fn reveal_cards(
  document: &Document,
  cfg: &RevealConfig
) -> Option<Reveal> {
  let cards: Vec<HtmlElement> =
    dom::query_all(document, &cfg.selectors)
      .into_iter()
      .filter_map(|el| {
        el.dyn_into::<HtmlElement>().ok()
      })
      .collect();
  if cards.is_empty() {
    return None;
  }

  let callback = Closure::<
    dyn FnMut(
      js_sys::Array,
      IntersectionObserver
    )
  >::new(
    |entries: js_sys::Array,
     _observer: IntersectionObserver| {
      for entry in entries.iter() {
        let entry: IntersectionObserverEntry =
          entry.unchecked_into();
        if !entry.is_intersecting() {
          continue;
        }
        if let Some(target) = entry
          .target()
          .dyn_ref::<HtmlElement>()
        {
          dom::set_style(target, "opacity", "1");
          dom::set_style(
            target,
            "transform",
            "translateY(0)"
          );
        }
      }
    }
  );

  let init = IntersectionObserverInit::new();
  init.set_threshold(&JsValue::from_f64(
    cfg.threshold
  ));
  init.set_root_margin(&cfg.root_margin);
  let observer =
    match IntersectionObserver::new_with_options(
      callback.as_ref().unchecked_ref(),
      &init
    ) {
      | Ok(observer) => observer,
      | Err(error) => {
        warn!(error = ?error, "intersection observer unavailable; cards shown as is");
        return None;
      }
    };

  for card in &cards {
    dom::set_style(card, "opacity", "0");
    dom::set_style(
      card,
      "transform",
      "translateY(20px)"
    );
    dom::set_style(
      card,
      "transition",
      "opacity 0.6s ease, transform 0.6s \
       ease"
    );
    observer.observe(card);
  }
  debug!(
    cards = cards.len(),
    "observing cards for reveal"
  );

  Some(Reveal {
    observer,
    _callback: callback
  })
}

/// Smooth-scrolls `a[href^="#"]` links to
/// their target.
pub fn smooth_anchors(
  document: &Document
) -> Vec<EventListener> {
  dom::query_all(document, "a[href^=\"#\"]")
    .into_iter()
    .map(|anchor| {
      let link = anchor.clone();
      EventListener::new_with_options(
        &anchor,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
          event.prevent_default();
          let Some(target) = link
            .get_attribute("href")
            .and_then(|href| {
              dom::document()?
                .query_selector(&href)
                .ok()
                .flatten()
            })
          else {
            return;
          };
          let options =
            ScrollIntoViewOptions::new();
          options.set_behavior(
            ScrollBehavior::Smooth
          );
          options.set_block(
            ScrollLogicalPosition::Start
          );
          target.scroll_into_view_with_scroll_into_view_options(
            &options
          );
        }
      )
    })
    .collect()
}
