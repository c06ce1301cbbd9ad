use gloo::events::{
  EventListener,
  EventListenerOptions
};
use tracing::{
  debug,
  warn
};
use wasm_bindgen::JsCast;
use web_sys::{
  Document,
  DragEvent,
  Element,
  Event,
  HtmlInputElement
};

use crate::dom;

const HOVER_CLASS: &str = "dragover";

fn set_hover(zone: &Element, on: bool) {
  let classes = zone.class_list();
  let result = if on {
    classes.add_1(HOVER_CLASS)
  } else {
    classes.remove_1(HOVER_CLASS)
  };
  if let Err(error) = result {
    warn!(error = ?error, "failed to toggle dragover class");
  }
}

/// Hands dropped files to the zone's file
/// input as if the user had picked them.
fn forward_drop(
  zone: &Element,
  event: &Event
) {
  let Some(files) = event
    .dyn_ref::<DragEvent>()
    .and_then(DragEvent::data_transfer)
    .and_then(|dt| dt.files())
    .filter(|files| files.length() > 0)
  else {
    return;
  };
  let Some(input) = dom::query_within(
    zone,
    "input[type=\"file\"]"
  )
  .and_then(|el| {
    el.dyn_into::<HtmlInputElement>().ok()
  }) else {
    debug!("drop zone has no file input");
    return;
  };

  input.set_files(Some(&files));
  match Event::new("change") {
    | Ok(change) => {
      if let Err(error) =
        input.dispatch_event(&change)
      {
        warn!(error = ?error, "failed to dispatch change");
      }
    }
    | Err(error) => {
      warn!(error = ?error, "failed to build change event");
    }
  }
}

/// Wires every `.file-upload-area`.
pub fn attach(
  document: &Document
) -> Vec<EventListener> {
  let mut listeners = vec![];
  for zone in dom::query_all(
    document,
    ".file-upload-area"
  ) {
    let over = zone.clone();
    listeners.push(
      EventListener::new_with_options(
        &zone,
        "dragover",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
          event.prevent_default();
          set_hover(&over, true);
        }
      )
    );

    let leave = zone.clone();
    listeners.push(
      EventListener::new_with_options(
        &zone,
        "dragleave",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
          event.prevent_default();
          set_hover(&leave, false);
        }
      )
    );

    let drop_zone = zone.clone();
    listeners.push(
      EventListener::new_with_options(
        &zone,
        "drop",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
          event.prevent_default();
          set_hover(&drop_zone, false);
          forward_drop(&drop_zone, event);
        }
      )
    );
  }
  listeners
}
