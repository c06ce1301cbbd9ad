use gloo::console::log;
use wasm_bindgen::JsCast;
use web_sys::{
  Document,
  Element,
  HtmlButtonElement,
  HtmlElement,
  HtmlInputElement,
  HtmlSelectElement,
  HtmlTextAreaElement,
  NodeList
};

pub fn document() -> Option<Document> {
  web_sys::window()
    .and_then(|window| window.document())
}

fn collect(list: NodeList) -> Vec<Element> {
  (0..list.length())
    .filter_map(|idx| list.item(idx))
    .filter_map(|node| {
      node.dyn_into::<Element>().ok()
    })
    .collect()
}

/// All elements in the document matching
/// `selector`; an invalid selector
/// matches nothing.
pub fn query_all(
  document: &Document,
  selector: &str
) -> Vec<Element> {
  document
    .query_selector_all(selector)
    .map(collect)
    .unwrap_or_default()
}

pub fn query_all_within(
  root: &Element,
  selector: &str
) -> Vec<Element> {
  root
    .query_selector_all(selector)
    .map(collect)
    .unwrap_or_default()
}

pub fn query_within(
  root: &Element,
  selector: &str
) -> Option<Element> {
  root
    .query_selector(selector)
    .ok()
    .flatten()
}

/// Text of the first descendant matching
/// `selector`, if there is one.
pub fn text_within(
  root: &Element,
  selector: &str
) -> Option<String> {
  query_within(root, selector).map(|el| {
    el.text_content().unwrap_or_default()
  })
}

/// The element whose `data-task-id`
/// equals `task_id`.
pub fn find_task_card(
  document: &Document,
  task_id: &str
) -> Option<HtmlElement> {
  query_all(document, "[data-task-id]")
    .into_iter()
    .find(|el| {
      el.get_attribute("data-task-id")
        .as_deref()
        == Some(task_id)
    })
    .and_then(|el| {
      el.dyn_into::<HtmlElement>().ok()
    })
}

pub fn set_style(
  el: &HtmlElement,
  property: &str,
  value: &str
) {
  if let Err(error) =
    el.style().set_property(property, value)
  {
    tracing::warn!(
      property,
      error = ?error,
      "failed to set style"
    );
  }
}

pub fn show(el: &HtmlElement) {
  set_style(el, "display", "block");
}

pub fn hide(el: &HtmlElement) {
  set_style(el, "display", "none");
}

pub fn set_disabled(
  el: &Element,
  disabled: bool
) {
  if let Some(button) =
    el.dyn_ref::<HtmlButtonElement>()
  {
    button.set_disabled(disabled);
  } else if let Some(input) =
    el.dyn_ref::<HtmlInputElement>()
  {
    input.set_disabled(disabled);
  } else {
    let result = if disabled {
      el.set_attribute("disabled", "")
    } else {
      el.remove_attribute("disabled")
    };
    if let Err(error) = result {
      tracing::warn!(
        disabled,
        error = ?error,
        "failed to toggle disabled"
      );
    }
  }
}

/// A form control whose value the page
/// reads or stages.
#[derive(Debug, Clone)]
pub enum FormField {
  Input(HtmlInputElement),
  Select(HtmlSelectElement),
  TextArea(HtmlTextAreaElement)
}

impl FormField {
  pub fn from_element(
    el: Element
  ) -> Option<Self> {
    el.dyn_into::<HtmlInputElement>()
      .map(Self::Input)
      .or_else(|el| {
        el.dyn_into::<HtmlSelectElement>()
          .map(Self::Select)
      })
      .or_else(|el| {
        el.dyn_into::<HtmlTextAreaElement>()
          .map(Self::TextArea)
      })
      .ok()
  }

  pub fn value(&self) -> String {
    match self {
      | Self::Input(input) => input.value(),
      | Self::Select(select) => {
        select.value()
      }
      | Self::TextArea(area) => area.value()
    }
  }

  pub fn set_value(&self, value: &str) {
    match self {
      | Self::Input(input) => {
        input.set_value(value)
      }
      | Self::Select(select) => {
        select.set_value(value)
      }
      | Self::TextArea(area) => {
        area.set_value(value)
      }
    }
  }

  pub fn element(&self) -> &HtmlElement {
    match self {
      | Self::Input(input) => input,
      | Self::Select(select) => select,
      | Self::TextArea(area) => area
    }
  }
}

pub fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
