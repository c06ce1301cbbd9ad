//! Browser glue for the SnapTask pages.
//! One [`PageController`] is mounted when
//! the document is ready and the legacy
//! `window` globals delegate to it.

pub mod actions;
pub mod api;
pub mod bindings;
pub mod controller;
pub mod dom;
pub mod dropzone;
pub mod edit;
pub mod effects;
pub mod forms;
pub mod notifier;
pub mod search;
pub mod upload;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use snaptask_core::{
  PageConfig,
  Severity
};
use tracing::{
  error,
  info,
  warn
};
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::Document;

pub use controller::PageController;

const CONFIG_ELEMENT_ID: &str =
  "snaptask-config";

thread_local! {
  static CONTROLLER: RefCell<Option<Rc<PageController>>> =
    const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  let Some(document) = dom::document()
  else {
    error!("no document; snaptask not started");
    return;
  };

  install_globals();

  if document.ready_state() == "loading" {
    EventListener::once(
      &document,
      "DOMContentLoaded",
      |_| {
        if let Some(document) =
          dom::document()
        {
          boot(&document);
        }
      }
    )
    .forget();
  } else {
    boot(&document);
  }
}

/// Embedded defaults, replaced by a
/// `<script type="application/toml"
/// id="snaptask-config">` block when the
/// page has a valid one.
pub fn load_config(
  document: &Document
) -> PageConfig {
  let Some(raw) = document
    .get_element_by_id(CONFIG_ELEMENT_ID)
    .and_then(|el| el.text_content())
  else {
    return PageConfig::load();
  };
  match PageConfig::from_toml_str(&raw) {
    | Ok(config) => {
      info!(
        version = config.version,
        "using page config override"
      );
      config
    }
    | Err(err) => {
      warn!(error = %format!("{err:#}"), "ignoring page config override");
      PageConfig::load()
    }
  }
}

fn boot(document: &Document) {
  let config = load_config(document);
  match PageController::mount(
    document, config
  ) {
    | Ok(controller) => {
      CONTROLLER.with(|slot| {
        *slot.borrow_mut() =
          Some(controller);
      });
      dom::ui_debug("page.mounted", "ok");
    }
    | Err(err) => {
      error!(error = %err, "page markup rejected; snaptask disabled");
    }
  }
}

fn with_controller(
  name: &str,
  f: impl FnOnce(&PageController)
) {
  let controller = CONTROLLER.with(|slot| {
    slot.borrow().as_ref().map(Rc::clone)
  });
  match controller {
    | Some(controller) => f(&controller),
    | None => {
      warn!(name, "called before the page controller mounted");
    }
  }
}

/// Task ids arrive as strings or as
/// numbers depending on the template.
fn arg_text(value: &JsValue) -> String {
  value
    .as_string()
    .or_else(|| {
      value.as_f64().map(|n| n.to_string())
    })
    .unwrap_or_default()
}

fn set_global(
  window: &web_sys::Window,
  name: &str,
  value: &JsValue
) {
  if let Err(error) = js_sys::Reflect::set(
    window,
    &JsValue::from_str(name),
    value
  ) {
    warn!(name, error = ?error, "failed to install global");
  }
}

fn install_globals() {
  let Some(window) = web_sys::window()
  else {
    return;
  };

  let task_globals: [(
    &'static str,
    fn(&PageController, &str)
  ); 3] = [
    ("markComplete", |c, id| {
      c.mark_complete(id)
    }),
    ("deleteTask", |c, id| c.delete_task(id)),
    ("editTask", |c, id| c.edit_task(id))
  ];
  for (name, call) in task_globals {
    let closure = Closure::<dyn Fn(JsValue)>::new(
      move |id: JsValue| {
        let id = arg_text(&id);
        with_controller(name, |c| call(c, &id));
      }
    );
    set_global(&window, name, closure.as_ref());
    closure.forget();
  }

  let show = Closure::<dyn Fn(JsValue, JsValue)>::new(
    |message: JsValue, kind: JsValue| {
      let message = arg_text(&message);
      let severity = Severity::from_label(
        &kind.as_string().unwrap_or_default()
      );
      with_controller(
        "showNotification",
        |c| c.notify(&message, severity)
      );
    }
  );
  set_global(
    &window,
    "showNotification",
    show.as_ref()
  );
  show.forget();

  let close = Closure::<dyn Fn()>::new(|| {
    with_controller("closeModal", |c| {
      c.close_modal()
    });
  });
  set_global(
    &window,
    "closeModal",
    close.as_ref()
  );
  close.forget();

  info!("installed window globals");
}
