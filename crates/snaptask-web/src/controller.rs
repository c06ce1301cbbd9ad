//! The single owner of every page
//! handler. Built once at startup; the
//! `window` globals delegate to it.

use std::rc::Rc;

use gloo::events::{
  EventListener,
  EventListenerOptions
};
use snaptask_core::PageConfig;
use snaptask_core::actions::TaskAction;
use snaptask_core::notify::Severity;
use snaptask_core::task::TaskRequest;
use tracing::{
  debug,
  info,
  warn
};
use wasm_bindgen::JsCast;
use web_sys::{
  Document,
  HtmlElement
};

use crate::actions::{
  CardTarget,
  TaskActions
};
use crate::bindings::{
  BindingError,
  PageBindings
};
use crate::edit::EditDialog;
use crate::effects::{
  self,
  Reveal
};
use crate::notifier::Notifier;
use crate::search::SearchFilter;
use crate::upload::UploadHandler;
use crate::{
  dom,
  dropzone,
  forms
};

pub struct PageController {
  notifier:  Notifier,
  actions:   Rc<TaskActions>,
  edit:      Option<Rc<EditDialog>>,
  upload:    Option<Rc<UploadHandler>>,
  search:    Option<Rc<SearchFilter>>,
  listeners: Vec<EventListener>,
  _reveal:   Option<Reveal>
}

impl PageController {
  /// Resolves the page markup and wires
  /// every handler. Fails only when a
  /// group of elements is half present.
  #[tracing::instrument(skip_all)]
  pub fn mount(
    document: &Document,
    config: PageConfig
  ) -> Result<Rc<Self>, BindingError> {
    effects::install_stylesheet(document);
    let bindings =
      PageBindings::resolve(document)?;

    let notifier = Notifier::new(
      config.notifications.clone()
    );
    let actions = TaskActions::new(
      config.actions.clone(),
      notifier.clone()
    );
    let edit = bindings.edit.map(|b| {
      EditDialog::new(b, config.modal.clone())
    });
    let upload = bindings.upload.map(|b| {
      UploadHandler::new(
        b,
        config.upload.clone(),
        notifier.clone()
      )
    });
    let search = bindings.search.map(|input| {
      SearchFilter::new(
        input,
        config.search.clone()
      )
    });

    let mut listeners = vec![];
    listeners.extend(validate_on_submit(
      document, &notifier
    ));
    if let Some(upload) = &upload {
      let handler = Rc::clone(upload);
      listeners.push(EventListener::new(
        upload.input(),
        "change",
        move |_| handler.on_change()
      ));
    }
    listeners.extend(dropzone::attach(document));
    if let Some(search) = &search {
      let filter = Rc::clone(search);
      listeners.push(EventListener::new(
        search.input(),
        "input",
        move |_| filter.on_input()
      ));
    }
    listeners.extend(complete_buttons(
      document, &actions
    ));
    if let Some(edit) = &edit {
      listeners.extend(edit_listeners(
        edit, &actions, &notifier
      ));
    }
    listeners
      .extend(effects::smooth_anchors(document));
    let reveal = effects::reveal_cards(
      document,
      &config.reveal
    );

    info!(
      listeners = listeners.len(),
      upload = upload.is_some(),
      edit = edit.is_some(),
      search = search.is_some(),
      "page controller mounted"
    );

    Ok(Rc::new(Self {
      notifier,
      actions,
      edit,
      upload,
      search,
      listeners,
      _reveal: reveal
    }))
  }

  pub fn notify(
    &self,
    message: &str,
    severity: Severity
  ) {
    self.notifier.notify(message, severity);
  }

  pub fn mark_complete(&self, raw_id: &str) {
    self.actions.trigger(
      TaskAction::Complete,
      raw_id,
      None
    );
  }

  pub fn delete_task(&self, raw_id: &str) {
    self.actions.trigger(
      TaskAction::Delete,
      raw_id,
      None
    );
  }

  pub fn edit_task(&self, raw_id: &str) {
    match &self.edit {
      | Some(edit) => edit.open(raw_id),
      | None => {
        warn!(raw_id, "no edit modal on page");
      }
    }
  }

  pub fn close_modal(&self) {
    if let Some(edit) = &self.edit {
      edit.close();
    }
  }

  pub fn has_upload(&self) -> bool {
    self.upload.is_some()
  }

  pub fn has_search(&self) -> bool {
    self.search.is_some()
  }

  pub fn listener_count(&self) -> usize {
    self.listeners.len()
  }
}

fn validate_on_submit(
  document: &Document,
  notifier: &Notifier
) -> Vec<EventListener> {
  dom::query_all(document, "form")
    .into_iter()
    .map(|form| {
      let target = form.clone();
      let notifier = notifier.clone();
      EventListener::new_with_options(
        &form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
          let report =
            forms::validate_form(&target);
          if let Some(summary) =
            report.summary()
          {
            event.prevent_default();
            notifier
              .notify(summary, Severity::Error);
          }
        }
      )
    })
    .collect()
}

fn complete_buttons(
  document: &Document,
  actions: &Rc<TaskActions>
) -> Vec<EventListener> {
  let mut listeners = vec![];
  for card in
    dom::query_all(document, ".task-card")
  {
    let Some(button) =
      dom::query_within(&card, ".btn-success")
    else {
      continue;
    };
    let Ok(card) = card.dyn_into::<HtmlElement>()
    else {
      continue;
    };
    let actions = Rc::clone(actions);
    let clicked = button.clone();
    listeners.push(
      EventListener::new_with_options(
        &button,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
          event.prevent_default();
          let Some(raw_id) =
            card.get_attribute("data-task-id")
          else {
            return;
          };
          actions.trigger(
            TaskAction::Complete,
            &raw_id,
            Some(CardTarget {
              card:   card.clone(),
              button: clicked.clone()
            })
          );
        }
      )
    );
  }
  debug!(
    buttons = listeners.len(),
    "wired card completion buttons"
  );
  listeners
}

/// Backdrop clicks close the modal. A
/// form inside the modal without an
/// `action` is sent as an update request.
fn edit_listeners(
  edit: &Rc<EditDialog>,
  actions: &Rc<TaskActions>,
  notifier: &Notifier
) -> Vec<EventListener> {
  let mut listeners = vec![];

  if let Some(window) = web_sys::window() {
    let dialog = Rc::clone(edit);
    listeners.push(EventListener::new(
      &window,
      "click",
      move |event| {
        if dialog.is_backdrop(
          event.target().as_ref()
        ) {
          dialog.close();
        }
      }
    ));
  }

  let form = dom::query_within(
    edit.modal(),
    "form"
  )
  .filter(|form| {
    !form.has_attribute("action")
  });
  if let Some(form) = form {
    let dialog = Rc::clone(edit);
    let actions = Rc::clone(actions);
    let notifier = notifier.clone();
    listeners.push(
      EventListener::new_with_options(
        &form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
          if event.default_prevented() {
            return;
          }
          event.prevent_default();
          match dialog.staged_update() {
            | Ok(update) => {
              dom::ui_debug(
                "edit.submit",
                update.task_id.as_str()
              );
              actions.submit(
                TaskRequest::Update(update)
              );
            }
            | Err(error) => {
              warn!(%error, "edit draft rejected");
              notifier.notify(
                &error.to_string(),
                Severity::Error
              );
            }
          }
        }
      )
    );
  }
  listeners
}
