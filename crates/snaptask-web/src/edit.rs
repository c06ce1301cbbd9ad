use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use snaptask_core::config::ModalConfig;
use snaptask_core::edit::{
  CardFields,
  DraftError,
  EditDraft,
  ModalState
};
use snaptask_core::task::{
  TaskId,
  TaskUpdate
};
use tracing::{
  debug,
  info,
  warn
};
use wasm_bindgen::JsCast;
use web_sys::{
  EventTarget,
  Node
};

use crate::bindings::EditModalBindings;
use crate::dom::{
  self,
  FormField
};

pub struct EditDialog {
  bindings: EditModalBindings,
  cfg:      ModalConfig,
  state:    RefCell<ModalState>
}

fn stage(
  field: Option<&FormField>,
  value: Option<&str>
) {
  if let (Some(field), Some(value)) =
    (field, value)
  {
    field.set_value(value);
  }
}

impl EditDialog {
  pub fn new(
    bindings: EditModalBindings,
    cfg: ModalConfig
  ) -> Rc<Self> {
    Rc::new(Self {
      bindings,
      cfg,
      state: RefCell::new(
        ModalState::default()
      )
    })
  }

  pub fn modal(&self) -> &web_sys::HtmlElement {
    &self.bindings.modal
  }

  /// Copies the card for `raw_id` into
  /// the modal inputs and shows it.
  #[tracing::instrument(skip(self))]
  pub fn open(&self, raw_id: &str) {
    let Ok(task_id) = TaskId::parse(raw_id)
    else {
      warn!("edit requested without a task id");
      return;
    };
    let Some(document) = dom::document()
    else {
      return;
    };
    let Some(card) = dom::find_task_card(
      &document,
      task_id.as_str()
    ) else {
      warn!(%task_id, "no card for task; edit skipped");
      return;
    };

    let fields = CardFields {
      title:    dom::text_within(
        &card,
        ".task-title"
      ),
      date:     dom::text_within(
        &card,
        ".task-date"
      ),
      priority: dom::text_within(
        &card,
        ".task-priority"
      ),
      status:   dom::text_within(
        &card,
        ".task-status"
      )
    };
    let draft =
      EditDraft::from_card(task_id, &fields);

    let b = &self.bindings;
    stage(
      b.task_id.as_ref(),
      Some(draft.task_id.as_str())
    );
    stage(
      b.title.as_ref(),
      draft.title.as_deref()
    );
    stage(
      b.date.as_ref(),
      draft.date.as_deref()
    );
    stage(
      b.priority.as_ref(),
      draft.priority.as_deref()
    );
    stage(
      b.status.as_ref(),
      draft.status.as_deref()
    );

    self.state.borrow_mut().open();
    dom::show(&b.modal);
    dom::set_style(
      &b.modal,
      "animation",
      "slideIn 0.3s ease"
    );
    info!(task_id = %draft.task_id, "opened edit modal");
  }

  /// Plays the exit transition, then
  /// hides the modal unless it was
  /// reopened meanwhile.
  pub fn close(self: &Rc<Self>) {
    let ticket =
      self.state.borrow_mut().begin_close();
    dom::set_style(
      &self.bindings.modal,
      "animation",
      "slideOut 0.3s ease"
    );
    let this = Rc::clone(self);
    Timeout::new(
      self.cfg.exit_ms,
      move || {
        if this
          .state
          .borrow_mut()
          .finish_close(ticket)
        {
          dom::hide(&this.bindings.modal);
          debug!("edit modal hidden");
        }
      }
    )
    .forget();
  }

  /// True when a click landed on the
  /// modal backdrop itself rather than
  /// its content.
  pub fn is_backdrop(
    &self,
    target: Option<&EventTarget>
  ) -> bool {
    target
      .and_then(|t| t.dyn_ref::<Node>())
      .is_some_and(|node| {
        self
          .bindings
          .modal
          .is_same_node(Some(node))
      })
  }

  /// Reads the modal inputs back into an
  /// update request.
  pub fn staged_update(
    &self
  ) -> Result<TaskUpdate, DraftError> {
    let b = &self.bindings;
    let value = |field: &Option<FormField>| {
      field.as_ref().map(FormField::value)
    };
    let task_id = value(&b.task_id)
      .and_then(|raw| TaskId::parse(&raw).ok())
      .ok_or(DraftError::Missing(
        "task id"
      ))?;
    let draft = EditDraft {
      task_id,
      title: value(&b.title),
      date: value(&b.date),
      priority: value(&b.priority),
      status: value(&b.status)
    };
    draft.into_update(
      value(&b.description)
    )
  }
}
