use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use snaptask_core::actions::{
  ActionOrigin,
  ActionPlan,
  BusyFeedback,
  Confirm,
  TaskAction,
  plan_action
};
use snaptask_core::config::ActionsConfig;
use snaptask_core::notify::Severity;
use snaptask_core::task::{
  TaskId,
  TaskRequest
};
use tracing::{
  error,
  warn
};
use web_sys::{
  Element,
  HtmlElement
};

use crate::api::TaskClient;
use crate::dom;
use crate::notifier::Notifier;

/// `window.confirm`. A missing window
/// counts as "no".
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
  fn confirm(
    &mut self,
    prompt: &str
  ) -> bool {
    web_sys::window()
      .and_then(|window| {
        window
          .confirm_with_message(prompt)
          .ok()
      })
      .unwrap_or(false)
  }
}

/// A card and the completion control
/// that was clicked inside it.
pub struct CardTarget {
  pub card:   HtmlElement,
  pub button: Element
}

/// Undoes the busy state if the request
/// fails.
struct BusyGuard {
  button:        Element,
  original_html: String
}

impl CardTarget {
  fn enter_busy(
    self,
    busy: &BusyFeedback
  ) -> BusyGuard {
    let original_html =
      self.button.inner_html();
    self.button.set_inner_html(busy.label_html);
    dom::set_disabled(&self.button, true);
    dom::set_style(
      &self.card,
      "animation",
      busy.animation
    );
    BusyGuard {
      button: self.button,
      original_html
    }
  }
}

impl BusyGuard {
  fn restore(self) {
    self
      .button
      .set_inner_html(&self.original_html);
    dom::set_disabled(&self.button, false);
  }
}

pub struct TaskActions {
  cfg:      ActionsConfig,
  client:   TaskClient,
  notifier: Notifier,
  confirm:  RefCell<Box<dyn Confirm>>
}

impl TaskActions {
  /// Asks through `window.confirm`.
  pub fn new(
    cfg: ActionsConfig,
    notifier: Notifier
  ) -> Rc<Self> {
    Self::with_confirm(
      cfg,
      notifier,
      BrowserConfirm
    )
  }

  pub fn with_confirm(
    cfg: ActionsConfig,
    notifier: Notifier,
    confirm: impl Confirm + 'static
  ) -> Rc<Self> {
    Rc::new(Self {
      client: TaskClient::new(cfg.clone()),
      cfg,
      notifier,
      confirm: RefCell::new(Box::new(
        confirm
      ))
    })
  }

  /// Runs a completion or deletion. With
  /// a card target the completion plays
  /// its busy feedback first.
  pub fn trigger(
    self: &Rc<Self>,
    action: TaskAction,
    raw_id: &str,
    target: Option<CardTarget>
  ) {
    let task_id = match TaskId::parse(raw_id)
    {
      | Ok(id) => id,
      | Err(error) => {
        warn!(%error, ?action, "ignoring task action without id");
        return;
      }
    };
    let origin = if target.is_some() {
      ActionOrigin::CardButton
    } else {
      ActionOrigin::Global
    };

    let plan = {
      let mut confirm =
        self.confirm.borrow_mut();
      plan_action(
        action,
        origin,
        task_id,
        &self.cfg,
        &mut **confirm
      )
    };
    let Some(ActionPlan {
      request,
      busy,
      delay
    }) = plan
    else {
      return;
    };
    dom::ui_debug(
      "action.confirmed",
      request.kind()
    );

    let guard = match (busy, target) {
      | (Some(busy), Some(target)) => {
        Some(target.enter_busy(&busy))
      }
      | _ => None
    };

    let this = Rc::clone(self);
    let send = move || {
      wasm_bindgen_futures::spawn_local(
        async move {
          this.send(request, guard).await;
        }
      );
    };

    if delay.is_zero() {
      send();
    } else {
      let millis = u32::try_from(
        delay.as_millis()
      )
      .unwrap_or(u32::MAX);
      Timeout::new(millis, send).forget();
    }
  }

  /// Sends an already confirmed request,
  /// e.g. the edit form's update.
  pub fn submit(
    self: &Rc<Self>,
    request: TaskRequest
  ) {
    let this = Rc::clone(self);
    wasm_bindgen_futures::spawn_local(
      async move {
        this.send(request, None).await;
      }
    );
  }

  async fn send(
    &self,
    request: TaskRequest,
    guard: Option<BusyGuard>
  ) {
    match self.client.send(&request).await
    {
      | Ok(navigation) => navigation.follow(),
      | Err(err) => {
        error!(error = %err, kind = request.kind(), task_id = %request.task_id(), "task request failed");
        if let Some(guard) = guard {
          guard.restore();
        }
        self.notifier.notify(
          &err.user_message(),
          Severity::Error
        );
      }
    }
  }
}
