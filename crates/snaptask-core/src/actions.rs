use std::time::Duration;

use tracing::{
  debug,
  info
};

use crate::config::ActionsConfig;
use crate::task::{
  TaskId,
  TaskRequest
};

/// Spinner markup shown on a completion
/// control while its request is pending.
pub const BUSY_LABEL_HTML: &str =
  "<i class=\"fas fa-spinner \
   fa-spin\"></i> Updating...";

pub const COMPLETE_ANIMATION: &str =
  "completeTask 0.5s ease";

/// Blocking yes/no prompt. The browser
/// implementation is `window.confirm`.
pub trait Confirm {
  fn confirm(
    &mut self,
    prompt: &str
  ) -> bool;
}

impl<F> Confirm for F
where
  F: FnMut(&str) -> bool
{
  fn confirm(
    &mut self,
    prompt: &str
  ) -> bool {
    self(prompt)
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum TaskAction {
  Complete,
  Delete
}

/// Where the action was triggered.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ActionOrigin {
  /// The completion button inside a
  /// task card.
  CardButton,
  /// A `window` entry point called from
  /// inline markup.
  Global
}

/// Feedback played on the card before
/// the request goes out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusyFeedback {
  pub label_html: &'static str,
  pub animation:  &'static str
}

/// What to do once the user accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPlan {
  pub request: TaskRequest,
  pub busy:    Option<BusyFeedback>,
  pub delay:   Duration
}

impl TaskAction {
  pub fn prompt<'a>(
    self,
    cfg: &'a ActionsConfig
  ) -> &'a str {
    match self {
      | Self::Complete => {
        &cfg.complete_prompt
      }
      | Self::Delete => &cfg.delete_prompt
    }
  }

  fn request(
    self,
    task_id: TaskId
  ) -> TaskRequest {
    match self {
      | Self::Complete => {
        TaskRequest::Complete(task_id)
      }
      | Self::Delete => {
        TaskRequest::Delete(task_id)
      }
    }
  }
}

/// Asks for confirmation and, if given,
/// describes the request to send. A
/// declined prompt yields `None` and
/// nothing else may happen.
#[tracing::instrument(skip(cfg, confirm), fields(task_id = %task_id))]
pub fn plan_action(
  action: TaskAction,
  origin: ActionOrigin,
  task_id: TaskId,
  cfg: &ActionsConfig,
  confirm: &mut (impl Confirm + ?Sized)
) -> Option<ActionPlan> {
  if !confirm.confirm(action.prompt(cfg))
  {
    info!(
      ?action,
      "task action declined"
    );
    return None;
  }

  let animated = action
    == TaskAction::Complete
    && origin == ActionOrigin::CardButton;

  let plan = ActionPlan {
    request: action.request(task_id),
    busy:    animated.then_some(
      BusyFeedback {
        label_html: BUSY_LABEL_HTML,
        animation:  COMPLETE_ANIMATION
      }
    ),
    delay:   if animated {
      Duration::from_millis(u64::from(
        cfg.complete_delay_ms
      ))
    } else {
      Duration::ZERO
    }
  };
  debug!(?plan, "task action confirmed");
  Some(plan)
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::{
    ActionOrigin,
    Confirm,
    TaskAction,
    plan_action
  };
  use crate::config::ActionsConfig;
  use crate::task::{
    TaskId,
    TaskRequest
  };

  fn id() -> TaskId {
    TaskId::parse("65a1").expect("id")
  }

  #[test]
  fn card_completion_is_animated_and_delayed()
   {
    let cfg = ActionsConfig::default();
    let mut prompts = vec![];
    let plan = plan_action(
      TaskAction::Complete,
      ActionOrigin::CardButton,
      id(),
      &cfg,
      &mut |p: &str| {
        prompts.push(p.to_string());
        true
      }
    )
    .expect("accepted");

    assert_eq!(
      prompts,
      vec![
        "Mark this task as complete?"
          .to_string()
      ]
    );
    assert_eq!(
      plan.request,
      TaskRequest::Complete(id())
    );
    assert!(plan.busy.is_some());
    assert_eq!(
      plan.delay,
      Duration::from_millis(500)
    );
  }

  #[test]
  fn global_actions_send_immediately() {
    let cfg = ActionsConfig::default();
    for action in [
      TaskAction::Complete,
      TaskAction::Delete
    ] {
      let plan = plan_action(
        action,
        ActionOrigin::Global,
        id(),
        &cfg,
        &mut |_: &str| true
      )
      .expect("accepted");
      assert!(plan.busy.is_none());
      assert_eq!(
        plan.delay,
        Duration::ZERO
      );
    }
  }

  #[test]
  fn boxed_confirm_can_decline() {
    let cfg = ActionsConfig::default();
    let mut confirm: Box<dyn Confirm> =
      Box::new(|_: &str| false);
    assert!(
      plan_action(
        TaskAction::Complete,
        ActionOrigin::CardButton,
        id(),
        &cfg,
        &mut *confirm
      )
      .is_none()
    );
  }

  #[test]
  fn delete_uses_irreversible_prompt() {
    let cfg = ActionsConfig::default();
    let mut seen = String::new();
    let _ = plan_action(
      TaskAction::Delete,
      ActionOrigin::Global,
      id(),
      &cfg,
      &mut |p: &str| {
        seen = p.to_string();
        false
      }
    );
    assert!(
      seen.contains("cannot be undone")
    );
  }
}
