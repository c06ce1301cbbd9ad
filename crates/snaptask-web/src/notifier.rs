use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use snaptask_core::config::NotificationConfig;
use snaptask_core::notify::{
  NoticeId,
  NotificationCenter,
  Severity
};
use tracing::{
  debug,
  warn
};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use yew::{
  AppHandle,
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use crate::dom;

#[derive(Properties, PartialEq)]
pub struct NotificationBannerProps {
  pub message:  String,
  pub severity: Severity,
  pub on_close: Callback<()>
}

#[function_component(NotificationBanner)]
pub fn notification_banner(
  props: &NotificationBannerProps
) -> Html {
  let onclick = {
    let on_close = props.on_close.clone();
    Callback::from(
      move |_: web_sys::MouseEvent| {
        on_close.emit(());
      }
    )
  };

  html! {
      <div class="notification-content">
          <i class={format!("fas fa-{}", props.severity.icon())}></i>
          <span>{ &props.message }</span>
          <button class="notification-close" {onclick}>
              <i class="fas fa-times"></i>
          </button>
      </div>
  }
}

fn banner_css(severity: Severity) -> String {
  format!(
    "position: fixed; top: 20px; right: \
     20px; background: white; \
     border-radius: 10px; padding: 1rem \
     1.5rem; box-shadow: 0 10px 30px \
     rgba(0,0,0,0.2); z-index: 10000; \
     max-width: 400px; border-left: 4px \
     solid {}; animation: slideInRight \
     0.3s ease;",
    severity.accent()
  )
}

struct Mounted {
  id:     NoticeId,
  host:   HtmlElement,
  app:    AppHandle<NotificationBanner>,
  timers: Vec<Timeout>
}

impl Mounted {
  fn unmount(self) {
    self.host.remove();
    let app = self.app;
    // The close button's own handler can
    // land here; let yew finish it first.
    wasm_bindgen_futures::spawn_local(
      async move {
        app.destroy();
      }
    );
    drop(self.timers);
  }
}

struct Inner {
  cfg:     NotificationConfig,
  center:  NotificationCenter,
  mounted: Option<Mounted>
}

/// Shows at most one banner; a new one
/// replaces whatever is on screen.
#[derive(Clone)]
pub struct Notifier {
  inner: Rc<RefCell<Inner>>
}

impl Notifier {
  pub fn new(
    cfg: NotificationConfig
  ) -> Self {
    Self {
      inner: Rc::new(RefCell::new(Inner {
        cfg,
        center: NotificationCenter::default(
        ),
        mounted: None
      }))
    }
  }

  pub fn notify(
    &self,
    message: &str,
    severity: Severity
  ) {
    let Some(document) = dom::document()
    else {
      warn!(
        message,
        "no document; dropping \
         notification"
      );
      return;
    };
    let Some(body) = document.body()
    else {
      warn!(
        message,
        "no body; dropping notification"
      );
      return;
    };

    let (shown, previous, display_ms) = {
      let mut inner =
        self.inner.borrow_mut();
      let shown = inner
        .center
        .show(message, severity);
      let previous = inner.mounted.take();
      (
        shown,
        previous,
        inner.cfg.display_ms
      )
    };
    if let Some(previous) = previous {
      previous.unmount();
    }
    for stray in dom::query_all(
      &document,
      ".notification"
    ) {
      stray.remove();
    }

    let host = match document
      .create_element("div")
      .ok()
      .and_then(|el| {
        el.dyn_into::<HtmlElement>().ok()
      }) {
      | Some(host) => host,
      | None => {
        warn!(
          "failed to create notification \
           host"
        );
        return;
      }
    };
    host.set_class_name(&format!(
      "notification notification-{severity}"
    ));
    host
      .style()
      .set_css_text(&banner_css(severity));
    if let Err(error) =
      body.append_child(&host)
    {
      warn!(error = ?error, "failed to attach notification");
      return;
    }

    let id = shown.id;
    let on_close = {
      let this = self.clone();
      Callback::from(move |()| {
        this.remove(id);
      })
    };
    let app =
      yew::Renderer::<NotificationBanner>::with_root_and_props(
        host.clone().into(),
        NotificationBannerProps {
          message: message.to_string(),
          severity,
          on_close
        }
      )
      .render();

    let exit_timer = {
      let this = self.clone();
      Timeout::new(display_ms, move || {
        this.begin_exit(id);
      })
    };

    self.inner.borrow_mut().mounted =
      Some(Mounted {
        id,
        host,
        app,
        timers: vec![exit_timer]
      });
    dom::ui_debug(
      "notification.show",
      message
    );
  }

  fn begin_exit(&self, id: NoticeId) {
    let mut inner = self.inner.borrow_mut();
    if !inner.center.begin_exit(id) {
      return;
    }
    let exit_ms = inner.cfg.exit_ms;
    let Some(mounted) =
      inner.mounted.as_mut()
    else {
      return;
    };
    dom::set_style(
      &mounted.host,
      "animation",
      "slideOutRight 0.3s ease"
    );
    let this = self.clone();
    mounted.timers.push(Timeout::new(
      exit_ms,
      move || {
        this.remove(id);
      }
    ));
    debug!(?id, "notification leaving");
  }

  /// Removes the banner for `id` if it is
  /// still the active one.
  pub fn remove(&self, id: NoticeId) {
    let mounted = {
      let mut inner =
        self.inner.borrow_mut();
      if !inner.center.remove(id) {
        return;
      }
      inner
        .mounted
        .take_if(|mounted| mounted.id == id)
    };
    if let Some(mounted) = mounted {
      mounted.unmount();
    }
  }

  pub fn active(&self) -> Option<NoticeId> {
    self
      .inner
      .borrow()
      .center
      .active()
      .map(|notice| notice.id)
  }
}
