use gloo::net::http::Request;
use snaptask_core::config::ActionsConfig;
use snaptask_core::task::TaskRequest;
use thiserror::Error;
use tracing::{
  info,
  warn
};
use web_sys::UrlSearchParams;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("failed to encode form: {0}")]
  Encode(String),
  #[error("request failed: {0}")]
  Transport(#[from] gloo::net::Error),
  #[error("server answered {status} {status_text}")]
  Status {
    status:      u16,
    status_text: String
  }
}

impl ApiError {
  pub fn user_message(&self) -> String {
    match self {
      | Self::Status {
        status, ..
      } => {
        format!(
          "The server could not process \
           the request (status {status})."
        )
      }
      | Self::Encode(_)
      | Self::Transport(_) => {
        "Could not reach the server. \
         Please try again."
          .to_string()
      }
    }
  }
}

/// Where the browser should go once the
/// server accepted a mutation; the task
/// endpoints answer with a redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
  pub url: String
}

impl Navigation {
  pub fn follow(&self) {
    let Some(window) = web_sys::window()
    else {
      return;
    };
    let location = window.location();
    let result = if self.url.is_empty() {
      location.reload()
    } else {
      location.assign(&self.url)
    };
    if let Err(error) = result {
      warn!(url = %self.url, error = ?error, "navigation failed");
    }
  }
}

#[derive(Debug, Clone)]
pub struct TaskClient {
  endpoints: ActionsConfig
}

impl TaskClient {
  pub fn new(
    endpoints: ActionsConfig
  ) -> Self {
    Self {
      endpoints
    }
  }

  /// Posts `request` as a urlencoded form.
  pub async fn send(
    &self,
    request: &TaskRequest
  ) -> Result<Navigation, ApiError> {
    let endpoint =
      request.endpoint(&self.endpoints);
    let params = UrlSearchParams::new()
      .map_err(|e| {
        ApiError::Encode(format!("{e:?}"))
      })?;
    for (name, value) in
      request.form_fields()
    {
      params.append(name, &value);
    }

    info!(
      kind = request.kind(),
      task_id = %request.task_id(),
      endpoint,
      "sending task request"
    );
    let response = Request::post(endpoint)
      .body(params)?
      .send()
      .await?;

    if !response.ok() {
      return Err(ApiError::Status {
        status:      response.status(),
        status_text: response
          .status_text()
      });
    }

    Ok(Navigation {
      url: response.url()
    })
  }
}
