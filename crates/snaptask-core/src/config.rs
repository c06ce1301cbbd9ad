use anyhow::Context;
use serde::Deserialize;
use tracing::{
  debug,
  error,
  info,
  warn
};

const PAGE_CONFIG_TOML: &str =
  include_str!("../assets/page.toml");

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
pub struct PageConfig {
  #[serde(default = "default_version")]
  pub version:       u32,
  #[serde(default)]
  pub upload:        UploadConfig,
  #[serde(default)]
  pub search:        SearchConfig,
  #[serde(default)]
  pub actions:       ActionsConfig,
  #[serde(default)]
  pub notifications: NotificationConfig,
  #[serde(default)]
  pub modal:         ModalConfig,
  #[serde(default)]
  pub reveal:        RevealConfig
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct UploadConfig {
  pub max_bytes:            u64,
  pub accepted_mime_prefix: String
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct SearchConfig {
  pub debounce_ms:     u32,
  pub min_query_chars: usize
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct ActionsConfig {
  pub complete_endpoint: String,
  pub delete_endpoint:   String,
  pub update_endpoint:   String,
  pub complete_delay_ms: u32,
  pub complete_prompt:   String,
  pub delete_prompt:     String
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct NotificationConfig {
  pub display_ms: u32,
  pub exit_ms:    u32
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct ModalConfig {
  pub exit_ms: u32
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct RevealConfig {
  pub threshold:   f64,
  pub root_margin: String,
  pub selectors:   String
}

fn default_version() -> u32 {
  1
}

impl Default for PageConfig {
  fn default() -> Self {
    Self {
      version:       default_version(),
      upload:        UploadConfig::default(),
      search:        SearchConfig::default(),
      actions:       ActionsConfig::default(),
      notifications:
        NotificationConfig::default(),
      modal:         ModalConfig::default(),
      reveal:        RevealConfig::default()
    }
  }
}

impl Default for UploadConfig {
  fn default() -> Self {
    Self {
      max_bytes:            10
        * 1024
        * 1024,
      accepted_mime_prefix: "image/"
        .to_string()
    }
  }
}

impl Default for SearchConfig {
  fn default() -> Self {
    Self {
      debounce_ms:     300,
      min_query_chars: 2
    }
  }
}

impl Default for ActionsConfig {
  fn default() -> Self {
    Self {
      complete_endpoint: "/tasks/complete"
        .to_string(),
      delete_endpoint:   "/tasks/delete"
        .to_string(),
      update_endpoint:   "/tasks/update"
        .to_string(),
      complete_delay_ms: 500,
      complete_prompt:
        "Mark this task as complete?"
          .to_string(),
      delete_prompt:
        "Are you sure you want to \
         delete this task? This action \
         cannot be undone."
          .to_string()
    }
  }
}

impl Default for NotificationConfig {
  fn default() -> Self {
    Self {
      display_ms: 5_000,
      exit_ms:    300
    }
  }
}

impl Default for ModalConfig {
  fn default() -> Self {
    Self {
      exit_ms: 300
    }
  }
}

impl Default for RevealConfig {
  fn default() -> Self {
    Self {
      threshold:   0.1,
      root_margin: "0px 0px -50px 0px"
        .to_string(),
      selectors:   ".stat-card, \
                    .feature-card, \
                    .task-card, \
                    .action-card"
        .to_string()
    }
  }
}

impl PageConfig {
  /// Loads the embedded defaults. A
  /// broken embedded file falls back to
  /// the compiled-in defaults.
  pub fn load() -> Self {
    match Self::from_toml_str(
      PAGE_CONFIG_TOML
    ) {
      | Ok(config) => {
        info!(
          version = config.version,
          debounce_ms =
            config.search.debounce_ms,
          max_upload_bytes =
            config.upload.max_bytes,
          "loaded page config"
        );
        config
      }
      | Err(error) => {
        error!(error = %format!("{error:#}"), "failed to parse embedded page config; using defaults");
        Self::default()
      }
    }
  }

  #[tracing::instrument(skip(text))]
  pub fn from_toml_str(
    text: &str
  ) -> anyhow::Result<Self> {
    let mut config =
      toml::from_str::<PageConfig>(text)
        .context(
          "invalid page config toml"
        )?;
    config.sanitize();
    Ok(config)
  }

  fn sanitize(&mut self) {
    let defaults = Self::default();

    if self.search.min_query_chars == 0 {
      warn!(
        "search.min_query_chars was \
         0; using 1"
      );
      self.search.min_query_chars = 1;
    }

    if self.upload.max_bytes == 0 {
      warn!(
        "upload.max_bytes was 0; \
         using default"
      );
      self.upload.max_bytes =
        defaults.upload.max_bytes;
    }

    if self
      .upload
      .accepted_mime_prefix
      .trim()
      .is_empty()
    {
      self.upload.accepted_mime_prefix =
        defaults
          .upload
          .accepted_mime_prefix
          .clone();
    }

    for (name, endpoint, fallback) in [
      (
        "complete_endpoint",
        &mut self
          .actions
          .complete_endpoint,
        &defaults
          .actions
          .complete_endpoint
      ),
      (
        "delete_endpoint",
        &mut self.actions.delete_endpoint,
        &defaults.actions.delete_endpoint
      ),
      (
        "update_endpoint",
        &mut self.actions.update_endpoint,
        &defaults.actions.update_endpoint
      )
    ] {
      if endpoint.trim().is_empty() {
        warn!(
          name,
          "empty endpoint; using \
           default"
        );
        endpoint.clone_from(fallback);
      }
    }

    for (name, timing, fallback) in [
      (
        "search.debounce_ms",
        &mut self.search.debounce_ms,
        defaults.search.debounce_ms
      ),
      (
        "actions.complete_delay_ms",
        &mut self.actions.complete_delay_ms,
        defaults.actions.complete_delay_ms
      ),
      (
        "notifications.display_ms",
        &mut self.notifications.display_ms,
        defaults.notifications.display_ms
      ),
      (
        "notifications.exit_ms",
        &mut self.notifications.exit_ms,
        defaults.notifications.exit_ms
      ),
      (
        "modal.exit_ms",
        &mut self.modal.exit_ms,
        defaults.modal.exit_ms
      )
    ] {
      if *timing == 0 {
        warn!(
          name,
          fallback,
          "zero timing; using default"
        );
        *timing = fallback;
      }
    }

    if !(0.0..=1.0)
      .contains(&self.reveal.threshold)
    {
      warn!(
        threshold =
          self.reveal.threshold,
        "reveal.threshold out of \
         range; using default"
      );
      self.reveal.threshold =
        defaults.reveal.threshold;
    }

    debug!(?self, "sanitized page config");
  }
}
