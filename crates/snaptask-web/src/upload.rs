use std::cell::RefCell;
use std::rc::Rc;

use gloo::file::callbacks::{
  FileReader,
  read_as_data_url
};
use gloo::file::FileReadError;
use snaptask_core::config::UploadConfig;
use snaptask_core::notify::Severity;
use snaptask_core::upload::{
  PreviewUpdate,
  ReadTicket,
  SelectedFile,
  UploadState
};
use tracing::{
  error,
  info
};

use crate::bindings::UploadBindings;
use crate::dom;
use crate::notifier::Notifier;

pub struct UploadHandler {
  bindings: UploadBindings,
  cfg:      UploadConfig,
  notifier: Notifier,
  state:    RefCell<UploadState>,
  reader:   RefCell<Option<FileReader>>
}

impl UploadHandler {
  pub fn new(
    bindings: UploadBindings,
    cfg: UploadConfig,
    notifier: Notifier
  ) -> Rc<Self> {
    Rc::new(Self {
      bindings,
      cfg,
      notifier,
      state: RefCell::new(
        UploadState::default()
      ),
      reader: RefCell::new(None)
    })
  }

  pub fn input(
    &self
  ) -> &web_sys::HtmlInputElement {
    &self.bindings.input
  }

  /// `change` on the file input.
  pub fn on_change(self: &Rc<Self>) {
    let Some(file) = self
      .bindings
      .input
      .files()
      .and_then(|files| files.get(0))
    else {
      return;
    };

    let selected = SelectedFile {
      name:      file.name(),
      mime_type: file.type_(),
      size:      file.size() as u64
    };
    let result = self
      .state
      .borrow_mut()
      .select(selected, &self.cfg);

    let ticket = match result {
      | Ok(ticket) => ticket,
      | Err(rejection) => {
        // Superseded reads must not finish.
        self.reader.borrow_mut().take();
        self
          .notifier
          .notify(&rejection.to_string(), Severity::Error);
        self.bindings.input.set_value("");
        return;
      }
    };

    let blob = gloo::file::File::from(file);
    let this = Rc::clone(self);
    let reader = read_as_data_url(
      &blob,
      move |result| {
        this.on_read(ticket, result);
      }
    );
    *self.reader.borrow_mut() = Some(reader);
  }

  fn on_read(
    &self,
    ticket: ReadTicket,
    result: Result<String, FileReadError>
  ) {
    match result {
      | Ok(data_url) => {
        let update = self
          .state
          .borrow_mut()
          .finish_read(ticket, data_url);
        if let Some(update) = update {
          self.render_preview(&update);
        }
      }
      | Err(error) => {
        let active = self
          .state
          .borrow_mut()
          .abandon_read(ticket);
        if !active {
          return;
        }
        error!(error = ?error, "failed to read selected file");
        self.notifier.notify(
          "Could not read the selected \
           file.",
          Severity::Error
        );
        self.bindings.input.set_value("");
      }
    }
  }

  fn render_preview(
    &self,
    update: &PreviewUpdate
  ) {
    let b = &self.bindings;
    b.preview_image.set_src(&update.image_src);
    b.file_name
      .set_text_content(Some(&update.file_name));
    dom::hide(&b.upload_area);
    dom::show(&b.preview);
    dom::set_style(
      &b.preview,
      "animation",
      "slideIn 0.5s ease"
    );
    dom::set_disabled(
      &b.upload_button,
      !update.submit_enabled
    );
    info!(file = %update.file_name, "showing upload preview");
  }
}
