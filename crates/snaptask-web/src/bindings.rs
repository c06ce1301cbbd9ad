//! Elements the controller drives,
//! resolved once at startup.
//!
//! Each feature is a group of ids. A
//! group that is entirely absent means
//! the feature is not on this page; a
//! group that is only partly present is
//! a layout error and stops startup.

use thiserror::Error;
use tracing::{
  debug,
  warn
};
use wasm_bindgen::JsCast;
use web_sys::{
  Document,
  Element,
  HtmlElement,
  HtmlImageElement,
  HtmlInputElement
};

use crate::dom::FormField;

#[derive(Debug, Error)]
pub enum BindingError {
  #[error("#{id} is not a {expected}")]
  WrongType {
    id:       &'static str,
    expected: &'static str
  },
  #[error(
    "{group} markup is incomplete; \
     missing {missing:?}"
  )]
  Incomplete {
    group:   &'static str,
    missing: Vec<&'static str>
  }
}

#[derive(Debug, Clone)]
pub struct UploadBindings {
  pub input:         HtmlInputElement,
  pub preview:       HtmlElement,
  pub preview_image: HtmlImageElement,
  pub file_name:     HtmlElement,
  pub upload_area:   HtmlElement,
  pub upload_button: Element
}

/// The modal is the anchor of the group.
/// Individual inputs are optional and
/// skipped with a warning when absent.
#[derive(Debug, Clone)]
pub struct EditModalBindings {
  pub modal:       HtmlElement,
  pub task_id:     Option<FormField>,
  pub title:       Option<FormField>,
  pub date:        Option<FormField>,
  pub priority:    Option<FormField>,
  pub status:      Option<FormField>,
  pub description: Option<FormField>
}

#[derive(Debug, Clone, Default)]
pub struct PageBindings {
  pub upload: Option<UploadBindings>,
  pub edit:   Option<EditModalBindings>,
  pub search: Option<HtmlInputElement>
}

fn by_id<T: JsCast>(
  document: &Document,
  id: &'static str,
  expected: &'static str
) -> Result<Option<T>, BindingError> {
  match document.get_element_by_id(id) {
    | None => Ok(None),
    | Some(el) => {
      el.dyn_into::<T>().map(Some).map_err(
        |_| {
          BindingError::WrongType {
            id,
            expected
          }
        }
      )
    }
  }
}

fn field_by_id(
  document: &Document,
  id: &'static str
) -> Result<Option<FormField>, BindingError>
{
  match document.get_element_by_id(id) {
    | None => Ok(None),
    | Some(el) => {
      FormField::from_element(el)
        .map(Some)
        .ok_or(BindingError::WrongType {
          id,
          expected: "form field"
        })
    }
  }
}

impl PageBindings {
  #[tracing::instrument(skip_all)]
  pub fn resolve(
    document: &Document
  ) -> Result<Self, BindingError> {
    let bindings = Self {
      upload: resolve_upload(document)?,
      edit:   resolve_edit(document)?,
      search: document
        .query_selector(".search-input")
        .ok()
        .flatten()
        .and_then(|el| {
          el.dyn_into::<HtmlInputElement>()
            .ok()
        })
    };
    debug!(
      upload = bindings.upload.is_some(),
      edit = bindings.edit.is_some(),
      search = bindings.search.is_some(),
      "resolved page bindings"
    );
    Ok(bindings)
  }
}

fn resolve_upload(
  document: &Document
) -> Result<Option<UploadBindings>, BindingError>
{
  let input = by_id::<HtmlInputElement>(
    document,
    "fileInput",
    "input element"
  )?;
  let preview = by_id::<HtmlElement>(
    document,
    "uploadPreview",
    "html element"
  )?;
  let preview_image =
    by_id::<HtmlImageElement>(
      document,
      "previewImage",
      "img element"
    )?;
  let file_name = by_id::<HtmlElement>(
    document,
    "fileName",
    "html element"
  )?;
  let upload_area = by_id::<HtmlElement>(
    document,
    "fileUploadArea",
    "html element"
  )?;
  let upload_button = by_id::<Element>(
    document,
    "uploadBtn",
    "element"
  )?;

  let missing: Vec<&'static str> = [
    ("fileInput", input.is_some()),
    ("uploadPreview", preview.is_some()),
    (
      "previewImage",
      preview_image.is_some()
    ),
    ("fileName", file_name.is_some()),
    (
      "fileUploadArea",
      upload_area.is_some()
    ),
    (
      "uploadBtn",
      upload_button.is_some()
    )
  ]
  .into_iter()
  .filter(|(_, present)| !present)
  .map(|(id, _)| id)
  .collect();

  if missing.len() == 6 {
    return Ok(None);
  }

  match (
    input,
    preview,
    preview_image,
    file_name,
    upload_area,
    upload_button
  ) {
    | (
      Some(input),
      Some(preview),
      Some(preview_image),
      Some(file_name),
      Some(upload_area),
      Some(upload_button)
    ) => {
      Ok(Some(UploadBindings {
        input,
        preview,
        preview_image,
        file_name,
        upload_area,
        upload_button
      }))
    }
    | _ => {
      Err(BindingError::Incomplete {
        group: "upload",
        missing
      })
    }
  }
}

fn resolve_edit(
  document: &Document
) -> Result<Option<EditModalBindings>, BindingError>
{
  let modal = by_id::<HtmlElement>(
    document,
    "editModal",
    "html element"
  )?;
  let bindings = EditModalBindings {
    task_id:     field_by_id(
      document,
      "editTaskId"
    )?,
    title:       field_by_id(
      document,
      "editTitle"
    )?,
    date:        field_by_id(
      document, "editDate"
    )?,
    priority:    field_by_id(
      document,
      "editPriority"
    )?,
    status:      field_by_id(
      document,
      "editStatus"
    )?,
    description: field_by_id(
      document,
      "editDescription"
    )?,
    modal:       match modal {
      | Some(modal) => modal,
      | None => {
        return no_modal(document);
      }
    }
  };

  for (id, field) in [
    ("editTaskId", &bindings.task_id),
    ("editTitle", &bindings.title),
    ("editDate", &bindings.date),
    ("editPriority", &bindings.priority),
    ("editStatus", &bindings.status)
  ] {
    if field.is_none() {
      warn!(
        id,
        "edit modal input missing; it \
         will not be populated"
      );
    }
  }

  Ok(Some(bindings))
}

/// Inputs without their modal can never
/// be shown.
fn no_modal(
  document: &Document
) -> Result<Option<EditModalBindings>, BindingError>
{
  let stray: Vec<&'static str> = [
    "editTaskId",
    "editTitle",
    "editDate",
    "editPriority",
    "editStatus"
  ]
  .into_iter()
  .filter(|id| {
    document.get_element_by_id(id).is_some()
  })
  .collect();

  if stray.is_empty() {
    Ok(None)
  } else {
    warn!(?stray, "edit inputs present without #editModal");
    Err(BindingError::Incomplete {
      group:   "edit modal",
      missing: vec!["editModal"]
    })
  }
}
