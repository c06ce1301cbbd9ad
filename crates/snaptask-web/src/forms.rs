use snaptask_core::validate::{
  ERROR_TEXT_COLOR,
  FormReport,
  validate_required
};
use tracing::{
  debug,
  warn
};
use wasm_bindgen::JsCast;
use web_sys::{
  Element,
  HtmlElement
};

use crate::dom::{
  self,
  FormField
};

fn clear_field_error(field: &FormField) {
  if let Some(parent) =
    field.element().parent_element()
    && let Some(label) =
      dom::query_within(&parent, ".field-error")
  {
    label.remove();
  }
}

fn show_field_error(
  field: &FormField,
  message: &str
) {
  let Some(parent) =
    field.element().parent_element()
  else {
    return;
  };
  let Some(label) = dom::document()
    .and_then(|doc| {
      doc.create_element("div").ok()
    })
    .and_then(|el| {
      el.dyn_into::<HtmlElement>().ok()
    })
  else {
    return;
  };
  label.set_class_name("field-error");
  label.set_text_content(Some(message));
  dom::set_style(
    &label,
    "color",
    ERROR_TEXT_COLOR
  );
  dom::set_style(
    &label,
    "font-size",
    "0.85rem"
  );
  dom::set_style(
    &label,
    "margin-top",
    "0.25rem"
  );
  if let Err(error) =
    parent.append_child(&label)
  {
    warn!(error = ?error, "failed to attach field error");
  }
}

/// Checks every `[required]` control in
/// `form`, refreshing inline markers.
pub fn validate_form(
  form: &Element
) -> FormReport {
  let fields: Vec<FormField> =
    dom::query_all_within(form, "[required]")
      .into_iter()
      .filter_map(FormField::from_element)
      .collect();
  let values: Vec<String> = fields
    .iter()
    .map(FormField::value)
    .collect();
  let report = validate_required(
    values.iter().map(String::as_str)
  );

  for (field, verdict) in
    fields.iter().zip(&report.verdicts)
  {
    clear_field_error(field);
    if let Some(message) =
      verdict.error_label()
    {
      show_field_error(field, message);
    }
    dom::set_style(
      field.element(),
      "border-color",
      verdict.border_color()
    );
  }

  debug!(
    missing = report.missing(),
    valid = report.is_valid(),
    "validated form"
  );
  report
}
