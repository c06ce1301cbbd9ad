#![cfg(target_arch = "wasm32")]

use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use snaptask_core::PageConfig;
use snaptask_core::actions::TaskAction;
use snaptask_core::config::{
  ActionsConfig,
  ModalConfig,
  NotificationConfig,
  UploadConfig
};
use snaptask_core::notify::Severity;
use snaptask_web::PageController;
use snaptask_web::actions::{
  CardTarget,
  TaskActions
};
use snaptask_web::bindings::{
  BindingError,
  PageBindings
};
use snaptask_web::dom;
use snaptask_web::edit::EditDialog;
use snaptask_web::forms::validate_form;
use snaptask_web::notifier::Notifier;
use snaptask_web::search::apply_search;
use snaptask_web::upload::UploadHandler;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
  DataTransfer,
  Document,
  File,
  FilePropertyBag,
  HtmlButtonElement,
  HtmlElement,
  HtmlInputElement
};

wasm_bindgen_test_configure!(run_in_browser);

fn fixture(html: &str) -> Document {
  let document = dom::document()
    .expect("test runs in a document");
  document
    .body()
    .expect("document has a body")
    .set_inner_html(html);
  document
}

fn by_id<T: JsCast>(
  document: &Document,
  id: &str
) -> T {
  document
    .get_element_by_id(id)
    .and_then(|el| el.dyn_into::<T>().ok())
    .expect("fixture element")
}

fn style(el: &HtmlElement, prop: &str) -> String {
  el.style()
    .get_property_value(prop)
    .unwrap_or_default()
}

const UPLOAD_MARKUP: &str = r#"
  <div id="fileUploadArea">
    <input type="file" id="fileInput">
  </div>
  <div id="uploadPreview" style="display: none">
    <img id="previewImage">
    <span id="fileName"></span>
  </div>
  <button id="uploadBtn" disabled>Upload</button>
"#;

const EDIT_MARKUP: &str = r#"
  <div class="task-card" data-task-id="t1">
    <h3 class="task-title">Buy milk</h3>
    <span class="task-date">📅 2024-01-15</span>
    <span class="task-priority"> High </span>
  </div>
  <div id="editModal" style="display: none">
    <form>
      <input id="editTaskId">
      <input id="editTitle">
      <input id="editDate">
      <input id="editPriority">
    </form>
  </div>
"#;

fn edit_dialog(document: &Document) -> Rc<EditDialog> {
  let bindings = PageBindings::resolve(document)
    .expect("valid markup")
    .edit
    .expect("edit modal present");
  EditDialog::new(bindings, ModalConfig::default())
}

#[wasm_bindgen_test]
fn second_notification_replaces_first() {
  let document = fixture("");
  let notifier =
    Notifier::new(NotificationConfig::default());

  notifier.notify("first", Severity::Error);
  notifier.notify("second", Severity::Success);

  let banners =
    dom::query_all(&document, ".notification");
  assert_eq!(banners.len(), 1);
  assert!(
    banners[0]
      .class_list()
      .contains("notification-success")
  );
  assert!(notifier.active().is_some());
}

#[wasm_bindgen_test]
fn search_restyles_cards_with_text() {
  let document = fixture(
    r#"
    <div class="task-card" id="milk">
      <h3 class="task-title">Buy milk</h3>
    </div>
    <div class="task-card" id="report">
      <h3 class="task-title">Write report</h3>
      <p class="task-description">quarterly numbers</p>
    </div>
    <div class="task-card" id="blank"></div>
    "#
  );

  assert_eq!(apply_search(&document, "m", 2), 0);
  assert_eq!(
    apply_search(&document, "MILK", 2),
    2
  );

  let border = |id: &str| {
    style(&by_id::<HtmlElement>(&document, id), "border")
  };
  assert!(!border("milk").is_empty());
  assert_ne!(border("milk"), border("report"));
  assert!(border("blank").is_empty());
}

#[wasm_bindgen_test]
fn half_present_upload_group_is_rejected() {
  let document = fixture(
    r#"<input type="file" id="fileInput">"#
  );

  match PageBindings::resolve(&document) {
    | Err(BindingError::Incomplete {
      group,
      missing
    }) => {
      assert_eq!(group, "upload");
      assert_eq!(missing.len(), 5);
      assert!(!missing.contains(&"fileInput"));
    }
    | other => {
      panic!("expected incomplete upload group, got {other:?}")
    }
  }
}

#[wasm_bindgen_test]
fn page_without_groups_resolves_empty() {
  let document = fixture(
    r#"<div class="task-card"></div>"#
  );

  let bindings = PageBindings::resolve(&document)
    .expect("empty page is valid");
  assert!(bindings.upload.is_none());
  assert!(bindings.edit.is_none());
  assert!(bindings.search.is_none());
}

#[wasm_bindgen_test]
fn mount_wires_present_features() {
  let document = fixture(&format!(
    r#"{UPLOAD_MARKUP}<input class="search-input">"#
  ));

  let controller = PageController::mount(
    &document,
    PageConfig::default()
  )
  .expect("valid markup");

  assert!(controller.has_upload());
  assert!(controller.has_search());
  assert!(controller.listener_count() >= 2);
  assert!(
    document
      .get_element_by_id("snaptask-styles")
      .is_some()
  );
}

#[wasm_bindgen_test]
fn revalidation_clears_stale_errors() {
  let document = fixture(
    r#"
    <form id="task-form">
      <div><input id="title" required value="Buy milk"></div>
      <div><input id="date" required></div>
    </form>
    "#
  );
  let form = document
    .get_element_by_id("task-form")
    .expect("form");
  let errors = || {
    dom::query_all(&document, ".field-error").len()
  };

  let report = validate_form(&form);
  assert_eq!(report.missing(), 1);
  assert_eq!(errors(), 1);

  validate_form(&form);
  assert_eq!(errors(), 1);

  let title: HtmlElement = by_id(&document, "title");
  let date: HtmlInputElement = by_id(&document, "date");
  assert_ne!(
    style(&title, "border-color"),
    style(&date, "border-color")
  );

  date.set_value("2024-01-15");
  let report = validate_form(&form);
  assert!(report.is_valid());
  assert_eq!(errors(), 0);
  assert_eq!(
    style(&title, "border-color"),
    style(&date, "border-color")
  );
}

#[wasm_bindgen_test]
fn edit_skips_unknown_card_and_missing_inputs() {
  let document = fixture(EDIT_MARKUP);
  let dialog = edit_dialog(&document);
  let modal: HtmlElement = by_id(&document, "editModal");

  dialog.open("ghost");
  assert_eq!(style(&modal, "display"), "none");

  dialog.open("t1");
  assert_eq!(style(&modal, "display"), "block");
  let value = |id: &str| {
    by_id::<HtmlInputElement>(&document, id).value()
  };
  assert_eq!(value("editTaskId"), "t1");
  assert_eq!(value("editTitle"), "Buy milk");
  assert_eq!(value("editDate"), "2024-01-15");
  assert_eq!(value("editPriority"), "High");
}

#[wasm_bindgen_test]
async fn reopen_during_close_keeps_modal_visible() {
  let document = fixture(EDIT_MARKUP);
  let dialog = edit_dialog(&document);
  let modal: HtmlElement = by_id(&document, "editModal");

  dialog.open("t1");
  dialog.close();
  dialog.open("t1");
  TimeoutFuture::new(400).await;
  assert_eq!(style(&modal, "display"), "block");

  dialog.close();
  TimeoutFuture::new(400).await;
  assert_eq!(style(&modal, "display"), "none");
}

#[wasm_bindgen_test]
fn rejected_file_clears_the_input() {
  let document = fixture(UPLOAD_MARKUP);
  let bindings = PageBindings::resolve(&document)
    .expect("valid markup")
    .upload
    .expect("upload group present");
  let handler = UploadHandler::new(
    bindings,
    UploadConfig::default(),
    Notifier::new(NotificationConfig::default())
  );

  let options = FilePropertyBag::new();
  options.set_type("text/plain");
  let file = File::new_with_str_sequence_and_options(
    &js_sys::Array::of1(&"groceries".into()),
    "notes.txt",
    &options
  )
  .expect("file");
  let transfer = DataTransfer::new().expect("transfer");
  transfer
    .items()
    .add_with_file(&file)
    .expect("add file");
  let input: HtmlInputElement =
    by_id(&document, "fileInput");
  input.set_files(transfer.files().as_ref());
  assert!(!input.value().is_empty());

  handler.on_change();

  assert!(input.value().is_empty());
  let preview: HtmlElement =
    by_id(&document, "uploadPreview");
  assert_eq!(style(&preview, "display"), "none");
  let banners =
    dom::query_all(&document, ".notification-error");
  assert_eq!(banners.len(), 1);
}

#[wasm_bindgen_test]
fn declined_completion_leaves_button_alone() {
  let document = fixture(
    r#"
    <div class="task-card" id="card" data-task-id="t1">
      <button class="btn-success" id="done">Complete</button>
    </div>
    "#
  );
  let actions = TaskActions::with_confirm(
    ActionsConfig::default(),
    Notifier::new(NotificationConfig::default()),
    |_: &str| false
  );
  let card: HtmlElement = by_id(&document, "card");
  let button: HtmlButtonElement =
    by_id(&document, "done");

  actions.trigger(
    TaskAction::Complete,
    "t1",
    Some(CardTarget {
      card:   card.clone(),
      button: button.clone().into()
    })
  );

  assert_eq!(button.inner_html(), "Complete");
  assert!(!button.disabled());
  assert!(style(&card, "animation").is_empty());
}

#[wasm_bindgen_test]
fn disabled_attribute_toggles_on_plain_elements() {
  let document = fixture(r#"<a id="link">Upload</a>"#);
  let link = document
    .get_element_by_id("link")
    .expect("link");

  dom::set_disabled(&link, true);
  assert!(link.has_attribute("disabled"));
  dom::set_disabled(&link, false);
  assert!(!link.has_attribute("disabled"));
}
