// src/web/page.rs
//! Editor page: form, layout picker, action buttons and the live preview frame

use crate::core::form::{build_form, FieldGroup, FormField, FormSection, InputKind};
use crate::core::html::{self, Element, Node};
use crate::core::layout::Layout;
use crate::session::Session;

pub const GENERATE_LABEL: &str = "AI Generate";
pub const GENERATING_LABEL: &str = "Generating...";

const SECTION_TITLE: &str = "text-xl font-bold text-gray-800 border-b-2 border-blue-200 pb-2";
const LABEL: &str = "block text-sm font-medium text-gray-700 mb-1";
const INPUT: &str = "w-full px-3 py-2 border border-gray-300 rounded-md shadow-sm focus:ring-blue-500 focus:border-blue-500 sm:text-sm";
const ADD_BUTTON: &str = "w-full py-2 text-sm text-white bg-blue-600 rounded-md hover:bg-blue-700 transition-colors";
const REMOVE_BUTTON: &str = "absolute top-2 right-2 text-red-500 hover:text-red-700";

/// Wires inputs and buttons to the JSON API. Field edits go out one request at
/// a time, carrying the latest value per field; structural actions wait for
/// them and then reload the page so the form is rebuilt.
const EDITOR_SCRIPT: &str = r#"
const post = (url, body) => fetch(url, {
  method: 'POST',
  headers: { 'Content-Type': 'application/json' },
  body: JSON.stringify(body || {}),
});
const preview = document.getElementById('preview-frame');
const refreshPreview = () => { preview.src = '/api/preview?t=' + Date.now(); };

const pendingEdits = new Map();
let editQueue = Promise.resolve();

const sendLatestEdit = async (key) => {
  const body = pendingEdits.get(key);
  if (!body) return;
  pendingEdits.delete(key);
  const res = await post('/api/resume/field', body);
  if (res.ok) refreshPreview();
};

document.querySelectorAll('[data-field]').forEach((input) => {
  input.addEventListener('input', () => {
    const body = { section: input.dataset.section, field: input.dataset.field, value: input.value };
    if (input.dataset.index !== undefined) body.index = Number(input.dataset.index);
    const key = [body.section, body.field, body.index].join('|');
    const queued = pendingEdits.has(key);
    pendingEdits.set(key, body);
    if (!queued) {
      editQueue = editQueue.then(() => sendLatestEdit(key)).catch(() => {});
    }
  });
});

const afterEdits = async (action) => {
  await editQueue;
  await action();
};

document.querySelectorAll('[data-add]').forEach((button) => {
  button.addEventListener('click', () => afterEdits(async () => {
    await post('/api/resume/entries', { section: button.dataset.add });
    location.reload();
  }));
});

document.querySelectorAll('[data-remove]').forEach((button) => {
  button.addEventListener('click', () => afterEdits(async () => {
    await post('/api/resume/entries/remove', { section: button.dataset.remove, id: button.dataset.entry });
    location.reload();
  }));
});

document.querySelectorAll('[data-layout]').forEach((button) => {
  button.addEventListener('click', () => afterEdits(async () => {
    await post('/api/layout', { layout: button.dataset.layout });
    location.reload();
  }));
});

const generate = document.getElementById('generate-btn');
generate.addEventListener('click', () => {
  generate.disabled = true;
  generate.textContent = 'Generating...';
  afterEdits(async () => {
    await post('/api/generate');
    location.reload();
  });
});

const downloadName = (disposition) => {
  const extended = /filename\*=UTF-8''([^;]+)/i.exec(disposition);
  if (extended) {
    try { return decodeURIComponent(extended[1]); } catch (_) { /* fall through */ }
  }
  const plain = /filename="([^"]*)"/.exec(disposition);
  return plain ? plain[1] : 'Resume.pdf';
};

document.getElementById('export-btn').addEventListener('click', () => afterEdits(async () => {
  const res = await post('/api/export');
  if (!res.ok) {
    const body = await res.json();
    alert(body.error);
    return;
  }
  const link = document.createElement('a');
  link.href = URL.createObjectURL(await res.blob());
  link.download = downloadName(res.headers.get('Content-Disposition') || '');
  link.click();
  URL.revokeObjectURL(link.href);
}));
"#;

/// Full editor page for the current session.
pub fn editor_page(session: &Session) -> String {
    let sidebar = Node::el(
        "div",
        "lg:col-span-2 bg-white p-6 rounded-lg shadow-lg overflow-y-auto space-y-8",
    )
    .attr("style", "max-height: calc(100vh - 120px)")
    .child(layout_picker(session.layout))
    .children(build_form(&session.record).iter().map(form_section));

    let preview = Node::el("div", "lg:col-span-3").child(
        Node::el("iframe", "w-full bg-white rounded-lg shadow-lg")
            .attr("id", "preview-frame")
            .attr("title", "Resume preview")
            .attr("src", "/api/preview")
            .attr("style", "height: calc(100vh - 120px)"),
    );

    let mut body = Node::el("div", "min-h-screen bg-gray-100 font-sans").child(app_header(session));
    if let Some(error) = &session.error {
        body = body.child(error_banner(error));
    }
    let body: Node = body
        .child(
            Node::el(
                "main",
                "container mx-auto p-4 sm:p-6 lg:p-8 grid grid-cols-1 lg:grid-cols-5 gap-8",
            )
            .child(sidebar)
            .child(preview),
        )
        .into();

    html::document("AI Resume Builder", &body, Some(EDITOR_SCRIPT))
}

fn app_header(session: &Session) -> Element {
    let mut generate = Node::el(
        "button",
        "px-4 py-2 bg-blue-500 text-white rounded-md hover:bg-blue-600 transition-colors disabled:bg-blue-300 disabled:cursor-not-allowed",
    )
    .attr("id", "generate-btn")
    .attr("type", "button");
    generate = if session.generating {
        generate.attr("disabled", "disabled").text(GENERATING_LABEL)
    } else {
        generate.text(GENERATE_LABEL)
    };

    let export = Node::el(
        "button",
        "px-4 py-2 bg-blue-900 text-white rounded-md hover:bg-blue-800 transition-colors",
    )
    .attr("id", "export-btn")
    .attr("type", "button")
    .text("Download PDF");

    Node::el("header", "bg-white shadow-md").child(
        Node::el(
            "div",
            "container mx-auto px-4 sm:px-6 lg:px-8 py-4 flex justify-between items-center",
        )
        .child(Node::el("h1", "text-2xl sm:text-3xl font-bold text-blue-800").text("AI Resume Builder"))
        .child(
            Node::el("div", "flex items-center space-x-4")
                .child(generate)
                .child(export),
        ),
    )
}

fn error_banner(message: &str) -> Element {
    Node::el("div", "container mx-auto mt-4 px-4 sm:px-6 lg:px-8").child(
        Node::el(
            "div",
            "bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded",
        )
        .attr("id", "error-banner")
        .attr("role", "alert")
        .child(Node::el("strong", "font-bold").text("Error: "))
        .child(Node::el("span", "").text(message)),
    )
}

fn layout_picker(selected: Layout) -> Element {
    let buttons = Layout::ALL.into_iter().map(|layout| {
        let state = if layout == selected {
            "border-blue-500 ring-2 ring-blue-500"
        } else {
            "border-gray-200 hover:border-blue-400"
        };
        Node::from(
            Node::el("button", format!("p-2 rounded-lg border-2 transition-colors {}", state))
                .attr("type", "button")
                .attr("data-layout", layout.name())
                .child(Node::el("div", format!("h-16 w-full rounded {}", layout.swatch_class())))
                .child(
                    Node::el("p", "text-center mt-2 text-sm font-medium text-gray-700")
                        .text(layout.name()),
                ),
        )
    });

    Node::el("div", "")
        .child(Node::el("h2", format!("{} mb-4", SECTION_TITLE)).text("Template"))
        .child(Node::el("div", "grid grid-cols-2 sm:grid-cols-4 gap-4").children(buttons))
}

fn form_section(section: &FormSection) -> Node {
    let mut block = Node::el("div", "space-y-4")
        .attr("data-form-section", section.section.as_str())
        .child(Node::el("h2", SECTION_TITLE).text(section.title))
        .children(section.groups.iter().map(|group| field_group(section, group)));

    if let Some(label) = section.add_label {
        block = block.child(
            Node::el("button", ADD_BUTTON)
                .attr("type", "button")
                .attr("data-add", section.section.as_str())
                .text(label),
        );
    }

    block.into()
}

fn field_group(section: &FormSection, group: &FieldGroup) -> Node {
    let fields = group.fields.iter().map(form_field);

    match &group.entry_id {
        None => Node::el("div", "space-y-4").children(fields).into(),
        Some(id) => Node::el("div", "p-4 border rounded-md space-y-4 relative")
            .attr("data-entry", id.as_str())
            .children(fields)
            .child(
                Node::el("button", REMOVE_BUTTON)
                    .attr("type", "button")
                    .attr("aria-label", "Remove")
                    .attr("data-remove", section.section.as_str())
                    .attr("data-entry", id.as_str())
                    .text("\u{00d7}"),
            )
            .into(),
    }
}

fn form_field(field: &FormField) -> Node {
    let control = match field.input {
        // the parser drops one newline right after <textarea>
        InputKind::TextArea { rows } => Node::el("textarea", INPUT)
            .attr("rows", rows.to_string())
            .text(format!("\n{}", field.value)),
        InputKind::Text | InputKind::Email => {
            let kind = if field.input == InputKind::Email { "email" } else { "text" };
            Node::el("input", INPUT)
                .attr("type", kind)
                .attr("value", field.value.as_str())
        }
    };

    let mut control = control
        .attr("data-section", field.section.as_str())
        .attr("data-field", field.field);
    if let Some(index) = field.index {
        control = control.attr("data-index", index.to_string());
    }
    if let Some(placeholder) = field.placeholder {
        control = control.attr("placeholder", placeholder);
    }

    let mut wrapper = Node::el("div", "");
    if !field.label.is_empty() {
        wrapper = wrapper.child(Node::el("label", LABEL).text(field.label));
    }
    wrapper.child(control).into()
}
