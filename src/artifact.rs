//! Artifact descriptors — the decision layer of template instantiation
//!
//! Each generated screen is described by a small typed structure before any
//! text exists: what columns a list view carries, which controls a form
//! renders, how a route is gated. The structures are plain data so the
//! decisions are unit-testable without ever touching the rendering layer;
//! serialization to TSX happens behind `crate::templates`.
//!
//! All builders here are total over a well-formed model: empty column,
//! field or action sets yield empty descriptors, never an error.

use crate::merge::MergedPage;
use crate::model::{Action, Column, FormField, Page};
use crate::util::to_pascal_case;
use serde::Serialize;
use serde_json::Value;

/// One list-view column, shaped for the generated table component
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSpec {
    pub title: String,
    #[serde(rename = "dataIndex")]
    pub data_index: String,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    pub sorter: bool,
}

/// One row-level control on a list view, gated by its own permission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionControl {
    pub action_type: String,
    pub label: String,
    pub icon: String,
    pub permission: String,
}

/// A list screen: configured columns in sheet order plus the synthetic
/// actions column (present whenever the page has actions)
#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    pub page_id: String,
    pub title: String,
    /// API endpoint the generated screen fetches from
    pub endpoint: String,
    pub columns: Vec<ColumnSpec>,
    pub actions: Vec<ActionControl>,
}

/// Control kind a form field renders as
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "lowercase")]
pub enum ControlKind {
    /// Closed choice list from the field's comma-split options
    Select { options: Vec<String> },
    /// Multi-line control
    Textarea,
    /// Single-line control carrying its input type through
    Input {
        #[serde(rename = "inputType")]
        input_type: String,
    },
}

/// One form control
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldControl {
    pub name: String,
    pub label: String,
    pub required: bool,
    #[serde(flatten)]
    pub kind: ControlKind,
}

/// A create/edit form: controls in field order
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub page_id: String,
    pub fields: Vec<FieldControl>,
}

/// One entry of the generated route table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteEntry {
    pub page_id: String,
    /// Component identifier, e.g. `UsersPage`
    pub component: String,
    pub path: String,
    pub public: bool,
    pub catch_all: bool,
    /// Comma-split requirement list handed to the permission gate
    pub required: Vec<String>,
}

/// One navigation item, embedded into the generated shell in final
/// navigation order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    pub page_id: String,
    pub title: String,
    pub icon: String,
    pub route: String,
    /// Requirement list the shell checks against the live session
    pub required: Vec<String>,
}

/// Build the list-view descriptor for a page: one column per configured
/// Column in sheet order, one control per Action.
pub fn list_view(page: &Page, columns: &[&Column], actions: &[&Action]) -> ListView {
    ListView {
        page_id: page.page_id.clone(),
        title: page.title.clone(),
        endpoint: format!("/api/{}", page.page_id),
        columns: columns
            .iter()
            .map(|c| ColumnSpec {
                title: c.label.clone(),
                data_index: c.field.clone(),
                key: c.field.clone(),
                width: c.width,
                sorter: c.sortable,
            })
            .collect(),
        actions: actions
            .iter()
            .map(|a| ActionControl {
                action_type: a.action_type.clone(),
                label: a.label.clone(),
                icon: a.icon.clone(),
                permission: a.permission.clone(),
            })
            .collect(),
    }
}

/// Build the form descriptor for a page. `fields` must already be in
/// render order (the model accessor sorts them).
pub fn form_view(page: &Page, fields: &[&FormField]) -> FormView {
    FormView {
        page_id: page.page_id.clone(),
        fields: fields
            .iter()
            .map(|f| FieldControl {
                name: f.field.clone(),
                label: f.label.clone(),
                required: f.required,
                kind: control_kind(f),
            })
            .collect(),
    }
}

fn control_kind(field: &FormField) -> ControlKind {
    match field.field_type.as_str() {
        "select" => ControlKind::Select {
            options: field.option_list(),
        },
        "textarea" => ControlKind::Textarea,
        other => ControlKind::Input {
            input_type: other.to_string(),
        },
    }
}

/// Build the route entry for a merged page
pub fn route_entry(page: &MergedPage) -> RouteEntry {
    RouteEntry {
        page_id: page.page.page_id.clone(),
        component: component_name(&page.page.page_id),
        path: page.page.route.clone(),
        public: page.is_public,
        catch_all: page.is_catch_all(),
        required: if page.is_public {
            Vec::new()
        } else {
            page.page.required_permissions()
        },
    }
}

/// Build the navigation item for a merged page
pub fn nav_item(page: &MergedPage) -> NavItem {
    NavItem {
        page_id: page.page.page_id.clone(),
        title: page.page.title.clone(),
        icon: page.page.icon.clone(),
        route: page.page.route.clone(),
        required: page.page.required_permissions(),
    }
}

/// Component identifier for a page id, e.g. `users` → `UsersPage`
pub fn component_name(page_id: &str) -> String {
    format!("{}Page", to_pascal_case(page_id))
}

/// Free-text search predicate for list views: an empty query matches every
/// record; otherwise the lower-cased string form of any field value must
/// contain the lower-cased query as a substring.
pub fn record_matches(record: &serde_json::Map<String, Value>, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    record
        .values()
        .any(|value| cell_text(value).to_lowercase().contains(&needle))
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
