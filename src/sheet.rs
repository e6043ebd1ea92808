//! Raw workbook layer — a configuration source resolvable to a mapping of
//! sheet name → sequence of row-records.
//!
//! A workbook is the untyped input to the compiler. Recognized sheet names
//! are `GLOBAL`, `ROLES`, `PAGES`, `COLUMNS`, `FORM_FIELDS` and `ACTIONS`;
//! anything else is carried but ignored by the model. Cell values may be
//! strings or numbers (spreadsheet exports are loose about this), so typed
//! access goes through the cell helpers below.

use crate::error::{Error, Result};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One row of a sheet: column header → cell value
pub type Row = Map<String, Value>;

pub const SHEET_GLOBAL: &str = "GLOBAL";
pub const SHEET_ROLES: &str = "ROLES";
pub const SHEET_PAGES: &str = "PAGES";
pub const SHEET_COLUMNS: &str = "COLUMNS";
pub const SHEET_FORM_FIELDS: &str = "FORM_FIELDS";
pub const SHEET_ACTIONS: &str = "ACTIONS";

/// An untyped configuration workbook
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: BTreeMap<String, Vec<Row>>,
}

impl Workbook {
    /// Parse a workbook from YAML text
    pub fn from_yaml(text: &str) -> Result<Self> {
        let value: Value = serde_norway::from_str(text)?;
        Self::from_value(value)
    }

    /// Parse a workbook from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    fn from_value(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(Error::malformed(
                "workbook",
                "expected a mapping of sheet name to rows",
            ));
        };

        let mut sheets = BTreeMap::new();
        for (name, sheet) in map {
            let rows = match sheet {
                Value::Array(items) => items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| match item {
                        Value::Object(row) => Ok(row),
                        other => Err(Error::malformed(
                            &name,
                            format!("row {}: expected a record, got {}", i + 1, kind_of(&other)),
                        )),
                    })
                    .collect::<Result<Vec<_>>>()?,
                // An empty sheet serializes as null in YAML; tolerate it.
                Value::Null => Vec::new(),
                other => {
                    return Err(Error::malformed(
                        &name,
                        format!("expected a sequence of records, got {}", kind_of(&other)),
                    ))
                }
            };
            sheets.insert(name, rows);
        }

        Ok(Workbook { sheets })
    }

    /// Read a workbook from a file, dispatching on extension
    /// (`.json` → JSON, anything else → YAML).
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&text),
            _ => Self::from_yaml(&text),
        }
    }

    /// Resolve a configuration source path, or fail with `ConfigMissing`
    /// so the caller can synthesize the sample workbook and halt.
    pub fn locate(candidate: &str) -> Result<PathBuf> {
        let path = Path::new(candidate);
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        Err(Error::ConfigMissing(candidate.to_string()))
    }

    /// Rows of a sheet, empty if the sheet is absent
    pub fn rows(&self, sheet: &str) -> &[Row] {
        self.sheets.get(sheet).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the workbook carries a sheet under this name
    pub fn has_sheet(&self, sheet: &str) -> bool {
        self.sheets.contains_key(sheet)
    }

    /// Serialize the workbook to YAML (used when writing the sample file)
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_norway::to_string(&self.sheets)?)
    }

    /// The built-in reference workbook, written out when no configuration
    /// source exists so the operator has something concrete to edit.
    pub fn sample() -> Self {
        let value = json!({
            "GLOBAL": [
                { "key": "app_name", "value": "Universal Management System" },
                { "key": "organization", "value": "Demo Organization" },
                { "key": "ui_library", "value": "antd" },
                { "key": "theme_color", "value": "#1890ff" },
                { "key": "sidebar_type", "value": "fixed" },
                { "key": "auth_enabled", "value": "YES" },
                { "key": "currency", "value": "NPR" },
                { "key": "timezone", "value": "Asia/Kathmandu" }
            ],
            "ROLES": [
                { "role_id": "super_admin", "name": "Super Admin", "permissions": "*" },
                { "role_id": "admin", "name": "Admin", "permissions": "read.*,write.*,delete.*" },
                { "role_id": "user", "name": "User", "permissions": "read.own,write.own" }
            ],
            "PAGES": [
                { "page_id": "dashboard", "title": "Dashboard", "icon": "📊", "route": "/dashboard", "permissions": "dashboard.view", "order": 1 },
                { "page_id": "users", "title": "Users", "icon": "👥", "route": "/users", "permissions": "users.*", "order": 2 },
                { "page_id": "products", "title": "Products", "icon": "📦", "route": "/products", "permissions": "products.*", "order": 3 }
            ],
            "COLUMNS": [
                { "page_id": "users", "field": "id", "label": "ID", "type": "number", "sortable": "YES", "width": 80 },
                { "page_id": "users", "field": "name", "label": "Name", "type": "string", "sortable": "YES", "width": 150 },
                { "page_id": "users", "field": "email", "label": "Email", "type": "email", "width": 200 },
                { "page_id": "products", "field": "id", "label": "ID", "type": "number", "width": 80 },
                { "page_id": "products", "field": "name", "label": "Name", "type": "string", "width": 200 }
            ],
            "FORM_FIELDS": [
                { "page_id": "users", "field": "name", "label": "Name", "type": "text", "required": "YES", "order": 1 },
                { "page_id": "users", "field": "email", "label": "Email", "type": "email", "required": "YES", "order": 2 },
                { "page_id": "products", "field": "name", "label": "Product Name", "type": "text", "required": "YES", "order": 1 },
                { "page_id": "products", "field": "price", "label": "Price", "type": "number", "order": 2 }
            ],
            "ACTIONS": [
                { "page_id": "users", "action_type": "edit", "label": "Edit", "icon": "✏️", "permission": "users.update" },
                { "page_id": "users", "action_type": "delete", "label": "Delete", "icon": "🗑️", "permission": "users.delete" }
            ]
        });
        Self::from_value(value).expect("sample workbook is well-formed")
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

/// String cell, accepting numeric and boolean cells the way spreadsheet
/// exports produce them.
pub(crate) fn cell_str(row: &Row, key: &str) -> Option<String> {
    match row.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Integer cell, accepting string-typed digits
pub(crate) fn cell_i64(row: &Row, key: &str) -> Option<i64> {
    match row.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn cell_u32(row: &Row, key: &str) -> Option<u32> {
    cell_i64(row, key).and_then(|n| u32::try_from(n).ok())
}
