//! Typed configuration model — the normalized form of a workbook
//!
//! `ConfigModel::load` turns raw rows into typed records and is the only
//! place parsing happens; everything downstream (merge, artifacts) assumes
//! a valid model and never re-validates. Accessors are read-only and the
//! model is immutable after load.
//!
//! Boolean-ish sheet cells use the spreadsheet convention of the literal
//! string `YES`; anything else (including absence) is false.

use crate::error::{Error, Result};
use crate::permission::split_permissions;
use crate::sheet::{self, Row, Workbook};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One `GLOBAL` sheet entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GlobalSetting {
    pub key: String,
    pub value: String,
}

/// One `ROLES` sheet entry. Descriptive metadata only: role permissions are
/// never cross-validated against page or action permissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Role {
    pub role_id: String,
    pub name: String,
    /// Permission patterns, comma-split, order preserved
    pub permissions: Vec<String>,
}

/// One routable screen of the generated application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Page {
    pub page_id: String,
    pub title: String,
    pub icon: String,
    /// Path pattern; `*` is the catch-all
    pub route: String,
    /// Comma-separated permission patterns, any of which grants access
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl Page {
    /// The route's required-permission list (empty means unrestricted)
    pub fn required_permissions(&self) -> Vec<String> {
        self.permissions
            .as_deref()
            .map(split_permissions)
            .unwrap_or_default()
    }
}

/// One `COLUMNS` sheet entry. Sheet order is significant: it is the
/// on-screen column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Column {
    pub page_id: String,
    pub field: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub sortable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

/// One `FORM_FIELDS` sheet entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormField {
    pub page_id: String,
    pub field: String,
    pub label: String,
    /// `select` and `textarea` pick dedicated controls; any other value is
    /// passed through as a single-line input type.
    #[serde(rename = "type")]
    pub field_type: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Comma-separated choices for `select` fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

impl FormField {
    /// Choice list for `select` controls, comma-split
    pub fn option_list(&self) -> Vec<String> {
        self.options
            .as_deref()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// One `ACTIONS` sheet entry — a row-level control on a list view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Action {
    pub page_id: String,
    pub action_type: String,
    pub label: String,
    pub icon: String,
    pub permission: String,
}

/// The normalized configuration, immutable after load
#[derive(Debug, Clone, Serialize)]
pub struct ConfigModel {
    globals: Vec<GlobalSetting>,
    roles: Vec<Role>,
    pages: Vec<Page>,
    columns: Vec<Column>,
    form_fields: Vec<FormField>,
    actions: Vec<Action>,
}

impl ConfigModel {
    /// Normalize a workbook into the typed model.
    ///
    /// The `PAGES` sheet must be present; every other sheet defaults to
    /// empty. Missing optional cells (`order`, `width`, `options`,
    /// `sortable`, `required`, `permissions`) get defaults; a missing
    /// required cell is a `ConfigMalformed` error naming sheet and field.
    pub fn load(workbook: &Workbook) -> Result<Self> {
        if !workbook.has_sheet(sheet::SHEET_PAGES) {
            return Err(Error::malformed(sheet::SHEET_PAGES, "sheet is missing"));
        }

        let globals = parse_sheet(workbook, sheet::SHEET_GLOBAL, |row, at| {
            Ok(GlobalSetting {
                key: require(row, sheet::SHEET_GLOBAL, at, "key")?,
                value: require(row, sheet::SHEET_GLOBAL, at, "value")?,
            })
        })?;

        let roles = parse_sheet(workbook, sheet::SHEET_ROLES, |row, at| {
            Ok(Role {
                role_id: require(row, sheet::SHEET_ROLES, at, "role_id")?,
                name: require(row, sheet::SHEET_ROLES, at, "name")?,
                permissions: sheet::cell_str(row, "permissions")
                    .map(|s| split_permissions(&s))
                    .unwrap_or_default(),
            })
        })?;

        let pages = parse_sheet(workbook, sheet::SHEET_PAGES, |row, at| {
            Ok(Page {
                page_id: require(row, sheet::SHEET_PAGES, at, "page_id")?,
                title: require(row, sheet::SHEET_PAGES, at, "title")?,
                icon: require(row, sheet::SHEET_PAGES, at, "icon")?,
                route: require(row, sheet::SHEET_PAGES, at, "route")?,
                permissions: sheet::cell_str(row, "permissions"),
                order: sheet::cell_i64(row, "order"),
            })
        })?;

        let columns = parse_sheet(workbook, sheet::SHEET_COLUMNS, |row, at| {
            Ok(Column {
                page_id: require(row, sheet::SHEET_COLUMNS, at, "page_id")?,
                field: require(row, sheet::SHEET_COLUMNS, at, "field")?,
                label: require(row, sheet::SHEET_COLUMNS, at, "label")?,
                field_type: require(row, sheet::SHEET_COLUMNS, at, "type")?,
                sortable: yes(row, "sortable"),
                width: sheet::cell_u32(row, "width"),
            })
        })?;

        let form_fields = parse_sheet(workbook, sheet::SHEET_FORM_FIELDS, |row, at| {
            Ok(FormField {
                page_id: require(row, sheet::SHEET_FORM_FIELDS, at, "page_id")?,
                field: require(row, sheet::SHEET_FORM_FIELDS, at, "field")?,
                label: require(row, sheet::SHEET_FORM_FIELDS, at, "label")?,
                field_type: require(row, sheet::SHEET_FORM_FIELDS, at, "type")?,
                required: yes(row, "required"),
                order: sheet::cell_i64(row, "order"),
                options: sheet::cell_str(row, "options"),
            })
        })?;

        let actions = parse_sheet(workbook, sheet::SHEET_ACTIONS, |row, at| {
            Ok(Action {
                page_id: require(row, sheet::SHEET_ACTIONS, at, "page_id")?,
                action_type: require(row, sheet::SHEET_ACTIONS, at, "action_type")?,
                label: require(row, sheet::SHEET_ACTIONS, at, "label")?,
                icon: require(row, sheet::SHEET_ACTIONS, at, "icon")?,
                permission: require(row, sheet::SHEET_ACTIONS, at, "permission")?,
            })
        })?;

        Ok(ConfigModel {
            globals,
            roles,
            pages,
            columns,
            form_fields,
            actions,
        })
    }

    /// Lookup in the `GLOBAL` sheet; the first occurrence of a duplicate
    /// key wins.
    pub fn global_value(&self, key: &str) -> Option<&str> {
        self.globals
            .iter()
            .find(|g| g.key == key)
            .map(|g| g.value.as_str())
    }

    pub fn app_name(&self) -> &str {
        self.global_value("app_name").unwrap_or("Generated App")
    }

    pub fn ui_library(&self) -> &str {
        self.global_value("ui_library").unwrap_or("antd")
    }

    pub fn theme_color(&self) -> &str {
        self.global_value("theme_color").unwrap_or("#1890ff")
    }

    pub fn sidebar_type(&self) -> &str {
        self.global_value("sidebar_type").unwrap_or("fixed")
    }

    pub fn currency(&self) -> &str {
        self.global_value("currency").unwrap_or("NPR")
    }

    pub fn timezone(&self) -> &str {
        self.global_value("timezone").unwrap_or("Asia/Kathmandu")
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Columns for a page, preserving sheet order
    pub fn columns(&self, page_id: &str) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.page_id == page_id).collect()
    }

    /// Form fields for a page, sorted by `order` ascending; missing order
    /// sorts last, ties keep sheet order (stable sort).
    pub fn form_fields(&self, page_id: &str) -> Vec<&FormField> {
        let mut fields: Vec<&FormField> = self
            .form_fields
            .iter()
            .filter(|f| f.page_id == page_id)
            .collect();
        fields.sort_by_key(|f| f.order.unwrap_or(i64::MAX));
        fields
    }

    pub fn actions(&self, page_id: &str) -> Vec<&Action> {
        self.actions.iter().filter(|a| a.page_id == page_id).collect()
    }

    /// Every `page_id` referenced by a column/form-field/action row,
    /// paired with the sheet that references it. Used for dangling
    /// reference detection.
    pub fn referenced_page_ids(&self) -> Vec<(&'static str, &str)> {
        let mut refs: Vec<(&'static str, &str)> = Vec::new();
        refs.extend(
            self.columns
                .iter()
                .map(|c| (sheet::SHEET_COLUMNS, c.page_id.as_str())),
        );
        refs.extend(
            self.form_fields
                .iter()
                .map(|f| (sheet::SHEET_FORM_FIELDS, f.page_id.as_str())),
        );
        refs.extend(
            self.actions
                .iter()
                .map(|a| (sheet::SHEET_ACTIONS, a.page_id.as_str())),
        );
        refs
    }

    /// Content fingerprint of the normalized model, stamped into generated
    /// provenance headers. Pure function of the configuration: identical
    /// input yields an identical fingerprint (and no timestamps anywhere),
    /// which keeps regeneration byte-identical.
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let canonical = serde_json::to_string(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        format!("sha256:{}", hex::encode(&hasher.finalize()[..8]))
    }
}

fn parse_sheet<T>(
    workbook: &Workbook,
    name: &str,
    mut parse: impl FnMut(&Row, usize) -> Result<T>,
) -> Result<Vec<T>> {
    workbook
        .rows(name)
        .iter()
        .enumerate()
        .map(|(i, row)| parse(row, i + 1))
        .collect()
}

fn require(row: &Row, sheet_name: &str, at: usize, field: &str) -> Result<String> {
    sheet::cell_str(row, field)
        .ok_or_else(|| Error::malformed(sheet_name, format!("row {at}: missing field '{field}'")))
}

fn yes(row: &Row, field: &str) -> bool {
    sheet::cell_str(row, field).as_deref() == Some("YES")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_model() -> ConfigModel {
        ConfigModel::load(&Workbook::sample()).unwrap()
    }

    #[test]
    fn test_load_sample() {
        let model = sample_model();
        assert_eq!(model.app_name(), "Universal Management System");
        assert_eq!(model.ui_library(), "antd");
        assert_eq!(model.currency(), "NPR");
        assert_eq!(model.pages().len(), 3);
        assert_eq!(model.roles().len(), 3);
    }

    #[test]
    fn test_missing_pages_sheet_is_malformed() {
        let wb = Workbook::from_yaml("GLOBAL:\n  - key: app_name\n    value: X\n").unwrap();
        let err = ConfigModel::load(&wb).unwrap_err();
        match err {
            Error::ConfigMalformed { sheet, .. } => assert_eq!(sheet, "PAGES"),
            other => panic!("expected ConfigMalformed, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_field_names_sheet_and_field() {
        let wb = Workbook::from_yaml(
            "PAGES:\n  - page_id: a\n    title: A\n    icon: x\n    route: /a\nCOLUMNS:\n  - page_id: a\n    field: id\n",
        )
        .unwrap();
        let err = ConfigModel::load(&wb).unwrap_err();
        match err {
            Error::ConfigMalformed { sheet, detail } => {
                assert_eq!(sheet, "COLUMNS");
                assert!(detail.contains("label"), "detail was: {detail}");
                assert!(detail.contains("row 1"));
            }
            other => panic!("expected ConfigMalformed, got {other:?}"),
        }
    }

    #[test]
    fn test_optional_fields_get_defaults() {
        let model = sample_model();
        let columns = model.columns("products");
        assert_eq!(columns.len(), 2);
        assert!(!columns[0].sortable);
        assert_eq!(columns[0].width, Some(80));

        let fields = model.form_fields("products");
        assert!(!fields[1].required);
        assert!(fields[1].options.is_none());
    }

    #[test]
    fn test_columns_preserve_sheet_order() {
        let model = sample_model();
        let fields: Vec<&str> = model
            .columns("users")
            .iter()
            .map(|c| c.field.as_str())
            .collect();
        assert_eq!(fields, ["id", "name", "email"]);
    }

    #[test]
    fn test_form_fields_sorted_by_order() {
        let wb = Workbook::from_yaml(
            r#"
PAGES:
  - { page_id: users, title: Users, icon: "👥", route: /users }
FORM_FIELDS:
  - { page_id: users, field: name, label: Name, type: text, order: 2 }
  - { page_id: users, field: email, label: Email, type: email, order: 1 }
"#,
        )
        .unwrap();
        let model = ConfigModel::load(&wb).unwrap();
        let fields: Vec<&str> = model
            .form_fields("users")
            .iter()
            .map(|f| f.field.as_str())
            .collect();
        assert_eq!(fields, ["email", "name"]);
    }

    #[test]
    fn test_form_fields_missing_order_sorts_last_stably() {
        let wb = Workbook::from_yaml(
            r#"
PAGES:
  - { page_id: p, title: P, icon: x, route: /p }
FORM_FIELDS:
  - { page_id: p, field: a, label: A, type: text }
  - { page_id: p, field: b, label: B, type: text, order: 5 }
  - { page_id: p, field: c, label: C, type: text }
"#,
        )
        .unwrap();
        let model = ConfigModel::load(&wb).unwrap();
        let fields: Vec<&str> = model
            .form_fields("p")
            .iter()
            .map(|f| f.field.as_str())
            .collect();
        // b has an explicit order; a and c sort last in sheet order
        assert_eq!(fields, ["b", "a", "c"]);
    }

    #[test]
    fn test_sortable_requires_literal_yes() {
        let wb = Workbook::from_yaml(
            r#"
PAGES:
  - { page_id: p, title: P, icon: x, route: /p }
COLUMNS:
  - { page_id: p, field: a, label: A, type: string, sortable: YES }
  - { page_id: p, field: b, label: B, type: string, sortable: yes }
  - { page_id: p, field: c, label: C, type: string }
"#,
        )
        .unwrap();
        let model = ConfigModel::load(&wb).unwrap();
        let sortable: Vec<bool> = model.columns("p").iter().map(|c| c.sortable).collect();
        assert_eq!(sortable, [true, false, false]);
    }

    #[test]
    fn test_duplicate_global_key_first_wins() {
        let wb = Workbook::from_yaml(
            r#"
PAGES:
  - { page_id: p, title: P, icon: x, route: /p }
GLOBAL:
  - { key: app_name, value: First }
  - { key: app_name, value: Second }
"#,
        )
        .unwrap();
        let model = ConfigModel::load(&wb).unwrap();
        assert_eq!(model.global_value("app_name"), Some("First"));
    }

    #[test]
    fn test_role_permissions_split_in_order() {
        let model = sample_model();
        let admin = &model.roles()[1];
        assert_eq!(admin.permissions, ["read.*", "write.*", "delete.*"]);
    }

    #[test]
    fn test_select_options_split() {
        let field = FormField {
            page_id: "p".into(),
            field: "status".into(),
            label: "Status".into(),
            field_type: "select".into(),
            required: false,
            order: None,
            options: Some("active, inactive,archived".into()),
        };
        assert_eq!(field.option_list(), ["active", "inactive", "archived"]);
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let a = sample_model().fingerprint();
        let b = sample_model().fingerprint();
        assert_eq!(a, b);
        assert!(a.starts_with("sha256:"));
    }
}
