//! End-to-end pipeline tests over the reference workbook

use pretty_assertions::assert_eq;
use sheetgen::{compile, ConfigModel, Workbook};

fn sample_output() -> sheetgen::Compilation {
    let model = ConfigModel::load(&Workbook::sample()).unwrap();
    compile(&model).unwrap()
}

#[test]
fn round_trip_produces_artifacts_for_exactly_the_sample_pages() {
    let out = sample_output();

    // Dynamic screens for the non-reserved configured pages
    assert!(out.files.contains_key("src/pages/users.tsx"));
    assert!(out.files.contains_key("src/pages/products.tsx"));

    // dashboard is reserved: its screen comes from the built-in template,
    // not from the dynamic one
    let dashboard = &out.files["src/pages/dashboard.tsx"];
    assert!(dashboard.contains("DashboardPage"));
    assert!(!dashboard.contains("formFields"));

    // Exactly the expected screens directly under src/pages/
    let screens: Vec<&str> = out
        .files
        .keys()
        .filter(|k| k.starts_with("src/pages/"))
        .filter(|k| !k.starts_with("src/pages/auth/") && !k.starts_with("src/pages/landing/"))
        .map(String::as_str)
        .collect();
    assert_eq!(
        screens,
        [
            "src/pages/dashboard.tsx",
            "src/pages/products.tsx",
            "src/pages/profile.tsx",
            "src/pages/settings.tsx",
            "src/pages/users.tsx",
        ]
    );

    assert!(out.warnings.is_empty());
}

#[test]
fn users_list_view_exposes_columns_in_sheet_order() {
    let out = sample_output();
    let users = &out.files["src/pages/users.tsx"];

    let id = users.find("\"dataIndex\": \"id\"").expect("id column");
    let name = users.find("\"dataIndex\": \"name\"").expect("name column");
    let email = users.find("\"dataIndex\": \"email\"").expect("email column");
    assert!(id < name && name < email, "columns must keep sheet order");

    // Sortable flag carried through
    assert!(users.contains("\"sorter\": true"));
    // Action controls gated by their own permissions
    assert!(users.contains("hasPermission('users.update')"));
    assert!(users.contains("hasPermission('users.delete')"));
}

#[test]
fn users_form_requires_name_and_email_in_order() {
    let out = sample_output();
    let users = &out.files["src/pages/users.tsx"];

    let name = users.find("\"name\": \"name\"").expect("name field");
    let email = users.find("\"name\": \"email\"").expect("email field");
    assert!(name < email, "form fields must keep order");

    // Both sample fields are mandatory
    let required_count = users.matches("\"required\": true").count();
    assert_eq!(required_count, 2);
}

#[test]
fn products_form_price_is_optional() {
    let out = sample_output();
    let products = &out.files["src/pages/products.tsx"];
    assert!(products.contains("\"name\": \"price\""));
    assert!(products.contains("\"required\": false"));
}

#[test]
fn route_table_gates_configured_pages_and_ends_with_catch_all() {
    let out = sample_output();
    let app = &out.files["src/App.tsx"];

    assert!(app.contains("path=\"/users\""));
    assert!(app.contains("requiredPermissions={ [\"users.*\"] }"));
    assert!(app.contains("requiredPermissions={ [\"products.*\"] }"));
    assert!(app.contains("requiredPermissions={ [\"dashboard.view\"] }"));

    // Public landing pages are routed without a gate
    assert!(app.contains("<Route path=\"/\" element={<HomePage />} />"));

    // The catch-all is the last <Route in the file
    let catch_all = app.rfind("path=\"*\"").expect("catch-all route");
    let last_route = app.rfind("<Route").unwrap();
    assert!(catch_all > last_route, "catch-all must terminate the table");
}

#[test]
fn navigation_embed_reflects_merge_precedence_and_ordering() {
    let out = sample_output();
    let store = &out.files["src/store/configStore.ts"];

    // The configured dashboard row (order 1) loses to the built-in
    // definition (no order), so explicitly ordered pages come first.
    let users = store.find("\"page_id\": \"users\"").expect("users nav item");
    let products = store.find("\"page_id\": \"products\"").expect("products nav item");
    let dashboard = store.find("\"page_id\": \"dashboard\"").expect("dashboard nav item");
    assert!(users < products && products < dashboard);

    // Landing pages never show up in the navigation
    assert!(!store.contains("\"page_id\": \"home\""));
    assert!(!store.contains("\"page_id\": \"not_found\""));

    // Requirement lists are pre-split for the shell
    assert!(store.contains("\"users.*\""));
}

#[test]
fn generated_permission_util_carries_wildcard_semantics() {
    let out = sample_output();
    let permissions = &out.files["src/utils/permissions.ts"];

    assert!(permissions.contains("if (pattern === '*') return true"));
    assert!(permissions.contains("pattern.endsWith('.*')"));
    assert!(permissions.contains("if (!required || required.length === 0) return true"));
}

#[test]
fn compilation_is_deterministic() {
    let model = ConfigModel::load(&Workbook::sample()).unwrap();
    let first = compile(&model).unwrap();
    let second = compile(&model).unwrap();
    assert_eq!(first.files, second.files);

    // Loading the workbook again changes nothing either
    let model_again = ConfigModel::load(&Workbook::sample()).unwrap();
    let third = compile(&model_again).unwrap();
    assert_eq!(first.files, third.files);
}

#[test]
fn scaffolding_carries_global_settings() {
    let out = sample_output();

    assert!(out.files["index.html"].contains("<title>Universal Management System</title>"));
    assert!(out.files["tailwind.config.js"].contains("#1890ff"));
    assert!(out.files[".env"].contains("VITE_APP_NAME=Universal Management System"));
    assert!(out.files["package.json"].contains("\"antd\""));
    assert!(out.files["src/layouts/Layout.tsx"].contains("fixed-sidebar"));
    assert!(out.files["src/pages/settings.tsx"].contains("Asia/Kathmandu"));
}

#[test]
fn empty_page_compiles_to_empty_table_and_form() {
    let wb = Workbook::from_yaml(
        r#"
PAGES:
  - { page_id: notes, title: Notes, icon: "📝", route: /notes }
"#,
    )
    .unwrap();
    let model = ConfigModel::load(&wb).unwrap();
    let out = compile(&model).unwrap();

    let notes = &out.files["src/pages/notes.tsx"];
    assert!(notes.contains("const columns = []"));
    assert!(notes.contains("const formFields = []"));
    // No actions: the synthetic actions column is omitted entirely
    assert!(!notes.contains("actionColumn"));
}
