//! The compilation pipeline
//!
//! Single-pass, strictly sequential: model → merged page table → artifact
//! descriptors → rendered path→text map. All inputs are immutable and the
//! map is produced whole or not at all — an error aborts before anything
//! reaches the assembler. Compiling the same model twice yields a
//! byte-identical map.

use crate::artifact::{self, NavItem, RouteEntry};
use crate::error::Result;
use crate::merge::{self, MergedPages};
use crate::model::{ConfigModel, Page};
use crate::pages;
use crate::templates::{
    self,
    context::{AppContext, NavStoreContext, PageContext, RoutesContext},
};
use crate::util::to_pascal_case;
use std::collections::BTreeMap;
use std::fmt;

/// The compiler's output: relative file path → generated text, plus
/// non-fatal findings.
#[derive(Debug, Clone, Default)]
pub struct Compilation {
    pub files: BTreeMap<String, String>,
    pub warnings: Vec<Warning>,
}

/// Non-fatal findings surfaced alongside the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A sheet row references a page id absent from the merged table. The
    /// artifact is still generated, it is just never routed to.
    DanglingReference {
        sheet: &'static str,
        page_id: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DanglingReference { sheet, page_id } => write!(
                f,
                "sheet {sheet} references unknown page '{page_id}' (artifact generated but never routed)"
            ),
        }
    }
}

/// Compile a configuration model into the full generated source tree.
pub fn compile(model: &ConfigModel) -> Result<Compilation> {
    let merged = merge::merge(
        &pages::builtin_public(),
        &pages::builtin_authenticated(),
        model.pages(),
    );

    let app = AppContext::new(model);
    let mut files = BTreeMap::new();

    // Project scaffolding
    files.insert("package.json".into(), templates::render("package.json", &app)?);
    files.insert("vite.config.ts".into(), templates::render("vite.config.ts", &app)?);
    files.insert("index.html".into(), templates::render("index.html", &app)?);
    files.insert("tailwind.config.js".into(), templates::render("tailwind.config.js", &app)?);
    files.insert(".env".into(), templates::render("env", &app)?);
    files.insert("src/main.tsx".into(), templates::render("main.tsx", &app)?);
    files.insert("src/index.css".into(), templates::render("index.css", &app)?);
    files.insert("src/types/index.ts".into(), templates::render("types.ts", &app)?);

    // Stores, services, utils, hooks
    files.insert("src/store/authStore.ts".into(), templates::render("auth_store.ts", &app)?);
    let nav_items: Vec<NavItem> = merged
        .navigation_unfiltered()
        .iter()
        .map(|p| artifact::nav_item(p))
        .collect();
    files.insert(
        "src/store/configStore.ts".into(),
        templates::render("config_store.ts", &NavStoreContext::new(&app, &nav_items)?)?,
    );
    files.insert("src/services/api.ts".into(), templates::render("api.ts", &app)?);
    files.insert("src/utils/permissions.ts".into(), templates::render("permissions.ts", &app)?);
    files.insert("src/utils/common.ts".into(), templates::render("common.ts", &app)?);
    files.insert("src/hooks/useFetch.ts".into(), templates::render("use_fetch.ts", &app)?);
    files.insert("src/hooks/usePermission.ts".into(), templates::render("use_permission.ts", &app)?);

    // Shell
    files.insert("src/layouts/Layout.tsx".into(), templates::render("layout.tsx", &app)?);
    files.insert("src/layouts/Layout.css".into(), templates::render("layout.css", &app)?);
    files.insert(
        "src/components/ProtectedRoute.tsx".into(),
        templates::render("protected_route.tsx", &app)?,
    );
    files.insert(
        "src/components/PageHeader.tsx".into(),
        templates::render("page_header.tsx", &app)?,
    );

    // Auth and built-in screens
    files.insert("src/pages/auth/Login.tsx".into(), templates::render("login.tsx", &app)?);
    files.insert("src/pages/auth/Register.tsx".into(), templates::render("register.tsx", &app)?);
    files.insert("src/pages/dashboard.tsx".into(), templates::render("dashboard.tsx", &app)?);
    files.insert("src/pages/settings.tsx".into(), templates::render("settings.tsx", &app)?);
    files.insert("src/pages/profile.tsx".into(), templates::render("profile.tsx", &app)?);
    for landing in ["home", "about", "contact", "services", "not_found"] {
        files.insert(
            format!("src/pages/landing/{landing}.tsx"),
            templates::render(&format!("landing/{landing}.tsx"), &app)?,
        );
    }

    // Dynamic list+form screens for configured pages
    for merged_page in merged.ordered() {
        if !merged_page.is_configured || pages::is_reserved(merged_page.id()) {
            continue;
        }
        let (path, text) = dynamic_page(model, &app, &merged_page.page)?;
        files.insert(path, text);
    }

    // Dangling references: flag them, then generate the unreachable
    // artifact anyway
    let warnings = dangling_warnings(model, &merged);
    for page_id in unique_dangling_ids(&warnings) {
        let orphan = orphan_page(page_id);
        let (path, text) = dynamic_page(model, &app, &orphan)?;
        files.insert(path, text);
    }

    // Route table
    let entries: Vec<RouteEntry> = merged
        .route_table()
        .iter()
        .map(|p| artifact::route_entry(p))
        .collect();
    files.insert(
        "src/App.tsx".into(),
        templates::render("app.tsx", &RoutesContext::new(&app, &entries)?)?,
    );

    Ok(Compilation { files, warnings })
}

fn dynamic_page(model: &ConfigModel, app: &AppContext, page: &Page) -> Result<(String, String)> {
    let list = artifact::list_view(page, &model.columns(&page.page_id), &model.actions(&page.page_id));
    let form = artifact::form_view(page, &model.form_fields(&page.page_id));
    let ctx = PageContext::new(app, &list, &form)?;
    let text = templates::render("page.tsx", &ctx)?;
    Ok((format!("src/pages/{}.tsx", page.page_id), text))
}

fn dangling_warnings(model: &ConfigModel, merged: &MergedPages) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for (sheet, page_id) in model.referenced_page_ids() {
        if merged.contains(page_id) {
            continue;
        }
        let warning = Warning::DanglingReference {
            sheet,
            page_id: page_id.to_string(),
        };
        if !warnings.contains(&warning) {
            warnings.push(warning);
        }
    }
    warnings
}

fn unique_dangling_ids(warnings: &[Warning]) -> Vec<&str> {
    let mut ids: Vec<&str> = Vec::new();
    for warning in warnings {
        let Warning::DanglingReference { page_id, .. } = warning;
        if !ids.contains(&page_id.as_str()) {
            ids.push(page_id);
        }
    }
    ids
}

fn orphan_page(page_id: &str) -> Page {
    Page {
        page_id: page_id.to_string(),
        title: to_pascal_case(page_id),
        icon: String::new(),
        route: format!("/{page_id}"),
        permissions: None,
        order: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Workbook;

    fn sample_compilation() -> Compilation {
        let model = ConfigModel::load(&Workbook::sample()).unwrap();
        compile(&model).unwrap()
    }

    #[test]
    fn test_sample_produces_expected_page_artifacts() {
        let out = sample_compilation();
        assert!(out.files.contains_key("src/pages/users.tsx"));
        assert!(out.files.contains_key("src/pages/products.tsx"));
        // dashboard is reserved for the built-in screen
        assert!(out.files.contains_key("src/pages/dashboard.tsx"));
        assert!(out.files.contains_key("src/App.tsx"));
        assert!(out.files.contains_key("src/store/configStore.ts"));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_dangling_reference_warns_and_generates_orphan() {
        let wb = Workbook::from_yaml(
            r#"
PAGES:
  - { page_id: users, title: Users, icon: "👥", route: /users }
COLUMNS:
  - { page_id: ghosts, field: id, label: ID, type: number }
"#,
        )
        .unwrap();
        let model = ConfigModel::load(&wb).unwrap();
        let out = compile(&model).unwrap();

        assert_eq!(
            out.warnings,
            vec![Warning::DanglingReference {
                sheet: "COLUMNS",
                page_id: "ghosts".into()
            }]
        );
        // The artifact exists but nothing routes to it
        assert!(out.files.contains_key("src/pages/ghosts.tsx"));
        let routes = &out.files["src/App.tsx"];
        assert!(!routes.contains("ghosts"));
    }
}
