//! Template context structures
//!
//! Converts artifact descriptors into template-friendly view structs. The
//! route table and import list are pre-assembled here as plain strings so
//! the templates stay free of structural logic.

use crate::artifact::{FormView, ListView, NavItem, RouteEntry};
use crate::error::Result;
use crate::model::ConfigModel;
use serde::Serialize;

/// Global settings slice every template receives. Built once per
/// compilation; templates never see the whole model.
#[derive(Debug, Clone, Serialize)]
pub struct AppContext {
    pub app_name: String,
    pub organization: Option<String>,
    pub ui_library: String,
    /// Branches the dependency manifest and stylesheet imports
    pub ui_antd: bool,
    pub theme_color: String,
    pub sidebar_fixed: bool,
    pub currency: String,
    pub timezone: String,
    /// Configuration fingerprint stamped into provenance headers
    pub fingerprint: String,
}

impl AppContext {
    pub fn new(model: &ConfigModel) -> Self {
        AppContext {
            app_name: model.app_name().to_string(),
            organization: model.global_value("organization").map(str::to_string),
            ui_library: model.ui_library().to_string(),
            ui_antd: model.ui_library() == "antd",
            theme_color: model.theme_color().to_string(),
            sidebar_fixed: model.sidebar_type() == "fixed",
            currency: model.currency().to_string(),
            timezone: model.timezone().to_string(),
            fingerprint: model.fingerprint(),
        }
    }
}

/// Context for one dynamic list+form screen
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    #[serde(flatten)]
    pub app: AppContext,
    pub page_id: String,
    /// Component identifier, e.g. `UsersPage`
    pub component: String,
    pub title: String,
    pub endpoint: String,
    /// Column descriptors, pre-serialized for embedding
    pub columns_json: String,
    /// Field controls, pre-serialized for embedding
    pub fields_json: String,
    pub actions: Vec<ActionView>,
    pub has_actions: bool,
}

/// One row action as the page template consumes it
#[derive(Debug, Clone, Serialize)]
pub struct ActionView {
    pub action_type: String,
    pub label: String,
    pub icon: String,
    pub permission: String,
    pub is_edit: bool,
    pub is_delete: bool,
}

impl PageContext {
    pub fn new(app: &AppContext, list: &ListView, form: &FormView) -> Result<Self> {
        let actions: Vec<ActionView> = list
            .actions
            .iter()
            .map(|a| ActionView {
                action_type: a.action_type.clone(),
                label: a.label.clone(),
                icon: a.icon.clone(),
                permission: a.permission.clone(),
                is_edit: a.action_type == "edit",
                is_delete: a.action_type == "delete",
            })
            .collect();

        Ok(PageContext {
            app: app.clone(),
            page_id: list.page_id.clone(),
            component: crate::artifact::component_name(&list.page_id),
            title: list.title.clone(),
            endpoint: list.endpoint.clone(),
            columns_json: serde_json::to_string_pretty(&list.columns)?,
            fields_json: serde_json::to_string_pretty(&form.fields)?,
            has_actions: !actions.is_empty(),
            actions,
        })
    }
}

/// Context for the configuration store (navigation data embed)
#[derive(Debug, Clone, Serialize)]
pub struct NavStoreContext {
    #[serde(flatten)]
    pub app: AppContext,
    /// Navigation items in final order, pre-serialized
    pub pages_json: String,
}

impl NavStoreContext {
    pub fn new(app: &AppContext, items: &[NavItem]) -> Result<Self> {
        Ok(NavStoreContext {
            app: app.clone(),
            pages_json: serde_json::to_string_pretty(items)?,
        })
    }
}

/// Context for the route table (`App.tsx`)
#[derive(Debug, Clone, Serialize)]
pub struct RoutesContext {
    #[serde(flatten)]
    pub app: AppContext,
    /// Lazy-import lines, one per routed page
    pub page_imports: String,
    /// Public landing routes, excluding the catch-all
    pub public_routes: String,
    /// Permission-gated routes inside the layout shell
    pub protected_routes: String,
    /// The terminating catch-all route
    pub catch_all_routes: String,
}

impl RoutesContext {
    pub fn new(app: &AppContext, entries: &[RouteEntry]) -> Result<Self> {
        let mut imports = Vec::new();
        let mut public_routes = Vec::new();
        let mut protected_routes = Vec::new();
        let mut catch_all_routes = Vec::new();

        for entry in entries {
            let module = if entry.public {
                format!("@/pages/landing/{}", entry.page_id)
            } else {
                format!("@/pages/{}", entry.page_id)
            };
            imports.push(format!(
                "const {} = lazy(() => import('{}'))",
                entry.component, module
            ));

            if entry.catch_all {
                catch_all_routes.push(format!(
                    "          <Route path=\"*\" element={{<{} />}} />",
                    entry.component
                ));
            } else if entry.public {
                public_routes.push(format!(
                    "          <Route path=\"{}\" element={{<{} />}} />",
                    entry.path, entry.component
                ));
            } else {
                protected_routes.push(protected_route_block(entry)?);
            }
        }

        Ok(RoutesContext {
            app: app.clone(),
            page_imports: imports.join("\n"),
            public_routes: public_routes.join("\n"),
            protected_routes: protected_routes.join("\n"),
            catch_all_routes: catch_all_routes.join("\n"),
        })
    }
}

fn protected_route_block(entry: &RouteEntry) -> Result<String> {
    let required = serde_json::to_string(&entry.required)?;
    Ok(format!(
        r#"            <Route
              path="{path}"
              element={{
                <ProtectedRoute requiredPermissions={{ {required} }}>
                  <{component} />
                </ProtectedRoute>
              }}
            />"#,
        path = entry.path,
        required = required,
        component = entry.component,
    ))
}
