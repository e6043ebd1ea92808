//! Template-based code generation
//!
//! The single serialization boundary of the compiler: typed artifact
//! descriptors go in, generated source text comes out. Templates are
//! MiniJinja, embedded into the binary; contexts are the `Serialize` view
//! structs in [`context`]. No decision logic lives here — anything worth a
//! unit test happens before a context is built.

pub mod context;

use minijinja::Environment;
use serde::Serialize;
use std::sync::OnceLock;

use crate::error::Result;

// Embedded templates (compiled into binary)
mod embedded {
    pub const PACKAGE_JSON: &str = include_str!("../../templates/app/package.json.jinja");
    pub const VITE_CONFIG: &str = include_str!("../../templates/app/vite.config.ts.jinja");
    pub const INDEX_HTML: &str = include_str!("../../templates/app/index.html.jinja");
    pub const TAILWIND_CONFIG: &str = include_str!("../../templates/app/tailwind.config.js.jinja");
    pub const ENV: &str = include_str!("../../templates/app/env.jinja");
    pub const MAIN_TSX: &str = include_str!("../../templates/app/main.tsx.jinja");
    pub const INDEX_CSS: &str = include_str!("../../templates/app/index.css.jinja");
    pub const TYPES: &str = include_str!("../../templates/app/types.ts.jinja");
    pub const AUTH_STORE: &str = include_str!("../../templates/app/auth_store.ts.jinja");
    pub const CONFIG_STORE: &str = include_str!("../../templates/app/config_store.ts.jinja");
    pub const API: &str = include_str!("../../templates/app/api.ts.jinja");
    pub const PERMISSIONS: &str = include_str!("../../templates/app/permissions.ts.jinja");
    pub const COMMON: &str = include_str!("../../templates/app/common.ts.jinja");
    pub const USE_FETCH: &str = include_str!("../../templates/app/use_fetch.ts.jinja");
    pub const USE_PERMISSION: &str = include_str!("../../templates/app/use_permission.ts.jinja");
    pub const LAYOUT: &str = include_str!("../../templates/app/layout.tsx.jinja");
    pub const LAYOUT_CSS: &str = include_str!("../../templates/app/layout.css.jinja");
    pub const PROTECTED_ROUTE: &str = include_str!("../../templates/app/protected_route.tsx.jinja");
    pub const PAGE_HEADER: &str = include_str!("../../templates/app/page_header.tsx.jinja");
    pub const LOGIN: &str = include_str!("../../templates/app/login.tsx.jinja");
    pub const REGISTER: &str = include_str!("../../templates/app/register.tsx.jinja");
    pub const DASHBOARD: &str = include_str!("../../templates/app/dashboard.tsx.jinja");
    pub const SETTINGS: &str = include_str!("../../templates/app/settings.tsx.jinja");
    pub const PROFILE: &str = include_str!("../../templates/app/profile.tsx.jinja");
    pub const LANDING_HOME: &str = include_str!("../../templates/app/landing/home.tsx.jinja");
    pub const LANDING_ABOUT: &str = include_str!("../../templates/app/landing/about.tsx.jinja");
    pub const LANDING_CONTACT: &str = include_str!("../../templates/app/landing/contact.tsx.jinja");
    pub const LANDING_SERVICES: &str = include_str!("../../templates/app/landing/services.tsx.jinja");
    pub const LANDING_NOT_FOUND: &str = include_str!("../../templates/app/landing/not_found.tsx.jinja");
    pub const PAGE: &str = include_str!("../../templates/app/page.tsx.jinja");
    pub const APP: &str = include_str!("../../templates/app/app.tsx.jinja");
}

/// Template engine singleton
static ENGINE: OnceLock<Environment<'static>> = OnceLock::new();

/// Initialize the template engine with embedded templates
fn init_engine() -> Environment<'static> {
    let mut env = Environment::new();

    let sources: &[(&str, &str)] = &[
        ("package.json", embedded::PACKAGE_JSON),
        ("vite.config.ts", embedded::VITE_CONFIG),
        ("index.html", embedded::INDEX_HTML),
        ("tailwind.config.js", embedded::TAILWIND_CONFIG),
        ("env", embedded::ENV),
        ("main.tsx", embedded::MAIN_TSX),
        ("index.css", embedded::INDEX_CSS),
        ("types.ts", embedded::TYPES),
        ("auth_store.ts", embedded::AUTH_STORE),
        ("config_store.ts", embedded::CONFIG_STORE),
        ("api.ts", embedded::API),
        ("permissions.ts", embedded::PERMISSIONS),
        ("common.ts", embedded::COMMON),
        ("use_fetch.ts", embedded::USE_FETCH),
        ("use_permission.ts", embedded::USE_PERMISSION),
        ("layout.tsx", embedded::LAYOUT),
        ("layout.css", embedded::LAYOUT_CSS),
        ("protected_route.tsx", embedded::PROTECTED_ROUTE),
        ("page_header.tsx", embedded::PAGE_HEADER),
        ("login.tsx", embedded::LOGIN),
        ("register.tsx", embedded::REGISTER),
        ("dashboard.tsx", embedded::DASHBOARD),
        ("settings.tsx", embedded::SETTINGS),
        ("profile.tsx", embedded::PROFILE),
        ("landing/home.tsx", embedded::LANDING_HOME),
        ("landing/about.tsx", embedded::LANDING_ABOUT),
        ("landing/contact.tsx", embedded::LANDING_CONTACT),
        ("landing/services.tsx", embedded::LANDING_SERVICES),
        ("landing/not_found.tsx", embedded::LANDING_NOT_FOUND),
        ("page.tsx", embedded::PAGE),
        ("app.tsx", embedded::APP),
    ];

    for (name, source) in sources {
        env.add_template(name, source)
            .unwrap_or_else(|e| panic!("failed to load template {name}: {e}"));
    }

    env
}

/// Get the global template engine
pub fn engine() -> &'static Environment<'static> {
    ENGINE.get_or_init(init_engine)
}

/// Render a named template with a context
pub fn render(name: &str, ctx: impl Serialize) -> Result<String> {
    Ok(engine().get_template(name)?.render(ctx)?)
}
