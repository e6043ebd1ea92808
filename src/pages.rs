//! Built-in pages — definitions fixed by the compiler rather than supplied
//! via configuration.
//!
//! Two groups feed the merge ahead of configured pages: public landing
//! pages (including the `*` catch-all) and authenticated screens that ship
//! with every generated app. Built-ins win against a configured page with
//! the same id.

use crate::model::Page;

/// Route pattern of the catch-all, not-found page
pub const CATCH_ALL_ROUTE: &str = "*";

/// Page ids whose screens are generated from built-in templates; a
/// configured page with one of these ids contributes route metadata only,
/// never a dynamic list+form screen.
pub const RESERVED_PAGE_IDS: &[&str] = &["dashboard", "settings", "profile"];

fn page(
    page_id: &str,
    title: &str,
    icon: &str,
    route: &str,
    permissions: Option<&str>,
) -> Page {
    Page {
        page_id: page_id.to_string(),
        title: title.to_string(),
        icon: icon.to_string(),
        route: route.to_string(),
        permissions: permissions.map(str::to_string),
        order: None,
    }
}

/// Public landing pages, declaration order. No authentication, no
/// navigation entry; the catch-all terminates the route table.
pub fn builtin_public() -> Vec<Page> {
    vec![
        page("home", "Home", "🏠", "/", None),
        page("about", "About", "ℹ️", "/about", None),
        page("contact", "Contact", "✉️", "/contact", None),
        page("services", "Services", "🛠️", "/services", None),
        page("not_found", "Not Found", "❓", CATCH_ALL_ROUTE, None),
    ]
}

/// Authenticated screens every generated app carries. None of them has an
/// explicit order, so they sort after explicitly ordered configured pages
/// in the navigation.
pub fn builtin_authenticated() -> Vec<Page> {
    vec![
        page("dashboard", "Dashboard", "📊", "/dashboard", Some("dashboard.view")),
        page("profile", "Profile", "👤", "/profile", Some("profile.view")),
        page("settings", "Settings", "⚙️", "/settings", Some("settings.view")),
    ]
}

/// Whether a page id is reserved for built-in screen generation
pub fn is_reserved(page_id: &str) -> bool {
    RESERVED_PAGE_IDS.contains(&page_id)
}
