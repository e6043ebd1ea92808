//! Page merging — three overlapping page sources become one ordered,
//! deduplicated table.
//!
//! The precedence rule is ordered-merge-with-first-wins: built-in public
//! pages, then built-in authenticated pages, then configured pages, and
//! the first definition of a `page_id` is the one that survives. The
//! navigation subset and the route table are views over the merged table;
//! only the navigation applies a permission filter, the route table stays
//! complete and defers authorization to the per-route gate.

use crate::model::Page;
use crate::pages::CATCH_ALL_ROUTE;
use crate::permission::can_access_route;
use std::collections::BTreeMap;

/// A merged page plus its source tag
#[derive(Debug, Clone, PartialEq)]
pub struct MergedPage {
    pub page: Page,
    /// True for built-in landing pages: ungated routes, never in the
    /// shell navigation.
    pub is_public: bool,
    /// True for pages supplied by the workbook (survived the merge)
    pub is_configured: bool,
}

impl MergedPage {
    pub fn id(&self) -> &str {
        &self.page.page_id
    }

    pub fn is_catch_all(&self) -> bool {
        self.page.route == CATCH_ALL_ROUTE
    }
}

/// The merged page table
#[derive(Debug, Clone)]
pub struct MergedPages {
    ordered: Vec<MergedPage>,
    by_id: BTreeMap<String, usize>,
}

/// Merge the three page sources under the first-wins precedence rule.
pub fn merge(
    builtin_public: &[Page],
    builtin_authenticated: &[Page],
    configured: &[Page],
) -> MergedPages {
    let mut ordered: Vec<MergedPage> = Vec::new();
    let mut by_id: BTreeMap<String, usize> = BTreeMap::new();

    let mut push = |page: &Page, is_public: bool, is_configured: bool| {
        if by_id.contains_key(&page.page_id) {
            return;
        }
        by_id.insert(page.page_id.clone(), ordered.len());
        ordered.push(MergedPage {
            page: page.clone(),
            is_public,
            is_configured,
        });
    };

    for page in builtin_public {
        push(page, true, false);
    }
    for page in builtin_authenticated {
        push(page, false, false);
    }
    for page in configured {
        push(page, false, true);
    }

    MergedPages { ordered, by_id }
}

impl MergedPages {
    /// All pages in merge order
    pub fn ordered(&self) -> &[MergedPage] {
        &self.ordered
    }

    pub fn get(&self, page_id: &str) -> Option<&MergedPage> {
        self.by_id.get(page_id).map(|&i| &self.ordered[i])
    }

    pub fn contains(&self, page_id: &str) -> bool {
        self.by_id.contains_key(page_id)
    }

    /// Navigation-menu subset for a held permission set: non-public pages
    /// the set can access, stable-sorted ascending by `order` with missing
    /// order sorting last (merge order preserved among ties).
    pub fn navigation(&self, held: &[String]) -> Vec<&MergedPage> {
        let mut menu: Vec<&MergedPage> = self
            .ordered
            .iter()
            .filter(|p| !p.is_public)
            .filter(|p| can_access_route(held, &p.page.required_permissions()))
            .collect();
        menu.sort_by_key(|p| p.page.order.unwrap_or(i64::MAX));
        menu
    }

    /// Navigation candidates with no permission filter, in navigation
    /// order. This is what gets embedded in the generated shell, which
    /// applies the permission filter against the live session.
    pub fn navigation_unfiltered(&self) -> Vec<&MergedPage> {
        let mut menu: Vec<&MergedPage> =
            self.ordered.iter().filter(|p| !p.is_public).collect();
        menu.sort_by_key(|p| p.page.order.unwrap_or(i64::MAX));
        menu
    }

    /// The full route table: every page, no permission filter, with the
    /// catch-all moved to the end regardless of any `order` value.
    pub fn route_table(&self) -> Vec<&MergedPage> {
        let mut routes: Vec<&MergedPage> = Vec::with_capacity(self.ordered.len());
        let mut catch_all: Vec<&MergedPage> = Vec::new();
        for page in &self.ordered {
            if page.is_catch_all() {
                catch_all.push(page);
            } else {
                routes.push(page);
            }
        }
        routes.extend(catch_all);
        routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::{builtin_authenticated, builtin_public};

    fn page(id: &str, title: &str, order: Option<i64>) -> Page {
        Page {
            page_id: id.to_string(),
            title: title.to_string(),
            icon: "x".to_string(),
            route: format!("/{id}"),
            permissions: None,
            order,
        }
    }

    fn gated(id: &str, permissions: &str, order: Option<i64>) -> Page {
        Page {
            permissions: Some(permissions.to_string()),
            ..page(id, id, order)
        }
    }

    #[test]
    fn test_first_wins_precedence() {
        let configured = vec![page("dashboard", "Shadowed Dashboard", Some(1))];
        let merged = merge(&builtin_public(), &builtin_authenticated(), &configured);

        let dashboard = merged.get("dashboard").unwrap();
        assert_eq!(dashboard.page.title, "Dashboard");
        assert!(!dashboard.is_configured);
        // The losing definition does not create a second entry
        assert_eq!(
            merged.ordered().iter().filter(|p| p.id() == "dashboard").count(),
            1
        );
    }

    #[test]
    fn test_merge_order_public_then_authenticated_then_configured() {
        let configured = vec![page("users", "Users", Some(2))];
        let merged = merge(&builtin_public(), &builtin_authenticated(), &configured);
        let ids: Vec<&str> = merged.ordered().iter().map(|p| p.id()).collect();
        assert_eq!(
            ids,
            [
                "home", "about", "contact", "services", "not_found",
                "dashboard", "profile", "settings", "users"
            ]
        );
    }

    #[test]
    fn test_navigation_ordering_stability() {
        // {A: order=2}, {B: order=None}, {C: order=1} → C, A, B
        let configured = vec![
            page("a", "A", Some(2)),
            page("b", "B", None),
            page("c", "C", Some(1)),
        ];
        let merged = merge(&[], &[], &configured);
        let ids: Vec<&str> = merged.navigation(&[]).iter().map(|p| p.id()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn test_navigation_ties_keep_merge_order() {
        let configured = vec![
            page("x", "X", None),
            page("y", "Y", Some(7)),
            page("z", "Z", Some(7)),
        ];
        let merged = merge(&[], &[], &configured);
        let ids: Vec<&str> = merged.navigation(&[]).iter().map(|p| p.id()).collect();
        assert_eq!(ids, ["y", "z", "x"]);
    }

    #[test]
    fn test_navigation_excludes_public_pages() {
        let merged = merge(&builtin_public(), &builtin_authenticated(), &[]);
        let nav = merged.navigation(&["*".to_string()]);
        assert!(nav.iter().all(|p| !p.is_public));
        assert!(nav.iter().any(|p| p.id() == "dashboard"));
    }

    #[test]
    fn test_navigation_filters_by_permission() {
        let configured = vec![
            gated("users", "users.*", Some(1)),
            gated("products", "products.*", Some(2)),
        ];
        let merged = merge(&[], &[], &configured);

        let held = vec!["users.view".to_string()];
        let ids: Vec<&str> = merged.navigation(&held).iter().map(|p| p.id()).collect();
        assert_eq!(ids, ["users"]);

        // Ungated pages are visible to an empty permission set
        let merged = merge(&[], &[], &[page("open", "Open", None)]);
        assert_eq!(merged.navigation(&[]).len(), 1);
    }

    #[test]
    fn test_route_table_keeps_unauthorized_routes() {
        let configured = vec![gated("users", "users.*", Some(1))];
        let merged = merge(&builtin_public(), &builtin_authenticated(), &configured);
        // No permission filter on the route table
        assert!(merged.route_table().iter().any(|p| p.id() == "users"));
    }

    #[test]
    fn test_catch_all_routes_last() {
        let configured = vec![page("zzz", "Zzz", Some(999))];
        let merged = merge(&builtin_public(), &builtin_authenticated(), &configured);
        let routes = merged.route_table();
        assert_eq!(routes.last().unwrap().id(), "not_found");
        // ...even though the catch-all is declared first among the public pages
        assert_eq!(merged.ordered()[4].id(), "not_found");
    }
}
