//! Permission matching — pure functions shared by every generated artifact
//!
//! A held permission is a pattern: the global wildcard `*`, a prefix
//! wildcard `<resource>.*`, or a concrete string. A required permission is
//! always concrete; required-side wildcards are not supported.
//!
//! Route access is disjunctive on purpose: a route listing several
//! permissions is reachable by anyone holding any one of them.

/// Whether a held permission set satisfies one required permission.
pub fn has_permission(held: &[String], required: &str) -> bool {
    held.iter().any(|pattern| match pattern.as_str() {
        "*" => true,
        p if p == required => true,
        p => p
            .strip_suffix(".*")
            .is_some_and(|prefix| required.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('.'))),
    })
}

/// Whether a held permission set can access a route. An empty requirement
/// list means the route is unrestricted; otherwise ANY satisfied entry
/// grants access.
pub fn can_access_route(held: &[String], required: &[String]) -> bool {
    required.is_empty() || required.iter().any(|r| has_permission(held, r))
}

/// Split a comma-separated permission cell into a pattern list, preserving
/// order and dropping empty segments.
pub fn split_permissions(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}
