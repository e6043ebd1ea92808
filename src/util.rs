//! Shared utility functions

/// Convert snake_case to PascalCase
///
/// # Examples
/// ```
/// use sheetgen::util::to_pascal_case;
/// assert_eq!(to_pascal_case("not_found"), "NotFound");
/// assert_eq!(to_pascal_case("users"), "Users");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
        assert_eq!(to_pascal_case("foo"), "Foo");
        assert_eq!(to_pascal_case("not_found"), "NotFound");
        assert_eq!(to_pascal_case(""), "");
    }
}
