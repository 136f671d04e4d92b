//! Zone pivot markup and line predicates.

/// Closing marker of a zone pivot.
pub const ZONE_END: &str = "::: zone-end";

/// Prefix shared by zone pivot open and close markers.
const ZONE_PREFIX: &str = "::: zone";

/// Pivot group declared in front-matter by default.
pub const DEFAULT_PIVOT_GROUP: &str = "graph-sdk-languages";

/// Front-matter key that enables zone pivots for a page.
const PIVOT_GROUPS_KEY: &str = "zone_pivot_groups";

/// Open marker for a pivot identifier.
///
/// ```
/// assert_eq!(
///     zp_tabs::zone_pivot_open("programming-language-go"),
///     r#"::: zone pivot="programming-language-go""#
/// );
/// ```
#[must_use]
pub fn zone_pivot_open(pivot_id: &str) -> String {
    format!("{ZONE_PREFIX} pivot=\"{pivot_id}\"")
}

/// Front-matter line declaring a pivot group.
#[must_use]
pub fn pivot_group_line(group: &str) -> String {
    format!("{PIVOT_GROUPS_KEY}: {group}")
}

/// Check whether a line carries content other than zone pivot markup.
///
/// Blank lines, zone markers and the `[sample-code]` / `[sdk-documentation]`
/// link lines are not content.
#[must_use]
pub fn is_non_zone_pivot_line(line: &str) -> bool {
    !line.trim().is_empty()
        && !line.starts_with(ZONE_PREFIX)
        && !line.contains("[sample-code]")
        && !line.contains("[sdk-documentation]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pivot_group_line() {
        assert_eq!(
            pivot_group_line(DEFAULT_PIVOT_GROUP),
            "zone_pivot_groups: graph-sdk-languages"
        );
    }

    #[test]
    fn test_non_zone_pivot_line_content() {
        assert!(is_non_zone_pivot_line("GET /me"));
        assert!(is_non_zone_pivot_line("```http"));
        // Indented markers are content
        assert!(is_non_zone_pivot_line("  ::: zone-end"));
    }

    #[test]
    fn test_non_zone_pivot_line_excluded() {
        assert!(!is_non_zone_pivot_line(""));
        assert!(!is_non_zone_pivot_line("   \t"));
        assert!(!is_non_zone_pivot_line(ZONE_END));
        assert!(!is_non_zone_pivot_line(
            r#"::: zone pivot="programming-language-go""#
        ));
        assert!(!is_non_zone_pivot_line(
            "[!INCLUDE [sample-code](../includes/sample.md)]"
        ));
        assert!(!is_non_zone_pivot_line(
            "[!INCLUDE [sdk-documentation](../includes/sdk.md)]"
        ));
    }
}
