//! Conversion of tabbed code-sample groups to zone pivot markup.
//!
//! Documentation pages group per-language samples as tabs:
//!
//! ````markdown
//! # [HTTP](#tab/http)
//! ```http
//! GET https://graph.microsoft.com/v1.0/me
//! ```
//!
//! # [C#](#tab/csharp)
//! [!INCLUDE [sample-code](../includes/snippets/csharp/get-user-csharp-snippets.md)]
//!
//! ---
//! ````
//!
//! This crate rewrites each group into `::: zone pivot="..."` /
//! `::: zone-end` sections and declares the pivot group in front-matter.
//!
//! # Architecture
//!
//! - [`classify_header`] and [`classify_fence_language`] map tab headers and
//!   fence languages to pivot identifiers.
//! - [`ZonePivotConverter`] scans a document line by line, finds each tabbed
//!   block and builds the rewritten document.
//! - [`remove_multiple_blank_lines`] tidies the result before it is written.
//!
//! # Example
//!
//! ```
//! use zp_tabs::{ZonePivotConverter, remove_multiple_blank_lines};
//!
//! let input = [
//!     "---",
//!     "title: Get user",
//!     "---",
//!     "# [HTTP](#tab/http)",
//!     "```http",
//!     "GET /me",
//!     "```",
//!     "",
//!     "# [Go](#tab/go)",
//!     "[!INCLUDE [sample-code](go.md)]",
//!     "---",
//! ];
//!
//! let mut converter = ZonePivotConverter::new();
//! let output = remove_multiple_blank_lines(converter.convert(&input).unwrap());
//!
//! assert_eq!(output[2], "zone_pivot_groups: graph-sdk-languages");
//! assert_eq!(output[4], r#"::: zone pivot="programming-language-curl""#);
//! assert_eq!(output.last().unwrap(), "::: zone-end");
//! ```

mod blank_lines;
mod classify;
mod converter;
mod error;
mod markers;

pub use blank_lines::remove_multiple_blank_lines;
pub use classify::{
    PIVOT_ID_PREFIX, TabLanguage, classify_fence_language, classify_header,
    zone_pivot_for_language,
};
pub use converter::{ConvertedBlock, ZonePivotConverter, convert_tabbed_to_zone_pivots};
pub use error::{ConvertError, UnknownTabError};
pub use markers::{
    DEFAULT_PIVOT_GROUP, ZONE_END, is_non_zone_pivot_line, pivot_group_line, zone_pivot_open,
};
