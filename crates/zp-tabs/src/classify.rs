//! Tab header and fence language classification.
//!
//! Maps the fixed set of recognized tab headers to pivot identifiers:
//!
//! | Header                            | Pivot id                          |
//! |-----------------------------------|-----------------------------------|
//! | `# [HTTP](#tab/http)`             | `programming-language-curl`       |
//! | `# [C#](#tab/csharp)`             | `programming-language-csharp`     |
//! | `# [JavaScript](#tab/javascript)` | `programming-language-browserjs`  |
//! | `# [Objective-C](#tab/objc)`      | `programming-language-objectivec` |
//! | `# [Java](#tab/java)`             | `programming-language-java`       |
//! | `# [Go](#tab/go)`                 | `programming-language-go`         |
//! | `# [PowerShell](#tab/powershell)` | `programming-language-powershell` |

use crate::error::UnknownTabError;
use crate::markers::zone_pivot_open;

/// Prefix shared by every pivot identifier.
pub const PIVOT_ID_PREFIX: &str = "programming-language-";

/// A recognized tab in a tabbed code-sample group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TabLanguage {
    /// `# [HTTP](#tab/http)`, always the first tab of a group.
    Http,
    /// `# [C#](#tab/csharp)`
    CSharp,
    /// `# [JavaScript](#tab/javascript)`
    JavaScript,
    /// `# [Objective-C](#tab/objc)`
    ObjectiveC,
    /// `# [Java](#tab/java)`
    Java,
    /// `# [Go](#tab/go)`
    Go,
    /// `# [PowerShell](#tab/powershell)`
    PowerShell,
}

impl TabLanguage {
    /// All recognized tabs in conventional group order.
    pub const ALL: [Self; 7] = [
        Self::Http,
        Self::CSharp,
        Self::JavaScript,
        Self::ObjectiveC,
        Self::Java,
        Self::Go,
        Self::PowerShell,
    ];

    /// Exact header line for this tab.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Http => "# [HTTP](#tab/http)",
            Self::CSharp => "# [C#](#tab/csharp)",
            Self::JavaScript => "# [JavaScript](#tab/javascript)",
            Self::ObjectiveC => "# [Objective-C](#tab/objc)",
            Self::Java => "# [Java](#tab/java)",
            Self::Go => "# [Go](#tab/go)",
            Self::PowerShell => "# [PowerShell](#tab/powershell)",
        }
    }

    /// Suffix appended to [`PIVOT_ID_PREFIX`] for this tab.
    #[must_use]
    pub const fn pivot_suffix(self) -> &'static str {
        match self {
            Self::Http => "curl",
            Self::CSharp => "csharp",
            Self::JavaScript => "browserjs",
            Self::ObjectiveC => "objectivec",
            Self::Java => "java",
            Self::Go => "go",
            Self::PowerShell => "powershell",
        }
    }

    /// Full pivot identifier, e.g. `programming-language-curl`.
    #[must_use]
    pub fn pivot_id(self) -> String {
        format!("{PIVOT_ID_PREFIX}{}", self.pivot_suffix())
    }

    /// Look up a header line, ignoring surrounding whitespace and ASCII case.
    #[must_use]
    pub fn from_header(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        Self::ALL
            .into_iter()
            .find(|tab| tab.header().eq_ignore_ascii_case(trimmed))
    }

    /// Check whether `line` is this tab's header.
    #[must_use]
    pub fn matches(self, line: &str) -> bool {
        self.header().eq_ignore_ascii_case(line.trim())
    }
}

/// Classify a tab header line.
///
/// # Errors
///
/// Returns [`UnknownTabError`] if the line is not one of the recognized headers.
pub fn classify_header(line: &str) -> Result<TabLanguage, UnknownTabError> {
    TabLanguage::from_header(line).ok_or_else(|| UnknownTabError {
        header: line.trim().to_owned(),
    })
}

/// Map a code fence language name to a pivot identifier.
///
/// `javascript` becomes `browserjs` and `objc` becomes `objectivec`; any other
/// name passes through unchanged.
#[must_use]
pub fn classify_fence_language(name: &str) -> String {
    let renamed = name
        .replace("javascript", "browserjs")
        .replace("objc", "objectivec");
    format!("{PIVOT_ID_PREFIX}{renamed}")
}

/// Zone pivot open marker for a code fence language name.
#[must_use]
pub fn zone_pivot_for_language(name: &str) -> String {
    zone_pivot_open(&classify_fence_language(name))
}
