//! Tabbed block to zone pivot conversion.
//!
//! A tabbed block starts at the HTTP tab header and runs to the next `---`
//! line. Each tab inside becomes a zone pivot:
//!
//! ````markdown
//! # [HTTP](#tab/http)            ::: zone pivot="programming-language-curl"
//! ```http                        ```http
//! GET /me               =>       GET /me
//! ```                            ```
//!
//! # [C#](#tab/csharp)            ::: zone-end
//! [!INCLUDE [sample-code](x)]
//! ---                            ::: zone pivot="programming-language-csharp"
//!                                [!INCLUDE [sample-code](x)]
//!                                ::: zone-end
//! ````
//!
//! The HTTP tab body runs through the end of its first code fence. Other tab
//! bodies end at the first blank line or `#tab/` line.

use crate::classify::{TabLanguage, classify_header};
use crate::error::ConvertError;
use crate::markers::{DEFAULT_PIVOT_GROUP, ZONE_END, pivot_group_line, zone_pivot_open};

/// Closing fence of a tabbed block, also the front-matter delimiter.
const BLOCK_FENCE: &str = "---";

/// Code fence marker.
const CODE_FENCE: &str = "```";

/// Heading used to recover the end of a block without a closing `---`.
const RESPONSE_HEADING: &str = "# response";

/// Anchor fragment carried by every tab header.
const TAB_MARKER: &str = "#tab/";

/// Report for one converted tabbed block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertedBlock {
    /// Line of the HTTP tab header (1-indexed).
    pub start_line: usize,
    /// Last line replaced by the pivots (1-indexed).
    pub end_line: usize,
    /// Tabs in the order they appeared.
    pub tabs: Vec<TabLanguage>,
    /// Whether the end was recovered from a `# Response` heading.
    pub recovered: bool,
}

/// Converter from tabbed code-sample groups to zone pivots.
///
/// Use one converter per document; warnings and block reports accumulate
/// across calls.
///
/// # Example
///
/// ```
/// use zp_tabs::ZonePivotConverter;
///
/// let mut converter = ZonePivotConverter::new();
/// let output = converter
///     .convert_str(
///         "---\ntitle: Get user\n---\n# [HTTP](#tab/http)\n```http\nGET /me\n```\n---\n",
///     )
///     .unwrap();
///
/// assert!(output.contains("zone_pivot_groups: graph-sdk-languages"));
/// assert!(output.contains(r#"::: zone pivot="programming-language-curl""#));
/// assert_eq!(converter.blocks().len(), 1);
/// ```
#[derive(Debug)]
pub struct ZonePivotConverter {
    pivot_group: String,
    warnings: Vec<String>,
    blocks: Vec<ConvertedBlock>,
    metadata_inserted: bool,
}

/// Working copy of a document, remembering where the metadata line went so
/// positions can be reported in input coordinates.
struct Working {
    lines: Vec<String>,
    inserted_at: Option<usize>,
}

impl Working {
    /// 1-indexed input line for a working buffer index.
    fn source_line(&self, idx: usize) -> usize {
        match self.inserted_at {
            Some(at) if idx > at => idx,
            _ => idx + 1,
        }
    }
}

impl ZonePivotConverter {
    /// Create a converter declaring the default pivot group.
    #[must_use]
    pub fn new() -> Self {
        Self::with_pivot_group(DEFAULT_PIVOT_GROUP)
    }

    /// Create a converter declaring `group` in front-matter.
    #[must_use]
    pub fn with_pivot_group(group: impl Into<String>) -> Self {
        Self {
            pivot_group: group.into(),
            warnings: Vec::new(),
            blocks: Vec::new(),
            metadata_inserted: false,
        }
    }

    /// Pivot group this converter declares.
    #[must_use]
    pub fn pivot_group(&self) -> &str {
        &self.pivot_group
    }

    /// Get warnings generated during conversion.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get reports for the blocks converted so far.
    #[must_use]
    pub fn blocks(&self) -> &[ConvertedBlock] {
        &self.blocks
    }

    /// Whether the pivot group line was added to front-matter.
    #[must_use]
    pub fn metadata_inserted(&self) -> bool {
        self.metadata_inserted
    }

    /// Convert every tabbed block in a document.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] if a block contains an unrecognized tab header,
    /// has no recoverable end, or its HTTP tab has no closed code fence. No
    /// partial output is produced.
    pub fn convert<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<Vec<String>, ConvertError> {
        let mut working = Working {
            lines: lines.iter().map(|l| l.as_ref().to_owned()).collect(),
            inserted_at: None,
        };
        working.inserted_at = self.ensure_metadata(&mut working.lines);

        let lines = &working.lines;
        let mut output = Vec::with_capacity(lines.len());
        let mut blocks = Vec::new();
        let mut cursor = 0;

        while let Some(start) = find_from(lines, cursor, |l| TabLanguage::Http.matches(l)) {
            let (end, recovered) = self.block_end(&working, start)?;
            let (pivots, tabs) = rewrite_block(&working, start, end)?;

            let block = ConvertedBlock {
                start_line: working.source_line(start),
                end_line: working.source_line(end),
                tabs,
                recovered,
            };
            tracing::debug!(
                start_line = block.start_line,
                end_line = block.end_line,
                tabs = block.tabs.len(),
                "Converted tabbed block"
            );

            output.extend_from_slice(&lines[cursor..start]);
            output.extend(pivots);
            blocks.push(block);
            cursor = end + 1;
        }
        output.extend_from_slice(&lines[cursor..]);

        self.blocks.extend(blocks);
        Ok(output)
    }

    /// Convert a document given as text.
    ///
    /// A trailing newline on the input is kept on the output.
    ///
    /// # Errors
    ///
    /// See [`convert`](Self::convert).
    pub fn convert_str(&mut self, input: &str) -> Result<String, ConvertError> {
        let lines: Vec<&str> = input.lines().collect();
        let converted = self.convert(&lines)?;

        let mut output = converted.join("\n");
        if input.ends_with('\n') && !converted.is_empty() {
            output.push('\n');
        }
        Ok(output)
    }

    /// Insert the pivot group line before the closing front-matter delimiter.
    ///
    /// Returns the index of the inserted line.
    fn ensure_metadata(&mut self, lines: &mut Vec<String>) -> Option<usize> {
        let metadata = pivot_group_line(&self.pivot_group);
        if lines.iter().any(|l| contains_ignore_case(l, &metadata)) {
            return None;
        }

        let close = find_from(lines, 0, is_block_fence)
            .and_then(|open| find_from(lines, open + 1, is_block_fence));
        let Some(close) = close else {
            self.warnings
                .push(format!("no front-matter found, `{metadata}` not added"));
            return None;
        };

        lines.insert(close, metadata);
        self.metadata_inserted = true;
        Some(close)
    }

    /// Find the last line of the block starting at `start`.
    ///
    /// Returns the index and whether it was recovered from a `# Response`
    /// heading instead of a closing `---`.
    fn block_end(&mut self, working: &Working, start: usize) -> Result<(usize, bool), ConvertError> {
        if let Some(end) = find_from(&working.lines, start, is_block_fence) {
            return Ok((end, false));
        }

        let start_line = working.source_line(start);
        let response = find_from(&working.lines, start, |l| {
            contains_ignore_case(l, RESPONSE_HEADING)
        })
        .ok_or(ConvertError::MalformedBlockBoundary { line: start_line })?;

        tracing::warn!(
            line = start_line,
            "Tabbed block has no closing ---, ending before response heading"
        );
        self.warnings.push(format!(
            "line {start_line}: tabbed block has no closing `---`, ending before `# Response` heading"
        ));

        // The header itself never contains the heading, so `response > start`.
        Ok((response - 1, true))
    }
}

impl Default for ZonePivotConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a document with the default pivot group.
///
/// # Errors
///
/// See [`ZonePivotConverter::convert`].
pub fn convert_tabbed_to_zone_pivots<S: AsRef<str>>(
    lines: &[S],
) -> Result<Vec<String>, ConvertError> {
    ZonePivotConverter::new().convert(lines)
}

/// Rewrite lines `start..=end` as zone pivots.
fn rewrite_block(
    working: &Working,
    start: usize,
    end: usize,
) -> Result<(Vec<String>, Vec<TabLanguage>), ConvertError> {
    let lines = &working.lines;
    let mut pivots = Vec::new();
    let mut tabs = Vec::new();
    let mut i = start;

    while i <= end {
        let line = &lines[i];
        if !line.trim_start().starts_with('#') {
            // The closing line is replaced by the zone markers
            if i < end {
                pivots.push(line.clone());
            }
            i += 1;
            continue;
        }

        let tab = classify_header(line).map_err(|source| ConvertError::UnrecognizedTabHeader {
            line: working.source_line(i),
            source,
        })?;
        pivots.push(zone_pivot_open(&tab.pivot_id()));
        tabs.push(tab);

        if tab == TabLanguage::Http {
            let fence_end = find_code_fence(lines, i, end).ok_or(ConvertError::UnclosedCodeFence {
                line: working.source_line(i),
            })?;
            pivots.extend_from_slice(&lines[i + 1..=fence_end]);
            pivots.push(String::new());
            pivots.push(ZONE_END.to_owned());
            pivots.push(String::new());
            i = fence_end + 1;
        } else {
            let boundary = find_between(lines, i + 1, end, |l| {
                l.trim().is_empty() || contains_ignore_case(l, TAB_MARKER)
            })
            .unwrap_or_else(|| end.max(i + 1));
            pivots.extend_from_slice(&lines[i + 1..boundary]);
            pivots.push(ZONE_END.to_owned());
            pivots.push(String::new());
            i = boundary;
        }
    }

    Ok((pivots, tabs))
}

/// Find the closing line of the first code fence in `from..=end`.
fn find_code_fence(lines: &[String], from: usize, end: usize) -> Option<usize> {
    let open = find_between(lines, from, end + 1, |l| l.trim_start().starts_with(CODE_FENCE))?;
    find_between(lines, open + 1, end + 1, |l| l.trim() == CODE_FENCE)
}

/// Index of the first line at or after `from` matching `pred`.
fn find_from(lines: &[String], from: usize, pred: impl Fn(&str) -> bool) -> Option<usize> {
    find_between(lines, from, lines.len(), pred)
}

/// Index of the first line in `from..to` matching `pred`.
fn find_between(
    lines: &[String],
    from: usize,
    to: usize,
    pred: impl Fn(&str) -> bool,
) -> Option<usize> {
    let to = to.min(lines.len());
    if from >= to {
        return None;
    }
    lines[from..to]
        .iter()
        .position(|l| pred(l))
        .map(|offset| from + offset)
}

fn is_block_fence(line: &str) -> bool {
    line.trim() == BLOCK_FENCE
}

/// Case-insensitive (ASCII) substring test.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}
