//! `zp convert` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use rayon::prelude::*;
use zp_config::{CliSettings, Config};
use zp_storage_fs::{Scanner, read_lines, write_lines};
use zp_tabs::{ZonePivotConverter, remove_multiple_blank_lines};

use crate::error::{CliError, DocumentError};
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Markdown files or directories to convert (default: configured source directory).
    paths: Vec<PathBuf>,

    /// Path to configuration file (default: auto-discover zp.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Pivot group declared in front-matter (overrides config).
    #[arg(long)]
    pivot_group: Option<String>,

    /// Keep blank lines as produced by the conversion.
    #[arg(long)]
    no_collapse: bool,

    /// Report files that need conversion and fail if there are any.
    #[arg(long)]
    check: bool,

    /// Convert without writing files.
    #[arg(long, conflicts_with = "check")]
    dry_run: bool,

    /// Enable verbose output (per-document logs).
    #[arg(short, long)]
    pub verbose: bool,
}

/// Settings shared by every document of one run.
#[derive(Debug, Clone)]
struct ConvertOptions {
    pivot_group: String,
    collapse_blank_lines: bool,
    write: bool,
}

/// Result of converting one document.
#[derive(Debug, PartialEq, Eq)]
struct DocumentOutcome {
    changed: bool,
    blocks: usize,
    warnings: Vec<String>,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, any document fails to convert,
    /// or `--check` finds documents that need conversion.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            pivot_group: self.pivot_group.clone(),
            collapse_blank_lines: self.no_collapse.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let roots = if self.paths.is_empty() {
            vec![config.docs_resolved.source_dir.clone()]
        } else {
            self.paths.clone()
        };
        let documents = discover(&roots, &config.docs_resolved.exclude);
        if documents.is_empty() {
            output.warning("No markdown documents found");
            return Ok(());
        }

        let options = ConvertOptions {
            pivot_group: config.convert.pivot_group.clone(),
            collapse_blank_lines: config.convert.collapse_blank_lines,
            write: !self.check && !self.dry_run,
        };

        output.highlight(&format!(
            "Converting {} documents (pivot group: {})",
            documents.len(),
            options.pivot_group
        ));

        let results: Vec<(&PathBuf, Result<DocumentOutcome, DocumentError>)> = documents
            .par_iter()
            .map(|path| (path, convert_document(path, &options)))
            .collect();

        report(&results, self.check, options.write, &output)
    }
}

/// Print per-document results and a summary, then apply the failure rules.
///
/// Any failed document fails the run; with `check`, so does any document that
/// needs conversion.
fn report(
    results: &[(&PathBuf, Result<DocumentOutcome, DocumentError>)],
    check: bool,
    write: bool,
    output: &Output,
) -> Result<(), CliError> {
    let mut changed = 0;
    let mut failed = 0;
    for (path, result) in results {
        match result {
            Ok(outcome) => {
                for warning in &outcome.warnings {
                    output.warning(&format!("{}: {warning}", path.display()));
                }
                if outcome.changed {
                    changed += 1;
                    output.info(&format!(
                        "{} ({} tabbed blocks)",
                        path.display(),
                        outcome.blocks
                    ));
                }
            }
            Err(e) => {
                failed += 1;
                output.error(&format!("{}: {e}", path.display()));
            }
        }
    }

    let verb = if write { "Converted" } else { "Would convert" };
    output.success(&format!("{verb} {changed} of {} documents", results.len()));

    if failed > 0 {
        return Err(CliError::Validation(format!(
            "{failed} documents failed to convert"
        )));
    }
    if check && changed > 0 {
        return Err(CliError::Validation(format!(
            "{changed} documents need conversion"
        )));
    }
    Ok(())
}

/// Collect markdown documents under every root, without duplicates.
fn discover(roots: &[PathBuf], exclude: &[String]) -> Vec<PathBuf> {
    let mut documents: Vec<PathBuf> = roots
        .iter()
        .flat_map(|root| Scanner::new(root).with_excludes(exclude).scan())
        .collect();
    documents.sort();
    documents.dedup();
    documents
}

/// Convert one document, writing it back if it changed and writing is enabled.
///
/// A document counts as changed only when it had a tabbed block; a metadata
/// insertion alone leaves the file untouched.
fn convert_document(
    path: &Path,
    options: &ConvertOptions,
) -> Result<DocumentOutcome, DocumentError> {
    let lines = read_lines(path)?;

    let mut converter = ZonePivotConverter::with_pivot_group(options.pivot_group.as_str());
    let mut converted = converter.convert(&lines)?;

    let changed = !converter.blocks().is_empty();
    if changed && options.collapse_blank_lines {
        converted = remove_multiple_blank_lines(converted);
    }

    if changed && options.write {
        write_lines(path, &converted)?;
    }

    tracing::info!(
        path = %path.display(),
        blocks = converter.blocks().len(),
        changed,
        "Converted document"
    );

    Ok(DocumentOutcome {
        changed,
        blocks: converter.blocks().len(),
        warnings: converter.warnings().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use pretty_assertions::assert_eq;
    use zp_tabs::ConvertError;

    const TABBED: &str = "---
title: Get user
---

# [HTTP](#tab/http)
```http
GET /me
```

# [C#](#tab/csharp)
[!INCLUDE [sample-code](cs.md)]

---

## Response
";

    fn options(write: bool) -> ConvertOptions {
        ConvertOptions {
            pivot_group: "graph-sdk-languages".to_owned(),
            collapse_blank_lines: true,
            write,
        }
    }

    #[test]
    fn test_convert_document_writes_changes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("user-get.md");
        fs::write(&path, TABBED).unwrap();

        let outcome = convert_document(&path, &options(true)).unwrap();

        assert_eq!(
            outcome,
            DocumentOutcome {
                changed: true,
                blocks: 1,
                warnings: Vec::new(),
            }
        );
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"---
title: Get user
zone_pivot_groups: graph-sdk-languages
---

::: zone pivot="programming-language-curl"
```http
GET /me
```

::: zone-end

::: zone pivot="programming-language-csharp"
[!INCLUDE [sample-code](cs.md)]
::: zone-end

## Response
"#
        );
    }

    #[test]
    fn test_convert_document_without_collapse() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("user-get.md");
        fs::write(&path, TABBED).unwrap();

        let options = ConvertOptions {
            collapse_blank_lines: false,
            ..options(true)
        };
        convert_document(&path, &options).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("::: zone-end\n\n\n::: zone pivot"));
    }

    #[test]
    fn test_convert_document_dry_run_leaves_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("user-get.md");
        fs::write(&path, TABBED).unwrap();

        let outcome = convert_document(&path, &options(false)).unwrap();

        assert!(outcome.changed);
        assert_eq!(fs::read_to_string(&path).unwrap(), TABBED);
    }

    #[test]
    fn test_convert_document_unchanged_not_rewritten() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("plain.md");
        // No front-matter and no tabs, extra blank lines must survive
        let content = "# Plain\n\n\n\ntext";
        fs::write(&path, content).unwrap();

        let outcome = convert_document(&path, &options(true)).unwrap();

        assert!(!outcome.changed);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_convert_document_front_matter_without_tabs_not_rewritten() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("overview.md");
        let content = "---\ntitle: Overview\n---\n\n# Overview\n\n\n\nNo tabs here.\n";
        fs::write(&path, content).unwrap();

        let outcome = convert_document(&path, &options(true)).unwrap();

        assert_eq!(
            outcome,
            DocumentOutcome {
                changed: false,
                blocks: 0,
                warnings: Vec::new(),
            }
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_convert_document_unknown_tab() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("user-get.md");
        let content = TABBED.replace("# [C#](#tab/csharp)", "# [Ruby](#tab/ruby)");
        fs::write(&path, &content).unwrap();

        let err = convert_document(&path, &options(true)).unwrap_err();

        assert!(matches!(err, DocumentError::Convert(_)));
        assert!(err.to_string().contains("line 10"));
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_convert_document_missing_file() {
        let err = convert_document(Path::new("/nonexistent/page.md"), &options(true)).unwrap_err();
        assert!(matches!(err, DocumentError::Storage(_)));
    }

    fn outcome(changed: bool) -> Result<DocumentOutcome, DocumentError> {
        Ok(DocumentOutcome {
            changed,
            blocks: usize::from(changed),
            warnings: Vec::new(),
        })
    }

    #[test]
    fn test_report_ok() {
        let changed = PathBuf::from("docs/user-get.md");
        let plain = PathBuf::from("docs/overview.md");
        let results = vec![(&changed, outcome(true)), (&plain, outcome(false))];

        assert!(report(&results, false, true, &Output::new()).is_ok());
    }

    #[test]
    fn test_report_check_fails_on_changed_document() {
        let changed = PathBuf::from("docs/user-get.md");
        let plain = PathBuf::from("docs/overview.md");
        let results = vec![(&changed, outcome(true)), (&plain, outcome(false))];

        let err = report(&results, true, false, &Output::new()).unwrap_err();

        assert!(matches!(err, CliError::Validation(_)));
        assert_eq!(err.to_string(), "1 documents need conversion");
    }

    #[test]
    fn test_report_check_passes_without_changes() {
        let plain = PathBuf::from("docs/overview.md");
        let results = vec![(&plain, outcome(false))];

        assert!(report(&results, true, false, &Output::new()).is_ok());
    }

    #[test]
    fn test_report_fails_on_failed_document() {
        let changed = PathBuf::from("docs/user-get.md");
        let broken = PathBuf::from("docs/user-list.md");
        let results = vec![
            (&changed, outcome(true)),
            (
                &broken,
                Err(DocumentError::Convert(ConvertError::MalformedBlockBoundary {
                    line: 5,
                })),
            ),
        ];

        let err = report(&results, false, true, &Output::new()).unwrap_err();

        assert!(matches!(err, CliError::Validation(_)));
        assert_eq!(err.to_string(), "1 documents failed to convert");
    }

    #[test]
    fn test_discover_dedups_overlapping_roots() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("api");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("a.md"), "a").unwrap();
        fs::write(temp_dir.path().join("b.md"), "b").unwrap();

        let documents = discover(&[temp_dir.path().to_path_buf(), nested.clone()], &[]);

        assert_eq!(documents, vec![nested.join("a.md"), temp_dir.path().join("b.md")]);
    }
}
