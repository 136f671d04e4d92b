//! Blank line normalization.

/// Collapse runs of blank lines and drop a trailing blank line.
///
/// Each run of two or more whitespace-only lines is reduced to its first line.
/// If the result ends with a blank line, that line is removed, since writers
/// terminate every line with a newline anyway.
///
/// ```
/// let lines = zp_tabs::remove_multiple_blank_lines(["a", "", "  ", "b", ""]);
/// assert_eq!(lines, ["a", "", "b"]);
/// ```
pub fn remove_multiple_blank_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut output: Vec<String> = Vec::new();
    let mut previous_blank = false;

    for line in lines {
        let line = line.as_ref();
        let blank = line.trim().is_empty();
        if !(blank && previous_blank) {
            output.push(line.to_owned());
        }
        previous_blank = blank;
    }

    if output.last().is_some_and(|line| line.trim().is_empty()) {
        output.pop();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collapses_runs() {
        let output = remove_multiple_blank_lines(["a", "", "", "", "b", "", "c"]);
        assert_eq!(output, vec!["a", "", "b", "", "c"]);
    }

    #[test]
    fn test_whitespace_lines_are_blank() {
        let output = remove_multiple_blank_lines(["a", " ", "\t", "b"]);
        // First line of the run is kept verbatim
        assert_eq!(output, vec!["a", " ", "b"]);
    }

    #[test]
    fn test_removes_trailing_blank() {
        let output = remove_multiple_blank_lines(["a", "b", "", ""]);
        assert_eq!(output, vec!["a", "b"]);
    }

    #[test]
    fn test_leading_run_collapsed() {
        let output = remove_multiple_blank_lines(["", "", "a"]);
        assert_eq!(output, vec!["", "a"]);
    }

    #[test]
    fn test_single_line_untouched() {
        assert_eq!(remove_multiple_blank_lines(["only"]), vec!["only"]);
    }

    #[test]
    fn test_all_blank_is_empty() {
        assert!(remove_multiple_blank_lines(["", " ", ""]).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(remove_multiple_blank_lines(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_no_adjacent_blanks_in_output() {
        let input = ["", "x", "", "", "y", " ", "", "\t", "z", "", ""];
        let output = remove_multiple_blank_lines(input);
        assert!(
            output
                .windows(2)
                .all(|w| !(w[0].trim().is_empty() && w[1].trim().is_empty()))
        );
        assert!(!output.last().unwrap().trim().is_empty());
    }
}
