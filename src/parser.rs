use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

use crate::error::{PolicyError, Result};
use crate::types::FqdnSelector;

/// Keyed selector line
/// Format: matchName: <name> | matchPattern: <pattern>
static SELECTOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(matchName|matchPattern)\s*:\s*(.*)$")
        .expect("SELECTOR_PATTERN: hardcoded regex is invalid")
});

/// Maximum nesting depth for `file:` include directives.
const MAX_INCLUDE_DEPTH: usize = 10;

/// Parse a selector list from text.
///
/// One selector per line, either keyed (`matchName: cilium.io`,
/// `matchPattern: *.s3.io`) or a bare name, which counts as a pattern when it
/// contains `*`. `#` starts a comment. Supports `file: /path/to/list` to
/// include another file.
///
/// Only the line structure is checked here; names themselves are validated
/// when the list is compiled.
pub fn parse_selectors(text: &str) -> Result<Vec<FqdnSelector>> {
    parse_selectors_inner(text, 0)
}

fn parse_selectors_inner(text: &str, depth: usize) -> Result<Vec<FqdnSelector>> {
    if depth > MAX_INCLUDE_DEPTH {
        return Err(PolicyError::ParseError(format!(
            "file include depth exceeds maximum ({MAX_INCLUDE_DEPTH}), possible circular include"
        )));
    }

    let mut selectors = Vec::new();

    for (line_num, line) in text.lines().enumerate() {
        let line_num = line_num + 1;

        let line = match line.find('#') {
            Some(comment_pos) => &line[..comment_pos],
            None => line,
        };
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(path) = line.strip_prefix("file:") {
            let included = parse_selectors_from_file_inner(path.trim(), depth + 1)?;
            selectors.extend(included);
            continue;
        }

        selectors.push(parse_single_selector(line, line_num)?);
    }

    Ok(selectors)
}

/// Parse a selector list from a file.
pub fn parse_selectors_from_file(path: impl AsRef<Path>) -> Result<Vec<FqdnSelector>> {
    parse_selectors_from_file_inner(path, 0)
}

fn parse_selectors_from_file_inner(
    path: impl AsRef<Path>,
    depth: usize,
) -> Result<Vec<FqdnSelector>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        PolicyError::ParseError(format!(
            "Failed to read selector file '{}': {}",
            path.display(),
            e
        ))
    })?;
    parse_selectors_inner(&text, depth)
}

/// Parse a JSON array of `{ "matchName": ..., "matchPattern": ... }` records.
pub fn parse_selectors_json(text: &str) -> Result<Vec<FqdnSelector>> {
    Ok(serde_json::from_str(text)?)
}

fn parse_single_selector(line: &str, line_num: usize) -> Result<FqdnSelector> {
    if let Some(captures) = SELECTOR_PATTERN.captures(line) {
        let value = captures.get(2).map_or("", |m| m.as_str().trim());
        if value.is_empty() {
            return Err(PolicyError::ParseErrorAtLine {
                line: line_num,
                message: "Empty selector value".to_string(),
            });
        }
        return Ok(match captures.get(1).map(|m| m.as_str()) {
            Some("matchPattern") => FqdnSelector::from_pattern(value),
            _ => FqdnSelector::from_name(value),
        });
    }

    if line.contains(char::is_whitespace) {
        return Err(PolicyError::ParseErrorAtLine {
            line: line_num,
            message: format!("Invalid selector format: {}", line),
        });
    }

    if line.contains('*') {
        Ok(FqdnSelector::from_pattern(line))
    } else {
        Ok(FqdnSelector::from_name(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_pattern_regex_compiles() {
        assert!(SELECTOR_PATTERN.is_match("matchName: cilium.io"));
    }

    #[test]
    fn test_parse_keyed_selectors() {
        let text = "matchName: cilium.io\nmatchPattern:*.s3.io";
        let selectors = parse_selectors(text).unwrap();
        assert_eq!(
            selectors,
            vec![
                FqdnSelector::from_name("cilium.io"),
                FqdnSelector::from_pattern("*.s3.io"),
            ]
        );
    }

    #[test]
    fn test_parse_bare_selectors() {
        let text = r#"
# plain domain list
uged.al
*.testing-domains.aws.baa
wil*dc.ard   # inline comment
"#;
        let selectors = parse_selectors(text).unwrap();
        assert_eq!(selectors.len(), 3);
        assert_eq!(selectors[0], FqdnSelector::from_name("uged.al"));
        assert_eq!(
            selectors[1],
            FqdnSelector::from_pattern("*.testing-domains.aws.baa")
        );
        assert_eq!(selectors[2], FqdnSelector::from_pattern("wil*dc.ard"));
    }

    #[test]
    fn test_parse_rejects_empty_value() {
        let result = parse_selectors("cilium.io\nmatchName:   ");
        match result {
            Err(PolicyError::ParseErrorAtLine { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected ParseErrorAtLine, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_garbage_line() {
        let result = parse_selectors("not a selector");
        assert!(matches!(result, Err(PolicyError::ParseErrorAtLine { line: 1, .. })));
    }

    #[test]
    fn test_parse_json() {
        let text = r#"[{"matchName":"cilium.io"},{"matchPattern":"*.s3.io"},{}]"#;
        let selectors = parse_selectors_json(text).unwrap();
        assert_eq!(selectors.len(), 3);
        assert_eq!(selectors[0], FqdnSelector::from_name("cilium.io"));
        assert_eq!(selectors[1], FqdnSelector::from_pattern("*.s3.io"));
        assert!(selectors[2].is_empty());
    }

    #[test]
    fn test_parse_json_invalid() {
        let result = parse_selectors_json("{not json");
        assert!(matches!(result, Err(PolicyError::JsonError(_))));
    }

    #[test]
    fn test_parse_file_directive() {
        use std::io::Write;
        let dir = std::env::temp_dir().join("fqdn_policy_test");
        let _ = fs::create_dir_all(&dir);
        let file_path = dir.join("included.txt");
        let mut f = fs::File::create(&file_path).unwrap();
        writeln!(f, "*.s3.io").unwrap();
        writeln!(f, "matchName: uged.al").unwrap();
        drop(f);

        let text = format!("cilium.io\nfile: {}\nwil*dc.ard", file_path.display());
        let selectors = parse_selectors(&text).unwrap();
        assert_eq!(selectors.len(), 4);
        assert_eq!(selectors[0].match_name, "cilium.io");
        assert_eq!(selectors[1].match_pattern, "*.s3.io");
        assert_eq!(selectors[2].match_name, "uged.al");
        assert_eq!(selectors[3].match_pattern, "wil*dc.ard");

        let _ = fs::remove_file(&file_path);
        let _ = fs::remove_dir(&dir);
    }

    #[test]
    fn test_parse_file_directive_not_found() {
        let result = parse_selectors("file: /nonexistent/path/selectors.txt");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_file_circular_include() {
        use std::io::Write;
        let dir = std::env::temp_dir().join("fqdn_policy_test_circular");
        let _ = fs::create_dir_all(&dir);

        let file_a = dir.join("a.txt");
        let file_b = dir.join("b.txt");

        let mut f = fs::File::create(&file_a).unwrap();
        writeln!(f, "a.example.com").unwrap();
        writeln!(f, "file: {}", file_b.display()).unwrap();
        drop(f);

        let mut f = fs::File::create(&file_b).unwrap();
        writeln!(f, "*.b.example.com").unwrap();
        writeln!(f, "file: {}", file_a.display()).unwrap();
        drop(f);

        let result = parse_selectors_from_file(&file_a);
        let err_msg = format!("{}", result.unwrap_err());
        assert!(err_msg.contains("depth"), "got: {}", err_msg);

        let _ = fs::remove_file(&file_a);
        let _ = fs::remove_file(&file_b);
        let _ = fs::remove_dir(&dir);
    }
}
