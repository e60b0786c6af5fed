use tempfile::TempDir;

use super::*;
use crate::checker::Exclusions;

fn settings(key: &str, message: &str) -> RuleSettings {
    RuleSettings::new(RuleIdentity::new("text", key), message)
}

fn source(dir: &TempDir, logical: &str, content: &str) -> SourceFile {
    let path = dir.path().join(logical);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    SourceFile::under_root(dir.path(), path)
}

fn lines(issues: &[Issue]) -> Vec<usize> {
    issues.iter().map(|issue| issue.line).collect()
}

#[test]
fn simple_match_reports_plaintext_password_line() {
    let dir = TempDir::new().unwrap();
    let file = source(&dir, "a.properties", "user=admin\npassword=plaintext123\n");
    let rule = SimpleTextMatch::new(
        settings("no-password", "Plain text password"),
        Some("password=.*"),
        None,
    )
    .unwrap();

    let issues = rule.evaluate(&file, "proj").unwrap();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].line, 2);
    assert_eq!(issues[0].message, "Plain text password");
    assert_eq!(issues[0].rule.key, "no-password");
}

#[test]
fn simple_match_issue_count_equals_matching_lines() {
    let dir = TempDir::new().unwrap();
    let file = source(&dir, "a.txt", "foo\nbar foo\nbaz\nfoofoo\n");
    let rule = SimpleTextMatch::new(settings("foo", "m"), Some("foo"), None).unwrap();

    assert_eq!(lines(&rule.evaluate(&file, "").unwrap()), vec![1, 2, 4]);
}

#[test]
fn simple_match_without_expression_is_inert() {
    let dir = TempDir::new().unwrap();
    let file = source(&dir, "a.txt", "anything\n");
    let rule = SimpleTextMatch::new(settings("r", "m"), None, None).unwrap();

    assert!(rule.evaluate(&file, "").unwrap().is_empty());
}

#[test]
fn simple_match_respects_file_pattern() {
    let dir = TempDir::new().unwrap();
    let included = source(&dir, "conf/a.properties", "secret\n");
    let skipped = source(&dir, "notes.txt", "secret\n");
    let rule =
        SimpleTextMatch::new(settings("r", "m"), Some("secret"), Some("**/*.properties")).unwrap();

    assert_eq!(rule.evaluate(&included, "").unwrap().len(), 1);
    assert!(rule.evaluate(&skipped, "").unwrap().is_empty());
}

#[test]
fn simple_match_with_blank_file_pattern_matches_no_file() {
    let dir = TempDir::new().unwrap();
    let file = source(&dir, "a.properties", "secret\n");
    let rule = SimpleTextMatch::new(settings("r", "m"), Some("secret"), Some("")).unwrap();

    assert!(rule.evaluate(&file, "").unwrap().is_empty());
}

#[test]
fn exclusions_only_reduce_issues() {
    let dir = TempDir::new().unwrap();
    let file = source(&dir, "local.properties", "secret\nsecret\n");
    let build = |exclusions: Exclusions| {
        SimpleTextMatch::new(
            settings("r", "m").with_exclusions(exclusions),
            Some("secret"),
            None,
        )
        .unwrap()
    };

    let unsuppressed = build(Exclusions::default()).evaluate(&file, "com.acme:legacy").unwrap();
    let by_project = build(Exclusions::new("r", Some("legacy"), None).unwrap())
        .evaluate(&file, "com.acme:legacy")
        .unwrap();
    let by_name = build(Exclusions::new("r", None, Some("^local\\.")).unwrap())
        .evaluate(&file, "com.acme:legacy")
        .unwrap();
    let not_matching = build(Exclusions::new("r", Some("other"), Some("^remote")).unwrap())
        .evaluate(&file, "com.acme:legacy")
        .unwrap();

    assert_eq!(unsuppressed.len(), 2);
    assert!(by_project.is_empty());
    assert!(by_name.is_empty());
    assert_eq!(not_matching.len(), 2);
}

#[test]
fn simple_match_on_missing_file_is_error() {
    let rule = SimpleTextMatch::new(settings("r", "m"), Some("x"), None).unwrap();
    let file = SourceFile::new("gone.txt", "/no/such/dir/gone.txt");

    assert!(rule.evaluate(&file, "").is_err());
}

#[test]
fn multiline_match_reports_first_match_only() {
    let dir = TempDir::new().unwrap();
    let file = source(&dir, "a.txt", "one\n<begin>\nstuff\n<end>\n<begin>\n<end>\n");
    let rule =
        MultilineTextMatch::new(settings("block", "m"), Some("<begin>.*?<end>"), None).unwrap();

    let issues = rule.evaluate(&file, "").unwrap();

    assert_eq!(lines(&issues), vec![2]);
}

#[test]
fn multiline_match_spans_lines() {
    let dir = TempDir::new().unwrap();
    let file = source(&dir, "a.txt", "a\nkey=\n  value\n");
    let rule = MultilineTextMatch::new(settings("r", "m"), Some("key=.*value"), None).unwrap();

    assert_eq!(lines(&rule.evaluate(&file, "").unwrap()), vec![2]);
}

#[test]
fn multiline_no_match_no_issue() {
    let dir = TempDir::new().unwrap();
    let file = source(&dir, "a.txt", "nothing to see\n");
    let rule = MultilineTextMatch::new(settings("r", "m"), Some("missing"), None).unwrap();

    assert!(rule.evaluate(&file, "").unwrap().is_empty());
}

#[test]
fn multiline_skips_oversized_file() {
    let dir = TempDir::new().unwrap();
    let content = format!("match\n{}", "x".repeat(crate::reader::MAX_CHARACTERS_SCANNED));
    let file = source(&dir, "big.txt", &content);
    let rule = MultilineTextMatch::new(settings("r", "m"), Some("match"), None).unwrap();

    assert!(rule.evaluate(&file, "").unwrap().is_empty());
}

#[test]
fn required_string_issues_when_must_exist_absent() {
    let dir = TempDir::new().unwrap();
    let file = source(&dir, "a.properties", "header\nfeature.enabled=true\n");
    let rule = RequiredStringNotPresent::new(
        settings("feature-needs-owner", "Missing owner"),
        Some("feature\\.enabled=true"),
        Some("feature\\.owner="),
        None,
    )
    .unwrap();

    let issues = rule.evaluate(&file, "").unwrap();

    assert_eq!(lines(&issues), vec![2]);
    assert_eq!(issues[0].message, "Missing owner");
}

#[test]
fn required_string_silent_when_must_exist_present() {
    let dir = TempDir::new().unwrap();
    let file = source(&dir, "a.properties", "feature.owner=me\nfeature.enabled=true\n");
    let rule = RequiredStringNotPresent::new(
        settings("r", "m"),
        Some("feature\\.enabled=true"),
        Some("feature\\.owner="),
        None,
    )
    .unwrap();

    assert!(rule.evaluate(&file, "").unwrap().is_empty());
}

#[test]
fn required_string_silent_without_trigger() {
    let dir = TempDir::new().unwrap();
    let file = source(&dir, "a.properties", "unrelated=1\n");
    let rule =
        RequiredStringNotPresent::new(settings("r", "m"), Some("trigger"), Some("owner"), None)
            .unwrap();

    assert!(rule.evaluate(&file, "").unwrap().is_empty());
}

#[test]
fn required_string_needs_both_expressions() {
    let dir = TempDir::new().unwrap();
    let file = source(&dir, "a.properties", "trigger\n");
    let rule =
        RequiredStringNotPresent::new(settings("r", "m"), Some("trigger"), None, None).unwrap();

    assert!(rule.evaluate(&file, "").unwrap().is_empty());
}

#[test]
fn invalid_expression_fails_construction() {
    let result = SimpleTextMatch::new(settings("r", "m"), Some("a("), None);
    assert!(result.is_err());

    let result = MultilineTextMatch::new(settings("r", "m"), Some("x"), Some("[bad"));
    assert!(result.is_err());
}
