//! Integration tests for the `check` command.

mod common;

use common::{
    BOTH_MUST_EXIST_CONFIG, DISALLOWED_ELSEWHERE_CONFIG, PASSWORD_CONFIG, POM_JAVA8, TestFixture,
};
use predicates::prelude::*;

// =============================================================================
// Single-file rules
// =============================================================================

#[test]
fn simple_rule_reports_matching_line() {
    let fixture = TestFixture::new();
    fixture.create_config(PASSWORD_CONFIG);
    fixture.create_file("a.properties", "user=admin\npassword=plaintext123\n");

    text_guard!()
        .current_dir(fixture.path())
        .args(["check", "--color", "never"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "a.properties:2: [text:no-password] Plain text password",
        ))
        .stdout(predicate::str::contains("Summary: 1 issue in 1 file (1 rule)"));
}

#[test]
fn clean_project_exits_zero() {
    let fixture = TestFixture::new();
    fixture.create_config(PASSWORD_CONFIG);
    fixture.create_file("a.properties", "user=admin\n");

    text_guard!()
        .current_dir(fixture.path())
        .args(["check", "--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary: 0 issues"));
}

#[test]
fn warn_only_reports_but_exits_zero() {
    let fixture = TestFixture::new();
    fixture.create_config(PASSWORD_CONFIG);
    fixture.create_file("a.properties", "password=x\n");

    text_guard!()
        .current_dir(fixture.path())
        .args(["check", "--warn-only", "--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plain text password"));
}

#[test]
fn files_outside_suffixes_are_not_scanned() {
    let fixture = TestFixture::new();
    fixture.create_config(PASSWORD_CONFIG);
    fixture.create_file("notes.md", "password=x\n");

    text_guard!()
        .current_dir(fixture.path())
        .args(["check"])
        .assert()
        .success();
}

#[test]
fn explicit_file_is_scanned_regardless_of_suffix() {
    let fixture = TestFixture::new();
    fixture.create_config(PASSWORD_CONFIG);
    fixture.create_file("notes.md", "password=x\n");

    text_guard!()
        .current_dir(fixture.path())
        .args(["check", "notes.md", "--color", "never"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("notes.md:1:"));
}

#[test]
fn exclude_flag_skips_matching_paths() {
    let fixture = TestFixture::new();
    fixture.create_config(PASSWORD_CONFIG);
    fixture.create_file("target/a.properties", "password=x\n");

    text_guard!()
        .current_dir(fixture.path())
        .args(["check", "-x", "**/target/**"])
        .assert()
        .success();
}

#[test]
fn skip_project_keys_suppresses_rule() {
    let fixture = TestFixture::new();
    fixture.create_config(
        r#"
[[rules]]
key = "no-password"
kind = "simple"
expression = "password=.*"
skip_project_keys = "^legacy:.*"
"#,
    );
    fixture.create_file("a.properties", "password=x\n");

    text_guard!()
        .current_dir(fixture.path())
        .args(["check", "--project-key", "legacy:billing"])
        .assert()
        .success();

    text_guard!()
        .current_dir(fixture.path())
        .args(["check", "--project-key", "modern:billing"])
        .assert()
        .code(1);
}

#[test]
fn oversized_document_is_skipped_with_warning() {
    let fixture = TestFixture::new();
    fixture.create_config(
        r#"
[[rules]]
key = "secret"
kind = "multiline"
expression = "secret"
"#,
    );
    let mut big = "x".repeat(500_001);
    big.push_str("secret");
    fixture.create_file("big.txt", &big);
    fixture.create_file("small.txt", "secret\n");

    let output = text_guard!()
        .current_dir(fixture.path())
        .args(["check", "--color", "never"])
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("small.txt:1:"));
    assert!(!stdout.contains("big.txt"));
    assert_eq!(stderr.matches("maximum scan depth").count(), 1);
}

#[test]
fn oversized_document_warns_once_per_cross_file_rule() {
    let fixture = TestFixture::new();
    fixture.create_config(
        r#"
[[rules]]
key = "no-jdk7"
kind = "disallowed-if-match-elsewhere"
trigger_expression = "target"
disallow_expression = "jdk1\\.7"
line_by_line = false
"#,
    );
    let mut big = "target jdk1.7\n".to_string();
    big.push_str(&"x".repeat(500_001));
    fixture.create_file("big.txt", &big);

    let output = text_guard!()
        .current_dir(fixture.path())
        .args(["check", "--color", "never"])
        .output()
        .unwrap();

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stderr.matches("maximum scan depth").count(), 1);
    assert!(stderr.contains("text:no-jdk7"));
}

// =============================================================================
// Cross-file rules
// =============================================================================

#[test]
fn both_must_exist_reports_trigger_when_companion_missing() {
    let fixture = TestFixture::new();
    fixture.create_config(BOTH_MUST_EXIST_CONFIG);
    fixture.create_file("pom.xml", POM_JAVA8);
    fixture.create_file("setup-env.properties", "JAVA_OPTS=-Xmx1g\n");

    text_guard!()
        .current_dir(fixture.path())
        .args(["check", "--color", "never"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "pom.xml:3: [corp:java8-foo] Java 8 builds need -DFooProperty",
        ))
        .stdout(predicate::str::contains("Summary: 1 issue"));
}

#[test]
fn both_must_exist_is_satisfied_by_companion() {
    let fixture = TestFixture::new();
    fixture.create_config(BOTH_MUST_EXIST_CONFIG);
    fixture.create_file("pom.xml", POM_JAVA8);
    fixture.create_file("setup-env.properties", "JAVA_OPTS=-DFooProperty=1\n");

    text_guard!()
        .current_dir(fixture.path())
        .args(["check"])
        .assert()
        .success();
}

#[test]
fn both_must_exist_without_trigger_reports_nothing() {
    let fixture = TestFixture::new();
    fixture.create_config(BOTH_MUST_EXIST_CONFIG);
    fixture.create_file("pom.xml", "<project/>\n");
    fixture.create_file("setup-env.properties", "JAVA_OPTS=-Xmx1g\n");

    text_guard!()
        .current_dir(fixture.path())
        .args(["check"])
        .assert()
        .success();
}

#[test]
fn disallowed_elsewhere_reports_disallow_file() {
    let fixture = TestFixture::new();
    fixture.create_config(DISALLOWED_ELSEWHERE_CONFIG);
    fixture.create_file("pom.xml", POM_JAVA8);
    fixture.create_file(
        "conf/setup-env.properties",
        "# env\nJAVA_HOME=/opt/jdk1.7.0_80\n",
    );

    text_guard!()
        .current_dir(fixture.path())
        .args(["check", "--color", "never"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "conf/setup-env.properties:2: [corp:no-jdk7]",
        ))
        .stdout(predicate::str::contains("pom.xml:").not());
}

#[test]
fn sequential_and_parallel_scans_agree() {
    let fixture = TestFixture::new();
    fixture.create_config(DISALLOWED_ELSEWHERE_CONFIG);
    fixture.create_file("pom.xml", POM_JAVA8);
    for i in 0..8 {
        fixture.create_file(
            &format!("mod{i}/env.properties"),
            "JAVA_HOME=/opt/jdk1.7\n",
        );
    }

    let parallel = text_guard!()
        .current_dir(fixture.path())
        .args(["check", "-f", "json"])
        .output()
        .unwrap();
    let sequential = text_guard!()
        .current_dir(fixture.path())
        .args(["check", "-f", "json", "--sequential"])
        .output()
        .unwrap();

    assert_eq!(parallel.status.code(), Some(1));
    assert_eq!(parallel.stdout, sequential.stdout);
}

// =============================================================================
// Output formats
// =============================================================================

#[test]
fn json_output_lists_issues() {
    let fixture = TestFixture::new();
    fixture.create_config(BOTH_MUST_EXIST_CONFIG);
    fixture.create_file("pom.xml", POM_JAVA8);

    let output = text_guard!()
        .current_dir(fixture.path())
        .args(["check", "-f", "json"])
        .output()
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["summary"]["issues"], 1);
    assert_eq!(parsed["issues"][0]["path"], "pom.xml");
    assert_eq!(parsed["issues"][0]["line"], 3);
    assert_eq!(parsed["issues"][0]["rule"], "java8-foo");
    assert_eq!(parsed["issues"][0]["repository"], "corp");
}

#[test]
fn sarif_output_is_written_to_file() {
    let fixture = TestFixture::new();
    fixture.create_config(PASSWORD_CONFIG);
    fixture.create_file("a.properties", "password=x\n");

    text_guard!()
        .current_dir(fixture.path())
        .args(["check", "-f", "sarif", "-o", "reports/out.sarif"])
        .assert()
        .code(1);

    let content = std::fs::read_to_string(fixture.path().join("reports/out.sarif")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed["version"], "2.1.0");
    assert_eq!(parsed["runs"][0]["results"][0]["ruleId"], "text:no-password");
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn invalid_regex_is_a_configuration_error() {
    let fixture = TestFixture::new();
    fixture.create_config(
        r#"
[[rules]]
key = "broken"
kind = "simple"
expression = "("
"#,
    );

    text_guard!()
        .current_dir(fixture.path())
        .args(["check"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("broken"));
}

#[test]
fn missing_path_is_an_error() {
    let fixture = TestFixture::new();

    text_guard!()
        .current_dir(fixture.path())
        .args(["check", "does-not-exist"])
        .assert()
        .code(2);
}
