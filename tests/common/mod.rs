#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the text-guard binary.
#[macro_export]
macro_rules! text_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("text-guard"))
    };
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content, including parent directories.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `.text-guard.toml` in the fixture root.
    pub fn create_config(&self, content: &str) {
        self.create_file(".text-guard.toml", content);
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

pub const PASSWORD_CONFIG: &str = r#"
[[rules]]
key = "no-password"
kind = "simple"
expression = "password=.*"
message = "Plain text password"
"#;

pub const BOTH_MUST_EXIST_CONFIG: &str = r#"
repository = "corp"

[scanner]
suffixes = ["properties", "xml"]

[[rules]]
key = "java8-foo"
kind = "both-must-exist"
trigger_expression = "<target>1\\.8</target>"
trigger_file_pattern = "**/pom.xml"
must_also_exist_expression = "-DFooProperty"
must_also_exist_file_pattern = "**/setup-env.properties"
message = "Java 8 builds need -DFooProperty"
"#;

pub const DISALLOWED_ELSEWHERE_CONFIG: &str = r#"
repository = "corp"

[scanner]
suffixes = ["properties", "xml"]

[[rules]]
key = "no-jdk7"
kind = "disallowed-if-match-elsewhere"
trigger_expression = "<target>1\\.8</target>"
trigger_file_pattern = "**/pom.xml"
disallow_expression = "JAVA_HOME=.*jdk1\\.7.*"
disallow_file_pattern = "**/*.properties"
message = "JDK 7 cannot build Java 8 targets"
"#;

pub const POM_JAVA8: &str = "<project>\n  <build>\n    <target>1.8</target>\n  </build>\n</project>\n";
