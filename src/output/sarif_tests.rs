use super::*;
use crate::checker::RuleIdentity;
use crate::coordinator::ScanSummary;
use crate::scanner::SourceFile;

fn report() -> ScanReport {
    let rule = RuleInfo {
        identity: RuleIdentity::new("text", "no-password"),
        kind: "simple",
        message: "Plain text password".to_string(),
    };
    let issue = Issue::new(
        rule.identity.clone(),
        SourceFile::new("conf/a.properties", "/p/conf/a.properties"),
        2,
        "Plain text password",
    );
    ScanReport::new(vec![issue], ScanSummary::default(), vec![rule])
}

#[test]
fn sarif_has_schema_and_version() {
    let output = SarifFormatter::new().format(&report()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(parsed["version"], "2.1.0");
    assert!(parsed["$schema"].as_str().unwrap().contains("sarif-schema-2.1.0"));
    assert_eq!(parsed["runs"][0]["tool"]["driver"]["name"], "text-guard");
}

#[test]
fn sarif_describes_rules() {
    let parsed: serde_json::Value =
        serde_json::from_str(&SarifFormatter::new().format(&report()).unwrap()).unwrap();
    let rule = &parsed["runs"][0]["tool"]["driver"]["rules"][0];

    assert_eq!(rule["id"], "text:no-password");
    assert_eq!(rule["name"], "no-password");
    assert_eq!(rule["properties"]["kind"], "simple");
}

#[test]
fn sarif_result_has_region() {
    let parsed: serde_json::Value =
        serde_json::from_str(&SarifFormatter::new().format(&report()).unwrap()).unwrap();
    let result = &parsed["runs"][0]["results"][0];

    assert_eq!(result["ruleId"], "text:no-password");
    assert_eq!(result["ruleIndex"], 0);
    let location = &result["locations"][0]["physicalLocation"];
    assert_eq!(location["artifactLocation"]["uri"], "conf/a.properties");
    assert_eq!(location["region"]["startLine"], 2);
}
