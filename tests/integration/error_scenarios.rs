use predicates::prelude::*;

use crate::common::{SIMPLE_DATA, SIMPLE_TEMPLATE, TestProject};

#[test]
fn test_missing_data_file() {
    let project = TestProject::new().unwrap();
    project.write_file("template.xml", SIMPLE_TEMPLATE).unwrap();

    project
        .command()
        .args(["merge", "-d", "template.xml", "-j", "nope.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: File system error during read data file"))
        .stderr(predicate::str::contains("nope.json"));
}

#[test]
fn test_missing_template_file() {
    let project = TestProject::new().unwrap();
    project.write_file("data.json", SIMPLE_DATA).unwrap();

    project
        .command()
        .args(["merge", "-d", "nope.xml", "-j", "data.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("read template"));
}

#[test]
fn test_top_level_array_is_rejected() {
    let project = TestProject::new().unwrap();
    project.write_file("data.json", r#"[{"name": "x"}]"#).unwrap();

    project
        .command()
        .args(["keys", "-j", "data.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed input data"))
        .stderr(predicate::str::contains("JSON object"));
}

#[test]
fn test_malformed_template() {
    let project = TestProject::new().unwrap();
    project.write_file("data.json", SIMPLE_DATA).unwrap();
    project.write_file("template.xml", "<a><b>{{title}}</a>").unwrap();

    project
        .command()
        .args(["merge", "-d", "template.xml", "-j", "data.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse template markup"));
}

#[test]
fn test_invalid_row_path() {
    let project = TestProject::new().unwrap();
    project.write_file("data.json", SIMPLE_DATA).unwrap();
    project.write_file("template.xml", SIMPLE_TEMPLATE).unwrap();

    project
        .command()
        .args(["merge", "-d", "template.xml", "-j", "data.json", "--row-path", "//tr[1]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid node path '//tr[1]'"));
}

#[test]
fn test_unknown_config_key() {
    let project = TestProject::new().unwrap();
    project.write_file("json2doc.toml", "row_paht = \"//tr\"\n").unwrap();
    project.write_file("data.json", SIMPLE_DATA).unwrap();
    project.write_file("template.xml", SIMPLE_TEMPLATE).unwrap();

    project
        .command()
        .args(["merge", "-d", "template.xml", "-j", "data.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"))
        .stderr(predicate::str::contains("row_paht"));
}

#[test]
fn test_missing_subcommand_shows_usage() {
    let project = TestProject::new().unwrap();
    project
        .command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_version_flag() {
    let project = TestProject::new().unwrap();
    project
        .command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
