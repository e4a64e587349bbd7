use predicates::prelude::*;

use crate::common::{INVOICE_DATA, INVOICE_TEMPLATE, SIMPLE_DATA, SIMPLE_TEMPLATE, TestProject};

#[test]
fn test_merge_scalars_to_stdout() {
    let project = TestProject::new().unwrap();
    project.write_file("data.json", SIMPLE_DATA).unwrap();
    project.write_file("template.xml", SIMPLE_TEMPLATE).unwrap();

    project
        .command()
        .args(["merge", "--doc", "template.xml", "--json", "data.json"])
        .assert()
        .success()
        .stdout(
            "<document>
  <p>Title: Sample Document</p>
  <p>Author: John Doe</p>
  <p>Version: 1.0.0 (draft)</p>
</document>",
        )
        .stderr(predicate::str::contains("Placeholders: 4 found, 4 replaced, 0 missing"));
}

#[test]
fn test_merge_expands_rows_into_output_file() {
    let project = TestProject::new().unwrap();
    project.write_file("invoice.json", INVOICE_DATA).unwrap();
    project.write_file("invoice.xml", INVOICE_TEMPLATE).unwrap();

    project
        .command()
        .args(["merge", "-d", "invoice.xml", "-j", "invoice.json", "-o", "out/merged.xml"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("Rows created: 3"));

    let merged = project.read_file("out/merged.xml").unwrap();
    assert_eq!(merged.matches("<w:tr>").count(), 4);
    assert!(merged.contains("Invoice INV-042 for Smith &amp; Sons"));
    assert!(merged.contains("<w:t>Widget</w:t></w:tc><w:tc><w:t>2</w:t>"));
    assert!(merged.contains("<w:t>Doohickey</w:t></w:tc><w:tc><w:t>10</w:t>"));
    assert!(!merged.contains("{{"));

    // Item rows come out in list order
    let widget = merged.find("Widget").unwrap();
    let gadget = merged.find("Gadget").unwrap();
    let doohickey = merged.find("Doohickey").unwrap();
    assert!(widget < gadget && gadget < doohickey);
}

#[test]
fn test_merge_empty_list_removes_row() {
    let project = TestProject::new().unwrap();
    project.write_file("data.json", r#"{"invoice": "INV-000", "items": []}"#).unwrap();
    project.write_file("invoice.xml", INVOICE_TEMPLATE).unwrap();

    let assert = project
        .command()
        .args(["merge", "-d", "invoice.xml", "-j", "data.json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Rows created: 0"));

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert_eq!(stdout.matches("<w:tr>").count(), 1);
    assert!(!stdout.contains("items."));
}

#[test]
fn test_merge_leaves_missing_placeholders() {
    let project = TestProject::new().unwrap();
    project.write_file("data.json", r#"{"title": "Only title"}"#).unwrap();
    project.write_file("template.xml", "<p>{{title}} by {{author}}</p>").unwrap();

    project
        .command()
        .args(["merge", "-d", "template.xml", "-j", "data.json"])
        .assert()
        .success()
        .stdout("<p>Only title by {{author}}</p>")
        .stderr(predicate::str::contains("1 missing"))
        .stderr(predicate::str::contains("Unresolved: author"));
}

#[test]
fn test_merge_strict_fails_and_writes_nothing() {
    let project = TestProject::new().unwrap();
    project.write_file("data.json", r#"{"title": "Only title"}"#).unwrap();
    project.write_file("template.xml", "<p>{{title}} by {{author}} {{date}}</p>").unwrap();

    project
        .command()
        .args(["merge", "-d", "template.xml", "-j", "data.json", "-o", "out.xml", "--strict"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("2 placeholder(s) could not be resolved"))
        .stderr(predicate::str::contains("Unresolved: author, date"));

    assert!(!project.project_path().join("out.xml").exists());
}

#[test]
fn test_merge_quiet_skips_summary() {
    let project = TestProject::new().unwrap();
    project.write_file("data.json", SIMPLE_DATA).unwrap();
    project.write_file("template.xml", SIMPLE_TEMPLATE).unwrap();

    project
        .command()
        .args(["--quiet", "merge", "-d", "template.xml", "-j", "data.json"])
        .assert()
        .success()
        .stderr("");
}

#[test]
fn test_merge_custom_row_path() {
    let project = TestProject::new().unwrap();
    project.write_file("data.json", r#"{"people": [{"name": "Ann"}, {"name": "Bo"}]}"#).unwrap();
    project
        .write_file("template.xml", "<list><entry>{{people.name}}</entry></list>")
        .unwrap();

    project
        .command()
        .args(["merge", "-d", "template.xml", "-j", "data.json", "--row-path", "//entry"])
        .assert()
        .success()
        .stdout("<list><entry>Ann</entry><entry>Bo</entry></list>");
}

#[test]
fn test_merge_reads_project_config() {
    let project = TestProject::new().unwrap();
    project
        .write_file("json2doc.toml", "row_path = \"/list/entry\"\nescape_values = false\n")
        .unwrap();
    project
        .write_file("data.json", r#"{"tag": "<b>x</b>", "people": [{"name": "Ann"}, {"name": "Bo"}]}"#)
        .unwrap();
    project
        .write_file("template.xml", "<list><entry>{{people.name}}</entry><p>{{tag}}</p></list>")
        .unwrap();

    project
        .command()
        .args(["merge", "-d", "template.xml", "-j", "data.json"])
        .assert()
        .success()
        .stdout("<list><entry>Ann</entry><entry>Bo</entry><p><b>x</b></p></list>");
}

#[test]
fn test_merge_explicit_config_with_strict() {
    let project = TestProject::new().unwrap();
    project.write_file("conf/strict.toml", "strict = true\n").unwrap();
    project.write_file("data.json", "{}").unwrap();
    project.write_file("template.xml", "<p>{{missing}}</p>").unwrap();

    project
        .command()
        .args(["--config", "conf/strict.toml", "merge", "-d", "template.xml", "-j", "data.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing"));

    project
        .command()
        .env("JSON2DOC_CONFIG", "conf/strict.toml")
        .args(["merge", "-d", "template.xml", "-j", "data.json"])
        .assert()
        .failure();
}
