use predicates::prelude::*;

use crate::common::{INVOICE_DATA, INVOICE_TEMPLATE, SIMPLE_DATA, TestProject};

#[test]
fn test_keys_text() {
    let project = TestProject::new().unwrap();
    project.write_file("data.json", SIMPLE_DATA).unwrap();

    project
        .command()
        .args(["keys", "--json", "data.json"])
        .assert()
        .success()
        .stdout(
            "title = Sample Document\n\
             author = John Doe\n\
             metadata.version = 1.0.0\n\
             metadata.status = draft\n",
        );
}

#[test]
fn test_keys_text_lists_item_counts() {
    let project = TestProject::new().unwrap();
    project.write_file("invoice.json", INVOICE_DATA).unwrap();

    project
        .command()
        .args(["keys", "-j", "invoice.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("customer.name = Smith & Sons"))
        .stdout(predicate::str::contains("Lists:\n  items (3 items)"));
}

#[test]
fn test_keys_json() {
    let project = TestProject::new().unwrap();
    project.write_file("invoice.json", INVOICE_DATA).unwrap();

    let assert = project
        .command()
        .args(["keys", "-j", "invoice.json", "--format", "json"])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(json["values"]["invoice"], "INV-042");
    assert_eq!(json["values"]["customer.name"], "Smith & Sons");
    assert_eq!(json["lists"]["items"][1]["name"], "Gadget");
    assert_eq!(json["lists"]["items"][2]["qty"], "10");
}

#[test]
fn test_vars_unique_and_all() {
    let project = TestProject::new().unwrap();
    project
        .write_file("template.xml", "<p>{{a}} {{ b }} {{a}}</p><p>{{c.d}}</p>")
        .unwrap();

    project
        .command()
        .args(["vars", "--doc", "template.xml"])
        .assert()
        .success()
        .stdout("a\nb\nc.d\n");

    project
        .command()
        .args(["vars", "-d", "template.xml", "--all"])
        .assert()
        .success()
        .stdout("a\nb\na\nc.d\n");
}

#[test]
fn test_vars_json() {
    let project = TestProject::new().unwrap();
    project.write_file("invoice.xml", INVOICE_TEMPLATE).unwrap();

    let assert = project
        .command()
        .args(["vars", "-d", "invoice.xml", "--format", "json"])
        .assert()
        .success();

    let names: Vec<String> = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(names, vec!["invoice", "customer.name", "items.name", "items.qty"]);
}
