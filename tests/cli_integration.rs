//! Integration tests for the strsync binary.
//!
//! These tests exercise the full CLI against resource trees built in
//! temporary directories.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const BASE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <string name="greeting">Hello</string>
    <string name="farewell">Bye</string>
</resources>
"#;

const LOCALE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <string name="greeting">Bonjour</string>
</resources>
"#;

/// Get a command for running strsync.
fn strsync() -> Command {
    Command::cargo_bin("strsync").unwrap()
}

/// A `res/` tree with one base and one French file per name.
struct ResTree {
    dir: TempDir,
}

impl ResTree {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        dir.child("res/values").create_dir_all().unwrap();
        dir.child("res/values-fr").create_dir_all().unwrap();
        Self { dir }
    }

    fn with_pair(self, name: &str, base: &str, locale: &str) -> Self {
        self.base(name).write_str(base).unwrap();
        self.locale(name).write_str(locale).unwrap();
        self
    }

    fn base(&self, name: &str) -> assert_fs::fixture::ChildPath {
        self.dir.child(format!("res/values/{}", name))
    }

    fn locale(&self, name: &str) -> assert_fs::fixture::ChildPath {
        self.dir.child(format!("res/values-fr/{}", name))
    }

    fn locale_text(&self, name: &str) -> String {
        std::fs::read_to_string(self.locale(name).path()).unwrap()
    }

    fn cmd(&self) -> Command {
        let mut cmd = strsync();
        cmd.arg("--root").arg(self.dir.path()).args(["--locale", "fr"]);
        cmd
    }
}

#[test]
fn help_flag_works() {
    strsync()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("values-<LOCALE>"));
}

#[test]
fn version_flag_works() {
    strsync()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("strsync"));
}

#[test]
fn appends_missing_string() {
    let tree = ResTree::new().with_pair("strings.xml", BASE, LOCALE);

    tree.cmd()
        .arg("strings.xml")
        .assert()
        .success()
        .stdout(predicate::str::contains("added 1 entry"))
        .stdout(predicate::str::contains("@string/farewell"));

    assert_eq!(
        tree.locale_text("strings.xml"),
        r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <string name="greeting">Bonjour</string>
    <!-- untranslated -->
    <string name="farewell">Bye</string>
</resources>
"#
    );
    tree.base("strings.xml").assert(BASE);
}

#[test]
fn identical_key_sets_leave_file_unchanged() {
    let locale = "<resources>\n  <!-- keep me -->\n  <string name=\"farewell\">Au revoir</string>\n  <string name=\"greeting\">Salut</string>\n</resources>";
    let tree = ResTree::new().with_pair("strings.xml", BASE, locale);

    tree.cmd()
        .arg("strings.xml")
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));

    assert_eq!(tree.locale_text("strings.xml"), locale);
}

#[test]
fn second_run_changes_nothing() {
    let tree = ResTree::new().with_pair("strings.xml", BASE, LOCALE);

    tree.cmd().arg("strings.xml").assert().success();
    let first = tree.locale_text("strings.xml");

    tree.cmd()
        .arg("strings.xml")
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));
    assert_eq!(tree.locale_text("strings.xml"), first);
}

#[test]
fn missing_root_flag() {
    let tree = ResTree::new().with_pair("strings.xml", BASE, LOCALE);

    strsync()
        .args(["--locale", "fr", "strings.xml"])
        .current_dir(tree.dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: must define --root"));

    tree.locale("strings.xml").assert(LOCALE);
}

#[test]
fn missing_locale_flag() {
    let tree = ResTree::new().with_pair("strings.xml", BASE, LOCALE);

    strsync()
        .arg("--root")
        .arg(tree.dir.path())
        .arg("strings.xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must define --locale"));
}

#[test]
fn no_files_given() {
    let tree = ResTree::new();

    tree.cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("no resource files given"));
}

#[test]
fn root_must_be_directory() {
    let tree = ResTree::new();

    strsync()
        .arg("--root")
        .arg(tree.dir.path().join("missing"))
        .args(["--locale", "fr", "strings.xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a readable directory"));
}

#[test]
fn missing_locale_file_is_not_created() {
    let tree = ResTree::new();
    tree.base("strings.xml").write_str(BASE).unwrap();

    tree.cmd()
        .arg("strings.xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("strings.xml: file not found"));

    tree.locale("strings.xml").assert(predicate::path::missing());
}

#[test]
fn parse_error_names_file_and_line() {
    let tree = ResTree::new().with_pair(
        "strings.xml",
        BASE,
        "<resources>\n    <string name=\"greeting\">Bonjour</strin>\n</resources>\n",
    );

    tree.cmd()
        .arg("strings.xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("values-fr"))
        .stderr(predicate::str::contains("strings.xml:2:"));
}

#[test]
fn non_utf8_file_is_parse_error() {
    let tree = ResTree::new().with_pair("strings.xml", BASE, LOCALE);
    tree.base("strings.xml")
        .write_binary(b"<resources>\n    <string name=\"a\">caf\xe9</string>\n</resources>\n")
        .unwrap();

    tree.cmd()
        .arg("strings.xml")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("strings.xml:2:25: file is not valid UTF-8"));
    assert_eq!(tree.locale_text("strings.xml"), LOCALE);
}

#[test]
fn stops_at_first_failing_file() {
    let tree = ResTree::new()
        .with_pair("a.xml", BASE, LOCALE)
        .with_pair("b.xml", BASE, "<resources>")
        .with_pair("c.xml", BASE, LOCALE);

    tree.cmd()
        .args(["a.xml", "b.xml", "c.xml"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("a.xml: added 1 entry"))
        .stderr(predicate::str::contains("b.xml"));

    assert!(tree.locale_text("a.xml").contains("farewell"));
    tree.locale("c.xml").assert(LOCALE);
}

#[test]
fn dry_run_writes_nothing() {
    let tree = ResTree::new().with_pair("strings.xml", BASE, LOCALE);

    tree.cmd()
        .args(["--dry-run", "strings.xml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would add 1 entry"))
        .stderr(predicate::str::contains("dry run"));

    tree.locale("strings.xml").assert(LOCALE);
}

#[test]
fn no_mark_flag() {
    let tree = ResTree::new().with_pair("strings.xml", BASE, LOCALE);

    tree.cmd().args(["--no-mark", "strings.xml"]).assert().success();

    tree.locale("strings.xml")
        .assert(predicate::str::contains("untranslated").not())
        .assert(predicate::str::contains("<string name=\"farewell\">Bye</string>"));
}

#[test]
fn skip_untranslatable_flag() {
    let base = "<resources>\n    <string name=\"app_name\" translatable=\"false\">Term</string>\n    <string name=\"greeting\">Hello</string>\n</resources>\n";
    let tree = ResTree::new().with_pair("strings.xml", base, "<resources>\n</resources>\n");

    tree.cmd()
        .args(["--skip-untranslatable", "strings.xml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped"));

    tree.locale("strings.xml")
        .assert(predicate::str::contains("app_name").not())
        .assert(predicate::str::contains("greeting"));
}

#[test]
fn quiet_prints_nothing() {
    let tree = ResTree::new().with_pair("strings.xml", BASE, LOCALE);

    tree.cmd()
        .args(["-q", "strings.xml"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn debug_prints_directories() {
    let tree = ResTree::new().with_pair("strings.xml", BASE, LOCALE);

    tree.cmd()
        .args(["--debug", "strings.xml"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[debug] locale dir:"));
}

#[test]
fn json_report() {
    let tree = ResTree::new().with_pair("strings.xml", BASE, LOCALE);

    let output = tree
        .cmd()
        .args(["--json", "strings.xml"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let file = &report["files"][0];
    assert_eq!(file["added"], serde_json::json!(["@string/farewell"]));
    assert_eq!(file["preserved"], 1);
    assert_eq!(file["written"], true);
}

#[test]
fn rejects_path_in_file_name() {
    let tree = ResTree::new();

    tree.cmd()
        .arg("../strings.xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid resource file name"));
}
