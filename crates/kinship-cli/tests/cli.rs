use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

const RON: &str = "01J0000000000000000000000R";
const SUSAN: &str = "01J0000000000000000000000S";
const BYRON: &str = "01J0000000000000000000000B";
const ELYSA: &str = "01J0000000000000000000000E";

fn a(id: &str, text: &str) -> String {
    format!("<a href=\"person?id={}\">{}</a>", id, text)
}

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let kids = format!("{} and {}", a(BYRON, "Byron"), a(ELYSA, "Elysa"));
        let people = json!([
            {
                "id": RON, "name": "Ron Katz", "gender": "MALE",
                "spouses": a(SUSAN, "Susan"), "parents": "Ellis and Marjorie",
                "children": kids
            },
            {
                "id": SUSAN, "name": "Susan Katz", "gender": "female",
                "siblings": "Gary", "spouses": a(RON, "Ron"), "children": kids
            },
            {
                "id": BYRON, "name": "Byron Katz", "gender": "male",
                "siblings": a(ELYSA, "Elysa"), "spouses": "Susanne",
                "parents": format!("{} and {}", a(SUSAN, "Susan"), a(RON, "Ron"))
            },
            {
                "id": ELYSA, "name": "Elysa Katz", "gender": "female",
                "siblings": format!("<a href=person?id={}>Byron</a>", BYRON),
                "parents": format!("{} and {}", a(RON, "Ron"), a(SUSAN, "Susan"))
            }
        ]);
        std::fs::write(dir.path().join("people.json"), people.to_string()).unwrap();
        Self { dir }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("kinship").unwrap();
        cmd.env("KINSHIP_CONFIG", self.dir.path().join("config.toml"))
            .env_remove("KINSHIP_DATA")
            .env_remove("RUST_LOG")
            .arg("--data")
            .arg(self.dir.path().join("people.json"));
        cmd
    }

    fn json(&self, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .args(["--format", "json"])
            .args(args)
            .output()
            .unwrap();
        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

#[test]
fn test_ancestors_table() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .args(["ancestors", BYRON])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ancestors of Byron Katz (2 found):"))
        .stdout(predicate::str::contains("Susan Katz - mother of Byron Katz"))
        .stdout(predicate::str::contains("Ron Katz - father of Byron Katz"));
}

#[test]
fn test_siblings_json() {
    let fixture = Fixture::new();
    let siblings = fixture.json(&["siblings", BYRON]);

    let siblings = siblings.as_array().unwrap();
    assert_eq!(siblings.len(), 1);
    assert_eq!(siblings[0]["id"], ELYSA);
    assert_eq!(siblings[0]["description"], "sister of Byron Katz");
    assert_eq!(siblings[0]["distance"], 1);
}

#[test]
fn test_relatives_with_and_without_marriage() {
    let fixture = Fixture::new();

    let with = fixture.json(&["relatives", RON, "-d", "1"]);
    let names: Vec<_> = with
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Susan Katz", "Byron Katz", "Elysa Katz"]);
    assert_eq!(with[0]["description"], "wife of Ron Katz");

    let without = fixture.json(&["relatives", RON, "-d", "1", "--no-marriage"]);
    assert_eq!(without.as_array().unwrap().len(), 2);
}

#[test]
fn test_others_excludes_lineage() {
    let fixture = Fixture::new();
    let others = fixture.json(&["others", BYRON]);

    let ids: Vec<_> = others
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec![ELYSA.to_string()]);
}

#[test]
fn test_descendants_of_childless_person() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .args(["descendants", ELYSA])
        .assert()
        .success()
        .stdout(predicate::str::contains("No descendants found for Elysa Katz"));
}

#[test]
fn test_unknown_person_is_not_an_error() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .args(["ancestors", "01J00000000000000000000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found"));
}

#[test]
fn test_invalid_id_fails() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .args(["siblings", "byron"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid person id"));
}

#[test]
fn test_depth_limit() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .args(["ancestors", BYRON, "--depth", "11"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Traversal distance too large"));
}

#[test]
fn test_stats_json() {
    let fixture = Fixture::new();
    let stats = fixture.json(&["stats"]);

    assert_eq!(stats["nodes"], 4);
    assert_eq!(stats["edges_by_kind"]["spouse"], 2);
    assert_eq!(stats["edges_by_kind"]["sibling"], 2);
    assert_eq!(stats["edges_by_kind"]["child"], 4);
    assert_eq!(stats["edges_by_kind"]["parent"], 4);
    assert_eq!(stats["edges"], 12);
}

#[test]
fn test_missing_data_file() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("kinship")
        .unwrap()
        .env("KINSHIP_CONFIG", dir.path().join("config.toml"))
        .args(["--data"])
        .arg(dir.path().join("absent.json"))
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Data file not found"));
}

#[test]
fn test_config_set_get_and_defaults() {
    let fixture = Fixture::new();

    fixture
        .cmd()
        .args(["config", "get", "max_distance"])
        .assert()
        .success()
        .stdout("3\n");

    fixture
        .cmd()
        .args(["config", "set", "max_distance", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set max_distance = 1"));

    fixture
        .cmd()
        .args(["config", "get", "max_distance"])
        .assert()
        .success()
        .stdout("1\n");

    // configured distance now limits queries
    let ancestors = fixture.json(&["relatives", BYRON]);
    assert!(ancestors
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["distance"] == 1));

    fixture
        .cmd()
        .args(["config", "set", "max_distance", "99"])
        .assert()
        .failure();
}

#[test]
fn test_config_init_refuses_overwrite() {
    let fixture = Fixture::new();

    fixture.cmd().args(["config", "init"]).assert().success();
    fixture
        .cmd()
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    fixture
        .cmd()
        .args(["config", "init", "--force"])
        .assert()
        .success();

    fixture
        .cmd()
        .args(["config", "get", "data_file"])
        .assert()
        .success()
        .stdout(predicate::str::contains("people.json"));
}

#[test]
fn test_completions() {
    Command::cargo_bin("kinship")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kinship"));
}
