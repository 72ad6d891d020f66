use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use docx_rs::{Docx, Paragraph, Run};
use predicates::prelude::*;
use tempfile::TempDir;

fn vitae(dir: &Path) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("vitae").into();
    cmd.current_dir(dir);
    cmd.env("NO_COLOR", "1");
    // Never pick up a model installed on the test machine.
    cmd.env("VITAE_MODEL_PATH", dir.join("missing-model.json"));
    cmd.env_remove("VITAE_STOPWORDS_PATH");
    cmd.env_remove("VITAE_TAXONOMY_PATH");
    cmd.env_remove("VITAE_ALLOW_BUNDLED_MODEL");
    cmd.env_remove("VITAE_MIN_TEXT_LENGTH");
    cmd
}

fn write_docx(dir: &Path, name: &str, paragraphs: &[&str]) -> PathBuf {
    let mut docx = Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
    }
    let path = dir.join(name);
    let file = fs::File::create(&path).unwrap();
    docx.build().pack(file).unwrap();
    path
}

fn write_resume(dir: &Path) -> PathBuf {
    write_docx(
        dir,
        "resume.docx",
        &[
            "Jane Doe",
            "Software Engineer",
            "jane.doe@example.com",
            "Skills: Python, Docker, PostgreSQL",
            "8 years of experience building backend services at Acme Corp",
        ],
    )
}

// --- Binary startup ---

#[test]
fn binary_runs() {
    let mut cmd: Command = cargo_bin_cmd!("vitae").into();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("vitae"));
}

// --- Parse ---

#[test]
fn parse_docx_json() {
    let tmp = TempDir::new().unwrap();
    let resume = write_resume(tmp.path());

    let output = vitae(tmp.path())
        .arg("parse")
        .arg(&resume)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["name"], "Jane Doe");
    assert_eq!(json["contact_info"]["email"], "jane.doe@example.com");
    assert_eq!(json["experience"]["years"], "8 years");
    assert_eq!(json["experience"]["companies"][0], "Acme Corp");
    assert_eq!(json["skills"]["databases"][0], "postgresql");
}

#[test]
fn parse_rejects_txt() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("resume.txt");
    fs::write(&path, "Jane Doe, Software Engineer").unwrap();

    vitae(tmp.path())
        .arg("parse")
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#""success":false"#))
        .stdout(predicate::str::contains("Unsupported file format"));
}

#[test]
fn parse_short_document() {
    let tmp = TempDir::new().unwrap();
    let path = write_docx(tmp.path(), "short.docx", &["Jane Doe"]);

    vitae(tmp.path())
        .arg("parse")
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Insufficient content"));
}

#[test]
fn parse_without_model_fails_uniformly() {
    let tmp = TempDir::new().unwrap();
    let resume = write_resume(tmp.path());

    vitae(tmp.path())
        .args(["--no-bundled-model", "parse"])
        .arg(&resume)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#""success":false"#))
        .stdout(predicate::str::contains("model unavailable"));
}

#[test]
fn parse_text_report() {
    let tmp = TempDir::new().unwrap();
    let resume = write_resume(tmp.path());

    vitae(tmp.path())
        .arg("parse")
        .arg(&resume)
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("RESUME ANALYSIS REPORT"))
        .stdout(predicate::str::contains("Name: Jane Doe"))
        .stdout(predicate::str::contains("DEVOPS:\n  - docker"));
}

#[test]
fn parse_csv_skills() {
    let tmp = TempDir::new().unwrap();
    let resume = write_resume(tmp.path());

    vitae(tmp.path())
        .arg("parse")
        .arg(&resume)
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Category,Skill\n"))
        .stdout(predicate::str::contains("Programming,python\n"))
        .stdout(predicate::str::contains("Databases,postgresql\n"));
}

// --- Batch ---

#[test]
fn batch_reports_each_file() {
    let tmp = TempDir::new().unwrap();
    write_resume(tmp.path());
    fs::write(tmp.path().join("notes.txt"), "not a resume").unwrap();

    let output = vitae(tmp.path())
        .args(["batch", "--dir", "."])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("1 parsed, 1 failed"))
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0]["file"].as_str().unwrap().ends_with("notes.txt"));
    assert_eq!(entries[0]["success"], false);
    assert_eq!(entries[1]["name"], "Jane Doe");
}

#[test]
fn batch_files_all_succeed() {
    let tmp = TempDir::new().unwrap();
    let resume = write_resume(tmp.path());

    vitae(tmp.path())
        .arg("batch")
        .arg(&resume)
        .assert()
        .success()
        .stderr(predicate::str::contains("1 parsed, 0 failed"));
}

// --- Skills ---

#[test]
fn skills_lists_taxonomy() {
    let tmp = TempDir::new().unwrap();
    vitae(tmp.path())
        .arg("skills")
        .assert()
        .success()
        .stdout(predicate::str::contains("Web Development: html, css"))
        .stdout(predicate::str::contains("Data Science: machine learning"));
}

#[test]
fn skills_custom_taxonomy() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("skills.json");
    fs::write(&path, r#"[{"category": "infra_tools", "skills": ["terraform", "nomad"]}]"#)
        .unwrap();

    vitae(tmp.path())
        .arg("skills")
        .arg("--taxonomy")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::diff("Infra Tools: terraform, nomad\n"));
}
