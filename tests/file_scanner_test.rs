use std::fs;
use std::path::Path;

use tempfile::TempDir;
use vulnhound::enums::language::Language;
use vulnhound::services::file_scanner::FileScanner;
use vulnhound::services::pattern_store::PatternStore;

fn php_store(dir: &Path) -> PatternStore {
    let path = dir.join("php.txt");
    fs::write(
        &path,
        "\
[SQL_INJECTION]
description: SQL injection vulnerabilities
patterns:
- mysql_query\\s*\\(

[XSS]
description: Cross-site scripting vulnerabilities
patterns:
- echo\\s+\\$_GET
",
    )
    .unwrap();

    let mut store = PatternStore::new();
    store.load_language_file(&path, Language::Php).unwrap();
    store
}

#[test]
fn nonexistent_target_is_fatal() {
    let dir = TempDir::new().unwrap();
    let store = php_store(dir.path());
    let scanner = FileScanner::new(&store, vec![Language::Php], Vec::new());

    assert!(scanner.scan("/nonexistent/project").is_err());
}

#[test]
fn findings_are_ordered_by_file_line_and_rule() {
    let dir = TempDir::new().unwrap();
    let store = php_store(dir.path());

    let project = dir.path().join("project");
    fs::create_dir(&project).unwrap();
    fs::write(
        project.join("b.php"),
        "<?php\nmysql_query($sql);\n",
    )
    .unwrap();
    fs::write(
        project.join("a.php"),
        // Line 2 matches both rules; rule order decides the tie.
        "<?php\necho $_GET['x']; mysql_query($q);\nmysql_query($other);\n",
    )
    .unwrap();

    let scanner = FileScanner::new(&store, vec![Language::Php], Vec::new());
    let outcome = scanner.scan(&project.display().to_string()).unwrap();

    assert_eq!(outcome.files_scanned, 2);
    let summary: Vec<(String, usize, String)> = outcome
        .findings
        .iter()
        .map(|f| {
            (
                Path::new(&f.file_path)
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .to_string(),
                f.line_number,
                f.vulnerability_type.clone(),
            )
        })
        .collect();

    assert_eq!(
        summary,
        vec![
            ("a.php".to_string(), 2, "SQL_INJECTION".to_string()),
            ("a.php".to_string(), 2, "XSS".to_string()),
            ("a.php".to_string(), 3, "SQL_INJECTION".to_string()),
            ("b.php".to_string(), 2, "SQL_INJECTION".to_string()),
        ]
    );
}

#[test]
fn hidden_entries_and_foreign_extensions_are_skipped() {
    let dir = TempDir::new().unwrap();
    let store = php_store(dir.path());

    let project = dir.path().join("project");
    fs::create_dir_all(project.join(".git")).unwrap();
    fs::write(project.join(".git/config.php"), "mysql_query($a);\n").unwrap();
    fs::write(project.join(".hidden.php"), "mysql_query($a);\n").unwrap();
    fs::write(project.join("notes.txt"), "mysql_query($a);\n").unwrap();
    fs::write(project.join("app.php"), "mysql_query($a);\n").unwrap();

    let scanner = FileScanner::new(&store, vec![Language::Php], Vec::new());
    let outcome = scanner.scan(&project.display().to_string()).unwrap();

    assert_eq!(outcome.files_scanned, 1);
    assert_eq!(outcome.findings.len(), 1);
    assert!(outcome.findings[0].file_path.ends_with("app.php"));
}

#[test]
fn undecodable_file_becomes_a_warning_not_an_error() {
    let dir = TempDir::new().unwrap();
    let store = php_store(dir.path());

    let project = dir.path().join("project");
    fs::create_dir(&project).unwrap();
    fs::write(project.join("binary.php"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
    fs::write(project.join("clean.php"), "<?php\nmysql_query($a);\n").unwrap();

    let scanner = FileScanner::new(&store, vec![Language::Php], Vec::new());
    let outcome = scanner.scan(&project.display().to_string()).unwrap();

    assert_eq!(outcome.files_scanned, 1);
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].contains("binary.php"));
    assert_eq!(outcome.findings.len(), 1);
}

#[test]
fn two_patterns_of_one_type_on_one_line_emit_two_findings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("php.txt");
    fs::write(
        &path,
        "\
[SQL_INJECTION]
description: SQL injection vulnerabilities
patterns:
- mysql_query\\s*\\(
- \\(\\$query\\)
",
    )
    .unwrap();
    let mut store = PatternStore::new();
    store.load_language_file(&path, Language::Php).unwrap();

    let file = dir.path().join("app.php");
    fs::write(&file, "<?php\nmysql_query($query);\n").unwrap();

    let scanner = FileScanner::new(&store, Vec::new(), Vec::new());
    let outcome = scanner.scan(&file.display().to_string()).unwrap();

    // Over-detection is intentional; the LLM judgment resolves it later.
    assert_eq!(outcome.findings.len(), 2);
    assert_eq!(outcome.findings[0].line_number, 2);
    assert_eq!(outcome.findings[1].line_number, 2);
    assert_ne!(
        outcome.findings[0].matched_pattern,
        outcome.findings[1].matched_pattern
    );
}

#[test]
fn single_file_target_scans_just_that_file() {
    let dir = TempDir::new().unwrap();
    let store = php_store(dir.path());

    let file = dir.path().join("login.php");
    fs::write(&file, "<?php\n$sql = \"SELECT 1\";\nmysql_query($sql);\n").unwrap();

    let scanner = FileScanner::new(&store, Vec::new(), Vec::new());
    let outcome = scanner.scan(&file.display().to_string()).unwrap();

    assert_eq!(outcome.files_scanned, 1);
    assert_eq!(outcome.findings.len(), 1);
    assert_eq!(outcome.findings[0].line_number, 3);
    assert_eq!(outcome.findings[0].raw_line, "mysql_query($sql);");
}
