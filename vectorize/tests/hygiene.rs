//! Hygiene: source-level budgets for the vectorize crate.
//!
//! Extraction runs on user uploads inside the browser, where a panic takes
//! down the whole viewer. These tests scan `src/` (test files excluded) and
//! fail when a budget is exceeded. Budgets only ever go down.

use std::fs;
use std::path::Path;

/// (pattern, budget, what it costs us)
const BUDGETS: &[(&str, usize, &str)] = &[
    (".unwrap()", 0, "panics on bad input"),
    (".expect(", 0, "panics on bad input"),
    ("panic!(", 0, "aborts the viewer"),
    ("unreachable!(", 0, "aborts the viewer"),
    ("todo!(", 0, "unfinished stage"),
    ("unimplemented!(", 0, "unfinished stage"),
    ("let _ =", 0, "silently drops a result"),
    (".ok()", 0, "silently drops an error"),
    ("#[allow(dead_code)]", 0, "hides unused code"),
    ("println!(", 0, "bypasses tracing"),
    ("eprintln!(", 0, "bypasses tracing"),
    ("dbg!(", 0, "debug leftovers"),
];

fn source_files() -> Vec<(String, String)> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    files
}

fn collect(dir: &Path, out: &mut Vec<(String, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let name = path.to_string_lossy().to_string();
        if !name.ends_with(".rs") || name.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push((name, content));
        }
    }
}

#[test]
fn source_tree_is_not_empty() {
    assert!(source_files().iter().any(|(name, _)| name.ends_with("lib.rs")));
}

#[test]
fn budgets_hold() {
    let files = source_files();
    let mut failures = Vec::new();
    for &(pattern, budget, cost) in BUDGETS {
        let hits: Vec<(String, usize)> = files
            .iter()
            .map(|(name, content)| (name.clone(), content.lines().filter(|l| l.contains(pattern)).count()))
            .filter(|(_, count)| *count > 0)
            .collect();
        let total: usize = hits.iter().map(|(_, c)| c).sum();
        if total > budget {
            let detail: Vec<String> = hits.iter().map(|(n, c)| format!("    {n}: {c}")).collect();
            failures.push(format!("{pattern} ({cost}): found {total}, max {budget}\n{}", detail.join("\n")));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}
