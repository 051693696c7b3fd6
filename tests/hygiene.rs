//! Hygiene: source-level budgets for the browser host.
//!
//! Every listener in the host runs on the page's only thread, and a panic in
//! one of them leaves the canvas frozen with the upload input disabled. These
//! tests scan `src/` (sibling `_test.rs` files excluded) and fail when a
//! budget is exceeded.

use std::fs;
use std::path::{Path, PathBuf};

/// (pattern, budget, reason)
const BUDGETS: &[(&str, usize, &str)] = &[
    (".unwrap()", 0, "panics in an event handler"),
    (".expect(", 0, "panics in an event handler"),
    ("panic!(", 0, "freezes the page"),
    ("unreachable!(", 0, "freezes the page"),
    ("todo!(", 0, "unfinished handler"),
    ("unimplemented!(", 0, "unfinished handler"),
    ("let _ =", 0, "drops a browser error without logging it"),
    (".ok()", 0, "drops an error without logging it"),
    ("#[allow(dead_code)]", 0, "hides unused code"),
    ("println!(", 0, "use the log facade"),
    ("eprintln!(", 0, "use the log facade"),
    ("dbg!(", 0, "debug leftovers"),
];

fn rust_sources(dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for path in entries.flatten().map(|entry| entry.path()) {
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs")
                && !path.to_string_lossy().ends_with("_test.rs")
            {
                found.push(path);
            }
        }
    }
    found.sort();
    found
}

#[test]
fn host_modules_are_scanned() {
    let names: Vec<String> = rust_sources(Path::new("src"))
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    for expected in ["lib.rs", "app.rs", "upload.rs"] {
        assert!(names.iter().any(|n| n == expected), "{expected} not found in {names:?}");
    }
}

#[test]
fn budgets_hold() {
    let sources: Vec<(PathBuf, String)> = rust_sources(Path::new("src"))
        .into_iter()
        .filter_map(|path| fs::read_to_string(&path).ok().map(|text| (path, text)))
        .collect();

    let mut report = Vec::new();
    for &(pattern, budget, reason) in BUDGETS {
        let mut total = 0;
        let mut offenders = Vec::new();
        for (path, text) in &sources {
            let count = text.lines().filter(|line| line.contains(pattern)).count();
            if count > 0 {
                total += count;
                offenders.push(format!("    {}: {count}", path.display()));
            }
        }
        if total > budget {
            report.push(format!("{pattern} ({reason}): {total} > {budget}\n{}", offenders.join("\n")));
        }
    }
    assert!(report.is_empty(), "hygiene budgets exceeded:\n{}", report.join("\n"));
}
