//! Promotion scenarios against real files on disk.
//!
//! These drive the coordinator directly with constructed call sites so the
//! rewrites land in a temp directory instead of this test's own source.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use snapline::promote::{CallSite, PromoteError, PromotionCoordinator};
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

/// A source file with one expect call whose block holds `content` lines,
/// padded so a second call site sits at 1-based line 50.
fn two_site_source() -> Vec<String> {
    let mut lines: Vec<String> = vec![
        "fn first(t: &mut Scope) {".into(),   // line 1
        "    t.expect(r#\"".into(),           // line 2, the first call site
        "        left".into(),                // line 3
        "        right".into(),               // line 4
        "        \"#);".into(),               // line 5
        "}".into(),                           // line 6
    ];
    while lines.len() < 48 {
        lines.push("// padding".into());
    }
    lines.push("fn second(t: &mut Scope) {".into()); // line 49
    lines.push("    t.expect(r#\"".into());          // line 50, second call site
    lines.push("        tail".into());               // line 51
    lines.push("        \"#);".into());              // line 52
    lines.push("}".into());                          // line 53
    lines
}

fn write_lines(dir: &TempDir, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, lines.join("\n")).expect("failed to seed source file");
    path
}

fn simple_source(content_lines: &[&str]) -> Vec<String> {
    let mut lines: Vec<String> = vec!["    t.expect(r#\"".into()];
    lines.extend(content_lines.iter().map(|line| format!("        {line}")));
    lines.push("        \"#);".into());
    lines
}

// =============================================================================
// Offset consistency across promotions
// =============================================================================

/// Growing an earlier block re-addresses a later call site: originally at
/// line 50, afterwards found at line 51.
#[test]
fn growing_promotion_shifts_later_call_sites() {
    let dir = TempDir::new().unwrap();
    let path = write_lines(&dir, "two_sites.rs", &two_site_source());
    let coordinator = PromotionCoordinator::new();

    coordinator
        .promote(&CallSite::new(&path, 2, 7), "A\nA\nA")
        .unwrap();

    assert_eq!(coordinator.adjusted_line(&path, 50), 51);
    assert_eq!(coordinator.adjusted_line(&path, 2), 2);

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.split('\n').collect();
    assert_eq!(lines[2], "        A");
    assert_eq!(lines[3], "        A");
    assert_eq!(lines[4], "        A");
    // the second call site physically moved one line down
    assert_eq!(lines[50], "    t.expect(r#\"");
}

/// The second call site still promotes correctly through its declared
/// (stale) line number after the first promotion moved it.
#[test]
fn stale_line_numbers_keep_resolving_after_earlier_growth() {
    let dir = TempDir::new().unwrap();
    let path = write_lines(&dir, "two_sites.rs", &two_site_source());
    let coordinator = PromotionCoordinator::new();

    coordinator
        .promote(&CallSite::new(&path, 2, 7), "A\nA\nA")
        .unwrap();
    coordinator
        .promote(&CallSite::new(&path, 50, 7), "new tail one\nnew tail two")
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.split('\n').collect();
    assert_eq!(lines[51], "        new tail one");
    assert_eq!(lines[52], "        new tail two");
    assert_eq!(lines[53], "        \"#);");
    // first block untouched by the second promotion
    assert_eq!(lines[2], "        A");
}

/// Deltas of sequential promotions compose additively for lines below both.
#[test]
fn sequential_deltas_compose() {
    let dir = TempDir::new().unwrap();
    let path = write_lines(&dir, "two_sites.rs", &two_site_source());
    let coordinator = PromotionCoordinator::new();

    // 2 -> 3 lines: +1, then 1 -> 4 lines at the second site: +3
    coordinator
        .promote(&CallSite::new(&path, 2, 7), "A\nA\nA")
        .unwrap();
    coordinator
        .promote(&CallSite::new(&path, 50, 7), "a\nb\nc\nd")
        .unwrap();

    assert_eq!(coordinator.adjusted_line(&path, 100), 104);
    assert_eq!(coordinator.adjusted_line(&path, 30), 31);
    assert_eq!(coordinator.adjusted_line(&path, 2), 2);
}

/// Promoting the same site twice with the same output converges: the second
/// rewrite finds the already-correct block and records a zero delta.
#[test]
fn repeated_promotion_is_stable() {
    let dir = TempDir::new().unwrap();
    let path = write_lines(&dir, "stable.rs", &simple_source(&["old"]));
    let coordinator = PromotionCoordinator::new();
    let site = CallSite::new(&path, 1, 7);

    coordinator.promote(&site, "one\ntwo\nthree").unwrap();
    let first = fs::read_to_string(&path).unwrap();

    coordinator.promote(&site, "one\ntwo\nthree").unwrap();
    let second = fs::read_to_string(&path).unwrap();

    assert_eq!(first, second);
    // +2 then 0
    assert_eq!(coordinator.adjusted_line(&path, 10), 12);
}

// =============================================================================
// Concurrent promotion
// =============================================================================

/// Many threads promoting the same file must not interleave reads and
/// writes; the file ends up whole with the expected content.
#[test]
fn concurrent_same_file_promotions_stay_consistent() {
    let dir = TempDir::new().unwrap();
    let path = write_lines(&dir, "shared.rs", &simple_source(&["seed", "seed"]));
    let coordinator = Arc::new(PromotionCoordinator::new());

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let coordinator = Arc::clone(&coordinator);
            let path = path.clone();
            thread::spawn(move || {
                coordinator
                    .promote(&CallSite::new(&path, 1, 7), "A\nA\nA")
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("promotion thread panicked");
    }

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "    t.expect(r#\"\n        A\n        A\n        A\n        \"#);"
    );
}

/// Threads promoting different files interleave freely; each file and its
/// ledger entries stay independent.
#[test]
fn concurrent_distinct_file_promotions_stay_independent() {
    let dir = TempDir::new().unwrap();
    let coordinator = Arc::new(PromotionCoordinator::new());
    let paths: Vec<PathBuf> = (0..8)
        .map(|i| write_lines(&dir, &format!("file_{i}.rs"), &simple_source(&["seed"])))
        .collect();

    let handles: Vec<_> = paths
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let coordinator = Arc::clone(&coordinator);
            let path = path.clone();
            thread::spawn(move || {
                let body = format!("content {i}\ncontent {i}");
                coordinator
                    .promote(&CallSite::new(&path, 1, 7), &body)
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("promotion thread panicked");
    }

    for (i, path) in paths.iter().enumerate() {
        let content = fs::read_to_string(path).unwrap();
        assert_eq!(
            content,
            format!(
                "    t.expect(r#\"\n        content {i}\n        content {i}\n        \"#);"
            )
        );
        // one record each, +1 delta
        assert_eq!(coordinator.adjusted_line(path, 5), 6);
    }
}

// =============================================================================
// Failure propagation
// =============================================================================

#[test]
fn scan_failure_names_file_and_reason() {
    let dir = TempDir::new().unwrap();
    let lines = vec!["    t.expect(build());".to_string()];
    let path = write_lines(&dir, "broken.rs", &lines);
    let coordinator = PromotionCoordinator::new();

    let err = coordinator
        .promote(&CallSite::new(&path, 1, 7), "anything")
        .unwrap_err();

    assert!(matches!(err, PromoteError::Scan { .. }));
    let text = err.to_string();
    assert!(text.contains("broken.rs"));
    assert!(text.contains("could not find opening delimiter"));
    assert!(text.contains("1:14"));
}

#[test]
fn missing_file_surfaces_read_failure() {
    let coordinator = PromotionCoordinator::new();
    let err = coordinator
        .promote(&CallSite::new("/nonexistent/snapline/gone.rs", 1, 7), "x")
        .unwrap_err();
    assert!(matches!(err, PromoteError::Read { .. }));
}
