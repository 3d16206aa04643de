//! Integration tests for the olctl library
//!
//! The site-management collaborator is not available here, so these tests
//! focus on the file formats both flows share:
//! - Manifest round-trip fidelity between prepare and replay
//! - CSV report shape against a populated manifest
//! - Classification feeding the manifest in listing order

use olctl::domain::{AvailableUpdate, Blacklist, ExtensionType, UpdateType};
use olctl::manifest::Manifest;
use olctl::report;
use olctl::update::classify;
use tempfile::TempDir;

fn listing() -> Vec<AvailableUpdate> {
    vec![
        AvailableUpdate::new("wp-grade-comments", "WP Grade Comments", "2.1.0", "2.0.5"),
        AvailableUpdate::new("openlab-portfolio", "OpenLab Portfolio", "1.4.3", "1.4.1"),
        AvailableUpdate::new("buddypress-docs", "BuddyPress Docs", "2.3.0", "2.2.0"),
    ]
}

#[test]
fn test_classified_listing_survives_manifest_round_trip() {
    let dir = TempDir::new().unwrap();

    let records = classify(
        ExtensionType::Plugin,
        &listing(),
        &Blacklist::resolve(None, None),
    );
    // buddypress-docs sits on the default blacklist.
    assert_eq!(records.len(), 2);

    let mut manifest = Manifest::new("1.3.7");
    manifest.set_records(ExtensionType::Plugin, records.clone());
    manifest.write(dir.path()).unwrap();

    let replayed = Manifest::read(dir.path()).unwrap();
    assert_eq!(replayed.records_for(ExtensionType::Plugin), &records[..]);

    let first = &replayed.records_for(ExtensionType::Plugin)[0];
    assert_eq!(first.name, "wp-grade-comments");
    assert_eq!(first.update_type, UpdateType::Major);
    assert_eq!(first.update_series, "2.1");

    let second = &replayed.records_for(ExtensionType::Plugin)[1];
    assert_eq!(second.update_type, UpdateType::Minor);
    assert_eq!(second.update_series, "1.4");
}

#[test]
fn test_report_matches_manifest_contents() {
    let dir = TempDir::new().unwrap();

    let mut manifest = Manifest::new("1.3.7");
    manifest.set_records(
        ExtensionType::Plugin,
        classify(ExtensionType::Plugin, &listing(), &Blacklist::empty()),
    );

    let path = report::write_csv(dir.path(), "1.3.7", &manifest).unwrap();
    let bytes = std::fs::read(&path).unwrap();

    // BOM, then a header, then exactly one row per record.
    assert_eq!(&bytes[..3], b"\xEF\xBB\xBF");
    let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
    assert_eq!(text.lines().count(), 1 + manifest.total_records());
    assert!(text.contains("plugin,WP Grade Comments,wp-grade-comments,2.0.5,2.1.0,major"));
    assert!(text.contains("plugin,OpenLab Portfolio,openlab-portfolio,1.4.1,1.4.3,minor"));
}

#[test]
fn test_prepared_manifest_is_consumable_after_rewrite() {
    let dir = TempDir::new().unwrap();

    // Two successive prepares; the second unconditionally replaces the first.
    let mut first = Manifest::new("1.3.7");
    first.set_records(
        ExtensionType::Plugin,
        classify(ExtensionType::Plugin, &listing(), &Blacklist::empty()),
    );
    first.write(dir.path()).unwrap();

    let second = Manifest::new("1.3.8");
    second.write(dir.path()).unwrap();

    let replayed = Manifest::read(dir.path()).unwrap();
    assert_eq!(replayed.header, "OpenLab upgrades for 1.3.8");
    assert_eq!(replayed.total_records(), 0);

    // Replay consumes the manifest.
    Manifest::delete(dir.path()).unwrap();
    assert!(Manifest::read(dir.path()).is_err());
}
