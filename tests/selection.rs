//! Selection behavior over real archive listings.

mod common;

use common::{sample_archive, ArchiveBuilder};
use scdatapack::{Archive, PrefixFilter, SelectAll};

#[test]
fn selection_preserves_listing_order() {
    let archive = Archive::open(sample_archive()).unwrap();
    let filter = PrefixFilter::new(["Data/Libs/Foundry/", "Data/Localization/"]);
    let selection = archive.select(&filter);

    let paths: Vec<&str> = selection.entries.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(
        paths,
        [
            "Data/Libs/Foundry/Records/Entities/Spaceships/aegis_gladius.xml",
            "Data/Localization/english/global.ini",
            "Data/Libs/Foundry/Records/Damage/hull.xml",
        ]
    );
}

#[test]
fn empty_filter_selects_nothing() {
    let archive = Archive::open(sample_archive()).unwrap();
    let selection = archive.select(&PrefixFilter::default());
    assert!(selection.is_empty());
}

#[test]
fn empty_string_prefix_selects_everything() {
    let archive = Archive::open(sample_archive()).unwrap();
    let all = archive.select(&PrefixFilter::new([""]));
    assert_eq!(all.count(), archive.len());
}

#[test]
fn selection_is_deterministic() {
    let archive = Archive::open(sample_archive()).unwrap();
    let filter = PrefixFilter::new(["Data/"]);

    let first = archive.select(&filter);
    let second = archive.select(&filter);
    let first_paths: Vec<_> = first.entries.iter().map(|e| e.path.as_str()).collect();
    let second_paths: Vec<_> = second.entries.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(first_paths, second_paths);
}

#[test]
fn prefix_match_is_case_sensitive() {
    let archive = Archive::open(sample_archive()).unwrap();
    let selection = archive.select(&PrefixFilter::new(["data/localization/"]));
    assert!(selection.is_empty());
}

#[test]
fn select_all_matches_manifest() {
    let archive = Archive::open(sample_archive()).unwrap();
    let selection = archive.select(&SelectAll);
    assert_eq!(selection.count(), archive.len());
    assert_eq!(selection.total_size(), archive.total_size());
}

#[test]
fn overlapping_prefixes_do_not_duplicate() {
    let archive = Archive::open(sample_archive()).unwrap();
    // Both prefixes match the same Foundry entries.
    let filter = PrefixFilter::new(["Data/Libs/", "Data/Libs/Foundry/"]);
    let selection = archive.select(&filter);
    assert_eq!(selection.count(), 2);
}

#[test]
fn backslash_listings_are_normalized_before_matching() {
    let reader = ArchiveBuilder::new()
        .file("Data\\Localization\\english\\global.ini", b"greeting=hello")
        .build();
    let archive = Archive::open(reader).unwrap();

    let selection = archive.select(&PrefixFilter::new(["Data/Localization/"]));
    assert_eq!(selection.count(), 1);
    assert_eq!(
        selection.entries[0].path,
        "Data/Localization/english/global.ini"
    );
}

#[test]
fn traversal_paths_are_rejected_at_listing() {
    let reader = ArchiveBuilder::new()
        .file("../escape.txt", b"nope")
        .build();
    assert!(Archive::open(reader).is_err());
}
