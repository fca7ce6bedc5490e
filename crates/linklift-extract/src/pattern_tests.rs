use super::*;

const LINK_A: &str = "https://photos.app.goo.gl/LinkAaaa1";
const LINK_B: &str = "https://photos.app.goo.gl/LinkBbbb2";

fn ident(token: &str) -> AlbumId {
    AlbumId::from_source_url(&format!("https://photos.google.com/album/{token}")).unwrap()
}

fn this_id() -> AlbumId {
    ident("ThisAlbumToken_000001")
}

#[test]
fn test_form_field_wins_over_script_blob() {
    let id = this_id();
    let snapshot = DocumentSnapshot {
        field_values: vec![format!("  {LINK_A}  ")],
        script_blobs: vec![format!("{} {LINK_B}", id.as_str())],
        ..Default::default()
    };
    let link = extract_link(&snapshot, Some(&id)).unwrap();
    assert_eq!(link.as_str(), LINK_A);
}

#[test]
fn test_dialog_text_wins_over_anchor() {
    let snapshot = DocumentSnapshot {
        dialog_texts: vec![format!("Link created {LINK_A}")],
        anchor_hrefs: vec![LINK_B.to_string()],
        ..Default::default()
    };
    let link = extract_link(&snapshot, None).unwrap();
    assert_eq!(link.as_str(), LINK_A);
}

#[test]
fn test_anchor_fallback() {
    let snapshot = DocumentSnapshot {
        anchor_hrefs: vec![LINK_B.to_string()],
        ..Default::default()
    };
    let link = extract_link(&snapshot, None).unwrap();
    assert_eq!(link.as_str(), LINK_B);
}

#[test]
fn test_form_field_with_prefix_is_not_a_link() {
    let snapshot = DocumentSnapshot {
        field_values: vec![format!("copy this: {LINK_A}")],
        ..Default::default()
    };
    assert!(extract_link(&snapshot, None).is_none());
}

#[test]
fn test_scoped_after_identifier_skips_earlier_link() {
    let id = this_id();
    let other = ident("OtherAlbumToken_00002");
    let blob = format!(
        "{other} data {LINK_B} more data {this} trailing {LINK_A} tail",
        other = other.as_str(),
        this = id.as_str(),
    );
    let snapshot = DocumentSnapshot {
        script_blobs: vec![blob],
        ..Default::default()
    };
    let link = extract_link(&snapshot, Some(&id)).unwrap();
    assert_eq!(link.as_str(), LINK_A);
}

#[test]
fn test_scoped_window_is_bounded() {
    let id = this_id();
    let padding = "x".repeat(AFTER_IDENTIFIER_WINDOW);
    let blob = format!("{} {padding}{LINK_A}", id.as_str());
    let snapshot = DocumentSnapshot {
        script_blobs: vec![blob],
        ..Default::default()
    };
    assert!(extract_link(&snapshot, Some(&id)).is_none());
}

#[test]
fn test_blobs_skipped_without_identifier() {
    let snapshot = DocumentSnapshot {
        script_blobs: vec![format!("anything {LINK_A}")],
        ..Default::default()
    };
    assert!(extract_link(&snapshot, None).is_none());
}

#[test]
fn test_blob_without_identifier_occurrence_is_ignored() {
    let id = this_id();
    let snapshot = DocumentSnapshot {
        script_blobs: vec![format!("unrelated {LINK_B}")],
        ..Default::default()
    };
    assert!(extract_link(&snapshot, Some(&id)).is_none());
}

#[test]
fn test_second_blob_searched_when_first_misses() {
    let id = this_id();
    let snapshot = DocumentSnapshot {
        script_blobs: vec![
            "no identifier here".to_string(),
            format!("{} then {LINK_A}", id.as_str()),
        ],
        ..Default::default()
    };
    let link = extract_link(&snapshot, Some(&id)).unwrap();
    assert_eq!(link.as_str(), LINK_A);
}

#[test]
fn test_window_end_respects_char_boundaries() {
    let id = this_id();
    let mut blob = format!("{} ", id.as_str());
    // Multi-byte text straddling the window edge must not panic the slicer.
    while blob.len() < id.as_str().len() + AFTER_IDENTIFIER_WINDOW + 8 {
        blob.push('\u{00e9}');
    }
    let snapshot = DocumentSnapshot {
        script_blobs: vec![blob],
        ..Default::default()
    };
    assert!(extract_link(&snapshot, Some(&id)).is_none());
}

#[test]
fn test_empty_snapshot_yields_nothing() {
    assert!(extract_link(&DocumentSnapshot::default(), None).is_none());
}
