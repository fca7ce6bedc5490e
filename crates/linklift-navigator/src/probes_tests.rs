use linklift_protocols::ControlCandidate;

use super::{select_confirm, select_disclosure, select_primary};

fn text_control(handle: u32, text: &str) -> ControlCandidate {
    ControlCandidate {
        handle,
        text: text.to_string(),
        visible: true,
        ..Default::default()
    }
}

fn labeled_control(handle: u32, label: &str) -> ControlCandidate {
    ControlCandidate {
        handle,
        label: Some(label.to_string()),
        visible: true,
        ..Default::default()
    }
}

#[test]
fn test_attribute_label_beats_earlier_text_match() {
    let candidates = vec![text_control(0, "Share"), labeled_control(1, "Share album")];
    let (control, probe) = select_primary(&candidates).unwrap();
    assert_eq!(control.handle, 1);
    assert_eq!(probe, "attribute-label");
}

#[test]
fn test_document_order_decides_within_one_probe() {
    let candidates = vec![labeled_control(0, "Share"), labeled_control(1, "Share")];
    let (control, _) = select_primary(&candidates).unwrap();
    assert_eq!(control.handle, 0);
}

#[test]
fn test_tooltip_counts_as_attribute_label() {
    let candidates = vec![ControlCandidate {
        handle: 7,
        tooltip: Some("Share".to_string()),
        visible: true,
        ..Default::default()
    }];
    let (control, probe) = select_primary(&candidates).unwrap();
    assert_eq!(control.handle, 7);
    assert_eq!(probe, "attribute-label");
}

#[test]
fn test_accessible_name_matches_case_insensitively() {
    let candidates = vec![ControlCandidate {
        handle: 3,
        description: Some("share".to_string()),
        visible: true,
        ..Default::default()
    }];
    let (control, probe) = select_primary(&candidates).unwrap();
    assert_eq!(control.handle, 3);
    assert_eq!(probe, "accessible-name");
}

#[test]
fn test_first_populated_field_masks_later_ones() {
    // The label is read first; a matching description behind a non-matching
    // label does not rescue the candidate.
    let candidates = vec![ControlCandidate {
        handle: 0,
        label: Some("Save".to_string()),
        description: Some("Share".to_string()),
        visible: true,
        ..Default::default()
    }];
    assert!(select_primary(&candidates).is_none());
}

#[test]
fn test_action_hint_matches_share_dispatch() {
    let candidates = vec![ControlCandidate {
        handle: 4,
        action_hint: Some("click:album.share".to_string()),
        visible: true,
        ..Default::default()
    }];
    let (control, probe) = select_primary(&candidates).unwrap();
    assert_eq!(control.handle, 4);
    assert_eq!(probe, "action-hint");
}

#[test]
fn test_action_hint_excludes_unshare_and_reshare() {
    let unshare = vec![ControlCandidate {
        action_hint: Some("click:album.unshare".to_string()),
        ..Default::default()
    }];
    let reshare = vec![ControlCandidate {
        action_hint: Some("click:album.reshare".to_string()),
        ..Default::default()
    }];
    assert!(select_primary(&unshare).is_none());
    assert!(select_primary(&reshare).is_none());
}

#[test]
fn test_visible_text_is_last_resort() {
    let candidates = vec![text_control(9, "Share album")];
    let (control, probe) = select_primary(&candidates).unwrap();
    assert_eq!(control.handle, 9);
    assert_eq!(probe, "visible-text");
}

#[test]
fn test_share_text_match_is_anchored() {
    assert!(select_primary(&[text_control(0, "share photos with friends")]).is_none());
    assert!(select_primary(&[text_control(0, "Reshare")]).is_none());
    assert!(select_primary(&[text_control(0, "SHARE ALBUM")]).is_some());
}

#[test]
fn test_disclosure_prefers_visible_over_earlier_hidden() {
    let mut hidden = text_control(0, "Get link");
    hidden.visible = false;
    let candidates = vec![hidden, text_control(1, "Create link")];
    assert_eq!(select_disclosure(&candidates).unwrap().handle, 1);
}

#[test]
fn test_disclosure_falls_back_to_first_hidden_match() {
    let mut first = text_control(0, "Turn on link sharing");
    first.visible = false;
    let mut second = text_control(1, "Get link");
    second.visible = false;
    let candidates = vec![first, second];
    assert_eq!(select_disclosure(&candidates).unwrap().handle, 0);
}

#[test]
fn test_disclosure_accepts_label_prefix() {
    let candidates = vec![text_control(2, "Get shareable link for this album")];
    assert_eq!(select_disclosure(&candidates).unwrap().handle, 2);
}

#[test]
fn test_disclosure_reads_label_when_text_is_empty() {
    let candidates = vec![labeled_control(5, "Create link")];
    assert_eq!(select_disclosure(&candidates).unwrap().handle, 5);
}

#[test]
fn test_disclosure_ignores_unrelated_controls() {
    let candidates = vec![text_control(0, "Cancel"), text_control(1, "Copy")];
    assert!(select_disclosure(&candidates).is_none());
}

#[test]
fn test_confirm_requires_visibility() {
    let mut hidden = text_control(0, "Create link");
    hidden.visible = false;
    assert!(select_confirm(&[hidden]).is_none());
}

#[test]
fn test_confirm_takes_first_visible_match() {
    let mut hidden = text_control(0, "Create link");
    hidden.visible = false;
    let candidates = vec![hidden, text_control(1, "Create link"), text_control(2, "Create link")];
    assert_eq!(select_confirm(&candidates).unwrap().handle, 1);
}
