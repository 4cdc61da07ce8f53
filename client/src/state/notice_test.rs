use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut notices = NoticeState::default();
    let a = notices.success("Joined room");
    let b = notices.error("Failed to leave room");
    assert!(b > a);
    assert_eq!(notices.items.len(), 2);
}

#[test]
fn dismiss_removes_only_that_notice() {
    let mut notices = NoticeState::default();
    let a = notices.success("one");
    notices.success("two");
    notices.dismiss(a);
    assert_eq!(notices.items.len(), 1);
    assert_eq!(notices.items[0].message, "two");
}

#[test]
fn identical_notices_collapse() {
    let mut notices = NoticeState::default();
    notices.error("Failed to fetch rooms");
    let latest = notices.error("Failed to fetch rooms");
    assert_eq!(notices.items.len(), 1);
    assert_eq!(notices.items[0].id, latest);
}

#[test]
fn kinds_map_to_modifier_classes() {
    assert_eq!(NoticeKind::Error.class(), "notice notice--error");
}
