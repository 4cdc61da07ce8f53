use super::*;

#[test]
fn amounts_group_thousands() {
    assert_eq!(format_amount(1500.0), "KES 1,500");
    assert_eq!(format_amount(1_234_567.0), "KES 1,234,567");
    assert_eq!(format_amount(300.0), "KES 300");
}

#[test]
fn whole_amounts_match_decimal_formatting() {
    assert_eq!(format_whole(1500), format_amount(1500.0));
    assert_eq!(format_whole(0), "KES 0");
}

#[test]
fn fractional_amounts_keep_cents() {
    assert_eq!(format_amount(333.5), "KES 333.50");
    assert_eq!(format_amount(0.05), "KES 0.05");
}

#[test]
fn negative_amounts_are_signed() {
    assert_eq!(format_amount(-1200.0), "KES -1,200");
}

#[test]
fn dates_drop_time_component() {
    assert_eq!(format_date("2024-03-01T10:00:00Z"), "2024-03-01");
    assert_eq!(format_date("2024-03-01 10:00"), "2024-03-01");
    assert_eq!(format_date("2024-03-01"), "2024-03-01");
}

#[test]
fn phone_mask_keeps_last_digits() {
    assert_eq!(mask_phone("254712345678"), "•••••••••678");
    assert_eq!(mask_phone("12"), "12");
}
