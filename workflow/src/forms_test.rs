use super::*;

fn field<'a>(err: &'a ApiError, name: &str) -> Option<&'a str> {
    err.field_errors().and_then(|fields| fields.get(name)).map(String::as_str)
}

#[test]
fn login_requires_both_fields() {
    let err = validate_login(" ", "").unwrap_err();
    assert_eq!(field(&err, "email"), Some("Email is required"));
    assert_eq!(field(&err, "password"), Some("Password is required"));
    let ok = validate_login(" a@b.co ", "pw").unwrap();
    assert_eq!(ok.email, "a@b.co");
}

#[test]
fn register_checks_email_and_password_length() {
    let err = validate_register("not-an-email", "amina", "short").unwrap_err();
    assert_eq!(field(&err, "email"), Some("Enter a valid email address"));
    assert_eq!(field(&err, "password"), Some("Password must be at least 8 characters long"));
    assert_eq!(field(&err, "username"), None);
    assert!(validate_register("a@b.co", "amina", "longenough").is_ok());
}

#[test]
fn room_form_reports_every_missing_field() {
    let err = RoomForm::default().validate().unwrap_err();
    assert_eq!(field(&err, "name"), Some("Room name is required"));
    assert_eq!(field(&err, "description"), Some("Description is required"));
    assert_eq!(field(&err, "service_type"), Some("Service type is required"));
    assert_eq!(field(&err, "due_date"), Some("Due date is required"));
    assert_eq!(field(&err, "cost"), Some("Valid cost is required"));
}

#[test]
fn room_form_rejects_non_positive_cost() {
    let mut form = RoomForm {
        name: "Crew".to_owned(),
        description: "Shared plan".to_owned(),
        service_type: "netflix".to_owned(),
        due_date: "2024-07-01".to_owned(),
        cost: "-5".to_owned(),
    };
    assert_eq!(field(&form.validate().unwrap_err(), "cost"), Some("Valid cost is required"));
    form.cost = "1500".to_owned();
    let request = form.validate().unwrap();
    assert_eq!(request.service_type, ServiceType::Netflix);
    assert!((request.cost - 1500.0).abs() < f64::EPSILON);
}

#[test]
fn blank_room_id_is_rejected() {
    assert_eq!(
        validate_room_id("  ").unwrap_err(),
        ApiError::invalid("room_id", "Please enter a valid room ID")
    );
    assert_eq!(validate_room_id(" abc ").unwrap(), "abc");
}

#[test]
fn new_password_must_match_and_be_long_enough() {
    assert_eq!(
        field(&validate_new_password("abcdefgh", "abcdefgx").unwrap_err(), "confirm_password"),
        Some("Passwords do not match")
    );
    assert_eq!(
        field(&validate_new_password("short", "short").unwrap_err(), "new_password"),
        Some("Password must be at least 8 characters long")
    );
    assert!(validate_new_password("abcdefgh", "abcdefgh").is_ok());
}

#[test]
fn password_change_requires_current_password() {
    let err = validate_password_change("", "abcdefgh", "abcdefgh").unwrap_err();
    assert!(field(&err, "current_password").is_some());
}

#[test]
fn phone_update_is_normalised() {
    assert_eq!(validate_phone_update("0712 345678").unwrap().phone_number, "254712345678");
    assert!(validate_phone_update("12").is_err());
}

#[test]
fn strength_scores_each_rule() {
    assert_eq!(password_strength("").label(), StrengthLabel::Weak);
    assert_eq!(password_strength("abcdefgh").score, 25);
    assert_eq!(password_strength("abcdefgH").label(), StrengthLabel::Good);
    assert_eq!(password_strength("abcdefH1").label(), StrengthLabel::Strong);
    assert_eq!(password_strength("abcdeH1!").score, 100);
    assert_eq!(password_strength("a1").label(), StrengthLabel::Fair);
}

#[test]
fn submission_allows_one_request_in_flight() {
    let mut form = Submission::default();
    assert_eq!(form.begin(Ok::<_, ApiError>(1)), Some(1));
    assert!(form.is_submitting());
    assert_eq!(form.begin(Ok::<_, ApiError>(2)), None);
    form.succeed(None, None);
    assert_eq!(form.begin(Ok::<_, ApiError>(3)), Some(3));
}

#[test]
fn validation_failure_sends_nothing() {
    let mut form = Submission::default();
    assert_eq!(form.begin(validate_room_id("")), None);
    assert!(!form.is_submitting());
    assert_eq!(form.field_error("room_id"), Some("Please enter a valid room ID"));
}

#[test]
fn server_rejection_shows_keyed_and_generic_errors() {
    let mut form = Submission::default();
    form.begin(Ok::<_, ApiError>(()));
    let err = ApiError::rejected(400, r#"{"username":["A user with that username already exists."]}"#);
    form.fail(&err, REGISTER_FAILED);
    assert!(!form.is_submitting());
    assert_eq!(
        form.field_error("username"),
        Some("A user with that username already exists.")
    );
    assert_eq!(form.error(), Some("A user with that username already exists."));
}

#[test]
fn redirect_fires_once_after_delay() {
    let mut form = Submission::default();
    form.begin(Ok::<_, ApiError>(()));
    form.succeed(Some(REGISTER_SUCCEEDED), Some(100 + REDIRECT_DELAY_MS));
    assert_eq!(form.success(), Some(REGISTER_SUCCEEDED));
    assert!(!form.redirect_due(2_099));
    assert!(form.redirect_due(2_100));
    assert!(!form.redirect_due(5_000));
}

#[test]
fn expired_session_is_not_an_inline_error() {
    let mut form = Submission::default();
    form.begin(Ok::<_, ApiError>(()));
    form.fail(&ApiError::Unauthenticated, CREATE_ROOM_FAILED);
    assert!(!form.is_submitting());
    assert_eq!(form.error(), None);

    form.begin(Ok::<_, ApiError>(()));
    form.fail(&ApiError::Cancelled, CREATE_ROOM_FAILED);
    assert_eq!(form.error(), None);
    assert_eq!(form.begin(Ok::<_, ApiError>(1)), Some(1));
}
