use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::test_support::gateway;

fn at_verify() -> ResetWizard {
    let mut wizard = ResetWizard::default();
    wizard.request_otp("a@b.co").unwrap();
    wizard.complete(Ok(()), 0);
    wizard
}

#[test]
fn steps_advance_in_order_on_success() {
    let mut wizard = at_verify();
    assert_eq!(wizard.step(), ResetStep::VerifyOtp);
    assert_eq!(wizard.form().success(), Some("OTP sent to your email address"));

    assert_eq!(
        wizard.verify_otp(" 123456 "),
        Some(("a@b.co".to_owned(), "123456".to_owned()))
    );
    wizard.complete(Ok(()), 0);
    assert_eq!(wizard.step(), ResetStep::SetNewPassword);

    let request = wizard.set_password("newpassword", "newpassword").unwrap();
    assert_eq!(request.otp, "123456");
    wizard.complete(Ok(()), 1_000);
    assert_eq!(wizard.step(), ResetStep::Done);
    assert!(!wizard.redirect_due(2_999));
    assert!(wizard.redirect_due(3_000));
}

#[test]
fn verify_before_send_is_unreachable() {
    let mut wizard = ResetWizard::default();
    assert_eq!(wizard.verify_otp("123456"), None);
    assert_eq!(wizard.set_password("newpassword", "newpassword"), None);
    assert_eq!(wizard.resend_otp(), None);
    assert_eq!(wizard.step(), ResetStep::RequestOtp);
}

#[test]
fn failed_send_stays_on_first_step() {
    let mut wizard = ResetWizard::default();
    wizard.request_otp("a@b.co").unwrap();
    wizard.complete(Err(ApiError::rejected(404, r#"{"error":"User not found"}"#)), 0);
    assert_eq!(wizard.step(), ResetStep::RequestOtp);
    assert_eq!(wizard.form().error(), Some("User not found"));
}

#[test]
fn resend_keeps_step() {
    let mut wizard = at_verify();
    assert_eq!(wizard.resend_otp().as_deref(), Some("a@b.co"));
    wizard.complete(Ok(()), 0);
    assert_eq!(wizard.step(), ResetStep::VerifyOtp);
    assert_eq!(wizard.form().success(), Some("OTP resent to your email address"));
}

#[test]
fn wrong_otp_does_not_advance() {
    let mut wizard = at_verify();
    wizard.verify_otp("000000").unwrap();
    wizard.complete(Err(ApiError::rejected(400, "{}")), 0);
    assert_eq!(wizard.step(), ResetStep::VerifyOtp);
    assert_eq!(wizard.form().error(), Some("Invalid OTP"));
}

#[test]
fn mismatched_passwords_block_reset() {
    let mut wizard = at_verify();
    wizard.verify_otp("123456").unwrap();
    wizard.complete(Ok(()), 0);
    assert_eq!(wizard.set_password("newpassword", "newpassw0rd"), None);
    assert_eq!(wizard.form().field_error("confirm_password"), Some("Passwords do not match"));
    assert_eq!(wizard.step(), ResetStep::SetNewPassword);
}

#[test]
fn second_request_while_pending_is_refused() {
    let mut wizard = ResetWizard::default();
    wizard.request_otp("a@b.co").unwrap();
    assert_eq!(wizard.request_otp("a@b.co"), None);
}

#[test]
fn invalid_email_sends_nothing() {
    let mut wizard = ResetWizard::default();
    assert_eq!(wizard.request_otp("nobody"), None);
    assert_eq!(wizard.form().field_error("email"), Some("Enter a valid email address"));
}

#[test]
fn wizard_drives_gateway_calls() {
    let (gateway, mock) = gateway();
    mock.respond(200, json!({ "message": "OTP sent" }));
    let mut wizard = ResetWizard::default();
    let email = wizard.request_otp("a@b.co").unwrap();
    let result = block_on(gateway.send_reset_otp(&email)).map(|_| ());
    wizard.complete(result, 0);
    assert_eq!(wizard.step(), ResetStep::VerifyOtp);
    assert_eq!(mock.last_request().unwrap().body, Some(json!({ "email": "a@b.co" })));
}
