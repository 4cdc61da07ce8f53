use clap::Parser;

use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("flixshare").chain(args.iter().copied())).unwrap()
}

#[test]
fn service_urls_fall_back_to_api_url() {
    let cli = parse(&[
        "--api-url",
        "https://api.example.com/",
        "--payments-url",
        "https://pay.example.com",
        "whoami",
    ]);
    let config = cli.api_config();
    assert_eq!(config.auth_url, "https://api.example.com");
    assert_eq!(config.rooms_url, "https://api.example.com");
    assert_eq!(config.payments_url, "https://pay.example.com");
}

#[test]
fn pay_defaults_to_submit_timeout() {
    let cli = parse(&["pay", "r1", "--phone", "0712345678"]);
    let Command::Pay(args) = cli.command else {
        panic!("expected pay");
    };
    assert_eq!(args.room_id, "r1");
    assert_eq!(args.phone.as_deref(), Some("0712345678"));
    assert_eq!(args.timeout_secs, 30);
}

#[test]
fn remove_member_takes_room_and_user() {
    let cli = parse(&["rooms", "remove-member", "r1", "u2"]);
    let Command::Rooms(RoomsCommand {
        command: RoomsSubcommand::RemoveMember { room_id, user_id },
    }) = cli.command
    else {
        panic!("expected rooms remove-member");
    };
    assert_eq!((room_id.as_str(), user_id.as_str()), ("r1", "u2"));
}

#[test]
fn unauthenticated_maps_to_sign_in_hint() {
    assert!(matches!(CliError::from(ApiError::Unauthenticated), CliError::NotAuthenticated));
    let rejected = CliError::from(ApiError::rejected(400, r#"{"error":"Room is full"}"#));
    assert_eq!(rejected.to_string(), "Room is full");
}

#[test]
fn failed_reset_step_reports_server_message() {
    let mut wizard = ResetWizard::default();
    wizard.request_otp("a@b.co").unwrap();
    let err = finish_step(&mut wizard, Err(ApiError::rejected(404, r#"{"error":"User not found"}"#))).unwrap_err();
    assert_eq!(err.to_string(), "User not found");
}

#[test]
fn reset_step_success_advances() {
    let mut wizard = ResetWizard::default();
    wizard.request_otp("a@b.co").unwrap();
    finish_step(&mut wizard, Ok(())).unwrap();
    assert_eq!(wizard.step(), workflow::reset::ResetStep::VerifyOtp);
}

#[test]
fn invalid_email_surfaces_field_message() {
    let mut wizard = ResetWizard::default();
    assert!(wizard.request_otp("nobody").is_none());
    assert_eq!(wizard_error(&wizard).to_string(), "Enter a valid email address");
}
