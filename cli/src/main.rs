//! `flixshare`: command-line client for the FlixShare backend.
//!
//! Runs the same `workflow` operations as the browser client (sign-in, rooms,
//! transactions, STK payments, password reset) against a deployment.

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

mod transport;

use std::io::{self, BufRead, Write};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use workflow::config::{API_URL_VAR, AUTH_URL_VAR, ApiConfig, PAYMENTS_URL_VAR, ROOMS_URL_VAR};
use workflow::error::UNEXPECTED_ERROR;
use workflow::forms::{RoomForm, validate_login, validate_password_change, validate_phone_update, validate_register};
use workflow::payment::{PAYMENT_FAILED, PaymentAttempt, PaymentState, SUBMIT_TIMEOUT, submit_charge};
use workflow::reset::ResetWizard;
use workflow::{ApiError, Gateway, TokenStore};

use crate::transport::ReqwestTransport;

type CliGateway = Gateway<ReqwestTransport>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not signed in; run `flixshare login` and pass --token or set FLIXSHARE_TOKEN")]
    NotAuthenticated,
    #[error("{}", .0.user_message(UNEXPECTED_ERROR))]
    Api(ApiError),
    #[error("room {0} not found among your rooms")]
    RoomNotFound(String),
    #[error("{0}")]
    Failed(String),
    #[error("password reset stopped at step `{0}`")]
    ResetIncomplete(&'static str),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        if err.is_unauthenticated() { Self::NotAuthenticated } else { Self::Api(err) }
    }
}

#[derive(Parser, Debug)]
#[command(name = "flixshare", about = "FlixShare rooms, billing, and account CLI")]
struct Cli {
    #[arg(long, env = API_URL_VAR)]
    api_url: Option<String>,

    #[arg(long, env = AUTH_URL_VAR)]
    auth_url: Option<String>,

    #[arg(long, env = ROOMS_URL_VAR)]
    rooms_url: Option<String>,

    #[arg(long, env = PAYMENTS_URL_VAR)]
    payments_url: Option<String>,

    /// Bearer token printed by `flixshare login`.
    #[arg(long, env = "FLIXSHARE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn api_config(&self) -> ApiConfig {
        ApiConfig::from_lookup(|key| {
            match key {
                API_URL_VAR => self.api_url.clone(),
                AUTH_URL_VAR => self.auth_url.clone(),
                ROOMS_URL_VAR => self.rooms_url.clone(),
                PAYMENTS_URL_VAR => self.payments_url.clone(),
                _ => None,
            }
        })
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and print the bearer token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FLIXSHARE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long, env = "FLIXSHARE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Show the identity behind the token.
    Whoami,
    Rooms(RoomsCommand),
    /// List M-Pesa transactions, newest first.
    Transactions,
    /// Pay your share of a room by STK push.
    Pay(PayArgs),
    /// Reset a forgotten password; the emailed code is read from stdin.
    Reset {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FLIXSHARE_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
    },
    Profile(ProfileCommand),
}

#[derive(Args, Debug)]
struct RoomsCommand {
    #[command(subcommand)]
    command: RoomsSubcommand,
}

#[derive(Subcommand, Debug)]
enum RoomsSubcommand {
    List,
    Show {
        room_id: String,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        /// netflix, spotify, disney+, hbomax, youtube, or appletv.
        #[arg(long)]
        service: String,
        /// YYYY-MM-DD.
        #[arg(long)]
        due_date: String,
        #[arg(long)]
        cost: String,
    },
    Join {
        room_id: String,
    },
    Leave {
        room_id: String,
    },
    Delete {
        room_id: String,
    },
    RemoveMember {
        room_id: String,
        user_id: String,
    },
}

#[derive(Args, Debug)]
struct PayArgs {
    room_id: String,

    /// Defaults to the number saved on your profile.
    #[arg(long)]
    phone: Option<String>,

    #[arg(long, default_value_t = SUBMIT_TIMEOUT.as_secs())]
    timeout_secs: u64,
}

#[derive(Args, Debug)]
struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProfileSubcommand {
    Phone {
        phone: String,
    },
    Password {
        #[arg(long, env = "FLIXSHARE_PASSWORD", hide_env_values = true)]
        current: String,
        #[arg(long, env = "FLIXSHARE_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let tokens = TokenStore::in_memory();
    if let Some(token) = cli.token.as_deref().filter(|token| !token.trim().is_empty()) {
        tokens.set(token.trim());
    }
    let gateway = Gateway::new(ReqwestTransport::new(SUBMIT_TIMEOUT)?, tokens, cli.api_config());

    match cli.command {
        Command::Login { email, password } => run_login(&gateway, &email, &password).await,
        Command::Register {
            email,
            username,
            password,
        } => run_register(&gateway, &email, &username, &password).await,
        Command::Whoami => print_json(&gateway.verify_session().await?),
        Command::Rooms(rooms) => run_rooms(&gateway, rooms.command).await,
        Command::Transactions => {
            let mut transactions = gateway.transactions().await?;
            transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            print_json(&transactions)
        }
        Command::Pay(args) => run_pay(&gateway, args).await,
        Command::Reset { email, new_password } => run_reset(&gateway, &email, &new_password).await,
        Command::Profile(profile) => run_profile(&gateway, profile.command).await,
    }
}

async fn run_login(gateway: &CliGateway, email: &str, password: &str) -> Result<(), CliError> {
    let request = validate_login(email, password)?;
    let response = gateway.login(&request.email, &request.password).await?;
    tracing::info!(email = %request.email, "signed in");
    println!("{}", response.token);
    Ok(())
}

async fn run_register(gateway: &CliGateway, email: &str, username: &str, password: &str) -> Result<(), CliError> {
    let request = validate_register(email, username, password)?;
    let ack = gateway.register(&request).await?;
    print_ack(ack.message, "Registration successful");
    Ok(())
}

async fn run_rooms(gateway: &CliGateway, command: RoomsSubcommand) -> Result<(), CliError> {
    match command {
        RoomsSubcommand::List => print_json(&gateway.list_rooms().await?),
        RoomsSubcommand::Show { room_id } => print_json(&gateway.room_detail(&room_id).await?),
        RoomsSubcommand::Create {
            name,
            description,
            service,
            due_date,
            cost,
        } => {
            let form = RoomForm {
                name,
                description,
                service_type: service,
                due_date,
                cost,
            };
            let request = form.validate()?;
            print_json(&gateway.create_room(&request).await?)
        }
        RoomsSubcommand::Join { room_id } => {
            print_ack(gateway.join_room(&room_id).await?.message, "Joined room");
            Ok(())
        }
        RoomsSubcommand::Leave { room_id } => {
            print_ack(gateway.leave_room(&room_id).await?.message, "Left room");
            Ok(())
        }
        RoomsSubcommand::Delete { room_id } => {
            print_ack(gateway.delete_room(&room_id).await?.message, "Room deleted");
            Ok(())
        }
        RoomsSubcommand::RemoveMember { room_id, user_id } => {
            print_ack(gateway.remove_member(&room_id, &user_id).await?.message, "Member removed");
            Ok(())
        }
    }
}

async fn run_pay(gateway: &CliGateway, args: PayArgs) -> Result<(), CliError> {
    let phone = match args.phone {
        Some(phone) => phone,
        None => gateway.verify_session().await?.phone_number.unwrap_or_default(),
    };
    let room = gateway
        .list_rooms()
        .await?
        .into_iter()
        .find(|room| room.id == args.room_id)
        .ok_or_else(|| CliError::RoomNotFound(args.room_id.clone()))?;

    let mut attempt = PaymentAttempt::with_phone(&phone);
    attempt.select_room(room)?;
    let request = attempt.begin_submit(now_ms())?;
    println!("Requesting KES {} from {} for room {}...", request.amount, request.phone, request.room);

    let deadline = tokio::time::sleep(Duration::from_secs(args.timeout_secs));
    let result = submit_charge(gateway, &request, deadline).await;
    if matches!(result, Err(ApiError::Unauthenticated)) {
        return Err(CliError::NotAuthenticated);
    }
    attempt.resolve(result, now_ms());
    match attempt.state() {
        PaymentState::Success {
            checkout_request_id, ..
        } => {
            println!("{}", workflow::payment::PAYMENT_SENT);
            if let Some(id) = checkout_request_id {
                println!("Checkout request: {id}");
            }
            Ok(())
        }
        PaymentState::Failed { message, .. } => Err(CliError::Failed(message.clone())),
        PaymentState::Idle | PaymentState::Processing { .. } => Err(CliError::Failed(PAYMENT_FAILED.to_owned())),
    }
}

async fn run_reset(gateway: &CliGateway, email: &str, new_password: &str) -> Result<(), CliError> {
    let mut wizard = ResetWizard::default();

    let Some(address) = wizard.request_otp(email) else {
        return Err(wizard_error(&wizard));
    };
    let sent = gateway.send_reset_otp(&address).await.map(|_| ());
    finish_step(&mut wizard, sent)?;

    let code = prompt("OTP: ")?;
    let Some((address, code)) = wizard.verify_otp(&code) else {
        return Err(wizard_error(&wizard));
    };
    let verified = gateway.verify_reset_otp(&address, &code).await.map(|_| ());
    finish_step(&mut wizard, verified)?;

    let Some(request) = wizard.set_password(new_password, new_password) else {
        return Err(wizard_error(&wizard));
    };
    let reset = gateway.reset_password(&request).await.map(|_| ());
    finish_step(&mut wizard, reset)?;
    Ok(())
}

/// Apply a step outcome and echo the wizard's message.
fn finish_step(wizard: &mut ResetWizard, result: Result<(), ApiError>) -> Result<(), CliError> {
    let before = wizard.step();
    wizard.complete(result, now_ms());
    if wizard.step() == before {
        return Err(wizard_error(wizard));
    }
    if let Some(message) = wizard.form().success() {
        println!("{message}");
    }
    Ok(())
}

fn wizard_error(wizard: &ResetWizard) -> CliError {
    let form = wizard.form();
    let field = ["email", "otp", "new_password", "confirm_password"]
        .into_iter()
        .find_map(|field| form.field_error(field));
    match form.error().or(field) {
        Some(message) => CliError::Failed(message.to_owned()),
        None => CliError::ResetIncomplete(wizard.step().title()),
    }
}

async fn run_profile(gateway: &CliGateway, command: ProfileSubcommand) -> Result<(), CliError> {
    match command {
        ProfileSubcommand::Phone { phone } => {
            let request = validate_phone_update(&phone)?;
            let ack = gateway.update_phone(&request.phone_number).await?;
            print_ack(ack.message, workflow::forms::PHONE_UPDATED);
        }
        ProfileSubcommand::Password { current, new_password } => {
            let request = validate_password_change(&current, &new_password, &new_password)?;
            let ack = gateway.update_password(&request).await?;
            print_ack(ack.message, workflow::forms::PASSWORD_UPDATED);
        }
    }
    Ok(())
}

fn prompt(label: &str) -> Result<String, CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(label.as_bytes())?;
    stdout.flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_owned())
}

fn print_ack(message: Option<String>, fallback: &str) {
    println!("{}", message.unwrap_or_else(|| fallback.to_owned()));
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

fn now_ms() -> u64 {
    let Ok(duration) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    u64::try_from(duration.as_millis()).unwrap_or(0)
}
