//! Bottlescout signup CLI - entry point.
//!
//! `signup-cli` walks through the registration workflow end to end;
//! `signup-cli forgot` submits a password-reset request instead.

mod config;
mod prompt;

use auth_client::AuthClient;
use config::Config;
use draft_store::SessionStore;
use prompt::Prompt;
use registration_flow::{Field, FieldValue, RegistrationController, REDIRECT_DELAY};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting bottlescout signup CLI");

    if let Err(e) = run(config).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    let client = AuthClient::new(&config.auth.base_url, config.auth.timeout)?;

    match std::env::args().nth(1).as_deref() {
        Some("forgot") => forgot_password(client).await,
        _ => register(client, &config).await,
    }
}

/// Submit a password-reset request for an existing account.
async fn forgot_password(client: AuthClient) -> anyhow::Result<()> {
    let mut prompt = Prompt::new();
    let email = prompt.line("Account email").await?;

    match client.forgot_password(&email).await {
        Ok(()) => {
            println!("If that account exists, a reset mail is on its way.");
            Ok(())
        }
        Err(e) => anyhow::bail!("password reset request failed: {}", e),
    }
}

/// Walk through the registration workflow.
async fn register(client: AuthClient, config: &Config) -> anyhow::Result<()> {
    let store = Arc::new(SessionStore::new(config.session.ttl));
    let mut controller = RegistrationController::new(client, store);

    controller.restore_draft().await;
    show_notice(&controller);

    let mut prompt = Prompt::new();

    collect_text(&mut controller, &mut prompt, Field::Name, "Name").await?;
    collect_text(&mut controller, &mut prompt, Field::Email, "Email").await?;
    collect_text(&mut controller, &mut prompt, Field::Password, "Password").await?;
    collect_text(
        &mut controller,
        &mut prompt,
        Field::ConfirmPassword,
        "Confirm password",
    )
    .await?;

    verify_phone(&mut controller, &mut prompt).await?;

    let terms = prompt.confirm("Agree to the terms of service").await?;
    controller
        .update_field(Field::AgreeTerms, FieldValue::Flag(terms))
        .await;

    let privacy = prompt.confirm("Agree to the privacy policy").await?;
    controller
        .update_field(Field::AgreePrivacy, FieldValue::Flag(privacy))
        .await;

    let marketing = prompt.confirm("Receive marketing mail (optional)").await?;
    controller
        .update_field(Field::AgreeMarketing, FieldValue::Flag(marketing))
        .await;

    controller.submit().await;

    if controller.completed() {
        show_notice(&controller);
        tokio::time::sleep(REDIRECT_DELAY).await;
        println!("You can now sign in at {}/login", config.auth.base_url);
        return Ok(());
    }

    for (field, message) in controller.errors().iter() {
        println!("  ! {}: {}", field, message);
    }
    anyhow::bail!("registration was not accepted")
}

/// Prompt for one text field and store it.
async fn collect_text(
    controller: &mut RegistrationController,
    prompt: &mut Prompt,
    field: Field,
    label: &str,
) -> anyhow::Result<()> {
    let value = prompt.line(label).await?;
    controller.update_field(field, FieldValue::Text(value)).await;
    Ok(())
}

/// Run the phone-verification sub-flow until the number is verified.
async fn verify_phone(
    controller: &mut RegistrationController,
    prompt: &mut Prompt,
) -> anyhow::Result<()> {
    loop {
        let phone = prompt.line("Mobile number (010-0000-0000)").await?;
        controller
            .update_field(Field::Phone, FieldValue::Text(phone))
            .await;

        controller.send_verification().await;
        match controller.errors().get(Field::Phone) {
            Some(message) => println!("  ! {}", message),
            None => break,
        }
    }
    show_notice(controller);

    while !controller.verification().await.is_verified {
        if !controller.verification().await.code_entry_open() {
            println!("The code expired. Requesting a new one.");
            controller.send_verification().await;
            if let Some(message) = controller.errors().get(Field::Phone) {
                anyhow::bail!("could not resend verification code: {}", message);
            }
            continue;
        }

        let code = prompt.line("Verification code").await?;
        controller.set_verification_code(code).await;
        controller.verify_code().await;

        if let Some(message) = controller.errors().get(Field::VerificationCode) {
            println!("  ! {}", message);
        }
    }
    show_notice(controller);

    Ok(())
}

fn show_notice(controller: &RegistrationController) {
    if let Some(notice) = controller.notice() {
        println!("{}", notice);
    }
}
