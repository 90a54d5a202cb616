//! Contact support and password recovery.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use sporta_core::Route;
use sporta_core::models::{
    ContactKind, ContactMessage, PasswordReset, PasswordResetRequest, Priority,
};

use super::Env;
use crate::output;

#[derive(Args, Debug)]
pub struct ContactArgs {
    #[arg(long)]
    pub subject: String,

    #[arg(long)]
    pub message: String,

    /// bug, payment, venue, account or other
    #[arg(long = "type", default_value = "bug")]
    pub kind: ContactKind,

    /// low, medium or high
    #[arg(long, default_value = "medium")]
    pub priority: Priority,
}

#[derive(Args, Debug)]
pub struct ForgotPasswordArgs {
    #[arg(long)]
    pub email: String,
}

#[derive(Args, Debug)]
pub struct ResetPasswordArgs {
    #[arg(long)]
    pub email: String,

    /// Code from the reset email
    #[arg(long)]
    pub code: String,

    #[arg(long)]
    pub new_password: String,
}

pub async fn contact(env: &Env, args: ContactArgs) -> Result<()> {
    let backend = env.guarded(Route::ContactSupport)?;

    let message = ContactMessage {
        subject: args.subject,
        kind: args.kind,
        priority: args.priority,
        message: args.message,
    };
    backend
        .contact_support(message)
        .await
        .context("Failed to send request")?;

    output::success("Your request has been sent to support");
    Ok(())
}

pub async fn forgot_password(env: &Env, args: ForgotPasswordArgs) -> Result<()> {
    let message = env
        .anonymous()
        .forgot_password(PasswordResetRequest::new(args.email))
        .await
        .context("Failed to request a reset code")?;

    if message.is_empty() {
        output::success("If an account exists, a reset code will be sent to your email.");
    } else {
        output::success(&message);
    }
    eprintln!("{}", "Run 'sporta reset-password' with the code.".dimmed());
    Ok(())
}

pub async fn reset_password(env: &Env, args: ResetPasswordArgs) -> Result<()> {
    let reset = PasswordReset {
        email: args.email,
        code: args.code,
        new_password: args.new_password,
    };
    env.anonymous()
        .reset_password(reset)
        .await
        .context("Failed to reset password")?;

    output::success("Password updated");
    eprintln!("{}", "Run 'sporta login' to sign in.".dimmed());
    Ok(())
}
