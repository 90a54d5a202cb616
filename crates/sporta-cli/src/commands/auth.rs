//! Login, logout, whoami, refresh and register.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use sporta_core::models::Registration;
use sporta_core::{Credentials, Role, guard};

use super::Env;
use crate::output;
use crate::session::{StoredSession, storage};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account username
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,

    /// Account type: user or venue-manager
    #[arg(long, default_value = "user")]
    pub role: Role,

    #[arg(long)]
    pub phone: Option<String>,
}

pub async fn login(env: &Env, args: LoginArgs) -> Result<()> {
    let credentials = Credentials::new(&args.username, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    let login = env
        .anonymous()
        .login(&credentials)
        .await
        .context("Failed to login")?;

    let stored = StoredSession {
        api: env.api().to_string(),
        username: login.session.username().unwrap_or(&args.username).to_string(),
        role: login.profile.role.as_str().to_string(),
        access_token: login
            .session
            .access_token()
            .map(|t| t.as_str().to_string())
            .unwrap_or_default(),
        refresh_token: Some(login.refresh_token.as_str().to_string()),
    };
    storage::save_session(&stored).context("Failed to save session")?;

    output::success("Logged in successfully");
    println!();
    output::field("User", &stored.username);
    output::field("Role", login.session.role().label());
    output::field("API", &stored.api);

    Ok(())
}

pub fn logout() -> Result<()> {
    if storage::clear_session().context("Failed to clear session")? {
        output::success("Logged out");
    } else {
        eprintln!("{}", "No active session.".dimmed());
    }
    Ok(())
}

pub fn whoami(env: &Env) -> Result<()> {
    let stored = storage::load_session()
        .context("Failed to load session")?
        .context("No active session. Run 'sporta login' first.")?;
    let context = stored.context();

    output::field("User", &stored.username);
    output::field("Role", context.role().label());
    output::field("API", &stored.api);
    if stored.api.trim_end_matches('/') != env.api().as_str().trim_end_matches('/') {
        eprintln!(
            "{}",
            format!("Session was created against {}", stored.api).yellow()
        );
    }

    let menu = guard::admin_menu(context.role());
    if !menu.is_empty() {
        let paths: Vec<String> = menu.iter().map(|route| route.path()).collect();
        output::field("Admin", &paths.join(", "));
    }

    Ok(())
}

pub async fn refresh(env: &Env) -> Result<()> {
    let mut stored = storage::load_session()
        .context("Failed to load session")?
        .context("No active session. Run 'sporta login' first.")?;
    let refresh_token = stored
        .refresh_token()
        .context("Session has no refresh token. Run 'sporta login' again.")?;

    eprintln!("{}", "Refreshing session...".dimmed());

    let (access, rotated) = env
        .anonymous()
        .refresh(&refresh_token)
        .await
        .context("Failed to refresh session")?;

    stored.access_token = access.as_str().to_string();
    if let Some(rotated) = rotated {
        stored.refresh_token = Some(rotated.as_str().to_string());
    }
    storage::save_session(&stored).context("Failed to save refreshed session")?;

    output::success("Session refreshed successfully");
    output::field("User", &stored.username);

    Ok(())
}

pub async fn register(env: &Env, args: RegisterArgs) -> Result<()> {
    let registration = Registration {
        username: args.username,
        password: args.password,
        email: args.email,
        role: args.role,
        phone_number: args.phone,
    };
    let username = registration.username.clone();

    env.anonymous()
        .register(registration)
        .await
        .context("Failed to register")?;

    output::success("Account created");
    output::field("User", username.trim());
    eprintln!("{}", "Run 'sporta login' to sign in.".dimmed());

    Ok(())
}
