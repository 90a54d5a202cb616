//! Users admin screen.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use sporta_core::models::{User, UserForm};
use sporta_core::{Role, Route};

use crate::commands::{Env, ListArgs, load_page};
use crate::output;

#[derive(Args, Debug)]
pub struct UsersCommand {
    #[command(subcommand)]
    pub command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UsersSubcommand {
    /// List accounts
    List(ListUsersArgs),

    /// Create an account
    Create(UserFormArgs),

    /// Update an account
    Update {
        id: u64,

        #[command(flatten)]
        form: UserFormArgs,
    },

    /// Delete an account
    Delete { id: u64 },
}

#[derive(Args, Debug)]
pub struct ListUsersArgs {
    /// Only accounts with this role
    #[arg(long)]
    pub role: Option<String>,

    /// Only active (true) or inactive (false) accounts
    #[arg(long)]
    pub active: Option<String>,

    #[command(flatten)]
    pub list: ListArgs,
}

#[derive(Args, Debug)]
pub struct UserFormArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub email: String,

    #[arg(long, default_value = "user")]
    pub role: Role,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    /// Deactivate the account
    #[arg(long)]
    pub inactive: bool,
}

impl UserFormArgs {
    fn into_form(self) -> UserForm {
        UserForm {
            username: self.username,
            email: self.email,
            role: self.role,
            phone_number: self.phone,
            password: self.password,
            is_active: Some(!self.inactive),
        }
    }
}

fn user_line(user: &User) -> String {
    let state = if user.is_active {
        "active".green()
    } else {
        "inactive".dimmed()
    };
    format!(
        "{:>5}  {}  {}  {}  {}",
        user.id,
        user.username.bold(),
        user.email,
        user.role.label(),
        state
    )
}

pub async fn handle(env: &Env, cmd: UsersCommand) -> Result<()> {
    let backend = env.guarded(Route::AdminUsers)?;

    match cmd.command {
        UsersSubcommand::List(args) => {
            let query = args.list.query(&[
                ("role", args.role.as_ref()),
                ("active", args.active.as_ref()),
            ]);
            let snapshot = load_page(backend.admin_users(), &args.list, query).await;
            output::rows(&snapshot, args.list.json, user_line)?;
        }
        UsersSubcommand::Create(args) => {
            let user = backend
                .create_user(args.into_form())
                .await
                .context("Failed to create user")?;
            output::success("User created");
            println!("{}", user_line(&user));
        }
        UsersSubcommand::Update { id, form } => {
            let user = backend
                .update_user(id, form.into_form())
                .await
                .context("Failed to update user")?;
            output::success("User updated");
            println!("{}", user_line(&user));
        }
        UsersSubcommand::Delete { id } => {
            backend
                .delete_user(id)
                .await
                .context("Failed to delete user")?;
            output::success(&format!("User {id} deleted"));
        }
    }
    Ok(())
}
