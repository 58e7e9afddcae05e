//! Session commands: login, register, logout, whoami.

use anyhow::{bail, Result};
use dialoguer::{Input, Password};
use qkart_auth::{LoginForm, RegistrationForm};

use super::{LoginArgs, RegisterArgs};
use crate::context::Context;

/// Run the login command.
pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let username = match args.username {
        Some(username) => username,
        None => prompt_username()?,
    };
    let password = match args.password {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let spinner = ctx.output.spinner("Logging in...");
    let session = ctx
        .auth_page()
        .login(&LoginForm::new(username, password))
        .await;
    spinner.finish_and_clear();

    let Some(session) = session else {
        bail!("Login failed");
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "username": session.username(),
            "balance": session.balance().to_decimal(),
        }));
        return Ok(());
    }

    ctx.output.kv("User", session.username());
    ctx.output.kv("Wallet", &ctx.output.money(&session.balance()));
    ctx.output.debug(&format!("Session saved to {}", ctx.session_file().display()));
    Ok(())
}

/// Run the register command.
pub async fn register(args: RegisterArgs, ctx: &Context) -> Result<()> {
    let username = match args.username {
        Some(username) => username,
        None => prompt_username()?,
    };
    let (password, confirm) = match args.password {
        Some(password) => (password.clone(), password),
        None => {
            let password = Password::new().with_prompt("Password").interact()?;
            let confirm = Password::new().with_prompt("Confirm password").interact()?;
            (password, confirm)
        }
    };

    let spinner = ctx.output.spinner("Creating account...");
    let registered = ctx
        .auth_page()
        .register(&RegistrationForm::new(username.clone(), password, confirm))
        .await;
    spinner.finish_and_clear();

    if !registered {
        bail!("Registration failed");
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "username": username }));
    } else {
        ctx.output
            .info(&format!("Log in with `qkart login --username {}`", username));
    }
    Ok(())
}

/// Run the logout command.
pub async fn logout(ctx: &Context) -> Result<()> {
    let was_logged_in = ctx.session()?.is_some();
    ctx.auth_page().logout()?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "logged_out": was_logged_in }));
    } else if was_logged_in {
        ctx.output.success("Logged out");
    } else {
        ctx.output.info("Not logged in");
    }
    Ok(())
}

/// Run the whoami command.
pub async fn whoami(ctx: &Context) -> Result<()> {
    let session = ctx.require_session()?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "username": session.username(),
            "balance": session.balance().to_decimal(),
        }));
        return Ok(());
    }

    ctx.output.kv("User", session.username());
    ctx.output.kv("Wallet", &ctx.output.money(&session.balance()));
    Ok(())
}

fn prompt_username() -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt("Username")
        .interact_text()?)
}
