//! `login`, `logout`, and `theme` commands.

use dialoguer::{Input, Password, Select};
use emergency_alert_session::{Credentials, Role, ThemeMode};

use crate::context::Context;

/// Logs in, prompting for anything not given on the command line.
pub fn login(
    ctx: &mut Context,
    role: Option<Role>,
    user_id: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let theme = ctx.prompt_theme();

    println!("Select your role and login to access the system");
    println!("For demo: Admin access (ID: admin / Password: admin123)");
    println!();

    let role = match role {
        Some(role) => role,
        None => {
            let labels: Vec<&str> = Role::all().iter().map(|r| r.label()).collect();
            let idx = Select::with_theme(theme.as_ref())
                .with_prompt("Role")
                .items(&labels)
                .default(0)
                .interact()?;
            Role::all()[idx]
        }
    };
    let user_id = match user_id {
        Some(user_id) => user_id,
        None => Input::with_theme(theme.as_ref())
            .with_prompt("User ID")
            .allow_empty(true)
            .interact_text()?,
    };
    let password = Password::with_theme(theme.as_ref())
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()?;

    let route = emergency_alert_session::login(
        &mut ctx.store,
        &ctx.config.admin_credentials(),
        &Credentials {
            role: Some(role),
            user_id,
            password,
        },
    )?;

    println!("Logged in as {}. Continue at {route}", role.label());
    Ok(())
}

pub fn logout(ctx: &mut Context) -> Result<(), Box<dyn std::error::Error>> {
    emergency_alert_session::logout(&mut ctx.store)?;
    println!("Logged out.");
    Ok(())
}

/// Switches to `mode`, or toggles, and remembers the choice.
pub fn theme(ctx: &mut Context, mode: Option<ThemeMode>) -> Result<(), Box<dyn std::error::Error>> {
    let next = mode.unwrap_or_else(|| ctx.theme.toggle());
    next.save(&mut ctx.store)?;
    ctx.theme = next;
    println!("Theme: {next}");
    Ok(())
}
