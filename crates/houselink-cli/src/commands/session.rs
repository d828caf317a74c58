use anyhow::{Context, Result};

use houselink_core::services::AuthService;
use houselink_core::utils::format_date;
use houselink_core::Config;

use crate::app::App;

pub async fn login(app: &mut App, email: Option<String>) -> Result<()> {
    let email = email
        .or_else(|| app.config.last_email.clone())
        .context("Email is required for the first login")?;
    let password = rpassword::prompt_password(format!("Password for {}: ", email))
        .context("Failed to read password")?;

    let data = AuthService::new(app.api()).login(&email, &password).await?;
    println!("Signed in as {} ({:?})", data.user.name, data.user.role);

    app.session.update(data);
    app.session.save()?;
    app.sync_session();

    Config::remember_email(&email)?;
    app.config.last_email = Some(email);
    Ok(())
}

pub fn logout(app: &mut App) -> Result<()> {
    app.session.clear()?;
    app.sync_session();
    println!("Signed out");
    Ok(())
}

pub async fn whoami(app: &mut App, refresh: bool) -> Result<()> {
    app.require_session()?;
    if refresh {
        let user = AuthService::new(app.api()).me().await?;
        app.session.refresh_user(user);
        app.session.save()?;
    }

    if let Some(user) = app.session.user() {
        println!("{} <{}>", user.name, user.email);
        println!("Role:    {:?}", user.role);
        if let Some(ref location) = user.location {
            println!("Address: {}", location.summary());
        }
        if let Some(ref created) = user.created_at {
            println!("Joined:  {}", format_date(created));
        }
    }
    Ok(())
}

pub fn status(app: &App) -> Result<()> {
    match app.session.data {
        Some(ref data) if !data.is_expired() => println!(
            "Session: {} (expires in {} min)",
            data.user.email,
            data.minutes_until_expiry()
        ),
        _ => println!("Session: not signed in"),
    }
    println!("Backend: {}", app.config.api_base_url);
    println!("Locale:  {}", app.config.locale);

    let ages = app.cache.ages();
    let never = "never".to_string();
    println!("Cached areas:    {}", ages.location_areas.as_ref().unwrap_or(&never));
    println!("Cached settings: {}", ages.settings.as_ref().unwrap_or(&never));
    Ok(())
}
