use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

use crate::api::ApiClient;

struct Credentials {
    username: String,
    password: String,
}

fn prompt_credentials() -> Result<Credentials> {
    print!("Username: ");
    io::stdout().flush()?;
    let mut username = String::new();
    io::stdin()
        .lock()
        .read_line(&mut username)
        .context("Failed to read username")?;
    let username = username.trim().to_string();
    if username.is_empty() {
        anyhow::bail!("Username cannot be empty");
    }

    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;
    if password.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }

    Ok(Credentials { username, password })
}

/// Ask for username and password and store the token the server hands out.
pub async fn run_login(client: &ApiClient) -> Result<()> {
    let credentials = prompt_credentials()?;
    client
        .login(&credentials.username, &credentials.password)
        .await
        .context("Login failed")?;
    tracing::info!(username = %credentials.username, "signed in");
    println!("Signed in as {}.", credentials.username);
    Ok(())
}

/// Create an account and sign in with it straight away.
pub async fn run_register(client: &ApiClient) -> Result<()> {
    let credentials = prompt_credentials()?;
    let message = client
        .register(&credentials.username, &credentials.password)
        .await
        .context("Registration failed")?;
    println!("{}", message);

    client
        .login(&credentials.username, &credentials.password)
        .await
        .context("Account created, but signing in failed")?;
    tracing::info!(username = %credentials.username, "registered and signed in");
    println!("Signed in as {}.", credentials.username);
    Ok(())
}
