//! One-time helper that logs the bot account in and prints a long-lived
//! access token for `MATRIX_TOKEN`.

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use github_matrix_notifier::matrix::{format_expiry, LoginClient, LoginError};

#[derive(Debug, Parser)]
#[command(name = "matrix-login", version, about = "Obtain a Matrix access token for the webhook bot")]
struct Args {
    /// Homeserver base URL
    #[arg(long, env = "MATRIX_HOMESERVER", default_value = "https://matrix.org")]
    homeserver: String,

    /// User id (`@bot:matrix.org`) or bare localpart
    #[arg(long, env = "MATRIX_USER")]
    user: Option<String>,

    /// Account password; prompted for when absent
    #[arg(long, env = "MATRIX_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Display name of the device the token is bound to
    #[arg(long, env = "MATRIX_DEVICE_NAME", default_value = "GitHub Webhook Bot")]
    device_name: String,
}

async fn prompt(label: &str) -> Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(format!("{}: ", label).as_bytes()).await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    println!("Matrix Login");
    println!("============\n");
    println!("The token is requested without refresh support so it stays valid");
    println!("for as long as the device remains logged in.\n");

    let user = match args.user {
        Some(user) => user,
        None => prompt("Username (e.g. @user:matrix.org or just \"user\")").await?,
    };
    let password = match args.password {
        Some(password) => password,
        None => prompt("Password").await?,
    };
    if user.is_empty() || password.is_empty() {
        bail!("username and password are required");
    }

    let client = LoginClient::new(&args.homeserver)?;

    println!("\nLogging in...");
    let response = match client.login(&user, &password, &args.device_name).await {
        Ok(response) => response,
        Err(LoginError::Rejected { status, errcode, error }) => {
            eprintln!("\nLogin failed! (HTTP {})", status);
            eprintln!("Error: {}", error);
            eprintln!("Error code: {}", errcode);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    println!("\n✅ Login successful!\n");
    println!("=== Login Response Details ===");
    println!("User ID: {}", response.user_id);
    println!("Device ID: {}", response.device_id);
    println!(
        "Home Server: {}",
        response.home_server.as_deref().unwrap_or("Not provided")
    );
    match response.expires_in_ms {
        Some(ms) => {
            println!("Token expires in: {}", format_expiry(ms));
            println!("Expiry (ms): {}", ms);
        }
        None => println!("Token expiry: No expiration set"),
    }

    println!("\n=== Access Token ===");
    println!("Access Token: {}", response.access_token);
    println!("Token length: {} characters", response.access_token.len());

    if response.refresh_token.is_some() {
        println!("\n⚠️  Warning: Server provided a refresh token despite our request.");
        println!("This may indicate the server requires token refresh.");
    }

    println!("\n=== Testing Token ===");
    match client.whoami(&response.access_token).await {
        Ok(whoami) => {
            println!("✅ Token test successful!");
            println!("Verified user: {}", whoami.user_id);
            println!(
                "Device ID: {}",
                whoami.device_id.as_deref().unwrap_or("Not provided")
            );
        }
        Err(e) => {
            eprintln!("❌ Token test failed!");
            eprintln!("Error: {}", e);
        }
    }

    if let Some(ms) = response.expires_in_ms {
        println!("\n⚠️  Warning: Token expires in {}", format_expiry(ms));
        println!("You may need to renew it periodically.");
    } else {
        println!("\n✅ Token does not expire");
    }

    println!("\nSet it for the notifier with MATRIX_TOKEN or APP__MATRIX__ACCESS_TOKEN.");
    println!(
        "📌 Do not log out from \"{}\" or the token will be invalidated.",
        args.device_name
    );

    Ok(())
}
