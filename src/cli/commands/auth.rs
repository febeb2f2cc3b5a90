use clap::Subcommand;
use serde_json::json;

use crate::api::ApiClient;
use crate::auth::{self, LoginRequest};
use crate::cli::config::{api_client, token_store};
use crate::cli::utils::{output_success, prompt_line};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to the admin API")]
    Login {
        #[arg(help = "Admin username")]
        username: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Logout and forget the stored session")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { username, password } => {
            let password = match password {
                Some(password) => password,
                None => prompt_line("Password: ")?,
            };
            let request = LoginRequest {
                user_name: username,
                password,
            };
            login_with(&api_client()?, &request, &output_format).await
        }
        AuthCommands::Logout => {
            let redirect = token_store()?.remove_token();
            output_success(
                &output_format,
                "Logged out",
                Some(json!({ "login_route": redirect.location })),
            )
        }
        AuthCommands::Status => {
            let tokens = token_store()?;
            let authenticated = tokens.is_authenticated();
            let message = if authenticated {
                "Signed in"
            } else {
                "Not signed in"
            };
            output_success(
                &output_format,
                message,
                Some(json!({
                    "authenticated": authenticated,
                    "cookie": tokens.cookie_name(),
                })),
            )
        }
    }
}

/// Failures are returned, not printed; the binary reports them once
async fn login_with(
    client: &ApiClient,
    request: &LoginRequest,
    output_format: &OutputFormat,
) -> anyhow::Result<()> {
    let message = auth::login(client, request).await?;
    output_success(
        output_format,
        &message,
        Some(json!({ "user": request.user_name })),
    )
}
