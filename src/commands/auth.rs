//! Authentication commands.
//!
//! Login stores the bearer token and user profile in the session file;
//! logout removes them.

use clap::{Args, Subcommand};

use super::prompt::{secret_or_prompt, value_or_prompt};
use crate::api::{http_client, AuthClient};
use crate::config::Config;
use crate::session::SessionStore;

/// Authentication commands
#[derive(Debug, Args)]
pub struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Debug, Subcommand)]
enum AuthSubcommand {
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account
    Signup {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Log out (remove the stored token)
    Logout,
    /// Show authentication status
    Status,
    /// Request a password reset e-mail
    ResetRequest {
        #[arg(long)]
        email: Option<String>,
    },
    /// Set a new password with the token from the reset e-mail
    ResetConfirm {
        /// Token from the reset e-mail
        #[arg(long)]
        token: String,
        /// New password
        #[arg(long)]
        password: Option<String>,
    },
}

impl AuthCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let store = SessionStore::with_data_dir(&config.data_dir.value);

        match &self.command {
            AuthSubcommand::Login { email, password } => {
                let email = value_or_prompt(email, "Email")?;
                let password = secret_or_prompt(password, "Password")?;

                let client = AuthClient::from_config(http_client(config)?, config);
                let login = client.login(&email, &password).await?;
                store.save_login(&login.access_token, &login.user)?;

                println!("Logged in as {}", login.user);
            }
            AuthSubcommand::Signup {
                name,
                email,
                password,
            } => {
                let name = value_or_prompt(name, "Name")?;
                let email = value_or_prompt(email, "Email")?;
                let password = secret_or_prompt(password, "Password")?;

                let client = AuthClient::from_config(http_client(config)?, config);
                let message = client.signup(&name, &email, &password).await?;

                println!("{}", message);
                println!("Please login: cropbot auth login --email {}", email.trim());
            }
            AuthSubcommand::Logout => {
                if store.clear()? {
                    println!("Logged out.");
                } else {
                    println!("Already logged out.");
                }
            }
            AuthSubcommand::Status => {
                let session = store.load()?;
                if !session.is_authenticated() {
                    println!("Not logged in. Run 'cropbot auth login' to authenticate.");
                    return Ok(());
                }
                match &session.user {
                    Some(user) => println!("Logged in as {}", user),
                    None => println!("Logged in"),
                }
                if let Some(at) = session.logged_in_at {
                    println!("  since {}", at.format("%Y-%m-%d %H:%M UTC"));
                }
            }
            AuthSubcommand::ResetRequest { email } => {
                let email = value_or_prompt(email, "Email")?;

                let client = AuthClient::from_config(http_client(config)?, config);
                let message = client.request_password_reset(&email).await?;

                println!("{}", message);
                println!("Check your email, then run: cropbot auth reset-confirm --token <TOKEN>");
            }
            AuthSubcommand::ResetConfirm { token, password } => {
                let password = secret_or_prompt(password, "New password")?;

                let client = AuthClient::from_config(http_client(config)?, config);
                let message = client.confirm_password_reset(token, &password).await?;

                println!("{}", message);
                println!("You can login now.");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server;
    use crate::models::User;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn test_config(dir: &TempDir, api_url: &str) -> Config {
        let mut config = Config::load(Some(dir.path().join("missing.yaml"))).unwrap();
        config.api_url.value = api_url.to_string();
        config.data_dir.value = dir.path().join("data");
        config
    }

    fn mock_login_service() -> Router {
        Router::new().route(
            "/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "secret" {
                    (
                        StatusCode::OK,
                        Json(json!({
                            "access_token": "jwt-xyz",
                            "user": {"name": "Kamau", "email": "kamau@example.com"}
                        })),
                    )
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"error": "Invalid email or password"})),
                    )
                }
            }),
        )
    }

    fn login(password: &str) -> AuthCommand {
        AuthCommand {
            command: AuthSubcommand::Login {
                email: Some("kamau@example.com".to_string()),
                password: Some(password.to_string()),
            },
        }
    }

    #[tokio::test]
    async fn test_login_persists_token_and_user() {
        let base_url = test_server::spawn(mock_login_service()).await;
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir, &base_url);

        login("secret").run(&config).await.unwrap();

        let session = SessionStore::with_data_dir(&config.data_dir.value)
            .load()
            .unwrap();
        assert_eq!(session.token.as_deref(), Some("jwt-xyz"));
        assert_eq!(session.user, Some(User::new("Kamau", "kamau@example.com")));
    }

    #[tokio::test]
    async fn test_failed_login_stores_nothing() {
        let base_url = test_server::spawn(mock_login_service()).await;
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir, &base_url);

        let err = login("wrong").run(&config).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");

        let store = SessionStore::with_data_dir(&config.data_dir.value);
        assert!(!store.load().unwrap().is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir, "http://127.0.0.1:9");
        let store = SessionStore::with_data_dir(&config.data_dir.value);
        store
            .save_login("jwt-xyz", &User::new("Kamau", "kamau@example.com"))
            .unwrap();

        let logout = AuthCommand {
            command: AuthSubcommand::Logout,
        };
        logout.run(&config).await.unwrap();

        assert!(store.token().unwrap().is_none());
    }
}
