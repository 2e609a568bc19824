//! Velora back-office CLI
//!
//! Operator-facing surface for the Velora e-commerce admin API: session
//! management plus CRUD over products, categories, colors, sizes, customers,
//! blogs, the messaging panel, image upload, and system settings.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process::ExitCode;
use velora_api_client::ApiError;
use velora_core::error::{exit_codes, Error as CoreError, ErrorCode};

mod commands;

use commands::{auth, blogs, categories, chat, colors, images, products, settings, sizes, users};

/// Back-office administration CLI for Velora
#[derive(Parser)]
#[command(name = "velora-admin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "VELORA_PASSWORD")]
        password: String,
    },

    /// Sign out and clear the persisted session
    Logout,

    /// Show the signed-in profile
    Whoami,

    /// Manage product categories
    Categories {
        #[command(subcommand)]
        action: CrudAction,
    },

    /// Manage colors
    Colors {
        #[command(subcommand)]
        action: colors::ColorAction,
    },

    /// Manage sizes
    Sizes {
        #[command(subcommand)]
        action: sizes::SizeAction,
    },

    /// Manage products
    Products {
        #[command(subcommand)]
        action: products::ProductAction,
    },

    /// Manage customers
    Users {
        #[command(subcommand)]
        action: users::UserAction,
    },

    /// Manage blog posts
    Blogs {
        #[command(subcommand)]
        action: blogs::BlogAction,
    },

    /// Customer messaging panel
    Chat {
        #[command(subcommand)]
        action: chat::ChatAction,
    },

    /// Upload images
    Images {
        #[command(subcommand)]
        action: images::ImageAction,
    },

    /// Store-wide settings
    Settings {
        #[command(subcommand)]
        action: settings::SettingsAction,
    },
}

/// Shared CRUD verbs for simple name/description resources
#[derive(Subcommand)]
enum CrudAction {
    /// List with pagination
    List {
        /// Zero-based page index
        #[arg(short, long, default_value = "0")]
        page: u32,

        /// Page size
        #[arg(short, long, default_value = "20")]
        size: u32,

        /// Free-text search filter
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one record
    Get {
        /// Record ID
        id: i64,
    },

    /// Create a record
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Update a record
    Update {
        /// Record ID
        id: i64,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a record
    Delete {
        /// Record ID
        id: i64,

        /// Skip the confirmation requirement
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        if let Err(e) =
            velora_telemetry::init_with_config(velora_telemetry::TelemetryConfig::verbose())
        {
            eprintln!("{} {}", "Warning:".yellow().bold(), e);
        }
    }

    let result = match cli.command {
        Commands::Login { email, password } => auth::login(&email, &password, &cli.format).await,
        Commands::Logout => auth::logout(&cli.format),
        Commands::Whoami => auth::whoami(&cli.format).await,

        Commands::Categories { action } => categories::run(action, &cli.format).await,
        Commands::Colors { action } => colors::run(action, &cli.format).await,
        Commands::Sizes { action } => sizes::run(action, &cli.format).await,
        Commands::Products { action } => products::run(action, &cli.format).await,
        Commands::Users { action } => users::run(action, &cli.format).await,
        Commands::Blogs { action } => blogs::run(action, &cli.format).await,
        Commands::Chat { action } => chat::run(action, &cli.format).await,
        Commands::Images { action } => images::run(action, &cli.format).await,
        Commands::Settings { action } => settings::run(action, &cli.format).await,
    };

    let exit = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let error = to_core_error(&e);
            if cli.format == "json" {
                let report = serde_json::to_string_pretty(&error.to_report())
                    .unwrap_or_else(|_| error.to_string());
                eprintln!("{report}");
            } else {
                eprintln!("{} {}", "Error:".red().bold(), error);
            }
            ExitCode::from(u8::try_from(exit_code_for(error.code)).unwrap_or(1))
        }
    };

    if cli.verbose {
        eprintln!(
            "{}",
            velora_telemetry::metrics().export_json().to_string().dimmed()
        );
    }

    exit
}

/// Fold any command failure into the structured core error
///
/// API errors get a code, context, and a recovery suggestion; core errors
/// raised locally (argument parsing, file reads) pass through unchanged.
fn to_core_error(error: &anyhow::Error) -> CoreError {
    if let Some(api) = error.downcast_ref::<ApiError>() {
        return match api {
            ApiError::Validation { errors } => {
                let fields: Vec<String> = errors.iter().map(ToString::to_string).collect();
                CoreError::validation("Input validation failed").with_context(fields.join("; "))
            }
            ApiError::Config(msg) => CoreError::config(msg.clone()),
            ApiError::Storage(msg) => CoreError::io(msg.clone()),
            ApiError::NotAuthenticated => CoreError::not_authenticated(),
            ApiError::SessionExpired(reason) => CoreError::session_expired(reason.clone()),
            ApiError::MissingRefreshToken => {
                CoreError::session_expired("No refresh token available")
            }
            ApiError::Unauthorized(reason) => CoreError::auth(reason.clone()),
            ApiError::Backend {
                message,
                sub_errors,
            } => {
                let err = CoreError::backend(message.clone());
                if sub_errors.is_empty() {
                    err
                } else {
                    let fields: Vec<String> =
                        sub_errors.iter().map(ToString::to_string).collect();
                    err.with_context(fields.join("; "))
                }
            }
            ApiError::Request(e) => CoreError::new(ErrorCode::TransportError, e.to_string()),
            ApiError::Api { .. } => {
                let err = CoreError::new(ErrorCode::ApiError, api.to_string());
                if api.is_server_error() {
                    err.with_suggestion("The backend reported a server fault; retry shortly")
                } else if api.is_client_error() {
                    err.with_suggestion("Check the command arguments against the backend state")
                } else {
                    err
                }
            }
            other => CoreError::new(ErrorCode::ApiError, other.to_string()),
        };
    }

    if let Some(core) = error.downcast_ref::<CoreError>() {
        let mut rebuilt = CoreError::new(core.code, core.message.clone());
        if let Some(ref context) = core.context {
            rebuilt = rebuilt.with_context(context.clone());
        }
        if let Some(ref suggestion) = core.suggestion {
            rebuilt = rebuilt.with_suggestion(suggestion.clone());
        }
        return rebuilt;
    }

    CoreError::new(ErrorCode::Unknown, error.to_string())
}

/// Map error-code families to the exit codes the wrapper scripts rely on
fn exit_code_for(code: ErrorCode) -> i32 {
    match code.code() / 1000 {
        3 => exit_codes::CONFIG_ERROR,
        4 => exit_codes::AUTH_ERROR,
        6 => exit_codes::VALIDATION_ERROR,
        _ => exit_codes::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_errors_map_to_core_codes() {
        let err = anyhow::Error::from(ApiError::NotAuthenticated);
        let mapped = to_core_error(&err);
        assert_eq!(mapped.code, ErrorCode::NotAuthenticated);
        assert!(mapped.suggestion.is_some());

        let err = anyhow::Error::from(ApiError::MissingRefreshToken);
        assert_eq!(to_core_error(&err).code, ErrorCode::SessionExpired);

        let err = anyhow::Error::from(ApiError::config("bad base url"));
        assert_eq!(to_core_error(&err).code, ErrorCode::ConfigError);
    }

    #[test]
    fn test_backend_sub_errors_become_context() {
        let err = anyhow::Error::from(ApiError::backend(
            "Name already exists",
            vec![velora_api_client::SubError {
                field: "name".to_string(),
                message: "duplicate".to_string(),
                rejected_value: None,
            }],
        ));
        let mapped = to_core_error(&err);
        assert_eq!(mapped.code, ErrorCode::BackendRejected);
        assert_eq!(mapped.context.as_deref(), Some("name: duplicate"));
    }

    #[test]
    fn test_http_status_families_shape_suggestions() {
        let err = anyhow::Error::from(ApiError::api(502, "upstream down"));
        let mapped = to_core_error(&err);
        assert_eq!(mapped.code, ErrorCode::ApiError);
        assert!(mapped.suggestion.as_deref().unwrap().contains("retry"));

        let err = anyhow::Error::from(ApiError::api(404, "no such product"));
        let mapped = to_core_error(&err);
        assert!(mapped.suggestion.as_deref().unwrap().contains("arguments"));
    }

    #[test]
    fn test_core_errors_pass_through() {
        let err = anyhow::Error::from(
            CoreError::validation("Invalid variant").with_suggestion("Use colorId:sizeId:quantity"),
        );
        let mapped = to_core_error(&err);
        assert_eq!(mapped.code, ErrorCode::ValidationError);
        assert_eq!(
            mapped.suggestion.as_deref(),
            Some("Use colorId:sizeId:quantity")
        );
    }

    #[test]
    fn test_exit_code_families() {
        assert_eq!(
            exit_code_for(ErrorCode::ValidationError),
            exit_codes::VALIDATION_ERROR
        );
        assert_eq!(exit_code_for(ErrorCode::SessionExpired), exit_codes::AUTH_ERROR);
        assert_eq!(exit_code_for(ErrorCode::ConfigError), exit_codes::CONFIG_ERROR);
        assert_eq!(exit_code_for(ErrorCode::BackendRejected), exit_codes::FAILURE);
        assert_eq!(exit_code_for(ErrorCode::TransportError), exit_codes::FAILURE);
    }
}
