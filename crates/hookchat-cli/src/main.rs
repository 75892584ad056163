//! hookchat CLI: chat with a webhook from the terminal

use clap::{Parser, Subcommand};
use hookchat_engine::{
    normalize, AuthGate, ChatSession, Config, FileRef, HttpWebhook, LoadedAttachment, Webhook,
};
use std::error::Error;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Terminal chat client for webhook-backed assistants
#[derive(Parser)]
#[command(name = "hookchat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config file (environment variables take precedence)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write logs to this file (the TUI logs nowhere otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui,

    /// Send one message and print the reply
    Send {
        /// Message text (may be omitted when sending a file)
        message: Option<String>,

        /// File to attach
        #[arg(long)]
        file: Option<PathBuf>,

        /// Username to sign in with
        #[arg(long)]
        username: String,

        /// Password to sign in with
        #[arg(long)]
        password: String,
    },

    /// Read a webhook response body from stdin and print its display text
    Normalize,

    /// Print the resolved configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

type CliResult = Result<(), Box<dyn Error>>;

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult {
    let tui = matches!(cli.command, None | Some(Commands::Tui));
    init_logging(cli.verbose, cli.log_file.as_deref(), tui)?;

    match cli.command {
        None | Some(Commands::Tui) => {
            let config = Config::resolve(cli.config.as_deref())?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(hookchat_tui::run_tui(config))
        }
        Some(Commands::Send {
            message,
            file,
            username,
            password,
        }) => {
            let config = Config::resolve(cli.config.as_deref())?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(cmd_send(
                &config,
                message.as_deref().unwrap_or_default(),
                file.as_deref(),
                &username,
                &password,
                &mut std::io::stdout(),
            ))
        }
        Some(Commands::Normalize) => cmd_normalize(&mut std::io::stdin(), &mut std::io::stdout()),
        Some(Commands::Config { json }) => {
            let config = Config::resolve(cli.config.as_deref())?;
            cmd_config(&config, json)
        }
    }
}

/// Install the tracing subscriber.
///
/// Logs go to `log_file` when given, to stderr for one-shot commands, and
/// nowhere for the TUI so the alternate screen stays clean.
fn init_logging(verbose: bool, log_file: Option<&Path>, tui: bool) -> CliResult {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            if log_file.is_some() {
                EnvFilter::new("hookchat_engine=info,hookchat_tui=info,warn")
            } else {
                EnvFilter::new("warn")
            }
        })
    };

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| format!("cannot open log file {}: {e}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if tui => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

/// Send one turn and write the bot's entry to `out`.
///
/// The entry is written even when the webhook call fails; the failure is
/// then returned so the process exits non-zero.
async fn cmd_send(
    config: &Config,
    message: &str,
    file: Option<&Path>,
    username: &str,
    password: &str,
    out: &mut impl Write,
) -> CliResult {
    let mut gate = AuthGate::new(config.credentials());
    if !gate.authenticate(username, password) {
        return Err("Invalid username or password".into());
    }

    let loaded = match file {
        Some(path) => {
            let file_ref = FileRef::from_path(path)?;
            if !file_ref.is_allowed() {
                tracing::warn!(name = %file_ref.name, "sending a file type outside the allow-list");
            }
            Some(LoadedAttachment::read(&file_ref).await?)
        }
        None => None,
    };

    let mut session = ChatSession::new(None, config.error_reply.clone());
    let Some(turn) = session.begin_turn(message, loaded) else {
        return Err("Nothing to send: give a message or --file".into());
    };

    let webhook = HttpWebhook::new(config.webhook_url.clone());
    let result = webhook.send(&turn.message).await;
    let failure = result.as_ref().err().map(ToString::to_string);

    if let Some(reply) = session.complete_turn(&turn.placeholder, result) {
        writeln!(out, "{}", reply.content)?;
    }

    match failure {
        Some(reason) => Err(reason.into()),
        None => Ok(()),
    }
}

fn cmd_normalize(input: &mut impl Read, out: &mut impl Write) -> CliResult {
    let mut body = String::new();
    input.read_to_string(&mut body)?;
    let body = body.strip_suffix('\n').unwrap_or(&body);
    writeln!(out, "{}", normalize(body))?;
    Ok(())
}

fn cmd_config(config: &Config, json: bool) -> CliResult {
    let shown = config.redacted();

    if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    let unset = "(not set)";
    println!(
        "Webhook URL:  {}",
        shown
            .webhook_url
            .as_ref()
            .map_or_else(|| unset.to_string(), ToString::to_string)
    );
    println!("Username:     {}", shown.username.as_deref().unwrap_or(unset));
    println!("Password:     {}", shown.password.as_deref().unwrap_or(unset));
    println!(
        "Greeting:     {}",
        shown.greeting().unwrap_or("(disabled)")
    );
    println!("Error reply:  {}", shown.error_reply);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::Router;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["hookchat"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_send_arguments() {
        let cli = Cli::try_parse_from([
            "hookchat",
            "send",
            "Hello",
            "--file",
            "notes.txt",
            "--username",
            "admin",
            "--password",
            "secret123",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Send {
                message,
                file,
                username,
                password,
            }) => {
                assert_eq!(message.as_deref(), Some("Hello"));
                assert_eq!(file, Some(PathBuf::from("notes.txt")));
                assert_eq!(username, "admin");
                assert_eq!(password, "secret123");
            }
            _ => panic!("expected send"),
        }
    }

    #[test]
    fn test_send_requires_credentials() {
        assert!(Cli::try_parse_from(["hookchat", "send", "Hello"]).is_err());
    }

    fn signed_config(webhook_url: Option<url::Url>) -> Config {
        Config {
            webhook_url,
            username: Some("admin".into()),
            password: Some("secret123".into()),
            ..Config::default()
        }
    }

    /// Serve `body` with `status` for every POST to `/hook`.
    async fn spawn_webhook(status: StatusCode, body: &'static str) -> url::Url {
        let app = Router::new().route("/hook", post(move || async move { (status, body) }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        url::Url::parse(&format!("http://{addr}/hook")).unwrap()
    }

    #[tokio::test]
    async fn test_send_rejects_wrong_password() {
        let config = signed_config(None);
        let mut out = Vec::new();
        let err = cmd_send(&config, "Hello", None, "admin", "wrongpass", &mut out)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid username or password");
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_send_prints_normalized_reply() {
        let url = spawn_webhook(StatusCode::OK, r#"{"output":"Hi there\nHow are you?"}"#).await;
        let config = signed_config(Some(url));

        let mut out = Vec::new();
        cmd_send(&config, "Hello", None, "admin", "secret123", &mut out)
            .await
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Hi there\nHow are you?\n");
    }

    #[tokio::test]
    async fn test_send_prints_error_reply_then_fails() {
        let config = signed_config(None);

        let mut out = Vec::new();
        let err = cmd_send(&config, "Hello", None, "admin", "secret123", &mut out)
            .await
            .unwrap_err();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("{}\n", config.error_reply)
        );
        assert!(!err.to_string().is_empty());
    }

    #[tokio::test]
    async fn test_send_fails_on_server_error() {
        let url = spawn_webhook(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;
        let config = signed_config(Some(url));

        let mut out = Vec::new();
        assert!(cmd_send(&config, "Hello", None, "admin", "secret123", &mut out)
            .await
            .is_err());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("{}\n", config.error_reply)
        );
    }

    #[tokio::test]
    async fn test_send_without_message_or_file_fails() {
        let config = signed_config(None);
        let mut out = Vec::new();
        let err = cmd_send(&config, "  ", None, "admin", "secret123", &mut out)
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Nothing to send"));
    }

    #[test]
    fn test_normalize_reads_body_and_prints_text() {
        let mut input = "{\"output\":\"Hello\"}\n".as_bytes();
        let mut out = Vec::new();
        cmd_normalize(&mut input, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Hello\n");
    }

    #[test]
    fn test_normalize_passes_plain_text_through() {
        let mut input = "just text".as_bytes();
        let mut out = Vec::new();
        cmd_normalize(&mut input, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "just text\n");
    }
}
