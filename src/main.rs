use std::io::Write;

use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use photoscli::{
    cli::{self, AuthMode},
    config, error,
    error::Result,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Increase diagnostic logging on stderr (-v info, -vv debug)
    #[clap(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with the Google Photos API
    Auth(AuthOptions),

    /// Manage albums
    #[command(subcommand)]
    Albums(AlbumsSubcommand),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Authorize with the Google Photos API")]
pub struct AuthOptions {
    /// Exchange an authorization code copied from the browser
    #[clap(long, conflicts_with_all = ["manual", "status"])]
    pub code: Option<String>,

    /// Only print the authorization URL
    #[clap(long, conflicts_with = "status")]
    pub manual: bool,

    /// Do not try to open a browser
    #[clap(long)]
    pub no_browser: bool,

    /// Report whether a valid token is stored
    #[clap(long)]
    pub status: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AlbumsSubcommand {
    /// List albums, following one next page if there is one
    List,

    /// Show one album
    Get {
        /// Album id
        id: String,
    },

    /// Create an album
    Create {
        /// Album title, defaults to a timestamped test title
        title: Option<String>,
    },

    /// Show the page for a page token
    Next {
        /// Page token printed by `albums list`
        page_token: String,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "photoscli=info",
        _ => "photoscli=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(command: Command) -> Result<()> {
    let mut stdout = std::io::stdout();

    match command {
        Command::Auth(opt) => {
            let flow = cli::oauth_flow().await?;
            if opt.status {
                cli::auth_status(&flow, &mut stdout).await?;
                return Ok(());
            }

            let mode = match (opt.code, opt.manual) {
                (Some(code), _) => AuthMode::Code(code),
                (None, true) => AuthMode::PrintUrl,
                (None, false) => AuthMode::LocalServer {
                    open_browser: !opt.no_browser,
                },
            };
            cli::auth(&flow, mode).await
        }

        Command::Albums(sub) => {
            let service = cli::album_service().await?;
            match sub {
                AlbumsSubcommand::List => cli::list_albums(&service, &mut stdout).await,
                AlbumsSubcommand::Get { id } => cli::get_album(&service, &id, &mut stdout).await,
                AlbumsSubcommand::Create { title } => {
                    cli::create_album(&service, title, &mut stdout).await
                }
                AlbumsSubcommand::Next { page_token } => {
                    cli::next_page(&service, &page_token, &mut stdout).await
                }
            }
        }

        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut stdout);
            stdout.flush()?;
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = config::load_env().await {
        tracing::debug!(error = %e, "no .env loaded, using environment and defaults");
    }

    if let Err(e) = run(cli.command).await {
        error!("{}", e);
    }
}
