use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotproxy::{cli, config, error, warning};

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
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the proxy server
    Serve(ServeOptions),

    /// Run the server and open the Spotify login page to obtain a refresh token
    Auth(ServeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Port to listen on (overrides PORT)
    #[clap(long)]
    pub port: Option<u16>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn load_config(opt: &ServeOptions) -> config::Config {
    let mut config = match config::Config::from_env() {
        Ok(c) => c,
        Err(e) => error!("Invalid configuration: {}", e),
    };
    if let Some(port) = opt.port {
        config.port = port;
    }
    config
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        warning!("Cannot load .env file. Err: {}", e);
    }

    match cli.command {
        Command::Serve(opt) => cli::serve(load_config(&opt)).await,
        Command::Auth(opt) => cli::auth(load_config(&opt)).await,
        Command::Completions(_) => {}
    }
}
