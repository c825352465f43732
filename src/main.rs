use anyhow::Result;
use clap::Parser;
use devomail::cli::{self, MailCommand};
use devomail::infra::config::default_config_dir;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "devomail",
    version,
    about = "Serviços de e-mail de teste (maildev, mailhog) para containers de desenvolvimento"
)]
struct Cli {
    /// Diretório de configuração (default: ~/.config/devomail)
    #[arg(long, env = "DEVOMAIL_CONFIG_DIR", default_value_os_t = default_config_dir())]
    config_dir: std::path::PathBuf,

    /// Mostra logs de debug
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: MailCommand,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    cli::run(cli.command, &cli.config_dir)
}
