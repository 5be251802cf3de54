use cadence::app::editor;
use cadence::app::{self, AppConfig};
use cadence::config;
#[cfg(feature = "harness")]
use cadence::harness;
use cadence::ui::theme;
use clap::{ArgGroup, Args, Parser, Subcommand};

/// Terminal UI for tracking GitHub release-cycle statistics.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Repository owner. If omitted with `--repo`, both are resolved via `gh repo view`.
    #[arg(long, requires = "repo")]
    owner: Option<String>,

    /// Repository name. If omitted with `--owner`, both are resolved via `gh repo view`.
    #[arg(long, requires = "owner")]
    repo: Option<String>,

    /// Release series key (e.g. `1.3` or `2026.08.01`) to open directly on startup.
    #[arg(long)]
    series: Option<String>,

    #[cfg(feature = "harness")]
    /// Run against deterministic fixture data, no network.
    #[arg(long, default_value_t = false)]
    demo: bool,

    #[cfg(feature = "harness")]
    /// Render deterministic frames to stdout without entering interactive mode.
    #[arg(long, default_value_t = false)]
    harness_dump: bool,

    #[cfg(feature = "harness")]
    /// Harness frame width.
    #[arg(long, default_value_t = 140)]
    harness_width: u16,

    #[cfg(feature = "harness")]
    /// Harness frame height.
    #[arg(long, default_value_t = 44)]
    harness_height: u16,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Inspect or edit cadence configuration.
    Config(ConfigCommand),
}

#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("config_action")
        .required(true)
        .multiple(false)
        .args(["edit", "path"])
))]
struct ConfigCommand {
    /// Open the config file in $VISUAL/$EDITOR/nvim/vim/vi.
    #[arg(long)]
    edit: bool,

    /// Print the config file path.
    #[arg(long)]
    path: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Command::Config(command)) = cli.command {
        return handle_config_command(command);
    }

    let config = config::load_or_create()?;
    theme::apply(config.theme);

    #[cfg(feature = "harness")]
    if cli.harness_dump {
        let dump = harness::render_demo_dump(cli.harness_width, cli.harness_height)?;
        println!("{dump}");
        return Ok(());
    }

    app::run(AppConfig {
        owner: cli.owner,
        repo: cli.repo,
        series: cli.series,
        prefixes: config.tags,
        #[cfg(feature = "harness")]
        demo: cli.demo,
    })
    .await
}

fn handle_config_command(command: ConfigCommand) -> anyhow::Result<()> {
    let path = config::ensure_config_file()?;

    if command.path {
        println!("{}", path.display());
        return Ok(());
    }

    if command.edit {
        editor::edit_file_with_system_editor(path.as_path())?;
        return Ok(());
    }

    Ok(())
}
