//! clipkeep CLI entry point

use std::process::ExitCode;

use clap::Parser;

use clipkeep::cli::{
    app::{
        env_config, load_merged_config, resolve_options, COMMAND_LOG_LEVEL, EXIT_ERROR,
        EXIT_USAGE_ERROR,
    },
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    logging::init_logging,
    presenter::Presenter,
    handle_history_command, run_daemon, HistoryAction,
};
use clipkeep::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();
    let store = XdgConfigStore::new();

    if cli.daemon && cli.command.is_some() {
        presenter.error("--daemon cannot be combined with a subcommand");
        return ExitCode::from(EXIT_USAGE_ERROR);
    }

    let cli_config = cli.to_config();

    // Config commands work on the file alone
    let action = match cli.command {
        Some(Commands::Config { action }) => {
            let level = env_config().log_level;
            init_logging(level.as_deref().unwrap_or(COMMAND_LOG_LEVEL));
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::History { action }) => action.unwrap_or_default(),
        None => HistoryAction::default(),
    };

    // Merge config
    let config = load_merged_config(&store, cli_config, &presenter).await;

    if cli.daemon {
        init_logging(config.log_level_or_default());
    } else {
        init_logging(config.log_level.as_deref().unwrap_or(COMMAND_LOG_LEVEL));
    }

    let options = resolve_options(&config);

    if cli.daemon {
        return run_daemon(options).await;
    }

    if let Err(e) = handle_history_command(action, &options, &presenter).await {
        presenter.error(&e);
        return ExitCode::from(EXIT_ERROR);
    }
    ExitCode::SUCCESS
}
