use clap::Parser;
use vgplan::cli::{Cli, Commands};
use vgplan::cli_handlers::{
    handle_board_command, handle_config_command, handle_init_command, handle_tree_command,
    open_database,
};
use vgplan::error::Result;
use vgplan::logging::{
    init_logging, log_file_path, prepare_log_file, ApplicationMode, LoggingConfig,
};

#[tokio::main]
async fn main() {
    // Parse CLI arguments first to get logging configuration
    let cli = Cli::parse();

    let mut log_config = LoggingConfig::from_args(cli.quiet, cli.verbose > 0, cli.json);
    if let Some(requested) = &cli.log_file {
        let resolved = match requested {
            Some(path) => prepare_log_file(path),
            None => log_file_path(ApplicationMode::Cli),
        };
        match resolved {
            Ok(path) => log_config = log_config.with_file_output(path),
            Err(e) => {
                eprintln!("Failed to prepare log file: {}", e);
                std::process::exit(1);
            },
        }
    }

    if let Err(e) = init_logging(log_config) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&cli).await {
        let error_response = e.to_error_response();
        match serde_json::to_string_pretty(&error_response) {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprintln!("{}", e),
        }
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    match cli.command.clone() {
        Commands::Init => handle_init_command(cli.db.clone()).await?,

        Commands::Config { format } => handle_config_command(cli.db.clone(), &format)?,

        Commands::Board(board_cmd) => {
            let pool = open_database(cli.db.clone()).await?;
            let result = handle_board_command(&pool, board_cmd).await;
            pool.close().await;
            result?
        },

        Commands::Tree(tree_cmd) => {
            let pool = open_database(cli.db.clone()).await?;
            let result = handle_tree_command(&pool, tree_cmd).await;
            pool.close().await;
            result?
        },
    }

    Ok(())
}
