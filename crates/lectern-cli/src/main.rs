//! CLI entry point - the composition root.
//!
//! Infrastructure is wired together via bootstrap; command dispatch routes
//! to handlers which delegate to the services on the context. Errors map
//! to sysexits-style exit codes.

use clap::Parser;

use lectern_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Some(command) = cli.command else {
        // No command provided - show help
        use clap::CommandFactory;
        Cli::command()
            .print_help()
            .map_err(|e| CliError::Io(e.to_string()))?;
        return Ok(());
    };

    // Paths needs no database; handle it before bootstrapping.
    if matches!(command, Commands::Paths) {
        return handlers::paths::execute();
    }

    let config = CliConfig::with_defaults().map_err(CliError::from)?;
    let ctx = bootstrap(config).await.map_err(CliError::from)?;

    match command {
        Commands::Paths => unreachable!("handled above"),
        Commands::Add {
            title,
            file,
            url,
            author,
        } => handlers::add::execute(&ctx, &title, file.as_deref(), url, author).await,
        Commands::List => handlers::list::execute(&ctx).await,
        Commands::Show { id, no_track } => handlers::show::execute(&ctx, id, no_track).await,
        Commands::Remove { id, force } => handlers::remove::execute(&ctx, id, force).await,
        Commands::Bookmark { command } => handlers::bookmark::execute(&ctx, command).await,
        Commands::History {
            limit,
            offset,
            clear,
        } => handlers::history::execute(&ctx, limit, offset, clear).await,
        Commands::Voices => handlers::voices::execute(&ctx).await,
        Commands::Speak {
            id,
            text,
            voice,
            rate,
            pitch,
        } => handlers::speak::execute(&ctx, id, text, voice, rate, pitch).await,
        Commands::Settings { command } => handlers::settings::execute(&ctx, command).await,
        Commands::DownloadVoices => handlers::download::execute().await,
    }
}
