use clap::Parser;
use env_logger::Env;

use qaforge::cli::commands::{cmd_exec, cmd_plan};
use qaforge::cli::config::{load_config, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let config = load_config(cli.config.as_deref());

    let outcome = match cli.command {
        Commands::Plan {
            ref url,
            num_tests,
            depth,
            ref email,
            ref pm,
            ref backend,
        } => cmd_plan(
            url,
            num_tests,
            depth,
            email.as_deref(),
            pm,
            backend,
            &config,
            cli.llm_endpoint.as_deref(),
            cli.llm_model.as_deref(),
        )
        .map(|()| true),
        Commands::Exec {
            ref plan,
            ref backend,
        } => cmd_exec(
            plan,
            backend,
            &config,
            cli.llm_endpoint.as_deref(),
            cli.llm_model.as_deref(),
        ),
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
