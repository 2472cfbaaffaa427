//! nowplay - CLI entry point for inspecting now-playing media state.

use std::{env, error::Error, process, sync::Arc};

use nowplay::{
    cli::{CliService, formatting::format_error},
    config::Config,
    tracing_config,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    // The watch command is resident; everything else is one-shot.
    if command == "watch" {
        tracing_config::init_with_file()?;
    } else {
        tracing_config::init_cli_mode()?;
    }

    let config = Config::load()?;
    let cli_service = CliService::new(Arc::new(config));

    if command == "help" {
        println!("{}", cli_service.help());
        return Ok(());
    }

    let command_args = args.get(2..).unwrap_or(&[]).to_vec();

    match cli_service.execute_command(command, &command_args).await {
        Ok(output) => {
            if !output.trim().is_empty() {
                println!("{output}");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            process::exit(1);
        }
    }
}
