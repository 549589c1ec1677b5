use clap::Parser;
use pwdvault::cli::{self, output, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose);

    if let Commands::Completions { shell } = cli.command {
        cli::completions::execute(shell, &mut std::io::stdout());
        return;
    }

    let Some(command) = cli.command.to_command() else {
        return;
    };

    if cli.master_password.is_some() && std::env::var_os("PWDVAULT_PASSWORD").is_none() {
        output::warning("Master password given on the command line — it may appear in shell history.");
    }

    match cli::driver::run(&cli, &command) {
        Ok(rendered) => {
            if !rendered.is_empty() {
                println!("{rendered}");
            }
        }
        Err(e) => {
            if e.is_validation() {
                output::error(&format!("cannot execute command: {e}"));
            } else {
                output::error(&e.to_string());
            }
            std::process::exit(e.exit_code());
        }
    }
}
