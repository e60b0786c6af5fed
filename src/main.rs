use clap::Parser;

use text_guard::cli::{Cli, Commands};
use text_guard::commands::{run_check, run_init, run_rules};

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, &cli),
        Commands::Init(args) => run_init(args),
        Commands::Rules(args) => run_rules(args, &cli),
    };

    std::process::exit(exit_code);
}
