use colored::Colorize;
use tagcheck::command_argument_builder;
use tagcheck::handlers::{handle_check, init_tracing};

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let args = cmd.get_matches();

    init_tracing(args.get_flag("verbose"));

    if let Err(e) = handle_check(&args).await {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}
