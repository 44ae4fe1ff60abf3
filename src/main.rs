use disco::cli::execute;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const COMMIT: &str = match option_env!("DISCO_COMMIT") {
    Some(commit) => commit,
    None => "unknown",
};

fn main() {
    init_logger();

    if let Err(err) = execute(VERSION, COMMIT, std::env::args_os()) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}
