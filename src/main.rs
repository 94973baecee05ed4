mod cli;
mod logger;
mod options;

fn main() {
    std::process::exit(cli::run());
}
