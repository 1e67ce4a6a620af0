use std::io;

fn main() {
    flip7_cli::logging::init_logging();
    let code = flip7_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
