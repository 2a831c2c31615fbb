use clooney::{cli, otel};

fn main() {
    if let Err(err) = otel::init_logging() {
        eprintln!("warning: logging disabled: {err:#}");
    }
    if let Err(err) = cli::run_cli() {
        eprintln!("❌ {err:#}");
        std::process::exit(1);
    }
}
