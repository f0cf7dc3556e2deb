//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = wayfare_cli::run() {
        eprintln!("wayfare: {err}");
        std::process::exit(1);
    }
}
