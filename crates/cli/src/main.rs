fn main() {
    if let Err(e) = classforge_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
