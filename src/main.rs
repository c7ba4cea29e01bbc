fn main() {
    if let Err(e) = handbook::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
