fn main() {
    if let Err(error) = planestack::run_cli() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
