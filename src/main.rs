fn main() {
    if let Err(err) = record_delta::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
