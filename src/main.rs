fn main() {
    if let Err(err) = noty_lib::run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
