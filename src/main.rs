fn main() {
    if let Err(error) = precip_outlook::run_from_env() {
        eprintln!("{error}");
        std::process::exit(error.exit_code());
    }
}
