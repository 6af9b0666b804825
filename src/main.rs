fn main() {
    if let Err(err) = escalation_tracker::entry() {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}
