//! Alternate binary name (`esc`) that forwards to the `escalation_tracker`
//! library. Keeping the alias as a real binary avoids shell alias
//! requirements.

fn main() {
    if let Err(err) = escalation_tracker::entry() {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}
