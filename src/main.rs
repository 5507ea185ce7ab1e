fn main() {
    if let Err(err) = flowstack::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
