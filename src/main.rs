fn main() {
    if let Err(err) = lakehouse_sqlgen::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
