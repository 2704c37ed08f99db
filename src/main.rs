fn main() {
    reqopts::cli::run();
}
