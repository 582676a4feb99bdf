fn main() {
    stylecheck::cli::run();
}
