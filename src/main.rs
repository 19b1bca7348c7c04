fn main() {
    tumorline::run();
}
