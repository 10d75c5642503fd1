fn main() {
    overlay_mosaic::cli::run();
}
