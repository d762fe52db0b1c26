fn main() {
    slint_build::compile("ui/carousel.slint").expect("Slint build failed");
}
