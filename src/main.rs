#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("mosaic-button renders in the browser. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    mosaic_button::frontend::run();
}
