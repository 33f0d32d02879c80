#[cfg(feature = "csr")]
fn main() {
    explorer_ui::mount();
}

#[cfg(not(feature = "csr"))]
fn main() {}
