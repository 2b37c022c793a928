use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=SHOWCASE_ROOT_HINT");

    // Without an explicit hint, the manifest dir is the checkout that holds
    // showcase.json, so `cargo run` works from anywhere inside it.
    let hint = env::var("SHOWCASE_ROOT_HINT")
        .ok()
        .or_else(|| env::var("CARGO_MANIFEST_DIR").ok());

    if let Some(raw_hint) = hint {
        let candidate = PathBuf::from(raw_hint);
        let canonical = candidate.canonicalize().unwrap_or(candidate);

        println!(
            "cargo:rustc-env=SHOWCASE_ROOT_HINT={}",
            canonical.display()
        );
    }
}
