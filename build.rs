use std::env;

fn main() {
    // Build identity stamped into stored parameter images.
    // A different id makes previously stored parameters load as defaults.
    let build_id = env::var("KESTREL_BUILD_ID")
        .or_else(|_| env::var("GIT_VERSION"))
        .unwrap_or_else(|_| env::var("CARGO_PKG_VERSION").unwrap_or_default());

    if env::var("KESTREL_BUILD_ID").is_ok() || env::var("GIT_VERSION").is_ok() {
        println!("cargo:warning=Using build id from environment: {}", build_id);
    }
    println!("cargo:rustc-env=KESTREL_BUILD_ID={}", build_id);

    // Rerun if environment variables change
    println!("cargo:rerun-if-env-changed=KESTREL_BUILD_ID");
    println!("cargo:rerun-if-env-changed=GIT_VERSION");
}
