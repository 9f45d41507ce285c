use std::{env, process::Command};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Record the toolchain that compiled us so /api/info can report it.
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());

    let version = Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "rustc unknown".to_string());

    println!("cargo:rustc-env=ITEM_STORE_RUSTC_VERSION={}", version);
}
