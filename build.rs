use std::process::Command;

/// Embed build provenance for the startup banner: the short git commit of the
/// source tree and the time of compilation.
fn main() {
    let commit = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let built = chrono::Local::now().format("%b %e %Y - %H:%M:%S");

    println!("cargo:rustc-env=RASTAT_GIT_COMMIT={}", commit);
    println!("cargo:rustc-env=RASTAT_BUILD_TIME={}", built);
    println!("cargo:rerun-if-changed=build.rs");
}
