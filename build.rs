use std::{env, process::Command};

/// Run git with `args` and return trimmed stdout, if any.
fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=MERIDIAN_COMMIT");
    println!("cargo:rerun-if-env-changed=MERIDIAN_BUILD_DATE");

    // Release tooling can inject both values; fall back to the local checkout.
    let commit = env::var("MERIDIAN_COMMIT")
        .ok()
        .or_else(|| git(&["rev-parse", "--short", "HEAD"]))
        .unwrap_or_default();
    let date = env::var("MERIDIAN_BUILD_DATE")
        .ok()
        .or_else(|| git(&["log", "-1", "--format=%cd", "--date=iso-strict"]))
        .unwrap_or_default();

    println!("cargo:rustc-env=MERIDIAN_COMMIT={}", commit);
    println!("cargo:rustc-env=MERIDIAN_BUILD_DATE={}", date);
}
