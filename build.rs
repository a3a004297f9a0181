use std::process::Command;

/// Run git with `args`, returning trimmed stdout on success.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/tags");

    // Tagged builds report the package version; anything else is a dev build
    // named after the commit.
    let version = if git(&["describe", "--exact-match", "--tags", "HEAD"]).is_some() {
        std::env::var("CARGO_PKG_VERSION").unwrap_or_default()
    } else {
        match git(&["rev-parse", "--short", "HEAD"]).filter(|h| !h.is_empty()) {
            Some(hash) => format!("dev@{hash}"),
            None => "dev@unknown".to_string(),
        }
    };

    println!("cargo:rustc-env=MEMORIES_VERSION={version}");
}
