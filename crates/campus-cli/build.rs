//! Embeds the package version, plus the git revision when available.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let pkg = env!("CARGO_PKG_VERSION");
    let version = match git_revision() {
        Some(rev) if rev != pkg => format!("{} ({})", pkg, rev),
        _ => pkg.to_string(),
    };

    println!("cargo:rustc-env=CAMPUS_VERSION={}", version);
}

/// `git describe` output without a leading `v`, or `None` outside a checkout.
fn git_revision() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let rev = String::from_utf8(output.stdout).ok()?;
    let rev = rev.trim();
    if rev.is_empty() {
        return None;
    }

    Some(rev.strip_prefix('v').unwrap_or(rev).to_string())
}
