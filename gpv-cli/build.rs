use std::path::Path;
use std::process::Command;

/// `git describe` for the workspace, e.g. `a1b2c3d` or `a1b2c3d-dirty`.
fn describe(repo: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(["describe", "--always", "--dirty", "--abbrev=7"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let rev = String::from_utf8(out.stdout).ok()?.trim().to_owned();
    (!rev.is_empty()).then_some(rev)
}

fn main() {
    println!("cargo:rerun-if-env-changed=GPV_BUILD_SHA");

    // Packagers building from a tarball can pin the revision.
    let rev = std::env::var("GPV_BUILD_SHA").ok().or_else(|| {
        let manifest = std::env::var_os("CARGO_MANIFEST_DIR")?;
        describe(Path::new(&manifest).parent()?)
    });

    println!(
        "cargo:rustc-env=GPV_BUILD_SHA={}",
        rev.as_deref().unwrap_or("unknown")
    );
}
