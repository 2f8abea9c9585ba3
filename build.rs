//! Build script for the Python extension module.
//!
//! The extension is supported on macOS and Linux. Row selection parallelism
//! comes from rayon, so no OpenMP compiler or linker flags are needed.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let python_feature = std::env::var_os("CARGO_FEATURE_PYTHON").is_some();
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();

    if !python_feature {
        return;
    }

    match target_os.as_str() {
        // Allow unresolved Python symbols for extension-module linking.
        "macos" => println!("cargo:rustc-link-arg=-Wl,-undefined,dynamic_lookup"),
        "linux" => {}
        "windows" => panic!(
            "unsupported platform: the framers Python extension builds on macOS and Linux only"
        ),
        other => println!(
            "cargo:warning=building the framers Python extension for untested target OS '{other}'"
        ),
    }
}
