// Shared build-script helper for README-to-rustdoc transformation.
// Include from a crate's build.rs with: include!("../build_common.rs");
//
// Required imports in the including file:
//   use std::env;
//   use std::fs;
//   use std::path::Path;

/// Prepare the crate's README.md for `#![doc = include_str!(...)]`.
///
/// Rustdoc resolves intra-doc links against modules, not files, so links of
/// the form `](src/foo.rs)` are rewritten to `](foo)`. The result is written
/// to `$OUT_DIR/README_GENERATED.md`; a missing README produces an empty
/// file so the doc include never breaks the build.
fn process_readme_for_rustdoc(crate_dir: &str) {
    println!("cargo:rerun-if-changed=README.md");

    let readme_path = Path::new(crate_dir).join("README.md");
    let content = fs::read_to_string(&readme_path).unwrap_or_default();

    let rustdoc_content = content.replace("](src/", "](").replace(".rs)", ")");

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("README_GENERATED.md");
    fs::write(dest_path, rustdoc_content).unwrap();
}
