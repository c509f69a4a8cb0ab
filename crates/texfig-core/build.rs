// File: crates/texfig-core/build.rs
// Summary: Links the Windows system libraries Skia/ICU need for the raster and SVG exporters.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW, RegQueryInfoKeyW (font manager lookups)
        println!("cargo:rustc-link-lib=advapi32");
    }
}
