//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `triproute_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("triproute_core ping={}", triproute_core::ping());
    println!("triproute_core version={}", triproute_core::core_version());
}
