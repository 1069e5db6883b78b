//! Compile-time build information for `--version`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));
