//! Package name, version and `[package.metadata]` values, generated by
//! `build.rs`.

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));
