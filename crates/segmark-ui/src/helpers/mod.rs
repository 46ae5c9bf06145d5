// crates/segmark-ui/src/helpers/mod.rs
pub mod format;
