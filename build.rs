fn main() {
    // ESP-IDF environment propagation is only needed for flash builds.
    // Host builds (tests) skip it so no IDF toolchain is required.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
