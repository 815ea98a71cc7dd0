fn main() {
    // ESP-IDF build environment plumbing — only when building for the device.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
