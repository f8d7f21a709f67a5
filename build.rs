fn main() {
    // Only run embuild when targeting ESP-IDF
    if std::env::var("CARGO_CFG_TARGET_OS").is_ok_and(|os| os == "espidf") {
        embuild::espidf::sysenv::output();
    }
}
