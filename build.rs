// build.rs
use std::env;

fn main() {
    // CI sets BUILD_NUMBER; local builds report "dev".
    let build_number = env::var("BUILD_NUMBER").unwrap_or_else(|_| "dev".to_string());

    // Honour SOURCE_DATE_EPOCH so reproducible builds get a stable timestamp.
    let build_time = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|epoch| epoch.parse::<i64>().ok())
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(chrono::Utc::now)
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string();

    println!("cargo:rustc-env=BUILD_NUMBER={build_number}");
    println!("cargo:rustc-env=BUILD_TIME={build_time}");
    println!("cargo:rerun-if-env-changed=BUILD_NUMBER");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
}
