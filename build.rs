use std::fs;
use std::path::Path;
use std::process::Command;

/// Keys read from device_config.h, with the default used when absent.
const CONFIG_KEYS: &[(&str, &str)] = &[
    ("WIFI_SSID", ""),
    ("WIFI_PASSWORD", ""),
    ("OTA_SERVER", ""),
    ("OTA_DEVICE", "ESP32_UPDATE_CLIENT"),
    ("OTA_IS_CORE", "0"),
    ("OTA_AUTO_UPDATE", "0"),
    ("OTA_CHECK_INTERVAL_SECS", "3600"),
    ("OTA_CERT_STORE", ""),
];

fn main() -> anyhow::Result<()> {
    // Necessary for ESP-IDF
    embuild::espidf::sysenv::output();

    // Add crash log helper for better panic diagnostics
    println!("cargo:rustc-link-arg=-Wl,--undefined=esp_backtrace_print_app_description");

    let config_path = "device_config.h";
    println!("cargo:rerun-if-changed={}", config_path);

    let contents = if Path::new(config_path).exists() {
        fs::read_to_string(config_path)?
    } else {
        println!("cargo:warning=device_config.h not found! Copy device_config.h.example to device_config.h and fill in WiFi and update server settings.");
        String::new()
    };

    for (key, default) in CONFIG_KEYS {
        let define = format!("#define {}", key);
        let value = contents
            .lines()
            .find(|l| l.trim_start().starts_with(&define) && l.split_whitespace().nth(1) == Some(*key))
            .and_then(|l| l.split('"').nth(1))
            .unwrap_or(default);
        println!("cargo:rustc-env={}={}", key, value);
    }

    // Build id reported to the update server
    let build_id = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "dev".to_string());
    println!("cargo:rustc-env=BUILD_ID={}", build_id);

    Ok(())
}
