//! Build script for homelog-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates station.toml and embeds it as postcard bytes
//! - Exports the build identifier shown on the startup banner

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use homelog_core::config::{ConfigError, StationConfig};

/// Build identifier used when `HOMELOG_BUILD` is not set
const DEFAULT_BUILD: &str = "dev";

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    setup_linker(&out_dir);
    embed_config(&out_dir);
    export_build_id();
}

/// Set up linker search paths and scripts
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate station.toml and write the postcard image the firmware embeds
fn embed_config(out_dir: &Path) {
    println!("cargo:rerun-if-changed=station.toml");

    let config_path = Path::new("station.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: station.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a station.toml configuration file.        ║\n\
            ║  Please create one in the homelog-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read station.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Syntax errors and out-of-range fields (e.g. a 40 byte SSID) land here
    let config: StationConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid station.toml                                     ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    if let Err(e) = config.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: station.toml failed validation                           ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            ║  • {:<62} ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            describe(e)
        );
    }

    let bytes = postcard::to_stdvec(&config).unwrap();
    fs::write(out_dir.join("station.postcard"), bytes).unwrap();

    println!("cargo:warning=station.toml validated successfully");
}

/// Pass the build identifier through to the firmware as `HOMELOG_BUILD`
fn export_build_id() {
    println!("cargo:rerun-if-env-changed=HOMELOG_BUILD");

    let build = env::var("HOMELOG_BUILD").unwrap_or_else(|_| DEFAULT_BUILD.to_string());
    println!("cargo:rustc-env=HOMELOG_BUILD={}", build);
}

/// Human readable validation failure
fn describe(error: ConfigError) -> &'static str {
    match error {
        ConfigError::NoNetworks => "at least one [[networks]] entry is required",
        ConfigError::EmptySsid => "[[networks]] ssid must not be empty",
        ConfigError::PasswordLength => "[[networks]] password must be empty or 8-63 chars",
        ConfigError::InvalidUrl => "[endpoints] URLs must be http(s)://host/...",
        ConfigError::ZeroTone => "alert_tone must be greater than 0",
        ConfigError::InvalidGeometry => "[display] needs width <= 128, height 32 or 64, 7-bit address",
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
