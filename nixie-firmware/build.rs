//! Build script for nixie-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Parses and validates nixie.toml at compile time
//! - Generates the `CONFIG` constant compiled into the firmware

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use nixie_core::config::NixieConfig;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    setup_linker(&out_dir);
    let config = load_config();
    write_config(&out_dir, &config);
}

/// Set up linker search paths and scripts
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).expect("create memory.x");
    f.write_all(memory_x).expect("write memory.x");

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

/// Read, parse and validate nixie.toml
fn load_config() -> NixieConfig {
    println!("cargo:rerun-if-changed=nixie.toml");

    let config_path = Path::new("nixie.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: nixie.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a nixie.toml configuration file.          ║\n\
            ║  Please create one in the nixie-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read nixie.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: NixieConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid nixie.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    if let Err(e) = config.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Configuration validation failed                          ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&e.to_string())
        );
    }

    println!("cargo:warning=nixie.toml validated successfully");
    config
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Emit the validated configuration as Rust source
fn write_config(out_dir: &Path, config: &NixieConfig) {
    let source = format!(
        "/// Configuration compiled in from nixie.toml\n\
        pub const CONFIG: nixie_core::config::NixieConfig = nixie_core::config::NixieConfig {{\n    \
            serial: nixie_core::config::SerialConfig {{ baudrate: {baudrate} }},\n    \
            framing: nixie_core::config::FramingConfig {{ idle_flush_ms: {idle} }},\n    \
            attract: nixie_core::config::AttractConfig {{\n        \
                interval_ms: {interval},\n        \
                color: nixie_core::Rgb::new({r}, {g}, {b}),\n        \
                brightness: {brightness},\n    \
            }},\n\
        }};\n",
        baudrate = config.serial.baudrate,
        idle = config.framing.idle_flush_ms,
        interval = config.attract.interval_ms,
        r = config.attract.color.r,
        g = config.attract.color.g,
        b = config.attract.color.b,
        brightness = config.attract.brightness,
    );

    fs::write(out_dir.join("config.rs"), source).expect("write config.rs");
}
