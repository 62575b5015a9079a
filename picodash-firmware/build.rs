//! Build script for picodash-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates workspaces.toml at compile time

use std::collections::BTreeMap;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Must match the registry capacity in picodash-core
const MAX_WORKSPACES: usize = 12;

/// Must match `RendererKind` in picodash-core
const RENDERERS: [&str; 5] = ["welcome", "time", "date", "system", "text"];

#[derive(Deserialize)]
struct DashboardFile {
    #[serde(default)]
    workspace: Vec<WorkspaceEntry>,
    wifi: Option<WifiEntry>,
}

#[derive(Deserialize)]
struct WorkspaceEntry {
    name: Option<String>,
    display_time: Option<i64>,
    renderer: Option<String>,
    #[serde(flatten)]
    params: BTreeMap<String, toml::Value>,
}

#[derive(Deserialize)]
struct WifiEntry {
    ssid: String,
    #[serde(default)]
    password: String,
}

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate workspaces.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=workspaces.toml");

    let config_path = Path::new("workspaces.toml");
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read workspaces.toml", &[e.to_string()]),
    };

    let file: DashboardFile = match toml::from_str(&content) {
        Ok(file) => file,
        Err(e) => fail(
            "Invalid workspaces.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = validate_workspaces(&file.workspace);
    if let Some(wifi) = &file.wifi {
        errors.extend(validate_wifi(wifi));
    }

    if !errors.is_empty() {
        fail("Invalid workspace configuration", &errors);
    }

    println!(
        "cargo:warning=workspaces.toml validated ({} workspaces)",
        file.workspace.len()
    );
}

fn validate_workspaces(workspaces: &[WorkspaceEntry]) -> Vec<String> {
    let mut errors = Vec::new();

    if workspaces.is_empty() {
        errors.push("At least one [[workspace]] is required".to_string());
    }
    if workspaces.len() > MAX_WORKSPACES {
        errors.push(format!("At most {} workspaces are supported", MAX_WORKSPACES));
    }

    for (i, ws) in workspaces.iter().enumerate() {
        let label = match &ws.name {
            Some(name) => format!("workspace {} ('{}')", i + 1, name),
            None => format!("workspace {}", i + 1),
        };

        if let Some(t) = ws.display_time {
            if t <= 0 {
                errors.push(format!("{} display_time must be positive", label));
            }
        }

        match &ws.renderer {
            Some(renderer) if is_known_renderer(renderer) => {}
            Some(renderer) => {
                errors.push(format!("{} unknown renderer '{}'", label, renderer));
            }
            None => errors.push(format!("{} missing 'renderer'", label)),
        }

        for (key, value) in &ws.params {
            match value {
                toml::Value::String(_) | toml::Value::Integer(_) | toml::Value::Boolean(_) => {}
                toml::Value::Array(items) if items.iter().all(toml::Value::is_str) => {}
                _ => errors.push(format!("{} parameter '{}' has an unsupported type", label, key)),
            }
        }
    }

    errors
}

fn validate_wifi(wifi: &WifiEntry) -> Vec<String> {
    let mut errors = Vec::new();
    if wifi.ssid.is_empty() || wifi.ssid.len() > 32 {
        errors.push("[wifi] ssid must be 1-32 bytes".to_string());
    }
    if !wifi.password.is_empty() && !(8..=63).contains(&wifi.password.len()) {
        errors.push("[wifi] password must be empty or 8-63 bytes".to_string());
    }
    errors
}

/// Case-insensitive, with or without the "Renderer" suffix
fn is_known_renderer(id: &str) -> bool {
    let id = id.to_ascii_lowercase();
    let id = id.strip_suffix("renderer").unwrap_or(&id);
    RENDERERS.contains(&id)
}

fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.chars().count() > 62 {
                format!("{}...", line.chars().take(59).collect::<String>())
            } else {
                line.clone()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}
