//! Cantor-TTS CLI: list plugins, or synthesize text to a WAV file.

mod config;

use anyhow::Result;
use cantor_core::{builtin_hooks, collect_wav, PluginRegistry, SettingsMap};
use config::HostConfig;
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    let args: Vec<String> = env::args().collect();
    match args.get(1).map(|s| s.as_str()) {
        Some("list") => run_list(&args[2..]),
        Some("speak") => run_speak(&args[2..]),
        _ => {
            eprintln!("usage: cantor list [--all|--disabled] [--locale L] [--config PATH]");
            eprintln!("       cantor speak --text TEXT [--plugin ID] [--out PATH]");
            eprintln!("                    [--set KEY=VALUE]... [--config PATH]");
            std::process::exit(2);
        }
    }
}

/// Build a registry from the built-in hooks and the host config: plugins in
/// `enabled` get enabled, or everything when the list is empty.
fn load_registry(config: &HostConfig) -> Result<PluginRegistry> {
    let mut registry = PluginRegistry::new();
    registry.load_plugins(&builtin_hooks(), true)?;
    if config.enabled.is_empty() {
        for id in registry.list_plugin_ids(false, true)? {
            registry.enable(&id)?;
        }
    } else {
        for id in &config.enabled {
            registry.enable(id)?;
        }
    }
    Ok(registry)
}

fn load_config(path: Option<&Path>) -> Result<HostConfig> {
    match path {
        Some(path) => HostConfig::load_path(path),
        None => {
            let default = PathBuf::from("cantor.toml");
            if default.exists() {
                HostConfig::load_path(&default)
            } else {
                Ok(HostConfig::default())
            }
        }
    }
}

fn run_list(args: &[String]) -> Result<()> {
    let mut only_disabled = false;
    let mut list_all = false;
    let mut locale = "en_US".to_string();
    let mut config_path = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--disabled" => only_disabled = true,
            "--all" => list_all = true,
            "--locale" | "-l" => {
                i += 1;
                if let Some(value) = args.get(i) {
                    locale = value.clone();
                }
            }
            "--config" | "-c" => {
                i += 1;
                if let Some(value) = args.get(i) {
                    config_path = Some(PathBuf::from(value));
                }
            }
            other => anyhow::bail!("unknown argument: {other}"),
        }
        i += 1;
    }

    let config = load_config(config_path.as_deref())?;
    let registry = load_registry(&config)?;
    for id in registry.list_plugin_ids(only_disabled, list_all)? {
        let plugin = registry.get_plugin(&id)?;
        let status = if registry.is_enabled(&id) {
            "enabled"
        } else {
            "disabled"
        };
        println!("{id}\t{}\t[{status}]", plugin.get_display_name(&locale));
    }
    Ok(())
}

fn run_speak(args: &[String]) -> Result<()> {
    let mut text = None;
    let mut plugin_id = None;
    let mut out_path = PathBuf::from("out.wav");
    let mut overrides: Vec<(String, String)> = Vec::new();
    let mut config_path = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--text" | "-t" => {
                i += 1;
                text = args.get(i).cloned();
            }
            "--plugin" | "-p" => {
                i += 1;
                plugin_id = args.get(i).cloned();
            }
            "--out" | "-o" => {
                i += 1;
                if let Some(value) = args.get(i) {
                    out_path = PathBuf::from(value);
                }
            }
            "--set" | "-s" => {
                i += 1;
                if let Some(pair) = args.get(i) {
                    let (key, value) = pair
                        .split_once('=')
                        .ok_or_else(|| anyhow::anyhow!("--set expects KEY=VALUE, got {pair}"))?;
                    overrides.push((key.to_string(), value.to_string()));
                }
            }
            "--config" | "-c" => {
                i += 1;
                if let Some(value) = args.get(i) {
                    config_path = Some(PathBuf::from(value));
                }
            }
            other => anyhow::bail!("unknown argument: {other}"),
        }
        i += 1;
    }
    let text = text.ok_or_else(|| anyhow::anyhow!("--text is required"))?;

    let config = load_config(config_path.as_deref())?;
    let registry = load_registry(&config)?;
    let plugin_id = match plugin_id {
        Some(id) => id,
        None => registry
            .list_plugin_ids(false, false)?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("no enabled plugins"))?,
    };
    let plugin = registry.get_plugin(&plugin_id)?;

    let mut dict = config.settings_for(&plugin_id).unwrap_or_default();
    apply_overrides(&mut dict, &overrides);
    let settings = plugin.make_settings(if dict.is_empty() { None } else { Some(&dict) })?;

    let mut backend = plugin.make_backend(settings)?;
    backend.start()?;
    let spec = backend.audio_spec().clone();
    let stream = backend.convert(&text)?;
    let wav = collect_wav(&spec, stream)?;
    backend.stop();

    match out_path.to_str() {
        Some("-") => {
            std::io::stdout().write_all(&wav)?;
            std::io::stdout().flush()?;
        }
        _ => {
            if let Some(parent) = out_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&out_path, &wav)?;
            eprintln!("Wrote {} bytes to {}", wav.len(), out_path.display());
        }
    }
    Ok(())
}

/// Fold `--set KEY=VALUE` pairs into the settings dict. Values parse as
/// JSON when possible (numbers, booleans, null), otherwise as strings.
fn apply_overrides(dict: &mut SettingsMap, overrides: &[(String, String)]) {
    for (key, raw) in overrides {
        let value = serde_json::from_str(raw)
            .unwrap_or_else(|_| serde_json::Value::String(raw.clone()));
        dict.insert(key.clone(), value);
    }
}
