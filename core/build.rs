use std::env;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

const CORNERS: [&str; 4] = ["top-left", "top-right", "bottom-left", "bottom-right"];

#[derive(Deserialize)]
struct WidgetFile {
    position: String,
    #[serde(default)]
    drawer: bool,
    trusted_origin: String,
    button: ButtonSection,
    panel: PanelSection,
    palette: PaletteSection,
    chrome: ChromeSection,
}

#[derive(Deserialize)]
struct ButtonSection {
    width: f64,
    height: f64,
    icon_width: f64,
}

#[derive(Deserialize)]
struct PanelSection {
    offset: f64,
    widget_space: f64,
    min_width: f64,
    default_width: f64,
    top_offset: Option<f64>,
    frame_src: Option<String>,
}

#[derive(Deserialize)]
struct PaletteSection {
    primary: String,
    background: String,
    shadow: String,
    outline: String,
    outline_background: String,
    gray_border: String,
}

#[derive(Deserialize)]
struct ChromeSection {
    border_radius: f64,
    resize_handle_size: f64,
    transition_secs: f64,
}

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("missing CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir.parent().unwrap_or(&manifest_dir);
    let env_path = workspace_root.join(".env");
    let env_local_path = workspace_root.join(".env.local");

    let _ = dotenvy::from_filename(&env_local_path);
    let _ = dotenvy::from_filename(&env_path);

    println!("cargo:rerun-if-env-changed=WIDGET_CONFIG_PATH");
    println!("cargo:rerun-if-changed={}", env_path.display());
    println!("cargo:rerun-if-changed={}", env_local_path.display());

    let config_path = resolve_config_path(workspace_root);
    println!("cargo:rerun-if-changed={}", config_path.display());

    let contents = fs::read_to_string(&config_path).unwrap_or_else(|err| {
        panic!(
            "failed to read widget config at {}: {err}",
            config_path.display()
        )
    });

    let file: WidgetFile = toml::from_str(&contents).unwrap_or_else(|err| {
        panic!(
            "failed to parse widget config at {}: {err}",
            config_path.display()
        )
    });

    validate(&file, &config_path);

    let mut output = String::new();
    write_f64(&mut output, "DEFAULT_BUTTON_WIDTH", file.button.width);
    write_f64(&mut output, "DEFAULT_BUTTON_HEIGHT", file.button.height);
    write_f64(&mut output, "DEFAULT_ICON_WIDTH", file.button.icon_width);
    write_f64(&mut output, "DEFAULT_OFFSET", file.panel.offset);
    write_f64(&mut output, "DEFAULT_WIDGET_SPACE", file.panel.widget_space);
    write_f64(&mut output, "DEFAULT_MIN_CHAT_WIDTH", file.panel.min_width);
    write_f64(&mut output, "DEFAULT_CHAT_WIDTH", file.panel.default_width);
    writeln!(
        &mut output,
        "pub const DEFAULT_TOP_OFFSET: Option<f64> = {:?};",
        file.panel.top_offset
    )
    .unwrap();
    let frame_src = match file.panel.frame_src.as_deref() {
        Some(src) => format!("Some({})", rust_string(src)),
        None => "None".to_string(),
    };
    writeln!(
        &mut output,
        "pub const DEFAULT_FRAME_SRC: Option<&str> = {frame_src};"
    )
    .unwrap();
    write_str(&mut output, "DEFAULT_POSITION", &file.position);
    writeln!(&mut output, "pub const DEFAULT_IS_DRAWER: bool = {};", file.drawer).unwrap();
    write_str(&mut output, "DEFAULT_TRUSTED_ORIGIN", &file.trusted_origin);
    writeln!(&mut output).unwrap();
    write_str(&mut output, "DEFAULT_PRIMARY_COLOR", &file.palette.primary);
    write_str(&mut output, "DEFAULT_BACKGROUND_COLOR", &file.palette.background);
    write_str(&mut output, "DEFAULT_SHADOW_COLOR", &file.palette.shadow);
    write_str(&mut output, "DEFAULT_OUTLINE_COLOR", &file.palette.outline);
    write_str(
        &mut output,
        "DEFAULT_OUTLINE_BACKGROUND",
        &file.palette.outline_background,
    );
    write_str(&mut output, "DEFAULT_GRAY_BORDER", &file.palette.gray_border);
    writeln!(&mut output).unwrap();
    write_f64(&mut output, "DEFAULT_BORDER_RADIUS", file.chrome.border_radius);
    write_f64(
        &mut output,
        "DEFAULT_RESIZE_HANDLE_SIZE",
        file.chrome.resize_handle_size,
    );
    write_f64(&mut output, "DEFAULT_TRANSITION_SECS", file.chrome.transition_secs);

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("missing OUT_DIR"));
    let out_path = out_dir.join("widget_defaults.rs");
    fs::write(&out_path, output).unwrap_or_else(|err| {
        panic!("failed to write {}: {err}", out_path.display())
    });
}

fn resolve_config_path(workspace_root: &Path) -> PathBuf {
    let env_value = env::var("WIDGET_CONFIG_PATH").ok();
    let raw_path = match env_value {
        Some(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => workspace_root.join("widget.toml"),
    };
    if raw_path.is_relative() {
        workspace_root.join(raw_path)
    } else {
        raw_path
    }
}

fn rust_string(value: &str) -> String {
    format!("{:?}", value)
}

fn write_f64(output: &mut String, name: &str, value: f64) {
    writeln!(output, "pub const {name}: f64 = {:?};", value).unwrap();
}

fn write_str(output: &mut String, name: &str, value: &str) {
    writeln!(output, "pub const {name}: &str = {};", rust_string(value)).unwrap();
}

fn validate(file: &WidgetFile, config_path: &Path) {
    if !CORNERS.contains(&file.position.trim()) {
        panic!(
            "position '{}' must be one of {:?} in {}",
            file.position,
            CORNERS,
            config_path.display()
        );
    }
    if file.trusted_origin.trim().is_empty() {
        panic!("trusted_origin cannot be empty in {}", config_path.display());
    }
    let positive = [
        ("button.width", file.button.width),
        ("button.height", file.button.height),
        ("button.icon_width", file.button.icon_width),
        ("panel.min_width", file.panel.min_width),
        ("panel.default_width", file.panel.default_width),
        ("chrome.transition_secs", file.chrome.transition_secs),
    ];
    for (field, value) in positive {
        if !value.is_finite() || value <= 0.0 {
            panic!(
                "{field} must be a positive number, got {value} in {}",
                config_path.display()
            );
        }
    }
    let non_negative = [
        ("panel.offset", file.panel.offset),
        ("panel.widget_space", file.panel.widget_space),
        ("panel.top_offset", file.panel.top_offset.unwrap_or(0.0)),
        ("chrome.border_radius", file.chrome.border_radius),
        ("chrome.resize_handle_size", file.chrome.resize_handle_size),
    ];
    for (field, value) in non_negative {
        if !value.is_finite() || value < 0.0 {
            panic!(
                "{field} cannot be negative, got {value} in {}",
                config_path.display()
            );
        }
    }
    if file.panel.default_width < file.panel.min_width {
        panic!(
            "panel.default_width {} is below panel.min_width {} in {}",
            file.panel.default_width,
            file.panel.min_width,
            config_path.display()
        );
    }
    let colors = [
        ("palette.primary", &file.palette.primary),
        ("palette.background", &file.palette.background),
        ("palette.shadow", &file.palette.shadow),
        ("palette.outline", &file.palette.outline),
        ("palette.outline_background", &file.palette.outline_background),
        ("palette.gray_border", &file.palette.gray_border),
    ];
    for (field, value) in colors {
        if value.trim().is_empty() {
            panic!("{field} cannot be empty in {}", config_path.display());
        }
    }
    if let Some(src) = file.panel.frame_src.as_deref() {
        if src.trim().is_empty() {
            panic!(
                "panel.frame_src cannot be empty when set in {}",
                config_path.display()
            );
        }
    }
}
