//! Configuration management (config.toml)
//!
//! Handles loading, saving, and providing defaults for viewer settings.
//! Settings are stored in TOML format in the platform-specific config directory.

use std::path::{Path, PathBuf};

use glam::Vec3;
use rigview_shared::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_TITLE, DEFAULT_WINDOW_WIDTH};
use serde::{Deserialize, Serialize};

use crate::backend::UniformNaming;
use crate::input::KeyBindings;
use crate::scene::FigureKind;
use crate::transform::GridSpec;

/// Errors from reading or writing configuration files
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("no platform config directory available")]
    NoConfigDir,
}

/// Viewer configuration.
///
/// Contains all user-configurable settings organized into sections.
/// Serialized to/from TOML format for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Window settings
    #[serde(default)]
    pub window: WindowConfig,
    /// Orbit and first-person camera settings
    #[serde(default)]
    pub camera: CameraConfig,
    /// Shadow-casting spot light
    #[serde(default)]
    pub light: LightConfig,
    /// Movement and scaling rates
    #[serde(default)]
    pub controls: ControlsConfig,
    /// Key bindings
    #[serde(default)]
    pub keys: KeyBindings,
    /// Scene contents
    #[serde(default)]
    pub scene: SceneConfig,
}

/// Window configuration. Owned by the window provider; the core only reads
/// the aspect ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Width in pixels (default: 1024)
    #[serde(default = "default_width")]
    pub width: u32,
    /// Height in pixels (default: 768)
    #[serde(default = "default_height")]
    pub height: u32,
    /// Window title
    #[serde(default = "default_title")]
    pub title: String,
}

impl WindowConfig {
    /// Width over height; a zero height yields 1.0
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Soft band the orbit radius is steered back into while zooming.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBand {
    pub min: f32,
    pub max: f32,
}

impl Default for ZoomBand {
    fn default() -> Self {
        Self { min: 5.0, max: 50.0 }
    }
}

/// Camera configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Eye position the nominal orbit radius is derived from (default: [0, 20, 30])
    #[serde(default = "default_base_eye")]
    pub base_eye: [f32; 3],
    /// Height above the root the orbit camera looks at (default: 3.0)
    #[serde(default = "default_target_lift")]
    pub target_lift: f32,
    /// First-person eye position in the figure's local frame
    #[serde(default = "default_driver_offset")]
    pub driver_offset: [f32; 3],
    /// Vertical clamp in orbit mode, degrees (default: 85)
    #[serde(default = "default_orbit_pitch_limit")]
    pub orbit_pitch_limit: f32,
    /// Vertical clamp in first-person mode, degrees (default: 30)
    #[serde(default = "default_first_person_pitch_limit")]
    pub first_person_pitch_limit: f32,
    #[serde(default)]
    pub zoom_band: ZoomBand,
    /// Orbit offset per pixel of vertical drag (default: 0.01)
    #[serde(default = "default_drag_sensitivity")]
    pub drag_sensitivity: f32,
    /// Degrees per second per pixel of rotation drag (default: 60)
    #[serde(default = "default_angular_speed")]
    pub angular_speed: f32,
    /// Pseudo-pixels of drag injected by each held arrow key (default: 1.1)
    #[serde(default = "default_key_nudge")]
    pub key_nudge: f32,
    /// Vertical field of view in degrees (default: 70)
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    /// Home horizontal angle in degrees (default: 90)
    #[serde(default = "default_horizontal")]
    pub default_horizontal_degrees: f32,
    /// Home vertical angle in degrees (default: -30)
    #[serde(default = "default_vertical")]
    pub default_vertical_degrees: f32,
}

impl CameraConfig {
    pub fn base_eye(&self) -> Vec3 {
        Vec3::from_array(self.base_eye)
    }

    pub fn driver_offset(&self) -> Vec3 {
        Vec3::from_array(self.driver_offset)
    }

    /// Length of the base eye vector; the radius at zero zoom offset
    pub fn nominal_radius(&self) -> f32 {
        self.base_eye().length()
    }
}

/// Spot light placed above the controlled figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightConfig {
    /// Height above the figure root (default: 30)
    #[serde(default = "default_light_height")]
    pub height: f32,
    /// Field of view in degrees (default: 20)
    #[serde(default = "default_light_fov")]
    pub fov_degrees: f32,
    #[serde(default = "default_light_near")]
    pub near: f32,
    #[serde(default = "default_light_far")]
    pub far: f32,
}

/// Movement, turning and scaling rates, all per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlsConfig {
    /// Forward/back/strafe speed in world units (default: 6)
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    /// Rise/sink speed in world units (default: 6)
    #[serde(default = "default_move_speed")]
    pub vertical_speed: f32,
    /// Turn rate in degrees (default: 24)
    #[serde(default = "default_turn_speed")]
    pub turn_speed: f32,
    /// Uniform scale change (default: 6)
    #[serde(default = "default_scale_rate")]
    pub scale_rate: f32,
    /// Floor for the uniform scale (default: 0.1)
    #[serde(default = "default_min_scale")]
    pub min_scale: f32,
    /// Randomize places the figure within this distance on X and Z (default: 50)
    #[serde(default = "default_randomize_extent")]
    pub randomize_extent: f32,
    /// Wheel rotation in degrees (default: 360)
    #[serde(default = "default_wheel_spin_speed")]
    pub wheel_spin_speed: f32,
}

/// Decorative ring of extra cars
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BumperCarsConfig {
    /// Cars on the ring (default: 4)
    #[serde(default = "default_bumper_count")]
    pub count: u32,
    /// Ring radius around the world origin (default: 12)
    #[serde(default = "default_bumper_radius")]
    pub ring_radius: f32,
}

/// Scene contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Controlled figure (default: snowman)
    #[serde(default)]
    pub figure: FigureKind,
    /// Seed for the randomize action (default: 0)
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub grid: GridSpec,
    #[serde(default)]
    pub bumper_cars: BumperCarsConfig,
    /// Uniform naming convention handed to the shader backend
    #[serde(default)]
    pub uniform_naming: UniformNaming,
}

fn default_width() -> u32 {
    DEFAULT_WINDOW_WIDTH
}
fn default_height() -> u32 {
    DEFAULT_WINDOW_HEIGHT
}
fn default_title() -> String {
    DEFAULT_WINDOW_TITLE.to_string()
}

fn default_base_eye() -> [f32; 3] {
    [0.0, 20.0, 30.0]
}
fn default_target_lift() -> f32 {
    3.0
}
fn default_driver_offset() -> [f32; 3] {
    [0.0, 2.5, 0.0]
}
fn default_orbit_pitch_limit() -> f32 {
    85.0
}
fn default_first_person_pitch_limit() -> f32 {
    30.0
}
fn default_drag_sensitivity() -> f32 {
    0.01
}
fn default_angular_speed() -> f32 {
    60.0
}
fn default_key_nudge() -> f32 {
    1.1
}
fn default_fov() -> f32 {
    70.0
}
fn default_near() -> f32 {
    0.01
}
fn default_far() -> f32 {
    100.0
}
fn default_horizontal() -> f32 {
    90.0
}
fn default_vertical() -> f32 {
    -30.0
}

fn default_light_height() -> f32 {
    30.0
}
fn default_light_fov() -> f32 {
    20.0
}
fn default_light_near() -> f32 {
    5.0
}
fn default_light_far() -> f32 {
    80.0
}

fn default_move_speed() -> f32 {
    6.0
}
fn default_turn_speed() -> f32 {
    24.0
}
fn default_scale_rate() -> f32 {
    6.0
}
fn default_min_scale() -> f32 {
    0.1
}
fn default_randomize_extent() -> f32 {
    50.0
}
fn default_wheel_spin_speed() -> f32 {
    360.0
}

fn default_bumper_count() -> u32 {
    4
}
fn default_bumper_radius() -> f32 {
    12.0
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            base_eye: default_base_eye(),
            target_lift: default_target_lift(),
            driver_offset: default_driver_offset(),
            orbit_pitch_limit: default_orbit_pitch_limit(),
            first_person_pitch_limit: default_first_person_pitch_limit(),
            zoom_band: ZoomBand::default(),
            drag_sensitivity: default_drag_sensitivity(),
            angular_speed: default_angular_speed(),
            key_nudge: default_key_nudge(),
            fov_degrees: default_fov(),
            near: default_near(),
            far: default_far(),
            default_horizontal_degrees: default_horizontal(),
            default_vertical_degrees: default_vertical(),
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            height: default_light_height(),
            fov_degrees: default_light_fov(),
            near: default_light_near(),
            far: default_light_far(),
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            move_speed: default_move_speed(),
            vertical_speed: default_move_speed(),
            turn_speed: default_turn_speed(),
            scale_rate: default_scale_rate(),
            min_scale: default_min_scale(),
            randomize_extent: default_randomize_extent(),
            wheel_spin_speed: default_wheel_spin_speed(),
        }
    }
}

impl Default for BumperCarsConfig {
    fn default() -> Self {
        Self {
            count: default_bumper_count(),
            ring_radius: default_bumper_radius(),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            figure: FigureKind::default(),
            seed: 0,
            grid: GridSpec::default(),
            bumper_cars: BumperCarsConfig::default(),
            uniform_naming: UniformNaming::default(),
        }
    }
}

/// Returns the platform-specific configuration directory.
///
/// On Windows: `%APPDATA%\Rigview\config`
/// On macOS: `~/Library/Application Support/io.rigview.Rigview`
/// On Linux: `~/.config/Rigview`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.rigview", "", "Rigview")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Path of `config.toml` inside [`config_dir`].
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Loads the configuration from disk.
///
/// Reads `config.toml` from the platform's configuration directory.
/// Returns default values if the file doesn't exist or cannot be parsed.
pub fn load() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_from(&path).unwrap_or_else(|e| {
            tracing::warn!("ignoring {}: {}", path.display(), e);
            Config::default()
        }),
        _ => Config::default(),
    }
}

/// Loads the configuration from an explicit path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    for warning in validate_config(&config) {
        tracing::warn!("{}: {}", path.display(), warning);
    }
    Ok(config)
}

/// Saves the configuration to disk.
///
/// Writes `config.toml` to the platform's configuration directory.
/// Creates the directory if it doesn't exist.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file
/// cannot be written.
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(&path, config)?;
    Ok(path)
}

/// Writes `config` as pretty TOML to `path`, creating parent directories.
pub fn save_to(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Sanity-check values that parse fine but make the viewer misbehave.
///
/// Returns a list of warning messages; an empty list means no problems.
pub fn validate_config(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();

    let band = config.camera.zoom_band;
    if band.min >= band.max {
        warnings.push(format!(
            "camera.zoom_band min {} is not below max {}",
            band.min, band.max
        ));
    }
    if config.camera.near <= 0.0 || config.camera.near >= config.camera.far {
        warnings.push(format!(
            "camera near/far planes {}/{} are not a valid range",
            config.camera.near, config.camera.far
        ));
    }
    if config.camera.orbit_pitch_limit >= 90.0 {
        warnings.push("camera.orbit_pitch_limit at or above 90 flips the view at the poles".to_string());
    }
    if config.controls.min_scale <= 0.0 {
        warnings.push("controls.min_scale must be positive".to_string());
    }
    if config.scene.grid.spacing <= 0.0 {
        warnings.push("scene.grid.spacing must be positive".to_string());
    }
    if config.window.width == 0 || config.window.height == 0 {
        warnings.push("window size must be non-zero".to_string());
    }

    warnings.extend(config.keys.conflicts());
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================================
    // Default value tests
    // =============================================================

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 768);
        assert_eq!(config.camera.base_eye, [0.0, 20.0, 30.0]);
        assert_eq!(config.camera.zoom_band, ZoomBand { min: 5.0, max: 50.0 });
        assert_eq!(config.scene.grid.line_count, 100);
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_nominal_radius() {
        let camera = CameraConfig::default();
        assert!((camera.nominal_radius() - 1300f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_aspect_ratio() {
        let window = WindowConfig::default();
        assert!((window.aspect_ratio() - 4.0 / 3.0).abs() < 1e-6);
        let flat = WindowConfig {
            height: 0,
            ..WindowConfig::default()
        };
        assert_eq!(flat.aspect_ratio(), 1.0);
    }

    // =============================================================
    // TOML serialization tests
    // =============================================================

    #[test]
    fn test_config_deserialize_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_deserialize_partial_camera() {
        let toml_str = r#"
[camera]
fov_degrees = 45.0

[scene]
figure = "car"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.camera.fov_degrees, 45.0);
        assert_eq!(config.camera.near, 0.01); // default
        assert_eq!(config.scene.figure, FigureKind::Car);
        assert_eq!(config.scene.uniform_naming, UniformNaming::SnakeCase);
    }

    #[test]
    fn test_config_serialize_roundtrip() {
        let mut config = Config::default();
        config.scene.seed = 42;
        config.scene.uniform_naming = UniformNaming::CamelCase;
        config.controls.min_scale = 0.25;

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    // =============================================================
    // File I/O tests
    // =============================================================

    #[test]
    fn test_save_and_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.window.title = "test window".to_string();
        save_to(&path, &config).unwrap();

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.window.title, "test window");
    }

    #[test]
    fn test_load_from_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[window\nwidth = ").unwrap();
        assert!(matches!(load_from(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_from(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    // =============================================================
    // Validation tests
    // =============================================================

    #[test]
    fn test_validate_inverted_zoom_band() {
        let mut config = Config::default();
        config.camera.zoom_band = ZoomBand { min: 60.0, max: 10.0 };
        let warnings = validate_config(&config);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("zoom_band"));
    }

    #[test]
    fn test_validate_bad_grid_and_scale() {
        let mut config = Config::default();
        config.scene.grid.spacing = 0.0;
        config.controls.min_scale = -1.0;
        assert_eq!(validate_config(&config).len(), 2);
    }
}
