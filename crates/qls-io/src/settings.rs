//! Optional run-settings document.
//!
//! The solver looks for `solver_settings.json` in the working directory.
//! The file is entirely optional; an unreadable or malformed document
//! degrades the run to the default direct mode instead of aborting it.

use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Conventional settings file name, looked up in the working directory.
pub const SETTINGS_FILE: &str = "solver_settings.json";

/// Raw key/value settings as they appear on disk.
///
/// Every recognized key is optional and unknown keys are ignored. The
/// solver crate resolves this into a concrete run configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSettings {
    /// "direct", "iterative" or "quantum" (case-insensitive).
    pub mode: Option<String>,
    /// Iterative-solver tolerance; must be positive to take effect.
    pub tolerance: Option<f64>,
    /// Quantum backend name, e.g. "aer_simulator" or "vqls_estimator".
    pub backend: Option<String>,
    /// Legacy override: forces quantum mode regardless of `mode`.
    #[serde(default, rename = "use_qiskit")]
    pub use_quantum: bool,
}

/// Load settings from `path` if present.
///
/// A missing file is not an error (`None`). An unreadable or malformed
/// file also yields `None`, but the problem is reported on stderr so
/// the degradation to direct mode is visible.
pub fn load_settings(path: &Path) -> Option<RawSettings> {
    if !path.exists() {
        return None;
    }
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("warning: failed to read {}: {err}", path.display());
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(settings) => Some(settings),
        Err(err) => {
            eprintln!("warning: malformed settings in {}: {err}", path.display());
            None
        }
    }
}
