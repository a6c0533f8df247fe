//! Run-configuration resolution.
//!
//! Pure and deterministic: the resolved configuration depends only on
//! the optional on-disk settings and the explicit quantum override
//! passed in by the caller. No solver is invoked here.

use qls_io::RawSettings;

pub const DEFAULT_TOLERANCE: f64 = 1e-8;
pub const DEFAULT_QUANTUM_BACKEND: &str = "aer_simulator";

/// Which solver family a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveMode {
    Direct,
    Iterative,
    Quantum,
}

/// Resolved configuration for one solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    pub mode: SolveMode,
    /// Iterative tolerance, used as both absolute and relative bound.
    pub tolerance: f64,
    /// Quantum backend name; a substring match selects the runtime.
    pub backend_name: String,
    /// Explicit quantum override (replaces the legacy process-global
    /// flag); forces quantum mode regardless of the settings document.
    pub force_quantum: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            mode: SolveMode::Direct,
            tolerance: DEFAULT_TOLERANCE,
            backend_name: DEFAULT_QUANTUM_BACKEND.to_string(),
            force_quantum: false,
        }
    }
}

impl SolverConfig {
    /// Resolve settings into a concrete configuration.
    ///
    /// First match wins:
    /// 1. override flag, `mode == "quantum"` or `use_qiskit: true` selects
    ///    quantum mode with the configured backend name;
    /// 2. `mode == "iterative"` selects the Krylov solver with the
    ///    configured tolerance;
    /// 3. anything else, including no settings at all, selects direct.
    pub fn resolve(settings: Option<&RawSettings>, force_quantum: bool) -> Self {
        let mut config = Self {
            force_quantum,
            ..Self::default()
        };

        let mode = settings
            .and_then(|s| s.mode.as_deref())
            .map(str::to_ascii_lowercase);
        let use_quantum = settings.is_some_and(|s| s.use_quantum);

        if force_quantum || mode.as_deref() == Some("quantum") || use_quantum {
            config.mode = SolveMode::Quantum;
            if let Some(backend) = settings.and_then(|s| s.backend.clone()) {
                config.backend_name = backend;
            }
        } else if mode.as_deref() == Some("iterative") {
            config.mode = SolveMode::Iterative;
            if let Some(tolerance) = settings.and_then(|s| s.tolerance)
                && tolerance > 0.0
            {
                config.tolerance = tolerance;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_settings_defaults_to_direct() {
        let config = SolverConfig::resolve(None, false);
        assert_eq!(config.mode, SolveMode::Direct);
        assert_eq!(config.tolerance, DEFAULT_TOLERANCE);
        assert_eq!(config.backend_name, DEFAULT_QUANTUM_BACKEND);
    }

    #[test]
    fn quantum_mode_from_settings() {
        let settings = RawSettings {
            mode: Some("Quantum".to_string()),
            backend: Some("vqls_estimator".to_string()),
            ..RawSettings::default()
        };
        let config = SolverConfig::resolve(Some(&settings), false);
        assert_eq!(config.mode, SolveMode::Quantum);
        assert_eq!(config.backend_name, "vqls_estimator");
    }

    #[test]
    fn use_quantum_flag_wins_over_iterative_mode() {
        let settings = RawSettings {
            mode: Some("iterative".to_string()),
            use_quantum: true,
            ..RawSettings::default()
        };
        let config = SolverConfig::resolve(Some(&settings), false);
        assert_eq!(config.mode, SolveMode::Quantum);
    }

    #[test]
    fn override_flag_forces_quantum_without_settings() {
        let config = SolverConfig::resolve(None, true);
        assert_eq!(config.mode, SolveMode::Quantum);
        assert!(config.force_quantum);
        assert_eq!(config.backend_name, DEFAULT_QUANTUM_BACKEND);
    }

    #[test]
    fn iterative_mode_takes_configured_tolerance() {
        let settings = RawSettings {
            mode: Some("ITERATIVE".to_string()),
            tolerance: Some(1e-5),
            ..RawSettings::default()
        };
        let config = SolverConfig::resolve(Some(&settings), false);
        assert_eq!(config.mode, SolveMode::Iterative);
        assert_eq!(config.tolerance, 1e-5);
    }

    #[test]
    fn nonpositive_tolerance_keeps_default() {
        let settings = RawSettings {
            mode: Some("iterative".to_string()),
            tolerance: Some(-1.0),
            ..RawSettings::default()
        };
        let config = SolverConfig::resolve(Some(&settings), false);
        assert_eq!(config.tolerance, DEFAULT_TOLERANCE);
    }

    #[test]
    fn unrecognized_mode_degrades_to_direct() {
        let settings = RawSettings {
            mode: Some("hyperdrive".to_string()),
            ..RawSettings::default()
        };
        let config = SolverConfig::resolve(Some(&settings), false);
        assert_eq!(config.mode, SolveMode::Direct);
    }
}
