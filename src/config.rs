//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) una sola vez y expone una estructura
//! inmutable (`CONFIG`). Las funciones de la librería reciben `&AppConfig`
//! explícito; `CONFIG` es sólo la instancia por defecto del proceso.
use once_cell::sync::Lazy;
use std::env;

use sim_core::HealthThresholds;

use crate::errors::CoreError;

pub const ENV_BOTTLENECK_LIMIT: &str = "SIMPILOT_BOTTLENECK_LIMIT";
pub const ENV_ERROR_PENALTY: &str = "SIMPILOT_ERROR_PENALTY";
pub const ENV_WARNING_PENALTY: &str = "SIMPILOT_WARNING_PENALTY";
pub const ENV_AMBER_FROM: &str = "SIMPILOT_AMBER_FROM";
pub const ENV_GREEN_FROM: &str = "SIMPILOT_GREEN_FROM";
pub const ENV_LOG: &str = "SIMPILOT_LOG";

pub const DEFAULT_LOG_FILTER: &str = "info";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenvy::dotenv(); // ignora error si no existe .env
});

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Máximo de cuellos de botella en el ranking (`None` = todos).
    pub bottleneck_limit: Option<usize>,
    /// Penalizaciones y umbrales del semáforo de salud.
    pub thresholds: HealthThresholds,
    /// Filtro de logging (sintaxis `EnvFilter`).
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { bottleneck_limit: None,
               thresholds: HealthThresholds::default(),
               log_filter: DEFAULT_LOG_FILTER.to_string() }
    }
}

impl AppConfig {
    /// Lee la configuración del entorno (previa carga de `.env`).
    ///
    /// # Errores
    /// `CoreError::Config` si alguna variable no se puede interpretar o los
    /// umbrales son incoherentes.
    pub fn from_env() -> Result<Self, CoreError> {
        init_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
        where F: Fn(&str) -> Option<String>
    {
        let defaults = HealthThresholds::default();
        let bottleneck_limit = parse_var::<usize, _>(&lookup, ENV_BOTTLENECK_LIMIT)?;
        let thresholds =
            HealthThresholds { error_penalty: parse_var(&lookup, ENV_ERROR_PENALTY)?.unwrap_or(defaults.error_penalty),
                               warning_penalty: parse_var(&lookup, ENV_WARNING_PENALTY)?.unwrap_or(defaults.warning_penalty),
                               amber_from: parse_var(&lookup, ENV_AMBER_FROM)?.unwrap_or(defaults.amber_from),
                               green_from: parse_var(&lookup, ENV_GREEN_FROM)?.unwrap_or(defaults.green_from) };
        let log_filter = lookup(ENV_LOG).filter(|v| !v.trim().is_empty())
                                        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let config = Self { bottleneck_limit, thresholds, log_filter };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), CoreError> {
        let t = &self.thresholds;
        for (name, value) in [(ENV_ERROR_PENALTY, t.error_penalty), (ENV_WARNING_PENALTY, t.warning_penalty)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::Config(format!("{name} debe ser un número >= 0 (recibido {value})")));
            }
        }
        for (name, value) in [(ENV_AMBER_FROM, t.amber_from), (ENV_GREEN_FROM, t.green_from)] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(CoreError::Config(format!("{name} debe estar entre 0 y 100 (recibido {value})")));
            }
        }
        if t.amber_from > t.green_from {
            return Err(CoreError::Config(format!("{ENV_AMBER_FROM} ({}) no puede superar {ENV_GREEN_FROM} ({})",
                                                 t.amber_from, t.green_from)));
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, CoreError>
    where T: std::str::FromStr,
          F: Fn(&str) -> Option<String>
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw.trim()
                        .parse::<T>()
                        .map(Some)
                        .map_err(|_| CoreError::Config(format!("{key} inválido: '{raw}'"))),
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez. Si el
/// entorno es inválido se registra el problema y se usan los valores por
/// defecto.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    AppConfig::from_env().unwrap_or_else(|e| {
                             log::warn!("configuración inválida, usando valores por defecto: {e}");
                             AppConfig::default()
                         })
});

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
