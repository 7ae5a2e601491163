//! SimPilot Rust Library
//!
//! Fachada del workspace:
//! - `config`: configuración desde el entorno (`.env`).
//! - `errors`: errores de frontera (IO, configuración, paquete inválido).
//! - `report`: carga del paquete de entrada y ensamblado del reporte.
//!
//! El trabajo real vive en `sim-core` (reconciliación y salud) y
//! `sim-policies` (cuellos de botella); se reexportan aquí para clientes.

pub mod config;
pub mod errors;
pub mod report;

pub use config::{AppConfig, CONFIG};
pub use errors::{CoreError, DomainError};
pub use report::{build_report, load_bundle, DashboardReport, SnapshotBundle};

pub use sim_core;
pub use sim_domain;
pub use sim_policies;
