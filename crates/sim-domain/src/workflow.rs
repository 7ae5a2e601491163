//! Ítems de trabajo del pipeline DESIGN → SIMULATION → MANUFACTURE y el
//! resultado de su clasificación de cuello de botella.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DomainError;

/// Etapa del pipeline. El orden de declaración es el orden del pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowStage {
    Design,
    Simulation,
    Manufacture,
}

impl WorkflowStage {
    pub const ALL: [WorkflowStage; 3] = [WorkflowStage::Design, WorkflowStage::Simulation, WorkflowStage::Manufacture];
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        WorkflowStage::Design => "DESIGN",
                        WorkflowStage::Simulation => "SIMULATION",
                        WorkflowStage::Manufacture => "MANUFACTURE",
                    })
    }
}

/// Se serializa con nombres SCREAMING_SNAKE_CASE; al deserializar acepta
/// además el texto libre de las hojas (ver `parse_lenient`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageStatus {
    NotStarted,
    InProgress,
    OnTrack,
    AtRisk,
    Blocked,
    ChangesRequested,
    Approved,
    Complete,
    #[default]
    Unknown,
}

impl StageStatus {
    /// Interpreta el texto libre de una hoja. Lo que no se reconoce se
    /// degrada a `Unknown` en lugar de fallar.
    pub fn parse_lenient(text: &str) -> StageStatus {
        Self::lookup(text).unwrap_or(StageStatus::Unknown)
    }

    fn lookup(text: &str) -> Option<StageStatus> {
        let cleaned = text.trim().to_lowercase().replace(['-', '_'], " ");
        let normalized = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
        let status = match normalized.as_str() {
            "not started" | "not yet started" | "pending" | "todo" => StageStatus::NotStarted,
            "in progress" | "wip" | "ongoing" | "started" => StageStatus::InProgress,
            "on track" | "green" => StageStatus::OnTrack,
            "at risk" | "amber" | "yellow" | "delayed" => StageStatus::AtRisk,
            "blocked" | "on hold" | "red" | "stopped" => StageStatus::Blocked,
            "changes requested" | "rework" => StageStatus::ChangesRequested,
            "approved" | "signed off" => StageStatus::Approved,
            "complete" | "completed" | "done" | "finished" => StageStatus::Complete,
            "unknown" | "n/a" | "" => StageStatus::Unknown,
            _ => return None,
        };
        Some(status)
    }
}

impl<'de> Deserialize<'de> for StageStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: Deserializer<'de>
    {
        let text = Option::<String>::deserialize(deserializer)?;
        Ok(text.map_or(StageStatus::Unknown, |t| StageStatus::parse_lenient(&t)))
    }
}

impl FromStr for StageStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| DomainError::ValidationError(format!("Estado de etapa desconocido: '{s}'")))
    }
}

/// Estado de una etapa para un ítem de trabajo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageStatusSnapshot {
    pub stage: WorkflowStage,
    #[serde(default)]
    pub status: StageStatus,
    /// Porcentaje 0–100 (opcional).
    #[serde(default)]
    pub completion: Option<f64>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl StageStatusSnapshot {
    pub fn new(stage: WorkflowStage, status: StageStatus) -> Self {
        Self { stage, status, completion: None, owner: None, note: None, updated_at: None }
    }

    /// Etapa sin ningún dato (estado desconocido y sin porcentaje).
    pub fn unknown(stage: WorkflowStage) -> Self {
        Self::new(stage, StageStatus::Unknown)
    }

    /// Fija el porcentaje validando el rango 0–100.
    ///
    /// # Errores
    /// `DomainError::ValidationError` si el valor no es finito o está fuera de
    /// rango.
    pub fn with_completion(mut self, completion: f64) -> Result<Self, DomainError> {
        if !completion.is_finite() || !(0.0..=100.0).contains(&completion) {
            return Err(DomainError::ValidationError(format!("Porcentaje de avance fuera de rango: {completion}")));
        }
        self.completion = Some(completion);
        Ok(self)
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn has_data(&self) -> bool {
        self.status != StageStatus::Unknown || self.completion.is_some()
    }

    pub fn is_blocked(&self) -> bool {
        self.status == StageStatus::Blocked
    }

    pub fn is_complete(&self) -> bool {
        match self.status {
            StageStatus::Complete | StageStatus::Approved => true,
            StageStatus::Blocked | StageStatus::ChangesRequested => false,
            _ => self.completion.is_some_and(|c| c >= 100.0),
        }
    }

    /// Hay actividad registrada: porcentaje > 0 o un estado que implica que
    /// la etapa arrancó.
    pub fn has_started(&self) -> bool {
        if self.completion.is_some_and(|c| c > 0.0) {
            return true;
        }
        !matches!(self.status, StageStatus::NotStarted | StageStatus::Unknown)
    }

    pub fn is_in_progress(&self) -> bool {
        self.has_started() && !self.is_complete()
    }

    /// Avance efectivo 0–100: el porcentaje declarado (acotado), o 100/0
    /// según el estado cuando no hay porcentaje.
    pub fn effective_completion(&self) -> f64 {
        match self.completion {
            Some(c) if c.is_nan() => 0.0,
            Some(c) => c.clamp(0.0, 100.0),
            None if self.is_complete() => 100.0,
            None => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkItemKind {
    Tooling,
    WeldGun,
    RobotCell,
}

/// Unidad de trabajo rastreable con sus tres etapas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowItem {
    pub id: String,
    pub kind: WorkItemKind,
    /// Clave de ubicación/contexto (normalmente la estación).
    pub context_key: String,
    pub design: StageStatusSnapshot,
    pub simulation: StageStatusSnapshot,
    pub manufacture: StageStatusSnapshot,
}

impl WorkflowItem {
    pub fn new(id: impl Into<String>,
               kind: WorkItemKind,
               context_key: impl Into<String>,
               design: StageStatusSnapshot,
               simulation: StageStatusSnapshot,
               manufacture: StageStatusSnapshot)
               -> Self {
        Self { id: id.into(), kind, context_key: context_key.into(), design, simulation, manufacture }
    }

    pub fn stage(&self, stage: WorkflowStage) -> &StageStatusSnapshot {
        match stage {
            WorkflowStage::Design => &self.design,
            WorkflowStage::Simulation => &self.simulation,
            WorkflowStage::Manufacture => &self.manufacture,
        }
    }

    pub fn stages(&self) -> [&StageStatusSnapshot; 3] {
        [&self.design, &self.simulation, &self.manufacture]
    }
}

/// Código de motivo del cuello de botella (conjunto cerrado).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BottleneckReason {
    DesignBlocked,
    DesignNotDetailed,
    SimBlocked,
    SimChangesRequested,
    BuildAheadOfSim,
    Ok,
    /// Ninguna etapa trae datos.
    Unknown,
}

/// Nivel de severidad. Orden ascendente: `Ok` < `Low` < ... < `Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeverityTier {
    Ok,
    Low,
    Medium,
    High,
    Critical,
}

/// Resultado de clasificar un `WorkflowItem`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowBottleneckStatus {
    pub item_id: String,
    pub kind: WorkItemKind,
    pub context_key: String,
    pub design: StageStatusSnapshot,
    pub simulation: StageStatusSnapshot,
    pub manufacture: StageStatusSnapshot,
    pub dominant_stage: WorkflowStage,
    pub reason: BottleneckReason,
    pub severity: SeverityTier,
    pub severity_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_parse_accepts_spreadsheet_spellings() {
        assert_eq!(StageStatus::parse_lenient("In Progress"), StageStatus::InProgress);
        assert_eq!(StageStatus::parse_lenient("changes-requested"), StageStatus::ChangesRequested);
        assert_eq!(StageStatus::parse_lenient("NOT_STARTED"), StageStatus::NotStarted);
        assert_eq!(StageStatus::parse_lenient("???"), StageStatus::Unknown);
    }

    #[test]
    fn deserialization_is_lenient() {
        let parsed: Vec<StageStatus> =
            serde_json::from_str(r#"["IN_PROGRESS", "In Progress", "changes-requested", "???", null]"#).unwrap();
        assert_eq!(parsed,
                   vec![StageStatus::InProgress,
                        StageStatus::InProgress,
                        StageStatus::ChangesRequested,
                        StageStatus::Unknown,
                        StageStatus::Unknown]);
        assert_eq!(serde_json::to_string(&StageStatus::AtRisk).unwrap(), r#""AT_RISK""#);
    }

    #[test]
    fn strict_parse_rejects_unknown_text() {
        assert_eq!("Done".parse::<StageStatus>().unwrap(), StageStatus::Complete);
        let err = "maybe".parse::<StageStatus>().unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[test]
    fn completion_is_validated() {
        let snap = StageStatusSnapshot::new(WorkflowStage::Design, StageStatus::InProgress);
        assert!(snap.clone().with_completion(101.0).is_err());
        assert!(snap.clone().with_completion(f64::NAN).is_err());
        assert_eq!(snap.with_completion(40.0).unwrap().completion, Some(40.0));
    }

    #[test]
    fn stage_predicates() {
        let unknown = StageStatusSnapshot::unknown(WorkflowStage::Simulation);
        assert!(!unknown.has_data());
        assert!(!unknown.has_started());
        assert_eq!(unknown.effective_completion(), 0.0);

        let done = StageStatusSnapshot::new(WorkflowStage::Design, StageStatus::Approved);
        assert!(done.is_complete());
        assert_eq!(done.effective_completion(), 100.0);

        let blocked_full = StageStatusSnapshot::new(WorkflowStage::Design, StageStatus::Blocked).with_completion(100.0)
                                                                                                 .unwrap();
        assert!(!blocked_full.is_complete());

        let mut untracked = StageStatusSnapshot::unknown(WorkflowStage::Manufacture);
        untracked.completion = Some(20.0);
        assert!(untracked.has_started());
        assert!(untracked.is_in_progress());
    }

    #[test]
    fn severity_tiers_are_ordered() {
        assert!(SeverityTier::Critical > SeverityTier::High);
        assert!(SeverityTier::Low > SeverityTier::Ok);
    }
}
