// sim-domain library entry point
pub mod error;
pub mod flag;
pub mod keys;
pub mod payload;
pub mod records;
pub mod station;
pub mod workflow;

pub use error::DomainError;
pub use flag::{Flag, FlagKind, FlagSeverity};
pub use keys::{GunKey, StationKey};
pub use payload::{raw_keys, RawPayload};
pub use records::{CrossRefInput, GunForceRecord, RiserRecord, RobotRecord, SimulationStatusRecord, SourceRecord, ToolRecord,
                  WeldGunRecord};
pub use station::{AssetCounts, CrossRefResult, CrossRefStats, StationSnapshot};
pub use workflow::{BottleneckReason, SeverityTier, StageStatus, StageStatusSnapshot, WorkItemKind, WorkflowBottleneckStatus,
                   WorkflowItem, WorkflowStage};
