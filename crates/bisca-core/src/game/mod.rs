pub mod config;
pub mod declaration;
pub mod engine;
pub mod play;
pub mod policy;
pub mod scheduler;
pub mod scoring;
pub mod serialization;
pub mod state;
pub mod store;

pub use config::{Delays, GameConfig};
pub use declaration::{DeclareError, DeclareOutcome};
pub use engine::{Game, StartError};
pub use play::{PlayError, PlayOutcome};
pub use policy::{BotPolicy, BotView};
pub use scheduler::{Scheduler, Task, TaskId, TaskKind, VirtualScheduler};
pub use serialization::{GameSnapshot, RestoreError};
pub use state::{GamePhase, GameState};
pub use store::{MemoryStore, SNAPSHOT_KEY, SnapshotStore, StoreError};
