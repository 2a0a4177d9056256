//! `flock-spawn` — building the initial population.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`spawner`]  | `SpawnerInfo` — where and how many agents to create       |
//! | [`batch`]    | `SpawnPlan`, `SpawnCursor`, `SpawnBatch`                  |
//! | [`loader`]   | `load_spawners_csv`, `load_spawners_reader`               |
//! | [`error`]    | `SpawnError`, `SpawnResult<T>`                            |
//!
//! # Incremental spawning
//!
//! Large populations are produced in bounded batches so the caller can
//! interleave them with other work:
//!
//! ```text
//! cursor = SpawnCursor::START
//! loop:
//!   batch  = plan.next_batch(cursor, &provider)?
//!   append batch.records
//!   if !batch.more: break
//!   cursor = batch.next
//! store.allocate(all_records)
//! ```
//!
//! Every agent's random draws are seeded from its global index, so the
//! population is identical whatever the batch size.

pub mod batch;
pub mod error;
pub mod loader;
pub mod spawner;


pub use batch::{SpawnBatch, SpawnCursor, SpawnPlan};
pub use error::{SpawnError, SpawnResult};
pub use loader::{load_spawners_csv, load_spawners_reader};
pub use spawner::SpawnerInfo;
