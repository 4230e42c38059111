pub mod export_routine;
pub mod routine;

pub use export_routine::{run_export, ExportRoutine};
pub use routine::{Routine, RoutineError};
