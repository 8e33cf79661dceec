mod clock;
mod engine;
mod sequence;

pub use clock::{Clock, ManualClock, SystemClock, TickGuard};
pub use engine::{SequenceTimer, Snapshot};
pub use sequence::{Sequence, Step};
