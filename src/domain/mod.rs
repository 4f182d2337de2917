pub mod analysis;
pub mod poem;
pub mod record;

pub use analysis::{CharacterAnalysis, LearningAnalysis};
pub use poem::{Poem, PoemFilter};
pub use record::{HistoryEntry, NewLearningRecord, PositionAnswer};
