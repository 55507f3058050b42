pub mod attempt;
pub mod flashcard;
pub mod marking;
pub mod progress;

pub use attempt::{ErrorReason, OutcomeStatus, QuestionOutcome, SubjectResult, TestAttempt, TotalResult};
pub use flashcard::FlashcardState;
pub use marking::MarkingScheme;
pub use progress::{StrengthTag, SyllabusTopic, TopicProgress, TopicStatus, WeightageTier};
