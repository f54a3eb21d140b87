pub mod encounters;
pub mod questions;
pub mod users;
pub mod votes;

pub use encounters::CreateEncounterData;
pub use questions::{CreateQuestionData, QuestionType, UpdateQuestionData};
pub use votes::{CreateVoteData, VoteKind};
