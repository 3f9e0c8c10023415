//! Row models for the `users` and `conversations` tables.

mod turn_record;
mod user_record;

pub use turn_record::TurnRecord;
pub use user_record::UserRecord;
