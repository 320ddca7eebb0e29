pub mod parser;
pub mod types;

pub use parser::{completed_users, parse_row, parse_rows, parse_scoreboard_file};
pub use types::{CompletionRecord, ScoreRow, UserTotals};
