// Text command parsing: one input line in, one tagged Command out.

use crate::model::CommandError;
use crate::utils::parse_iso_date;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    Trend,
    Highest,
    BestDay,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 3] = [AnalysisKind::Trend, AnalysisKind::Highest, AnalysisKind::BestDay];

    pub fn keyword(self) -> &'static str {
        match self {
            AnalysisKind::Trend => "trend",
            AnalysisKind::Highest => "highest",
            AnalysisKind::BestDay => "best_day",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AnalysisKind::Trend => "longest run of consecutive daily price decreases",
            AnalysisKind::Highest => "day with the highest trading volume",
            AnalysisKind::BestDay => "best pair of days to buy and then sell",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line.
    Empty,
    Help,
    Quit,
    /// Wrong number of tokens for an analysis command.
    Malformed,
    /// Three tokens, but the first one names no command.
    Unknown(String),
    Analyze {
        kind: AnalysisKind,
        start: NaiveDate,
        end: NaiveDate,
    },
}

/// Parses `<command> <start> <end>`, `help`, `quit` or `exit`.
///
/// Shape problems never fail: they come back as [`Command::Empty`],
/// [`Command::Malformed`] or [`Command::Unknown`]. Only a date token that is
/// not `YYYY-MM-DD` on an otherwise valid analysis command is an error.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(first) = tokens.first() else {
        return Ok(Command::Empty);
    };

    let keyword = first.to_lowercase();
    match keyword.as_str() {
        "help" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    if tokens.len() != 3 {
        return Ok(Command::Malformed);
    }
    let Some(kind) = AnalysisKind::from_keyword(&keyword) else {
        return Ok(Command::Unknown(keyword));
    };

    Ok(Command::Analyze {
        kind,
        start: parse_date_token(tokens[1])?,
        end: parse_date_token(tokens[2])?,
    })
}

fn parse_date_token(token: &str) -> Result<NaiveDate, CommandError> {
    parse_iso_date(token).map_err(|source| CommandError::InvalidDate {
        token: token.to_string(),
        source,
    })
}
