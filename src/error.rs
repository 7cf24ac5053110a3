use std::fmt;

/// Reasons the core can reject an operation. Every variant is recoverable:
/// the triggering call rolls back in full and prior state is untouched.
#[derive(Debug)]
pub enum Error {
    /// A ranking submission did not contain exactly one rank per speaker of
    /// the debate.
    InvalidRankingSetSize { got: usize },
    /// A rank value fell outside 1..=6.
    RankOutOfRange { rank: i64 },
    /// The submitted rank values were not a permutation of {1, ..., 6}.
    DuplicateOrMissingRank,
    /// The submitting judge holds no assignment for the debate.
    JudgeNotAssigned { judge_id: String, debate_id: String },
    /// A submitted speaker id is not one of the debate's registered speakers.
    UnknownSpeakerInRanking { speaker_id: String },
    /// A draw payload tried to register a debate without exactly six
    /// speakers.
    InvalidDebateSpeakerCount { debate_id: String, got: usize },
    /// A storage-layer fault inside an atomic sequence. The whole sequence
    /// was rolled back; callers should retry the submission.
    TransactionFailure(diesel::result::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidRankingSetSize { got } => {
                write!(f, "expected exactly 6 rankings, got {got}")
            }
            Error::RankOutOfRange { rank } => {
                write!(f, "rank {rank} is outside the valid range 1-6")
            }
            Error::DuplicateOrMissingRank => {
                write!(f, "rank values must be 1-6 with no duplicates")
            }
            Error::JudgeNotAssigned {
                judge_id,
                debate_id,
            } => {
                write!(f, "judge {judge_id} is not assigned to debate {debate_id}")
            }
            Error::UnknownSpeakerInRanking { speaker_id } => {
                write!(f, "speaker {speaker_id} is not part of this debate")
            }
            Error::InvalidDebateSpeakerCount { debate_id, got } => {
                write!(
                    f,
                    "debate {debate_id} must have exactly 6 speakers, got {got}"
                )
            }
            Error::TransactionFailure(e) => {
                write!(f, "storage failure, submission rolled back: {e}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::TransactionFailure(e) => Some(e),
            _ => None,
        }
    }
}

impl From<diesel::result::Error> for Error {
    fn from(e: diesel::result::Error) -> Self {
        Error::TransactionFailure(e)
    }
}
