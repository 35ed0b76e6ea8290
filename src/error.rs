use core::fmt;

/// Contract violations raised by the geometry kernel and level loading.
///
/// None of these are expected while a game runs: the frame transition guards
/// its inputs before calling into the kernel, so seeing one of these in a
/// test means a caller broke an invariant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimError {
    /// Normalizing (or taking the perpendicular of) the zero vector
    ZeroVector,
    /// A point query was handed an empty sequence
    EmptyInput,
    /// Polygon with fewer than three vertices
    TooFewVertices { found: usize },
    /// Level data could not be parsed
    LevelData(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroVector => write!(f, "cannot normalize the zero vector"),
            Self::EmptyInput => write!(f, "point sequence is empty"),
            Self::TooFewVertices { found } => {
                write!(f, "polygon needs at least 3 points, got {found}")
            }
            Self::LevelData(msg) => write!(f, "invalid level data: {msg}"),
        }
    }
}

impl std::error::Error for SimError {}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        Self::LevelData(err.to_string())
    }
}

pub type SimResult<T> = Result<T, SimError>;
