use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SizeMismatch { expected: usize, actual: usize },
    ZeroDimension,
    ChannelMismatch { source: usize, target: usize },
    DimensionMismatch { expected: (usize, usize), actual: (usize, usize) },
    Singular,
    NotConfigured(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::ZeroDimension => write!(f, "dimensions must be at least 1"),
            Self::ChannelMismatch { source, target } => {
                write!(f, "channel mismatch: source has {source}, target has {target}")
            }
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: expected {}x{}, got {}x{}",
                    expected.0, expected.1, actual.0, actual.1
                )
            }
            Self::Singular => write!(f, "matrix is not invertible"),
            Self::NotConfigured(part) => write!(f, "resampler is not ready: missing {part}"),
        }
    }
}

impl std::error::Error for Error {}
