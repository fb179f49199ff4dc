use thiserror::Error;

pub type DeserializeResult<T> = core::result::Result<T, DeserializeError>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeserializeError {
    #[error("Empty input")]
    EmptyInput,

    #[error("Incomplete input")]
    IncompleteInput,

    #[error("Invalid input")]
    InvalidInput,

    #[error("Nesting too deep")]
    TooDeep,

    #[error("Stream read failed")]
    StreamRead,

    #[error("Buffer overflow")]
    BufferOverflow,

    #[error("Structure mismatch: {0}")]
    StructureMismatch(&'static str),
}

impl DeserializeError {
    /// JSON 本身损坏或不完整（区别于容量溢出与结构不符）
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::IncompleteInput
                | Self::InvalidInput
                | Self::TooDeep
                | Self::StreamRead
        )
    }
}
