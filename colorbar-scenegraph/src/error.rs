use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorbarSceneGraphError {
    #[error("Internal error: `{0}`")]
    InternalError(String),

    #[error("Mark `{mark}` has {len} items but channel `{channel}` holds {actual} values")]
    ChannelLengthMismatch {
        mark: String,
        channel: String,
        len: u32,
        actual: usize,
    },

    #[error("Mark `{mark}` has an index {index} out of bounds for length {len}")]
    IndexOutOfBounds { mark: String, index: usize, len: u32 },

    #[error("No group at path {0:?}")]
    InvalidGroupPath(Vec<usize>),
}
