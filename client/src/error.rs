#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("server is full")]
    ServerFull,
    #[error("connection closed by server")]
    Closed,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
