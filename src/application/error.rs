#[derive(Debug)]
pub enum ApplicationError {
    NotFound,
    BadRequest(String),
    Unauthorized,
    /// The remote Terminal service rejected the call or could not be reached.
    Upstream(String),
    InternalError(String),
}
