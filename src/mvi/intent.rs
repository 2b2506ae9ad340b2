/// Marker trait for the requests a reducer understands.
pub trait Intent: Send + 'static {}
