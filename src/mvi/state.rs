/// Marker trait for reducible state.
///
/// States are small values: `Clone` to produce the next one, `PartialEq` so
/// owners can tell whether a reduction changed anything.
pub trait State: Clone + PartialEq + Default + Send + 'static {}
