use serde::{Deserialize, Serialize};

/// The name under which the virtual group is presented externally.
pub const ANYONE: &str = "Anyone";

/// The subject of a stored grant.
///
/// The virtual "Anyone" group is a value of its own rather than a group
/// without an id, so comparisons never need to special case a missing
/// group id.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
pub enum Principal {
    User(i64),
    Group(i64),
    Anyone,
}

/// A group or the virtual group that includes every principal, as used
/// by group grants and template group entries.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
pub enum GroupRef {
    Group(i64),
    Anyone,
}

mod display;
mod impls;
