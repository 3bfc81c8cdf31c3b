use serde::{Deserialize, Serialize};
use super::user::User;

/// The caller being evaluated by the simulator.  Unlike a `Principal`
/// this is never persisted; `Anonymous` denotes the unauthenticated
/// visitor.
#[derive(Clone, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
pub enum Agent {
    #[default]
    Anonymous,
    User(User),
}

mod display;
mod impls;
