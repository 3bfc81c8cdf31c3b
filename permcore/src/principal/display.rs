use std::fmt::{
    Display,
    Formatter,
    Result,
};

use super::{
    ANYONE,
    GroupRef,
    Principal,
};

impl Display for Principal {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Principal::User(id) => write!(f, "<User:{id}>"),
            Principal::Group(id) => write!(f, "<Group:{id}>"),
            Principal::Anyone => write!(f, "<Group:{ANYONE}>"),
        }
    }
}

impl Display for GroupRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        Principal::from(*self).fmt(f)
    }
}
