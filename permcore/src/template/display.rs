use std::fmt::{
    Display,
    Formatter,
    Result,
};

use super::TemplateRef;

impl Display for TemplateRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            TemplateRef::Uuid(uuid) => write!(f, "uuid {uuid:?}"),
            TemplateRef::Name(name) => write!(f, "name {name:?}"),
        }
    }
}
