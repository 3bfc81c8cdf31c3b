use crate::user::User;
use super::Agent;

impl From<User> for Agent {
    fn from(user: User) -> Agent {
        Agent::User(user)
    }
}

impl From<Option<User>> for Agent {
    fn from(user: Option<User>) -> Agent {
        user.map(Agent::User)
            .unwrap_or(Agent::Anonymous)
    }
}

impl From<&Agent> for Option<i64> {
    fn from(agent: &Agent) -> Self {
        match agent {
            Agent::Anonymous => None,
            Agent::User(User { id, .. }) => Some(*id),
        }
    }
}

impl From<Agent> for Option<String> {
    fn from(agent: Agent) -> Self {
        match agent {
            Agent::Anonymous => None,
            Agent::User(User { login, .. }) => Some(login),
        }
    }
}

impl Agent {
    pub fn user_id(&self) -> Option<i64> {
        self.into()
    }
}
