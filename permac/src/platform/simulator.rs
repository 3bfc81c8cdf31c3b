use permcore::{
    agent::Agent,
    traits::MembershipBackend,
};
use std::collections::BTreeSet;

use crate::{
    error::Error,
    platform::Platform,
};

impl Platform {
    /// Whether the agent would hold the role on a project with the key
    /// and qualifier, were the project to be created by the agent right
    /// now.  Nothing is written.
    ///
    /// The template is read as one snapshot; the agent's group memberships
    /// are read afterwards in a separate read, so a membership change that
    /// lands between the two reads is not reflected in the answer.
    pub async fn would_have_permission(
        &self,
        agent: &Agent,
        role: &str,
        project_key: &str,
        qualifier: &str,
    ) -> Result<bool, Error> {
        let Some(template) = self.resolve_default_template(project_key, qualifier).await? else {
            return Ok(false);
        };
        let group_ids = match agent.user_id() {
            Some(user_id) => self.platform.get_groups_for_user(user_id).await?
                .into_iter()
                .map(|group| group.id)
                .collect(),
            None => BTreeSet::new(),
        };
        let result = template.would_grant(agent, role, &group_ids);
        log::trace!(
            "simulated {agent} on {project_key:?} with template {:?}: {role}={result}",
            template.uuid,
        );
        Ok(result)
    }
}
