use clap::{
    Parser,
    Subcommand,
};
use permac::{
    platform::Builder as PlatformBuilder,
    Platform,
    Settings,
};
use permcore::{
    agent::Agent,
    platform::ConnectorOption,
    project::qualifier,
    scope::Scope,
    template::TemplateRef,
};
use permdb::Backend;
use std::path::PathBuf;

#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[clap(long, value_name = "PERMAC_DB_URL", env = "PERMAC_DB_URL")]
    permac_db_url: String,
    /// JSON file holding the settings
    #[clap(long, value_name = "PERMAC_SETTINGS", env = "PERMAC_SETTINGS")]
    permac_settings: Option<PathBuf>,
    /// Uuid of the default template; overrides the settings file
    #[clap(long, value_name = "PERMAC_DEFAULT_TEMPLATE", env = "PERMAC_DEFAULT_TEMPLATE")]
    permac_default_template: Option<String>,
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(arg_required_else_help = true)]
    User {
        #[command(subcommand)]
        cmd: UserCmd,
    },
    #[command(arg_required_else_help = true)]
    Group {
        #[command(subcommand)]
        cmd: GroupCmd,
    },
    #[command(arg_required_else_help = true)]
    Project {
        #[command(subcommand)]
        cmd: ProjectCmd,
    },
    #[command(arg_required_else_help = true)]
    Template {
        #[command(subcommand)]
        cmd: TemplateCmd,
    },
    /// Reports whether the default template would grant the role
    #[command(arg_required_else_help = true)]
    Simulate {
        role: String,
        project_key: String,
        #[clap(long, default_value = qualifier::PROJECT)]
        qualifier: String,
        /// Simulate for this user instead of an anonymous visitor
        #[clap(long)]
        login: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum UserCmd {
    #[command(arg_required_else_help = true)]
    Create {
        login: String,
        name: String,
    },
    #[command(arg_required_else_help = true)]
    Status {
        login: String,
    },
    #[command(arg_required_else_help = true)]
    Grant {
        login: String,
        role: String,
        #[clap(long)]
        project: Option<String>,
    },
    #[command(arg_required_else_help = true)]
    Revoke {
        login: String,
        role: String,
        #[clap(long)]
        project: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum GroupCmd {
    #[command(arg_required_else_help = true)]
    Create {
        name: String,
        #[clap(long)]
        description: Option<String>,
    },
    #[command(arg_required_else_help = true)]
    Join {
        group: String,
        login: String,
    },
    #[command(arg_required_else_help = true)]
    Leave {
        group: String,
        login: String,
    },
    /// Grants a role to the group; the group may be "anyone"
    #[command(arg_required_else_help = true)]
    Grant {
        group: String,
        role: String,
        #[clap(long)]
        project: Option<String>,
    },
    #[command(arg_required_else_help = true)]
    Revoke {
        group: String,
        role: String,
        #[clap(long)]
        project: Option<String>,
    },
    #[command(arg_required_else_help = true)]
    Status {
        group: String,
        #[clap(long)]
        project: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum ProjectCmd {
    /// Creates the project and applies the default template
    #[command(arg_required_else_help = true)]
    Create {
        key: String,
        name: String,
        #[clap(long, default_value = qualifier::PROJECT)]
        qualifier: String,
        /// Login of the user creating the project
        #[clap(long)]
        creator: Option<String>,
    },
    #[command(arg_required_else_help = true)]
    Status {
        key: String,
    },
}

#[derive(Debug, Subcommand)]
enum TemplateCmd {
    #[command(arg_required_else_help = true)]
    Create {
        uuid: String,
        name: String,
        #[clap(long)]
        description: Option<String>,
        #[clap(long)]
        key_pattern: Option<String>,
    },
    List,
    #[command(arg_required_else_help = true)]
    Status {
        uuid: String,
    },
    #[command(arg_required_else_help = true)]
    AddUser {
        uuid: String,
        login: String,
        role: String,
    },
    #[command(arg_required_else_help = true)]
    RemoveUser {
        uuid: String,
        login: String,
        role: String,
    },
    #[command(arg_required_else_help = true)]
    AddGroup {
        uuid: String,
        group: String,
        role: String,
    },
    #[command(arg_required_else_help = true)]
    RemoveGroup {
        uuid: String,
        group: String,
        role: String,
    },
    /// Sets whether the project creator receives the role
    #[command(arg_required_else_help = true)]
    Creator {
        uuid: String,
        role: String,
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    #[command(arg_required_else_help = true)]
    Apply {
        uuid: String,
        project_key: String,
        #[clap(long)]
        creator: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    stderrlog::new()
        .module(module_path!())
        .module("permac")
        .module("permdb")
        .module("permdb_sqlite")
        .verbosity((args.verbose as usize) + 1)
        .timestamp(stderrlog::Timestamp::Second)
        .init()
        .unwrap();

    let mut settings = match args.permac_settings {
        Some(path) => serde_json::from_str::<Settings>(&std::fs::read_to_string(path)?)?,
        None => Settings::default(),
    };
    if args.permac_default_template.is_some() {
        settings.default_template = args.permac_default_template;
    }

    let platform = PlatformBuilder::new()
        .arc_platform(
            Backend::perm(
                ConnectorOption::from(args.permac_db_url)
                    .create_db(true)
            )
                .await
                .map_err(anyhow::Error::from_boxed)?
        )
        .settings(settings)
        .build();

    match args.command {
        Commands::User { cmd } => {
            parse_user(&platform, cmd).await?;
        },
        Commands::Group { cmd } => {
            parse_group(&platform, cmd).await?;
        },
        Commands::Project { cmd } => {
            parse_project(&platform, cmd).await?;
        },
        Commands::Template { cmd } => {
            parse_template(&platform, cmd).await?;
        },
        Commands::Simulate { role, project_key, qualifier, login } => {
            let agent = match login {
                Some(login) => Agent::from(platform.get_user_by_login(&login).await?),
                None => Agent::Anonymous,
            };
            let result = platform.would_have_permission(&agent, &role, &project_key, &qualifier).await?;
            println!("{agent} would hold role {role} on new project {project_key}: {result}");
        },
    }

    Ok(())
}

async fn scope(
    platform: &Platform,
    project: Option<String>,
) -> anyhow::Result<Scope> {
    Ok(match project {
        Some(key) => Scope::Project(platform.get_project_by_key(&key).await?.id),
        None => Scope::Global,
    })
}

async fn creator_id(
    platform: &Platform,
    login: Option<String>,
) -> anyhow::Result<Option<i64>> {
    Ok(match login {
        Some(login) => Some(platform.get_user_by_login(&login).await?.id),
        None => None,
    })
}

fn join<T: ToString>(items: impl IntoIterator<Item = T>) -> String {
    items.into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

async fn parse_user(
    platform: &Platform,
    arg: UserCmd,
) -> anyhow::Result<()> {
    match arg {
        UserCmd::Create { login, name } => {
            let user = platform.create_user(&login, &name).await?;
            println!("user {login:?} created with id {}", user.id);
        }
        UserCmd::Status { login } => {
            let user = platform.get_user_by_login(&login).await?;
            println!("id: {}", user.id);
            println!("login: {}", user.login);
            println!("name: {}", user.name);
            println!("created_ts: {}", user.created_ts);
            let groups = platform.groups_of_user(user.id).await?;
            println!("groups: [{}]", join(groups.into_iter().map(|group| group.name)));
            let roles = platform.user_roles(&login, Scope::Global).await?;
            println!("global role(s): [{}]", join(roles));
        }
        UserCmd::Grant { login, role, project } => {
            let user = platform.get_user_by_login(&login).await?;
            let scope = scope(platform, project).await?;
            if platform.grant_user_role(user.id, role.as_str(), scope).await? {
                println!("role {role} granted to {login} on {scope}");
            } else {
                println!("role {role} was already granted to {login} on {scope}");
            }
        }
        UserCmd::Revoke { login, role, project } => {
            let user = platform.get_user_by_login(&login).await?;
            let scope = scope(platform, project).await?;
            if platform.revoke_user_role(user.id, role.as_str(), scope).await? {
                println!("role {role} revoked from {login} on {scope}");
            } else {
                println!("{login} has no role {role} on {scope} to be revoked");
            }
        }
    }
    Ok(())
}

async fn parse_group(
    platform: &Platform,
    arg: GroupCmd,
) -> anyhow::Result<()> {
    match arg {
        GroupCmd::Create { name, description } => {
            let group = platform.create_group(
                platform.organization(),
                &name,
                description.as_deref(),
            ).await?;
            println!("group {name:?} created with id {}", group.id);
        }
        GroupCmd::Join { group, login } => {
            if platform.add_user_to_group(&login, &group).await? {
                println!("{login} added to group {group}");
            } else {
                println!("{login} is already a member of group {group}");
            }
        }
        GroupCmd::Leave { group, login } => {
            if platform.remove_user_from_group(&login, &group).await? {
                println!("{login} removed from group {group}");
            } else {
                println!("{login} is not a member of group {group}");
            }
        }
        GroupCmd::Grant { group, role, project } => {
            let scope = scope(platform, project).await?;
            if platform.grant_group_role(&group, role.as_str(), scope).await? {
                println!("role {role} granted to group {group} on {scope}");
            } else {
                println!("role {role} was already granted to group {group} on {scope}");
            }
        }
        GroupCmd::Revoke { group, role, project } => {
            let scope = scope(platform, project).await?;
            if platform.revoke_group_role(&group, role.as_str(), scope).await? {
                println!("role {role} revoked from group {group} on {scope}");
            } else {
                println!("group {group} has no role {role} on {scope} to be revoked");
            }
        }
        GroupCmd::Status { group, project } => {
            let scope = scope(platform, project).await?;
            let roles = platform.group_roles(&group, scope).await?;
            println!("group {group} holds role(s) on {scope}: [{}]", join(roles));
        }
    }
    Ok(())
}

async fn parse_project(
    platform: &Platform,
    arg: ProjectCmd,
) -> anyhow::Result<()> {
    match arg {
        ProjectCmd::Create { key, name, qualifier, creator } => {
            let creator = creator_id(platform, creator).await?;
            let project = platform.create_project(&key, &qualifier, &name).await?;
            println!("project {key:?} created with id {}", project.id);
            if platform.apply_default_template(project.id, creator).await? {
                println!("default template applied to project {key:?}");
            } else {
                println!("no default template applied to project {key:?}");
            }
        }
        ProjectCmd::Status { key } => {
            let project = platform.get_project_by_key(&key).await?;
            println!("id: {}", project.id);
            println!("qualifier: {}", project.qualifier);
            println!("name: {}", project.name);
            match project.authorization_updated_ts {
                Some(ts) => println!("authorization_updated_ts: {ts}"),
                None => println!("authorization_updated_ts: never"),
            }
            for grant in platform.project_grants(project.id).await?.into_iter() {
                println!("{} granted role {}", grant.principal, grant.role);
            }
        }
    }
    Ok(())
}

async fn parse_template(
    platform: &Platform,
    arg: TemplateCmd,
) -> anyhow::Result<()> {
    match arg {
        TemplateCmd::Create { uuid, name, description, key_pattern } => {
            let template = platform.create_template(
                &uuid,
                &name,
                description.as_deref(),
                key_pattern.as_deref(),
            ).await?;
            println!("template {name:?} created with id {}", template.id);
        }
        TemplateCmd::List => {
            for template in platform.list_templates().await?.into_iter() {
                println!("{}: {}", template.uuid, template.name);
            }
        }
        TemplateCmd::Status { uuid } => {
            let template = platform.get_template(&TemplateRef::Uuid(uuid)).await?;
            println!("{}", serde_json::to_string_pretty(&template)?);
        }
        TemplateCmd::AddUser { uuid, login, role } => {
            let added = platform.add_user_to_template(&TemplateRef::Uuid(uuid), &login, role.as_str()).await?;
            println!("user {login} with role {role} added: {added}");
        }
        TemplateCmd::RemoveUser { uuid, login, role } => {
            let removed = platform.remove_user_from_template(&TemplateRef::Uuid(uuid), &login, role.as_str()).await?;
            println!("user {login} with role {role} removed: {removed}");
        }
        TemplateCmd::AddGroup { uuid, group, role } => {
            let added = platform.add_group_to_template(&TemplateRef::Uuid(uuid), &group, role.as_str()).await?;
            println!("group {group} with role {role} added: {added}");
        }
        TemplateCmd::RemoveGroup { uuid, group, role } => {
            let removed = platform.remove_group_from_template(&TemplateRef::Uuid(uuid), &group, role.as_str()).await?;
            println!("group {group} with role {role} removed: {removed}");
        }
        TemplateCmd::Creator { uuid, role, enabled } => {
            platform.set_template_characteristic(&TemplateRef::Uuid(uuid), role.as_str(), enabled).await?;
            println!("project creator receives role {role}: {enabled}");
        }
        TemplateCmd::Apply { uuid, project_key, creator } => {
            let creator = creator_id(platform, creator).await?;
            let project = platform.get_project_by_key(&project_key).await?;
            platform.apply_template(&TemplateRef::Uuid(uuid), project.id, creator).await?;
            println!("template applied to project {project_key:?}");
        }
    }
    Ok(())
}
