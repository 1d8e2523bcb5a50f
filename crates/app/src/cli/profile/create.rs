use clap::Args;
use tradein::roles::Role;
use tradein_app::{
    auth::PgAuthService,
    database::{self, Db},
    domain::profiles::{
        PgProfilesService, ProfilesService,
        models::{NewProfile, ProfileUuid},
    },
};

#[derive(Debug, Args)]
pub(crate) struct CreateProfileArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Email address of the new profile
    #[arg(long)]
    email: String,

    /// Optional display name
    #[arg(long)]
    display_name: Option<String>,

    /// Grant the administrator role
    #[arg(long)]
    admin: bool,
}

pub(crate) async fn run(args: CreateProfileArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let profiles = PgProfilesService::new(Db::new(pool.clone()));
    let auth = PgAuthService::new(pool);

    let role = if args.admin { Role::Admin } else { Role::User };

    let profile = profiles
        .create_profile(NewProfile {
            uuid: ProfileUuid::new(),
            email: args.email,
            display_name: args.display_name,
            role,
        })
        .await
        .map_err(|error| format!("failed to create profile: {error}"))?;

    let issued = auth
        .issue_api_token(profile.uuid, None)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("profile_uuid: {}", profile.uuid);
    println!("email: {}", profile.email);
    println!("role: {}", profile.role);
    println!("token_uuid: {}", issued.metadata.uuid);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
