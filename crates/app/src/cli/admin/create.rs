use clap::Args;
use quarry_app::{
    auth::password::hash_password,
    database,
    domain::users::{
        PgUsersRepository, UsersRepository,
        data::NewUserRecord,
        records::{Role, UserUuid},
    },
};

/// Admin accounts are provisioned here rather than through the public
/// registration endpoint.
#[derive(Debug, Args)]
pub(crate) struct CreateAdminArgs {
    /// Admin email address
    #[arg(long)]
    email: String,

    /// Admin display name
    #[arg(long)]
    name: String,

    /// Admin password
    #[arg(long, env = "QUARRY_ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateAdminArgs) -> Result<(), String> {
    if args.password.len() < 8 {
        return Err("password must be at least 8 characters".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let password_hash =
        hash_password(&args.password).map_err(|error| format!("failed to hash password: {error}"))?;

    let repository = PgUsersRepository::new(pool);
    let admin = repository
        .insert_user(NewUserRecord {
            uuid: UserUuid::new(),
            email: args.email,
            password_hash,
            role: Role::Admin,
            name: args.name,
            company: None,
            phone: None,
            active: true,
        })
        .await
        .map_err(|error| format!("failed to create admin: {error}"))?;

    println!("admin_uuid: {}", admin.uuid);
    println!("admin_email: {}", admin.email);

    Ok(())
}
