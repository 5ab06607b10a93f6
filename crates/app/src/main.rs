//! Glacier Application CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use glacier_app::{
    auth::PgAuthService,
    database::{self, Db},
    domain::users::{
        PgUsersService, UsersService,
        data::NewUser,
        records::{Role, UserUuid},
    },
};
use jiff::{Span, Timestamp};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "glacier-app", about = "Glacier CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    User(UserCommand),
    Token(TokenCommand),
}

#[derive(Debug, Args)]
struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    Create(CreateUserArgs),
}

#[derive(Debug, Args)]
struct CreateUserArgs {
    /// Login email, unique across the store
    #[arg(long)]
    email: String,

    /// Display name
    #[arg(long)]
    full_name: String,

    /// Optional phone number
    #[arg(long)]
    phone: Option<String>,

    /// Role to assign
    #[arg(long, default_value = "customer")]
    role: Role,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Optional user UUID; generated when omitted
    #[arg(long)]
    user_uuid: Option<Uuid>,
}

#[derive(Debug, Args)]
struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    Create(CreateTokenArgs),
    List(ListTokensArgs),
    Revoke(RevokeTokenArgs),
}

#[derive(Debug, Args)]
struct CreateTokenArgs {
    /// User the token belongs to
    #[arg(long)]
    user_uuid: Uuid,

    /// Days until the token expires; never expires when omitted
    #[arg(long)]
    expires_in_days: Option<i64>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct ListTokensArgs {
    /// User whose tokens to list
    #[arg(long)]
    user_uuid: Uuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct RevokeTokenArgs {
    /// Token to revoke
    #[arg(long)]
    token_uuid: Uuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::User(UserCommand {
            command: UserSubcommand::Create(args),
        }) => create_user(args).await,
        Commands::Token(TokenCommand { command }) => match command {
            TokenSubcommand::Create(args) => create_token(args).await,
            TokenSubcommand::List(args) => list_tokens(args).await,
            TokenSubcommand::Revoke(args) => revoke_token(args).await,
        },
    }
}

async fn create_user(args: CreateUserArgs) -> Result<(), String> {
    let pool = connect(&args.database_url).await?;

    let users = PgUsersService::new(Db::new(pool));
    let user_uuid = args.user_uuid.map_or_else(UserUuid::new, UserUuid::from_uuid);

    let user = users
        .create_user(NewUser {
            uuid: user_uuid,
            email: args.email,
            full_name: args.full_name,
            phone: args.phone,
            role: args.role,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("email: {}", user.email);
    println!("role: {}", user.role);

    Ok(())
}

async fn create_token(args: CreateTokenArgs) -> Result<(), String> {
    let pool = connect(&args.database_url).await?;

    let auth = PgAuthService::new(pool);

    let expires_at = args
        .expires_in_days
        .map(|days| {
            Timestamp::now()
                .checked_add(Span::new().days(days))
                .map_err(|error| format!("invalid expiry: {error}"))
        })
        .transpose()?;

    let issued = auth
        .issue_api_token(UserUuid::from_uuid(args.user_uuid), expires_at)
        .await
        .map_err(|error| format!("failed to issue token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}

async fn list_tokens(args: ListTokensArgs) -> Result<(), String> {
    let pool = connect(&args.database_url).await?;

    let auth = PgAuthService::new(pool);

    let tokens = auth
        .list_api_tokens(UserUuid::from_uuid(args.user_uuid))
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    for token in tokens {
        let state = if token.revoked_at.is_some() {
            "revoked"
        } else {
            "active"
        };

        println!(
            "{} created={} last_used={} {}",
            token.uuid,
            token.created_at,
            token
                .last_used_at
                .map_or_else(|| "never".to_string(), |at| at.to_string()),
            state
        );
    }

    Ok(())
}

async fn revoke_token(args: RevokeTokenArgs) -> Result<(), String> {
    let pool = connect(&args.database_url).await?;

    let auth = PgAuthService::new(pool);

    let revoked = auth
        .revoke_api_token(args.token_uuid)
        .await
        .map_err(|error| format!("failed to revoke token: {error}"))?;

    if revoked {
        println!("token revoked");
    } else {
        println!("token was not active");
    }

    Ok(())
}

async fn connect(database_url: &str) -> Result<sqlx::PgPool, String> {
    database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))
}
