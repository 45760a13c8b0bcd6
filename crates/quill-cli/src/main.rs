use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use quill_cli::seeder::{self, SEED_PASSWORD, SeedConfig};
use quill_config::AppConfig;
use quill_core::{BcryptHasher, PasswordHasher};
use quill_db::{DbError, NewUser, PgUserRepository, UserRepository};
use quill_models::{CreateUserDto, Email};
use sqlx::PgPool;
use validator::Validate;

#[derive(Parser)]
#[command(name = "quill-cli")]
#[command(about = "Quill CLI - Administrative tools for the Quill API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user account
    CreateUser {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake users, posts and comments
    Seed {
        /// Number of users to create
        #[arg(short = 'u', long, default_value = "10")]
        users: usize,

        /// Number of posts per user
        #[arg(long, default_value = "3")]
        posts_per_user: usize,

        /// Number of comments per post
        #[arg(long, default_value = "5")]
        comments_per_post: usize,
    },
    /// Clear all seeded data (users on the seed domain, with their posts and comments)
    Clear,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    let pool = quill_db::init_db_pool(&config.database)
        .await
        .context("Failed to connect to database")?;
    quill_db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    let hasher = BcryptHasher::new(config.password.bcrypt_cost);

    match cli.command {
        Commands::CreateUser {
            name,
            email,
            password,
        } => handle_create_user(pool, &hasher, name, email, password).await,
        Commands::Seed {
            users,
            posts_per_user,
            comments_per_post,
        } => {
            let config = SeedConfig::new(users)
                .with_posts_per_user(posts_per_user)
                .with_comments_per_post(comments_per_post);
            handle_seed(&pool, &hasher, &config).await
        }
        Commands::Clear => seeder::clear_all(&pool)
            .await
            .map(|_| ())
            .context("Error clearing seeded data"),
    }
}

async fn handle_create_user(
    pool: PgPool,
    hasher: &BcryptHasher,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::<String>::new().with_prompt("Name").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::<String>::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let dto = CreateUserDto {
        name,
        email,
        password,
    };
    dto.validate()?;

    let password_hash = hasher.hash(&dto.password).map_err(|e| e.error)?;
    let repo = PgUserRepository::new(pool);

    let user = match repo
        .create(NewUser {
            name: dto.name,
            email: Email::new(dto.email)?,
            password_hash,
        })
        .await
    {
        Ok(user) => user,
        Err(DbError::UniqueViolation(_)) => bail!("A user with this email already exists"),
        Err(e) => return Err(e).context("Error creating user"),
    };

    println!("\n✅ User created successfully!");
    println!("   ID: {}", user.id);
    println!("   Email: {}", user.email.as_str());
    println!("   Name: {}", user.name);

    Ok(())
}

async fn handle_seed(
    pool: &PgPool,
    hasher: &BcryptHasher,
    config: &SeedConfig,
) -> anyhow::Result<()> {
    // One digest for every seeded account; bcrypt per row would dominate the run.
    let password_hash = hasher.hash(SEED_PASSWORD).map_err(|e| e.error)?;

    seeder::seed_all(pool, config, &password_hash)
        .await
        .context("Error seeding database")?;

    Ok(())
}
