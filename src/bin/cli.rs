use chrono::Utc;
use clap::{Parser, Subcommand};
use keepactive::{
    db,
    error::FieldError,
    repositories::{SqliteReminderRepository, SqliteUserRepository},
    services::{
        company_catalog::load_companies, validation::parse_entry_date, CompanyCatalog,
        CreateUserRequest, ReminderService, UserService, UserServiceError,
    },
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "keepactive-cli")]
#[command(about = "CLI tool for operating a KeepActive deployment", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User management commands
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Company catalog commands
    Companies {
        #[command(subcommand)]
        command: CompanyCommands,
    },

    /// Reminder commands
    Reminders {
        #[command(subcommand)]
        command: ReminderCommands,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create a new user
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
enum CompanyCommands {
    /// Load a catalog file and print its companies
    Check {
        /// Catalog file (defaults to COMPANIES_CSV or companies.csv)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ReminderCommands {
    /// List reminders due on or before a date, across all users
    Due {
        /// RFC3339 instant or YYYY-MM-DD (defaults to now)
        #[arg(short, long)]
        at: Option<String>,
    },
}

fn get_password(prompt: &str) -> Result<String, Box<dyn std::error::Error>> {
    use std::io::{self, Write};
    print!("{}: ", prompt);
    io::stdout().flush()?;

    Ok(rpassword::read_password()?)
}

fn print_field_errors(errors: &[FieldError]) {
    for error in errors {
        eprintln!("  {}: {}", error.field, error.message);
    }
}

fn catalog_path(file: Option<PathBuf>) -> PathBuf {
    file.unwrap_or_else(|| {
        PathBuf::from(
            std::env::var("COMPANIES_CSV").unwrap_or_else(|_| "companies.csv".to_string()),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::User { command } => match command {
            UserCommands::Create {
                name,
                email,
                password,
            } => {
                let password = match password {
                    Some(pw) => pw,
                    None => {
                        let password = get_password("Password")?;
                        let confirm = get_password("Confirm password")?;
                        if password != confirm {
                            eprintln!("❌ Passwords do not match");
                            std::process::exit(1);
                        }
                        password
                    }
                };

                let pool = db::create_pool().await?;
                sqlx::migrate!("./migrations").run(&pool).await?;
                let user_service =
                    UserService::new(Arc::new(SqliteUserRepository::new(pool.clone())));

                let request = CreateUserRequest {
                    name,
                    email,
                    password,
                };

                match user_service.create_user(request).await {
                    Ok(user) => {
                        println!("✅ User created successfully!");
                        println!("  ID: {}", user.id);
                        println!("  Name: {}", user.name);
                        println!("  Email: {}", user.email);
                    }
                    Err(UserServiceError::Validation(errors)) => {
                        eprintln!("❌ Invalid user:");
                        print_field_errors(&errors);
                        std::process::exit(1);
                    }
                    Err(err) => {
                        eprintln!("❌ Failed to create user: {}", err);
                        std::process::exit(1);
                    }
                }
            }
        },

        Commands::Companies { command } => match command {
            CompanyCommands::Check { file } => {
                let path = catalog_path(file);
                match load_companies(&path) {
                    Ok(companies) => {
                        println!(
                            "{:<20} {:<30} {:<10} {}",
                            "ID", "Name", "Days", "Policy"
                        );
                        println!("{}", "-".repeat(80));
                        for company in &companies {
                            let days = if company.is_custom() {
                                "custom".to_string()
                            } else {
                                company.days_before_deactivation.to_string()
                            };
                            println!(
                                "{:<20} {:<30} {:<10} {}",
                                company.id,
                                company.name,
                                days,
                                company.policy_link.as_deref().unwrap_or("N/A")
                            );
                        }
                        println!("✅ {} companies loaded from {}", companies.len(), path.display());
                    }
                    Err(err) => {
                        eprintln!("❌ Failed to load {}: {}", path.display(), err);
                        std::process::exit(1);
                    }
                }
            }
        },

        Commands::Reminders { command } => match command {
            ReminderCommands::Due { at } => {
                let at = match at {
                    Some(raw) => match parse_entry_date(&raw) {
                        Some(at) => at,
                        None => {
                            eprintln!("❌ Invalid date '{}'", raw);
                            std::process::exit(1);
                        }
                    },
                    None => Utc::now(),
                };

                let pool = db::create_pool().await?;
                sqlx::migrate!("./migrations").run(&pool).await?;
                let reminder_service = ReminderService::new(
                    Arc::new(SqliteReminderRepository::new(pool.clone())),
                    Arc::new(CompanyCatalog::from_companies(Vec::new())),
                );

                match reminder_service.list_due(at).await {
                    Ok(due) => {
                        if due.is_empty() {
                            println!("No reminders due on or before {}.", at.to_rfc3339());
                        } else {
                            println!(
                                "{:<38} {:<30} {:<20} {:<25} {}",
                                "ID", "Owner", "Company", "Account", "Send date"
                            );
                            println!("{}", "-".repeat(140));
                            for reminder in due {
                                println!(
                                    "{:<38} {:<30} {:<20} {:<25} {}",
                                    reminder.id,
                                    reminder.user_email,
                                    reminder.company_id,
                                    reminder.company_user_id,
                                    reminder.next_send_date.to_rfc3339()
                                );
                            }
                        }
                    }
                    Err(err) => {
                        eprintln!("❌ Failed to list due reminders: {}", err);
                        std::process::exit(1);
                    }
                }
            }
        },
    }

    Ok(())
}
