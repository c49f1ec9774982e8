//! Health Coach CLI
//!
//! Command-line client for the Health Coach API:
//! - Log in, register, log out
//! - Show the current user
//! - View and edit the health profile
//! - Check API status

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use healthcoach::api::dto::ProfileRequest;
use healthcoach::client::{
    ApiClient, AuthForm, ClientConfig, ClientError, FileTokenStore, Session, DEFAULT_API_BASE,
};
use healthcoach::config::generate_default_config;
use healthcoach::store::HealthProfile;
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "healthcoach")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Your AI personal trainer, from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (including /api)
    #[arg(long, default_value = DEFAULT_API_BASE, global = true)]
    pub api_url: String,

    /// Where the access token is kept (default: user data dir)
    #[arg(long, global = true)]
    pub token_file: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Log requests and failures to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the access token
    Login {
        email: String,
        /// Password (prompted on stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account and store the access token
    Register {
        email: String,
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        age: i64,
        /// male or female
        #[arg(short, long, default_value = "male")]
        gender: String,
        /// Password (prompted on stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Show the logged-in user
    Whoami,

    /// Forget the stored access token
    Logout,

    /// View or edit the health profile
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Show API status
    Status,

    /// Generate default server config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Print the saved profile
    Show,

    /// Create or replace the profile
    Set {
        /// Height in cm
        #[arg(long)]
        height: f64,
        /// Weight in kg
        #[arg(long)]
        weight: f64,
        #[arg(long)]
        body_fat: Option<f64>,
        /// beginner, intermediate, advanced
        #[arg(long, default_value = "beginner")]
        level: String,
        /// home, gym, outdoor
        #[arg(long, default_value = "home")]
        environment: String,
        /// Comma-separated, e.g. weight_loss,endurance
        #[arg(long, value_delimiter = ',')]
        goals: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        conditions: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        medications: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        preferred: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        avoid: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        equipment: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        healthcoach::logging::init_stderr("debug");
    }

    let client = ApiClient::new(ClientConfig::new(&cli.api_url))?;
    let tokens = match &cli.token_file {
        Some(path) => FileTokenStore::new(path),
        None => FileTokenStore::default_location(),
    };
    let mut session = Session::new(client, tokens);

    match cli.command {
        Commands::Login { email, password } => {
            let password = password_or_prompt(password)?;
            let user = session
                .submit(AuthForm::Login { email, password })
                .await
                .map_err(user_facing)?;
            println!("Hello, {}!", user.name);
        }

        Commands::Register {
            email,
            name,
            age,
            gender,
            password,
        } => {
            let password = password_or_prompt(password)?;
            let user = session
                .submit(AuthForm::Register {
                    email,
                    password,
                    name,
                    age,
                    gender,
                })
                .await
                .map_err(user_facing)?;
            println!("Welcome, {}! Your account is ready.", user.name);
        }

        Commands::Whoami => {
            require_login(&mut session).await?;
            let user = session.user().context("session has no user")?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(user)?);
            } else {
                println!("Name:    {}", user.name);
                println!("Email:   {}", user.email);
                println!("Age:     {}", user.age);
                println!("Gender:  {}", user.gender);
                println!("Joined:  {}", user.created_at.format("%Y-%m-%d"));
            }
        }

        Commands::Logout => {
            session.logout();
            println!("Logged out.");
        }

        Commands::Profile { action } => {
            require_login(&mut session).await?;

            match action {
                ProfileCommand::Show => {
                    match session.client().get_profile().await.map_err(user_facing)? {
                        Some(profile) if cli.format == "json" => {
                            println!("{}", serde_json::to_string_pretty(&profile)?);
                        }
                        Some(profile) => print_profile(&profile),
                        None => {
                            println!("No health profile yet.");
                            println!();
                            println!("Create one with:");
                            println!("  healthcoach profile set --height 170 --weight 65");
                        }
                    }
                }
                ProfileCommand::Set {
                    height,
                    weight,
                    body_fat,
                    level,
                    environment,
                    goals,
                    conditions,
                    medications,
                    preferred,
                    avoid,
                    equipment,
                } => {
                    let request = ProfileRequest {
                        height,
                        weight,
                        body_fat_percentage: body_fat,
                        health_conditions: conditions,
                        medications,
                        fitness_level: level,
                        fitness_goals: goals,
                        preferred_exercises: preferred,
                        avoid_exercises: avoid,
                        available_equipment: equipment,
                        workout_environment: environment,
                    };

                    let saved = session
                        .client()
                        .save_profile(&request)
                        .await
                        .map_err(user_facing)?;
                    println!("{}", saved.message);
                }
            }
        }

        Commands::Status => match session.client().root().await {
            Ok(root) => {
                println!("{} v{}", root.message, root.version);
                println!("API: {}", session.client().base_url());
                println!("Token file: {}", session.token_store().path().display());
            }
            Err(e) => {
                eprintln!("Cannot connect to Health Coach API at {}", cli.api_url);
                eprintln!("Error: {}", e);
                eprintln!();
                eprintln!("Make sure the API server is running:");
                eprintln!("  cargo run --bin healthcoach-api");
                std::process::exit(1);
            }
        },

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Run the startup identity check, failing when there is no valid login
async fn require_login(session: &mut Session<FileTokenStore>) -> anyhow::Result<()> {
    if !session.restore().await.is_authenticated() {
        bail!("Not logged in. Run `healthcoach login <email>` first.");
    }
    Ok(())
}

fn password_or_prompt(password: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    print!("Password: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();

    if password.is_empty() {
        bail!("Password cannot be empty");
    }
    Ok(password)
}

/// Reduce a client error to the one message a user sees
fn user_facing(err: ClientError) -> anyhow::Error {
    tracing::debug!(error = %err, "Request failed");
    anyhow::anyhow!(err.user_message())
}

fn print_profile(profile: &HealthProfile) {
    let f = &profile.fields;

    println!("Height:        {:.1} cm", f.height);
    println!("Weight:        {:.1} kg", f.weight);
    if let Some(bf) = f.body_fat_percentage {
        println!("Body fat:      {:.1} %", bf);
    }
    if f.height > 0.0 {
        let meters = f.height / 100.0;
        println!("BMI:           {:.1}", f.weight / (meters * meters));
    }
    println!("Fitness level: {}", f.fitness_level);
    println!("Environment:   {}", f.workout_environment);
    print_list("Goals", &f.fitness_goals);
    print_list("Conditions", &f.health_conditions);
    print_list("Medications", &f.medications);
    print_list("Preferred", &f.preferred_exercises);
    print_list("Avoid", &f.avoid_exercises);
    print_list("Equipment", &f.available_equipment);
    println!("Updated:       {}", profile.updated_at.format("%Y-%m-%d %H:%M"));
}

fn print_list(label: &str, items: &[String]) {
    if !items.is_empty() {
        println!("{:<15}{}", format!("{}:", label), items.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["healthcoach", "whoami", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Whoami));

        let quiet = Cli::try_parse_from(["healthcoach", "status"]).unwrap();
        assert!(!quiet.verbose);
        assert_eq!(quiet.api_url, DEFAULT_API_BASE);
    }

    #[test]
    fn test_profile_set_splits_lists() {
        let cli = Cli::try_parse_from([
            "healthcoach", "-v", "profile", "set", "--height", "170", "--weight", "65",
            "--goals", "endurance,weight_loss",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Profile {
                action: ProfileCommand::Set { goals, level, .. },
            } => {
                assert_eq!(goals, vec!["endurance", "weight_loss"]);
                assert_eq!(level, "beginner");
            }
            _ => panic!("expected profile set"),
        }
    }
}
