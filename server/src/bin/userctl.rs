//! Command line front end for the user dashboard.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use userdesk_server::client::{ClientError, DashboardClient, DEFAULT_BASE_URL};
use userdesk_server::models::{Role, User, UserInput};

#[derive(Debug, Parser)]
#[command(name = "userctl", about = "Manage users through the userdesk API")]
struct Cli {
    /// Base URL of the userdesk API
    #[arg(long, env = "USERDESK_URL", default_value = DEFAULT_BASE_URL)]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List users, optionally filtered by a search term
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show a single user
    Get { id: i64 },
    /// Create a user
    Create(UserArgs),
    /// Replace every field of an existing user
    Update {
        id: i64,
        #[command(flatten)]
        user: UserArgs,
    },
    /// Delete a user
    Delete { id: i64 },
}

#[derive(Debug, Args)]
struct UserArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long, default_value = "user")]
    role: Role,
}

impl From<UserArgs> for UserInput {
    fn from(args: UserArgs) -> Self {
        UserInput {
            name: args.name,
            email: args.email,
            phone: args.phone,
            role: args.role,
        }
    }
}

fn print_user(user: &User) {
    println!(
        "{:>6}  {:<24}  {:<32}  {:<10}  {}",
        user.id,
        user.name,
        user.email,
        user.role,
        user.phone.as_deref().unwrap_or("-")
    );
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    let mut client = DashboardClient::new(cli.url);

    match cli.command {
        Command::List { search } => {
            client.refresh().await?;
            if let Some(term) = search {
                client.set_search(term);
            }
            for user in client.visible() {
                print_user(user);
            }
        }
        Command::Get { id } => print_user(&client.get(id).await?),
        Command::Create(args) => print_user(&client.create(&UserInput::from(args)).await?),
        Command::Update { id, user } => print_user(&client.update(id, &UserInput::from(user)).await?),
        Command::Delete { id } => println!("{}", client.delete(id).await?),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
