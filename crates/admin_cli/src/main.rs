use std::{error::Error, io::Write};

use clap::{Args, Parser, Subcommand};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};
use engine::{Engine, EngineError, UserType};
use migration::MigratorTrait;
use sea_orm::Database;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "kassa_admin")]
#[command(about = "Admin utilities for Kassa (bootstrap users/organizations)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:./kassa.db?mode=rwc")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    Organization(Organization),
    Branch(Branch),
    Assign(AssignArgs),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    full_name: String,
}

#[derive(Args, Debug)]
struct Organization {
    #[command(subcommand)]
    command: OrganizationCommand,
}

#[derive(Subcommand, Debug)]
enum OrganizationCommand {
    Create(OrganizationCreateArgs),
}

#[derive(Args, Debug)]
struct OrganizationCreateArgs {
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct Branch {
    #[command(subcommand)]
    command: BranchCommand,
}

#[derive(Subcommand, Debug)]
enum BranchCommand {
    Create(BranchCreateArgs),
}

#[derive(Args, Debug)]
struct BranchCreateArgs {
    #[arg(long)]
    organization: Uuid,
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct AssignArgs {
    #[arg(long)]
    user: Uuid,
    #[arg(long)]
    organization: Uuid,
    #[arg(long)]
    branch: Option<Uuid>,
    #[arg(long, default_value = "member")]
    user_type: String,
}

fn parse_user_type(raw: &str) -> Result<UserType, String> {
    match raw {
        "owner" => Ok(UserType::Owner),
        "employee" => Ok(UserType::Employee),
        "member" => Ok(UserType::Member),
        other => Err(format!("unsupported user type: {other}")),
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self, Box<dyn Error + Send + Sync>> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn prompt_password(prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    let _raw = RawModeGuard::enter()?;

    let mut out = std::io::stderr();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(prompt)
    )?;
    out.flush()?;

    let mut buf = String::new();
    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };

        match code {
            KeyCode::Enter => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                break;
            }
            KeyCode::Backspace => {
                if buf.pop().is_some() {
                    execute!(out, cursor::MoveLeft(1), Print(" "), cursor::MoveLeft(1))?;
                    out.flush()?;
                }
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                return Err("interrupted".into());
            }
            KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => {
                buf.push(ch);
                execute!(out, Print("*"))?;
                out.flush()?;
            }
            _ => {}
        }
    }

    Ok(buf)
}

fn prompt_password_twice() -> Result<String, Box<dyn Error + Send + Sync>> {
    let mut out = std::io::stderr();
    for _ in 0..3 {
        let p1 = prompt_password("Password: ")?;
        if p1.is_empty() {
            execute!(
                out,
                cursor::MoveToColumn(0),
                terminal::Clear(ClearType::CurrentLine),
                Print("Password must not be empty.\r\n")
            )?;
            continue;
        }

        let p2 = prompt_password("Confirm password: ")?;
        if p1 == p2 {
            return Ok(p1);
        }

        execute!(
            out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            Print("Passwords do not match. Try again.\r\n")
        )?;
    }

    Err("too many attempts".into())
}

async fn connect_engine(database_url: &str) -> Result<Engine, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(Engine::builder().database(db).build().await?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let engine = connect_engine(&cli.database_url).await?;

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => {
            let password = prompt_password_twice()?;

            let user = match engine
                .create_user(&args.username, &password, &args.full_name)
                .await
            {
                Ok(user) => user,
                Err(EngineError::AlreadyExists(_)) => {
                    eprintln!("user already exists: {}", args.username);
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            };
            println!("created user: {} ({})", user.username, user.id);
        }
        Command::Organization(Organization {
            command: OrganizationCommand::Create(args),
        }) => {
            let organization = engine.create_organization(&args.name).await?;
            println!("created organization: {} ({})", organization.name, organization.id);
        }
        Command::Branch(Branch {
            command: BranchCommand::Create(args),
        }) => {
            let branch = match engine.create_branch(args.organization, &args.name).await {
                Ok(branch) => branch,
                Err(EngineError::NotFound(what)) => {
                    eprintln!("{what} not found: {}", args.organization);
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            };
            println!("created branch: {} ({})", branch.name, branch.id);
        }
        Command::Assign(args) => {
            let user_type = match parse_user_type(&args.user_type) {
                Ok(v) => v,
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(2);
                }
            };

            let binding = match engine
                .assign_user(args.user, args.organization, args.branch, user_type)
                .await
            {
                Ok(binding) => binding,
                Err(EngineError::NotFound(what)) => {
                    eprintln!("{what} not found");
                    std::process::exit(1);
                }
                Err(EngineError::AlreadyExists(_)) => {
                    eprintln!("user is already assigned to that organization");
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            };
            println!("assigned {} as {}: {}", args.user, args.user_type, binding.id);
        }
    }

    Ok(())
}
