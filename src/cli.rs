//! # ARMCTL CLI
//!
//! Command-line interface for the AWS resource handlers.
//!
//! Every command prints the resulting resource state as JSON on stdout; logs
//! go to stderr (`RUST_LOG` controls verbosity). Ctrl-C cancels any wait for
//! eventual consistency.
//!
//! ## Usage
//!
//! ```bash
//! # Set the security contact of the current account
//! armctl contact create --type SECURITY --email sec@example.com \
//!     --name "Security Team" --phone "+1 555 0100" --title "CISO"
//!
//! # Read a contact of another account in the organization
//! armctl contact read --id 123456789012/BILLING
//!
//! # Give an IAM user a console password, encrypted for a keybase user
//! armctl login-profile create --user alice --pgp-key keybase:alice
//!
//! # Delete it again and show what the waits cost
//! armctl --print-metrics login-profile delete --user alice
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

use aws_resource_manager::constants::DEFAULT_PASSWORD_LENGTH;
use aws_resource_manager::model::{
    AlternateContactArgs, ContactDetails, ContactType, LoginProfileArgs, LoginProfileState,
};
use aws_resource_manager::observability::metrics::gather_metrics;
use aws_resource_manager::password::generate_password;
use aws_resource_manager::resource::validation::validate_password_length;
use aws_resource_manager::runtime::{initialize, initialize_observability};

/// AWS Resource Manager CLI
#[derive(Parser)]
#[command(name = "armctl")]
#[command(about = "Manage AWS account alternate contacts and IAM login profiles", long_about = None)]
struct Cli {
    /// Print Prometheus metrics to stderr when the command finishes
    #[arg(long, global = true)]
    print_metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Account alternate contacts
    #[command(subcommand)]
    Contact(ContactCommand),
    /// IAM user login profiles
    #[command(subcommand)]
    LoginProfile(LoginProfileCommand),
    /// Print a password that satisfies the IAM password policy
    GeneratePassword {
        #[arg(short, long, default_value_t = DEFAULT_PASSWORD_LENGTH)]
        length: usize,
    },
}

#[derive(Args)]
struct ContactFields {
    /// Email address
    #[arg(long)]
    email: String,
    /// Contact name
    #[arg(long)]
    name: String,
    /// Phone number
    #[arg(long)]
    phone: String,
    /// Job title
    #[arg(long)]
    title: String,
}

impl From<ContactFields> for ContactDetails {
    fn from(fields: ContactFields) -> Self {
        ContactDetails {
            email_address: fields.email,
            name: fields.name,
            phone_number: fields.phone,
            title: fields.title,
        }
    }
}

#[derive(Subcommand)]
enum ContactCommand {
    /// Create or take over an alternate contact
    Create {
        /// Member account (defaults to the caller's account)
        #[arg(long)]
        account_id: Option<String>,
        /// BILLING, OPERATIONS or SECURITY
        #[arg(long = "type")]
        contact_type: ContactType,
        #[command(flatten)]
        fields: ContactFields,
    },
    /// Read an alternate contact
    Read {
        /// `ContactType` or `AccountID/ContactType`
        #[arg(long)]
        id: String,
    },
    /// Change the contact details
    Update {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        fields: ContactFields,
    },
    /// Delete an alternate contact
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Import an existing alternate contact
    Import {
        #[arg(long)]
        id: String,
    },
}

#[derive(Subcommand)]
enum LoginProfileCommand {
    /// Generate a password and create the login profile
    Create {
        #[arg(long)]
        user: String,
        #[arg(long, default_value_t = DEFAULT_PASSWORD_LENGTH)]
        password_length: usize,
        /// Require a new password at next sign-in
        #[arg(long)]
        password_reset_required: bool,
        /// `keybase:<username>` or a base64-encoded PGP public key
        #[arg(long)]
        pgp_key: Option<String>,
    },
    /// Refresh a login profile
    Read {
        /// IAM user name
        #[arg(long, conflicts_with = "state")]
        user: Option<String>,
        /// JSON state written by a previous `create`
        #[arg(long)]
        state: Option<PathBuf>,
    },
    /// Delete a login profile
    Delete {
        #[arg(long)]
        user: String,
    },
    /// Import an existing login profile
    Import {
        #[arg(long)]
        user: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::GeneratePassword { length } => generate_password_command(length),
        Commands::Contact(command) => contact_command(command).await,
        Commands::LoginProfile(command) => login_profile_command(command).await,
    };

    if cli.print_metrics {
        eprint!("{}", gather_metrics()?);
    }
    result
}

fn generate_password_command(length: usize) -> Result<()> {
    initialize_observability()?;
    validate_password_length(length)?;
    let password = generate_password(length)?;
    println!("{}", password.as_str());
    Ok(())
}

async fn contact_command(command: ContactCommand) -> Result<()> {
    let runtime = initialize().await?;
    let handler = &runtime.alternate_contacts;
    let cancel = Some(&runtime.cancel);

    match command {
        ContactCommand::Create {
            account_id,
            contact_type,
            fields,
        } => {
            let args = AlternateContactArgs {
                account_id,
                alternate_contact_type: contact_type,
                details: fields.into(),
            };
            print_json(&handler.create(&args, cancel).await?)
        }
        ContactCommand::Read { id } => print_json(&handler.read(&id, false).await?),
        ContactCommand::Update { id, fields } => {
            print_json(&handler.update(&id, &fields.into(), cancel).await?)
        }
        ContactCommand::Delete { id } => {
            handler.delete(&id, cancel).await?;
            eprintln!("Deleted alternate contact {id}");
            Ok(())
        }
        ContactCommand::Import { id } => print_json(&handler.import(&id).await?),
    }
}

async fn login_profile_command(command: LoginProfileCommand) -> Result<()> {
    let runtime = initialize().await?;
    let handler = &runtime.login_profiles;
    let cancel = Some(&runtime.cancel);

    match command {
        LoginProfileCommand::Create {
            user,
            password_length,
            password_reset_required,
            pgp_key,
        } => {
            let args = LoginProfileArgs {
                user,
                password_length,
                password_reset_required,
                pgp_key,
            };
            print_json(&handler.create(&args).await?)
        }
        LoginProfileCommand::Read { user, state } => {
            let state = match (user, state) {
                (_, Some(path)) => load_state(&path)?,
                (Some(user), None) => LoginProfileState::imported(user),
                (None, None) => anyhow::bail!("either --user or --state is required"),
            };
            print_json(&handler.read(&state, false, cancel).await?)
        }
        LoginProfileCommand::Delete { user } => {
            handler.delete(&user, cancel).await?;
            eprintln!("Deleted login profile for {user}");
            Ok(())
        }
        LoginProfileCommand::Import { user } => print_json(&handler.import(&user).await?),
    }
}

fn load_state(path: &Path) -> Result<LoginProfileState> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse state file {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}
