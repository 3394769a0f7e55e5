//! CLI command definitions and subcommands

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use outreach::models::{ContactDraft, ContactId};

/// Outreach - manage HR contacts and send your resume
#[derive(Parser)]
#[command(name = "outreach", about = "Manage HR contacts and send resumes", version)]
pub struct Cli {
    /// Backend base URL (overrides API_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage stored HR contacts
    Contacts {
        #[command(subcommand)]
        action: ContactsCommand,
    },

    /// Send a resume to every contact, or to one with --to
    Send {
        /// Resume file (.pdf, .doc or .docx, up to 5 MB)
        #[arg(short, long)]
        resume: PathBuf,

        /// Only send to this contact id
        #[arg(long)]
        to: Option<ContactId>,
    },

    /// Show sent email logs
    Logs {
        #[arg(short, long)]
        limit: Option<u32>,

        #[arg(short, long)]
        page: Option<u32>,
    },

    /// Show email statistics
    Stats,

    /// Show an analytics report
    Analytics {
        /// Report name, e.g. "overview"
        report: String,
    },

    /// Show the sender profile
    Profile,

    /// Show user settings
    Settings,
}

#[derive(Subcommand)]
pub enum ContactsCommand {
    /// List all contacts
    List,

    /// Add a contact
    Add(ContactArgs),

    /// Replace a contact's details
    Update {
        id: ContactId,

        #[command(flatten)]
        contact: ContactArgs,
    },

    /// Delete a contact
    Delete { id: ContactId },
}

#[derive(Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub hr_name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub company: String,

    #[arg(long)]
    pub position: String,

    /// Required skill (repeatable)
    #[arg(long = "skill")]
    pub skills: Vec<String>,
}

impl From<ContactArgs> for ContactDraft {
    fn from(args: ContactArgs) -> Self {
        ContactDraft {
            hr_name: args.hr_name,
            email: args.email,
            company_name: args.company,
            job_position: args.position,
            required_skills: args.skills,
        }
    }
}
