use clap::{Parser, Subcommand};
use shared::Selector;
use shared::models::{ComplaintCategory, ComplaintId, ComplaintPriority, ComplaintStatus};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "civic")]
#[command(about = "Citizen complaint portal client", long_about = None)]
pub struct Cli {
    /// API root, e.g. http://127.0.0.1:8000/api (default: CIVIC_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory for the stored login and logs (default: CIVIC_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Login profile; each keeps its own credential (default: CIVIC_CLIENT_NAME)
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Request timeout in seconds (default: CIVIC_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Echo debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "CIVIC_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Create a citizen account
    Register {
        /// Full name
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
    /// List complaints visible to the signed-in user
    List {
        /// Match title or description
        #[arg(long, default_value = "")]
        search: String,
        /// Status or "all"
        #[arg(long, default_value = "all")]
        status: Selector<ComplaintStatus>,
        /// Category or "all"
        #[arg(long, default_value = "all")]
        category: Selector<ComplaintCategory>,
        /// Only complaints without a department
        #[arg(long)]
        unassigned: bool,
    },
    /// Show one complaint and its timeline
    Show { id: ComplaintId },
    /// Dashboard counts
    Stats {
        /// Year for the monthly chart (default: current year)
        #[arg(long)]
        year: Option<i32>,
    },
    /// File a new complaint
    Submit {
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: ComplaintCategory,
        #[arg(long)]
        description: String,
        #[arg(long)]
        location: String,
        #[arg(long, default_value = "medium")]
        priority: ComplaintPriority,
        /// Image file to attach; repeat for more
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    /// Route a complaint to a department
    Assign { id: ComplaintId, department: i64 },
    /// Change the status of a complaint
    Status {
        id: ComplaintId,
        status: ComplaintStatus,
        /// Note added to the timeline
        #[arg(long, default_value = "")]
        message: String,
    },
    /// Rate a resolved complaint
    Feedback {
        id: ComplaintId,
        #[arg(long)]
        rating: u8,
        #[arg(long, default_value = "")]
        comment: String,
    },
    /// List departments
    Departments,
    /// List notifications
    Notifications {
        /// Mark all as read afterwards
        #[arg(long)]
        mark_read: bool,
    },
    /// Update name and email
    Profile {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Change password
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
}
