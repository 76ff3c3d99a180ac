use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod config;
mod error;
mod state;
mod ui;
mod upload;
mod version;

mod admin;
mod auth;
mod class;
mod client;
mod course;
mod enrollment;
mod group;
mod presentation;
mod session;
mod topic;
mod utils;

#[cfg(test)]
mod tests;

use cli::CliHandler;
use version::CURRENT_VERSION;

#[derive(Parser)]
#[command(
    name = "orator",
    about = "OratorAI platform client for students and instructors",
    long_about = "OratorAI client - course, class, group and presentation management

OVERVIEW:
  This tool talks to the OratorAI education platform: browse courses and
  classes, manage topics and student groups, enroll with a class key, and
  drive AI-graded presentation submissions from the terminal.

WORKFLOW:
  1. Login with your platform account
  2. Enroll in courses, topics or a class
  3. Create or join a group in your class
  4. Create a presentation, upload and confirm both files, submit

QUICK START:
  orator login                          # Authenticate with your account
  orator course list                    # Browse the course catalog
  orator enroll class 12 --key <KEY>    # Self-enroll with an enroll key
  orator group join --class 12 7        # Join group 7 in class 12
  orator presentation submit 9          # Submit once both slots confirmed
  orator status                         # Check session and configuration",
    version = CURRENT_VERSION,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Login with your platform account
    Login(LoginArgs),

    /// Register a new account
    Register,

    /// Logout and clear the stored session
    Logout,

    /// Show session and configuration status
    #[command(aliases = &["st"])]
    Status,

    /// Configure settings
    #[command(aliases = &["cfg"])]
    Config(ConfigArgs),

    /// Course catalog operations
    Course(CourseArgs),

    /// Class offering operations
    Class(ClassArgs),

    /// Topic (assignment) operations
    Topic(TopicArgs),

    /// Group membership operations
    Group(GroupArgs),

    /// Enroll in a course, topic or class
    Enroll(EnrollArgs),

    /// Drop a course or topic enrollment
    Drop(DropArgs),

    /// Presentation submission flow
    #[command(aliases = &["pres"])]
    Presentation(PresentationArgs),

    /// User administration
    Admin(AdminArgs),
}

#[derive(Args)]
pub struct LoginArgs {
    /// Account email; prompted when omitted
    #[arg(short, long)]
    pub email: Option<String>,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    Show,
    #[cfg(debug_assertions)]
    SetEndpoint {
        url: String,
    },
    SetTimeout {
        seconds: u64,
    },
    SetVerbose {
        enabled: String,
    },
    Reset,
}

#[derive(Args)]
pub struct PageArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long, default_value_t = 20)]
    pub limit: u32,
}

#[derive(Args)]
pub struct CourseArgs {
    #[command(subcommand)]
    pub command: CourseCommand,
}

#[derive(Subcommand)]
pub enum CourseCommand {
    /// List courses
    #[command(aliases = &["ls"])]
    List(PageArgs),

    /// Show one course
    Show { id: i64 },

    /// Create a course
    Create(CreateCourseArgs),

    /// Update a course
    Update(UpdateCourseArgs),

    /// Delete a course
    #[command(aliases = &["rm"])]
    Delete { id: i64 },
}

#[derive(Args)]
pub struct CreateCourseArgs {
    pub code: String,

    pub title: String,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(long)]
    pub semester: String,

    #[arg(long)]
    pub academic_year: String,

    #[arg(long)]
    pub start_date: NaiveDate,

    #[arg(long)]
    pub end_date: NaiveDate,
}

#[derive(Args)]
pub struct UpdateCourseArgs {
    pub id: i64,

    #[arg(long)]
    pub code: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(long)]
    pub semester: Option<String>,

    #[arg(long)]
    pub academic_year: Option<String>,

    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    #[arg(long)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Args)]
pub struct ClassArgs {
    #[command(subcommand)]
    pub command: ClassCommand,
}

#[derive(Subcommand)]
pub enum ClassCommand {
    /// List classes
    #[command(aliases = &["ls"])]
    List(PageArgs),

    /// Show one class
    Show { id: i64 },

    /// Create a class
    Create(CreateClassArgs),

    /// Update a class
    Update(UpdateClassArgs),

    /// Delete a class
    #[command(aliases = &["rm"])]
    Delete { id: i64 },

    /// Assign an instructor to a class
    AssignInstructor {
        class_id: i64,
        user_id: i64,
    },

    /// Remove an instructor from a class
    RemoveInstructor {
        class_id: i64,
        user_id: i64,
    },
}

#[derive(Args)]
pub struct CreateClassArgs {
    #[arg(long)]
    pub course: i64,

    pub name: String,

    #[arg(long, default_value_t = 30)]
    pub max_students: u32,

    #[arg(long)]
    pub enroll_key: Option<String>,

    #[arg(long)]
    pub max_group_members: Option<u32>,
}

#[derive(Args)]
pub struct UpdateClassArgs {
    pub id: i64,

    pub name: String,

    #[arg(long)]
    pub max_students: u32,

    #[arg(long)]
    pub enroll_key: Option<String>,

    #[arg(long)]
    pub max_group_members: Option<u32>,

    /// active, inactive or archived
    #[arg(long, default_value = "active")]
    pub status: String,
}

#[derive(Args)]
pub struct TopicArgs {
    #[command(subcommand)]
    pub command: TopicCommand,
}

#[derive(Subcommand)]
pub enum TopicCommand {
    /// List a course's topics
    #[command(aliases = &["ls"])]
    List {
        #[arg(long)]
        course: i64,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show one topic
    Show { id: i64 },

    /// Create a topic under a course
    Create(CreateTopicArgs),

    /// Update a topic
    Update(UpdateTopicArgs),

    /// Delete a topic
    #[command(aliases = &["rm"])]
    Delete { id: i64 },
}

#[derive(Args)]
pub struct CreateTopicArgs {
    #[arg(long)]
    pub course: i64,

    pub title: String,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(long)]
    pub due_date: NaiveDate,

    #[arg(long, default_value_t = 15)]
    pub max_duration: u32,

    #[arg(long, default_value_t = 1)]
    pub sequence: u32,
}

#[derive(Args)]
pub struct UpdateTopicArgs {
    pub id: i64,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(long)]
    pub due_date: Option<NaiveDate>,

    #[arg(long)]
    pub max_duration: Option<u32>,

    #[arg(long)]
    pub sequence: Option<u32>,
}

#[derive(Args)]
pub struct GroupArgs {
    #[command(subcommand)]
    pub command: GroupCommand,
}

#[derive(Subcommand)]
pub enum GroupCommand {
    /// List a class's groups
    #[command(aliases = &["ls"])]
    List {
        #[arg(long)]
        class: i64,
    },

    /// Show your group in a class
    My {
        #[arg(long)]
        class: i64,
    },

    /// Create a group (you become its leader)
    Create {
        #[arg(long)]
        class: i64,

        name: String,
    },

    /// Rename a group (leader only)
    Rename { id: i64, name: String },

    /// Join a group in a class
    Join {
        #[arg(long)]
        class: i64,

        group_id: i64,
    },

    /// Leave your group
    Leave { id: i64 },

    /// Remove a member (leader only)
    RemoveMember { group_id: i64, user_id: i64 },

    /// Transfer leadership to a member
    ChangeLeader { group_id: i64, user_id: i64 },
}

#[derive(Args)]
pub struct EnrollArgs {
    #[command(subcommand)]
    pub command: EnrollCommand,
}

#[derive(Subcommand)]
pub enum EnrollCommand {
    /// Enroll in a course
    Course { id: i64 },

    /// Enroll in a topic
    Topic { id: i64 },

    /// Enroll in a class with its enroll key
    Class {
        id: i64,

        /// Enroll key; prompted when omitted
        #[arg(long)]
        key: Option<String>,
    },

    /// Show your current enrollments
    Show,
}

#[derive(Args)]
pub struct DropArgs {
    #[command(subcommand)]
    pub command: DropCommand,
}

#[derive(Subcommand)]
pub enum DropCommand {
    /// Drop a course enrollment
    Course { id: i64 },

    /// Drop a topic enrollment
    Topic { id: i64 },
}

#[derive(Args)]
pub struct PresentationArgs {
    #[command(subcommand)]
    pub command: PresentationCommand,
}

#[derive(Subcommand)]
pub enum PresentationCommand {
    /// Create a draft presentation (group leader only)
    Create {
        #[arg(long)]
        class: i64,

        #[arg(long)]
        topic: i64,

        #[arg(long)]
        group: i64,
    },

    /// Show one presentation and its slot states
    Show { id: i64 },

    /// List a group's presentations
    #[command(aliases = &["ls"])]
    List {
        #[arg(long)]
        group: i64,
    },

    /// Upload the slide document and/or the media recording
    Upload {
        id: i64,

        #[arg(long)]
        slide: Option<PathBuf>,

        #[arg(long)]
        media: Option<PathBuf>,
    },

    /// Confirm uploaded files
    Confirm {
        id: i64,

        #[arg(long)]
        slide: bool,

        #[arg(long)]
        media: bool,
    },

    /// Submit for processing (both slots must be confirmed)
    Submit { id: i64 },
}

#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// List platform users
    Users(PageArgs),

    /// Replace a user's roles (student, instructor, admin)
    SetRoles {
        user_id: i64,

        #[arg(required = true)]
        roles: Vec<String>,
    },

    /// Delete a user account
    DeleteUser { user_id: i64 },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let subscriber = tracing_subscriber::fmt().with_env_filter(format!("orator={}", log_level));
    subscriber.init();

    let mut handler = CliHandler::new(None);

    if let Err(e) = handler.execute(cli.command).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
