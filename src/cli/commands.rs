use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tb", about = concat!("[#] tackboard v", env!("CARGO_PKG_VERSION"), " - a kanban board for your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different board directory
    #[arg(short = 'C', long = "board-dir", global = true)]
    pub board_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new board in the current directory
    Init(InitArgs),
    /// List cards, grouped by column
    List(ListArgs),
    /// Show one card
    Show(ShowArgs),
    /// Add a card
    Add(AddArgs),
    /// Edit fields of a card
    Edit(EditArgs),
    /// Move a card to another column
    Mv(MvArgs),
    /// Delete a card
    Rm(RmArgs),
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Board name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Reinitialize even if board/ already exists
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Only this column (todo, in-progress, done, archived)
    #[arg(long)]
    pub status: Option<String>,
    /// Only cards whose title or content matches this regex
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Card key
    pub key: u64,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Card title
    pub title: String,
    /// Card description
    #[arg(long)]
    pub content: Option<String>,
    /// Column (default: todo)
    #[arg(long)]
    pub status: Option<String>,
    /// Priority: low, medium, high (default: low)
    #[arg(long)]
    pub priority: Option<String>,
    /// Deadline as YYYY-MM-DD
    #[arg(long)]
    pub deadline: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Card key
    pub key: u64,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    /// Deadline as YYYY-MM-DD
    #[arg(long, conflicts_with = "no_deadline")]
    pub deadline: Option<String>,
    /// Remove the deadline
    #[arg(long)]
    pub no_deadline: bool,
}

#[derive(Args)]
pub struct MvArgs {
    /// Card key
    pub key: u64,
    /// Target column (todo, in-progress, done, archived)
    pub status: String,
}

#[derive(Args)]
pub struct RmArgs {
    /// Card key
    pub key: u64,
}
