mod init;
pub use init::cmd_init;

use std::path::PathBuf;
use std::sync::Mutex;

use regex::Regex;

/// Global override for the board directory (set by -C flag)
static BOARD_DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::board_io::{self, BoardError};
use crate::model::workspace::Workspace;
use crate::ops::todo_ops::{self, NewTodo, TodoError, TodoUpdate};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    // Store -C override for load_workspace_cwd()
    if let Some(ref dir) = cli.board_dir {
        let abs = std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
        set_board_dir_override(abs);
    }

    match cli.command {
        None => crate::tui::run(cli.board_dir.as_deref()),
        Some(cmd) => match cmd {
            // Init is handled in main.rs before board discovery
            Commands::Init(args) => cmd_init(args),

            // Read commands
            Commands::List(args) => cmd_list(args, json),
            Commands::Show(args) => cmd_show(args, json),

            // Write commands
            Commands::Add(args) => cmd_add(args, json),
            Commands::Edit(args) => cmd_edit(args, json),
            Commands::Mv(args) => cmd_mv(args),
            Commands::Rm(args) => cmd_rm(args),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn set_board_dir_override(dir: PathBuf) {
    if let Ok(mut guard) = BOARD_DIR_OVERRIDE.lock() {
        guard.replace(dir);
    }
}

fn board_dir_override() -> Option<PathBuf> {
    BOARD_DIR_OVERRIDE.lock().ok().and_then(|g| g.clone())
}

fn load_workspace_cwd() -> Result<Workspace, BoardError> {
    let start = match board_dir_override() {
        Some(dir) => dir,
        None => std::env::current_dir().map_err(BoardError::IoError)?,
    };
    let root = board_io::discover_board(&start)?;
    board_io::open_workspace(&root)
}

fn save(workspace: &Workspace) -> Result<(), BoardError> {
    board_io::save_board(&workspace.board_dir, &workspace.board)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = load_workspace_cwd()?;
    let status = args
        .status
        .as_deref()
        .map(todo_ops::parse_status)
        .transpose()?;
    let search_re = match args.search.as_deref() {
        Some(pattern) => Some(Regex::new(&format!("(?i){}", pattern))?),
        None => None,
    };
    let matching: Option<Vec<u64>> = search_re.as_ref().map(|re| {
        todo_ops::search(&workspace.board, re)
            .iter()
            .map(|t| t.key)
            .collect()
    });

    let mut columns = todo_ops::columns(&workspace.board);
    if let Some(status) = status {
        columns.retain(|c| c.status == status);
    }
    if let Some(keys) = &matching {
        for column in &mut columns {
            column.todos.retain(|t| keys.contains(&t.key));
        }
    }

    if json {
        print_json(&columns_to_json(&columns))
    } else {
        print!("{}", format_columns(&columns));
        Ok(())
    }
}

fn cmd_show(args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = load_workspace_cwd()?;
    let todo = todo_ops::get(&workspace.board, args.key).ok_or(TodoError::NotFound(args.key))?;
    if json {
        print_json(&todo_to_json(todo))
    } else {
        print!("{}", format_todo_detail(todo));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut workspace = load_workspace_cwd()?;
    let new = NewTodo {
        title: args.title,
        content: args.content.unwrap_or_default(),
        status: args.status.as_deref().map(todo_ops::parse_status).transpose()?,
        priority: args
            .priority
            .as_deref()
            .map(todo_ops::parse_priority)
            .transpose()?,
        deadline: match args.deadline.as_deref() {
            Some(d) => todo_ops::parse_deadline(d)?,
            None => None,
        },
    };
    let key = todo_ops::create(&mut workspace.board, new);
    save(&workspace)?;

    if json {
        print_json(&CreatedJson { key })
    } else {
        println!("{}", key);
        Ok(())
    }
}

fn cmd_edit(args: EditArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut workspace = load_workspace_cwd()?;
    let deadline = if args.no_deadline {
        Some(None)
    } else {
        match args.deadline.as_deref() {
            Some(d) => Some(todo_ops::parse_deadline(d)?),
            None => None,
        }
    };
    let update = TodoUpdate {
        title: args.title,
        content: args.content,
        status: args.status.as_deref().map(todo_ops::parse_status).transpose()?,
        priority: args
            .priority
            .as_deref()
            .map(todo_ops::parse_priority)
            .transpose()?,
        deadline,
    };
    let todo = todo_ops::edit(&mut workspace.board, args.key, update)?;
    let line = if json {
        serde_json::to_string_pretty(&todo_to_json(todo))?
    } else {
        format_todo_line(todo)
    };
    save(&workspace)?;
    println!("{}", line);
    Ok(())
}

fn cmd_mv(args: MvArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut workspace = load_workspace_cwd()?;
    let status = todo_ops::parse_status(&args.status)?;
    todo_ops::move_to(&mut workspace.board, args.key, status)?;
    save(&workspace)?;
    println!("#{} -> {}", args.key, status);
    Ok(())
}

fn cmd_rm(args: RmArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut workspace = load_workspace_cwd()?;
    let removed = todo_ops::delete(&mut workspace.board, args.key)?;
    save(&workspace)?;
    println!("deleted #{} {}", removed.key, removed.title);
    Ok(())
}
