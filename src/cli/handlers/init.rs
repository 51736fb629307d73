use crate::cli::commands::InitArgs;
use crate::io::board_io;

/// Create `board/` in the current directory.
pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;

    let name = match args.name {
        Some(n) => n,
        None => infer_board_name(&cwd),
    };

    if let Ok(parent_root) = board_io::discover_board(&cwd)
        && parent_root != cwd
    {
        eprintln!(
            "Note: parent board found at {}/",
            parent_root.join(board_io::BOARD_DIR).display()
        );
        eprintln!("Creating new board in ./{}/", board_io::BOARD_DIR);
    }

    let board_dir = board_io::init_board(&cwd, &name, args.force)?;
    println!("Initialized board \"{}\" in {}/", name, board_dir.display());
    Ok(())
}

/// Board name from the directory name, falling back to "board"
fn infer_board_name(dir: &std::path::Path) -> String {
    dir.file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("board")
        .to_string()
}
