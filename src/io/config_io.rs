use std::fs;
use std::path::Path;

use crate::io::board_io::BoardError;
use crate::model::config::BoardConfig;

/// Config file name, inside the board directory
pub const CONFIG_FILE: &str = "board.toml";

const BOARD_TOML_TEMPLATE: &str = include_str!("../templates/board.toml");

/// Read and parse board.toml
pub fn read_config(board_dir: &Path) -> Result<BoardConfig, BoardError> {
    let config_path = board_dir.join(CONFIG_FILE);
    let config_text = fs::read_to_string(&config_path).map_err(|e| BoardError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: BoardConfig = toml::from_str(&config_text)?;
    Ok(config)
}

/// Write the commented default config with the given board name
pub fn write_default_config(board_dir: &Path, name: &str) -> Result<(), BoardError> {
    let config_path = board_dir.join(CONFIG_FILE);
    let text = BOARD_TOML_TEMPLATE.replace("{name}", &escape_toml_string(name));
    fs::write(&config_path, text).map_err(|e| BoardError::WriteError {
        path: config_path,
        source: e,
    })?;
    Ok(())
}

fn escape_toml_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_round_trip() {
        let tmp = TempDir::new().unwrap();
        write_default_config(tmp.path(), "Home \"chores\"").unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config.board.name, "Home \"chores\"");
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn missing_config_is_read_error() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            read_config(tmp.path()),
            Err(BoardError::ReadError { .. })
        ));
    }

    #[test]
    fn invalid_config_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[board\nname=").unwrap();
        assert!(matches!(
            read_config(tmp.path()),
            Err(BoardError::ConfigParseError(_))
        ));
    }
}
