use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::Path;

use super::Config;
use crate::prompt::prompt_yes_no;

/// Serialize `config` as YAML and write it atomically, creating parent directories.
fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}

/// Write the reference config to `path`. Asks before overwriting an existing file
/// unless `force` is set. Returns false when the user declined.
pub fn run_init<R: BufRead, W: Write>(
    path: &Path,
    force: bool,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    if path.exists() && !force {
        let overwrite = prompt_yes_no(
            input,
            output,
            &format!("Config already exists at {}. Overwrite?", path.display()),
            false,
        )?;
        if !overwrite {
            writeln!(output, "Aborted.")?;
            return Ok(false);
        }
    }

    write_config(path, &Config::reference())?;

    writeln!(output, "Config written to {}", path.display())?;
    writeln!(
        output,
        "Edit the questionnaire section to change questions; custom questions need their own thresholds."
    )?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use std::env;
    use std::io::Cursor;

    #[test]
    fn test_init_writes_loadable_config() {
        let temp_path = env::temp_dir().join("biosec_check_test_init/config.yaml");
        let _ = std::fs::remove_file(&temp_path);

        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        let written = run_init(&temp_path, false, &mut input, &mut output).unwrap();

        assert!(written);
        let loaded = load_config(Some(temp_path.clone())).unwrap();
        assert_eq!(loaded, Config::reference());

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_init_declined_keeps_existing_file() {
        let temp_path = env::temp_dir().join("biosec_check_test_init_declined.yaml");
        std::fs::write(&temp_path, "theme: light\n").unwrap();

        let mut input = Cursor::new(b"n\n".to_vec());
        let mut output = Vec::new();
        let written = run_init(&temp_path, false, &mut input, &mut output).unwrap();

        assert!(!written);
        assert_eq!(std::fs::read_to_string(&temp_path).unwrap(), "theme: light\n");
        assert!(String::from_utf8(output).unwrap().contains("Aborted."));

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_init_force_overwrites() {
        let temp_path = env::temp_dir().join("biosec_check_test_init_force.yaml");
        std::fs::write(&temp_path, "theme: light\n").unwrap();

        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        assert!(run_init(&temp_path, true, &mut input, &mut output).unwrap());

        let loaded = load_config(Some(temp_path.clone())).unwrap();
        assert!(loaded.questionnaire.is_some());

        let _ = std::fs::remove_file(&temp_path);
    }
}
