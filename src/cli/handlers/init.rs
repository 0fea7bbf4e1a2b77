use std::fs;
use std::path::PathBuf;

use crate::cli::commands::InitArgs;
use crate::io::config_io;
use crate::io::data_dir::DATA_DIR_NAME;
use crate::ops::repository::Repository;

/// Create the `.dayplan/` data directory with empty documents and the
/// default config. Runs before discovery: init targets the given root (or
/// the working directory), never a parent workspace.
pub fn cmd_init(
    args: InitArgs,
    override_root: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = match override_root {
        Some(root) => PathBuf::from(root),
        None => std::env::current_dir()?,
    };
    let data_dir = root.join(DATA_DIR_NAME);

    if data_dir.exists() && !args.force {
        return Err(format!(
            "{} already exists (use --force to reinitialize)",
            data_dir.display()
        )
        .into());
    }

    fs::create_dir_all(&data_dir)?;
    config_io::write_config_template(&data_dir)?;
    Repository::open(&data_dir).initialize()?;

    println!("initialized {}", data_dir.display());
    Ok(())
}
