//! Option validation.

use super::AppConfig;
use super::defaults::MAX_RECORD_GEOMETRY;

/// Validate a configuration. Returns `Ok(())` if valid, or an error message.
pub fn validate_config(config: &AppConfig) -> Result<(), String> {
    validate_dimension("destination width", config.dest_width)?;
    validate_dimension("destination height", config.dest_height)?;
    if config.items_per_row == 0 {
        return Err("items per row must be greater than 0".into());
    }
    if !config.output_folder.is_dir() {
        return Err(format!(
            "output folder {} does not exist",
            config.output_folder.display()
        ));
    }
    Ok(())
}

/// Non-fatal problems worth reporting.
pub fn config_warnings(config: &AppConfig) -> Vec<String> {
    let mut warnings = Vec::new();
    if config.struct_list.is_some()
        && (config.dest_width > MAX_RECORD_GEOMETRY || config.dest_height > MAX_RECORD_GEOMETRY)
    {
        warnings.push(format!(
            "destination {}x{} does not fit the 8-bit geometry of the image record",
            config.dest_width, config.dest_height
        ));
    }
    warnings
}

fn validate_dimension(name: &str, value: u32) -> Result<(), String> {
    if value == 0 {
        return Err(format!("{name} must be greater than 0"));
    }
    Ok(())
}
