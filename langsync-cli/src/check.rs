use langsync::{SourceCheck, check_source_format, is_resource_file};

use crate::validation::validate_file_path;

/// Reports whether `source` can be used as a sync source.
pub fn run_check_command(source: &str) -> Result<(), String> {
    validate_file_path(source)?;

    let is_resources = is_resource_file(source).map_err(|e| e.to_string())?;
    if !is_resources {
        return Err(format!(
            "{} is not an Android resource file (root element is not <resources>)",
            source
        ));
    }

    match check_source_format(source).map_err(|e| e.to_string())? {
        SourceCheck::Valid => {
            println!("✅ {} is a valid sync source", source);
            Ok(())
        }
        check => Err(format!("{}: {}", source, check)),
    }
}
