use std::path::Path;

/// Validate file path exists and is readable
pub fn validate_file_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("File does not exist: {}", path));
    }

    if !path_obj.is_file() {
        return Err(format!("Path is not a file: {}", path));
    }

    Ok(())
}

/// Validate a target file exists and can be replaced
pub fn validate_target_path(path: &str) -> Result<(), String> {
    validate_file_path(path)?;

    let readonly = Path::new(path)
        .metadata()
        .map(|m| m.permissions().readonly())
        .map_err(|e| format!("Cannot read file metadata for {}: {}", path, e))?;
    if readonly {
        return Err(format!("Target file is read-only: {}", path));
    }

    Ok(())
}

/// Validate output directory exists
pub fn validate_output_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if let Some(parent) = path_obj.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(format!(
                "Output directory does not exist: {}",
                parent.display()
            ));
        }
    }

    if path_obj.is_dir() {
        return Err(format!("Output path is a directory: {}", path));
    }

    Ok(())
}
