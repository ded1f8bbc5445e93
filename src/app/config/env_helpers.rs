use std::path::PathBuf;

/// Helper function to load and parse an environment variable.
/// Returns Ok(()) if the variable doesn't exist (keeps default).
pub fn load_env_var<T>(name: &str, target: &mut T) -> Result<(), super::ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if let Ok(value) = std::env::var(name) {
        *target = parse_env(name, &value)?;
    }
    Ok(())
}

/// Like [`load_env_var`] for optional settings; an empty value clears the setting.
pub fn load_env_var_opt<T>(name: &str, target: &mut Option<T>) -> Result<(), super::ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if let Ok(value) = std::env::var(name) {
        *target = if value.trim().is_empty() {
            None
        } else {
            Some(parse_env(name, &value)?)
        };
    }
    Ok(())
}

/// Boolean flags accept `true/false`, `1/0`, `yes/no` and `on/off`.
pub fn load_env_flag(name: &str, target: &mut bool) -> Result<(), super::ConfigError> {
    if let Ok(value) = std::env::var(name) {
        *target = match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => true,
            "false" | "0" | "no" | "off" | "" => false,
            _ => {
                return Err(super::ConfigError::EnvError(format!(
                    "Invalid {name}: expected a boolean, got '{value}'"
                )));
            }
        };
    }
    Ok(())
}

/// Helper function to load a string environment variable.
pub fn load_env_string(name: &str, target: &mut String) {
    if let Ok(value) = std::env::var(name) {
        *target = value;
    }
}

/// Helper function to load a PathBuf environment variable.
pub fn load_env_path(name: &str, target: &mut PathBuf) {
    if let Ok(value) = std::env::var(name) {
        *target = PathBuf::from(value);
    }
}

/// Helper function to load an optional PathBuf environment variable.
pub fn load_env_path_opt(name: &str, target: &mut Option<PathBuf>) {
    if let Ok(value) = std::env::var(name) {
        *target = Some(PathBuf::from(value));
    }
}

fn parse_env<T>(name: &str, value: &str) -> Result<T, super::ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| super::ConfigError::EnvError(format!("Invalid {name}: {e}")))
}
