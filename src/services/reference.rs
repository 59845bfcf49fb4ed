use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::core::reference::{ReferenceData, ReferenceError};

/// Load reference data from a TOML file
pub fn load_reference<P: AsRef<Path>>(path: P) -> Result<ReferenceData, ReferenceError> {
    let source = fs::read_to_string(path.as_ref())?;
    ReferenceData::from_toml_str(&source)
}

/// Reference data from the configured file, or the embedded table when no
/// file is configured or it cannot be loaded
pub fn load_reference_or_embedded(path: Option<&str>) -> ReferenceData {
    let Some(path) = path.filter(|p| !p.trim().is_empty()) else {
        return ReferenceData::embedded();
    };

    match load_reference(path) {
        Ok(data) => {
            info!("Loaded reference data from {} ({} countries)", path, data.country_count());
            data
        }
        Err(e) => {
            warn!("Failed to load reference data from {}, using embedded table: {}", path, e);
            ReferenceData::embedded()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back() {
        let data = load_reference_or_embedded(Some("/definitely/not/here.toml"));
        assert!(data.memberships_of("Spain").is_some());
    }

    #[test]
    fn test_no_path_uses_embedded() {
        let data = load_reference_or_embedded(None);
        assert_eq!(data.country_count(), ReferenceData::embedded().country_count());
        assert!(matches!(load_reference("/definitely/not/here.toml"), Err(ReferenceError::Io(_))));
    }
}
