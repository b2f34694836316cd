use std::path::Path;

use shobdo_config::Config;

/// Profile file when given, environment otherwise
pub fn load_config(profile: Option<&Path>) -> anyhow::Result<Config> {
    match profile {
        Some(path) => {
            tracing::info!("Loading profile {}", path.display());
            Ok(Config::from_json_file(path)?)
        }
        None => Ok(Config::new()),
    }
}

/// Offline vocabulary seed: a JSON array of store documents
pub fn load_seed(path: &Path) -> anyhow::Result<Vec<shobdo_types::VocabularyEntry>> {
    let data = std::fs::read_to_string(path)?;
    let entries: Vec<shobdo_types::VocabularyEntry> = serde_json::from_str(&data)?;
    tracing::info!("Loaded {} seed entries from {}", entries.len(), path.display());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_reads_store_documents() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(
            &path,
            r#"[{"$id":"1","bangla":"পানি","korean":"물"},{"id":"2","bangla":"ভাত","korean":"밥","frequency":3}]"#,
        )
        .unwrap();

        let entries = load_seed(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].id, "2");
    }

    #[test]
    fn test_profile_overrides_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("main.json");
        std::fs::write(&path, r#"{"library":{"page_size":10}}"#).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.library.page_size, 10);
    }
}
