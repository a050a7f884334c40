use std::fs;
use std::path::{Path, PathBuf};
use yaml_rust2::{Yaml, YamlLoader, yaml::Hash};

#[derive(Debug, thiserror::Error)]
pub enum IncludeError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: yaml_rust2::ScanError,
    },
}

/// Loads a YAML file, resolving `!include <relative path>` lines first.
///
/// Included documents are merged in the order they appear, then the body of
/// the including file is merged on top, so local keys override included ones.
pub fn load_yaml_with_includes(path: &Path) -> Result<Yaml, IncludeError> {
    process_includes_recursive(path)
}

fn process_includes_recursive(path: &Path) -> Result<Yaml, IncludeError> {
    let contents = fs::read_to_string(path).map_err(|source| IncludeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let base_path = path.parent().unwrap_or(Path::new(""));

    let (includes, rest): (Vec<&str>, Vec<&str>) = contents
        .lines()
        .partition(|&line| line.trim().starts_with("!include"));

    let mut merged = Yaml::Hash(Hash::new());
    for line in includes {
        let include_path = line.trim().trim_start_matches("!include").trim();
        tracing::debug!(include = include_path, "Resolving config include");
        let included = process_includes_recursive(&base_path.join(include_path))?;
        merged = merge_yaml(&merged, &included);
    }

    let rest_docs =
        YamlLoader::load_from_str(&rest.join("\n")).map_err(|source| IncludeError::Scan {
            path: path.to_path_buf(),
            source,
        })?;

    // An empty document (e.g. a bare `---` marker) carries no keys
    Ok(rest_docs
        .iter()
        .filter(|doc| !matches!(doc, Yaml::Null | Yaml::BadValue))
        .fold(merged, |acc, doc| merge_yaml(&acc, doc)))
}

fn merge_yaml(base: &Yaml, override_yaml: &Yaml) -> Yaml {
    match (base, override_yaml) {
        (Yaml::Hash(base_hash), Yaml::Hash(override_hash)) => {
            let mut result = base_hash.clone();
            for (key, value) in override_hash {
                let merged = match base_hash.get(key) {
                    Some(base_value) => merge_yaml(base_value, value),
                    None => value.clone(),
                };
                result.insert(key.clone(), merged);
            }
            Yaml::Hash(result)
        }
        (_, override_value) => override_value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::File::create(&path).unwrap().write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_include_is_merged_and_overridden() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "common.yaml",
            "common:\n  project_name: base\nbackend:\n  log_level: info\n  server_address: 0.0.0.0:1\n",
        );
        let dev = write(
            dir.path(),
            "dev.yaml",
            "!include common.yaml\nbackend:\n  log_level: debug\n",
        );

        let yaml = load_yaml_with_includes(&dev).unwrap();
        assert_eq!(yaml["common"]["project_name"].as_str(), Some("base"));
        assert_eq!(yaml["backend"]["log_level"].as_str(), Some("debug"));
        assert_eq!(yaml["backend"]["server_address"].as_str(), Some("0.0.0.0:1"));
    }

    #[test]
    fn test_document_marker_keeps_included_config() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "common.yaml", "common:\n  project_name: base\n");
        let dev = write(
            dir.path(),
            "dev.yaml",
            "!include common.yaml\n---\nbackend:\n  log_level: debug\n",
        );

        let yaml = load_yaml_with_includes(&dev).unwrap();
        assert_eq!(yaml["common"]["project_name"].as_str(), Some("base"));
        assert_eq!(yaml["backend"]["log_level"].as_str(), Some("debug"));
    }

    #[test]
    fn test_bare_document_marker_keeps_included_config() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "common.yaml", "common:\n  project_name: base\n");
        let dev = write(dir.path(), "dev.yaml", "!include common.yaml\n---\n");

        let yaml = load_yaml_with_includes(&dev).unwrap();
        assert_eq!(yaml["common"]["project_name"].as_str(), Some("base"));
    }

    #[test]
    fn test_file_with_only_includes() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.yaml", "a: 1\n");
        write(dir.path(), "b.yaml", "b: 2\n");
        let top = write(dir.path(), "top.yaml", "!include a.yaml\n!include b.yaml\n");

        let yaml = load_yaml_with_includes(&top).unwrap();
        assert_eq!(yaml["a"].as_i64(), Some(1));
        assert_eq!(yaml["b"].as_i64(), Some(2));
    }

    #[test]
    fn test_missing_include_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let top = write(dir.path(), "top.yaml", "!include nope.yaml\n");

        let err = load_yaml_with_includes(&top).unwrap_err();
        assert!(matches!(err, IncludeError::Read { .. }));
    }
}
