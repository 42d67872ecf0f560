//! # Document and Schema Loading
//!
//! Reads schema files and catalog documents from disk and converts YAML
//! trees into the `serde_json::Value` form the validation engine consumes.
//!
//! Schemas may be written as JSON (`.json`) or YAML (`.yml`/`.yaml`);
//! documents likewise. Format is chosen from the file extension, defaulting
//! to YAML for documents (catalogs are YAML files) and JSON for schemas.

use std::path::Path;

use catalint_core::CatalintError;
use serde_json::Value;

/// Load a schema document.
///
/// # Errors
///
/// Returns [`CatalintError::SchemaLoad`] if the file cannot be read or is
/// not valid JSON/YAML.
pub fn load_schema(path: &Path) -> Result<Value, CatalintError> {
    let schema_name = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| CatalintError::SchemaLoad {
        schema_name: schema_name.clone(),
        reason: format!("cannot read file: {e}"),
    })?;

    if is_yaml(path) {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|e| CatalintError::SchemaLoad {
                schema_name: schema_name.clone(),
                reason: format!("invalid YAML: {e}"),
            })?;
        yaml_to_json_value(&yaml).map_err(|reason| CatalintError::SchemaLoad {
            schema_name,
            reason: format!("YAML-to-JSON conversion failed: {reason}"),
        })
    } else {
        serde_json::from_str(&content).map_err(|e| CatalintError::SchemaLoad {
            schema_name,
            reason: format!("invalid JSON: {e}"),
        })
    }
}

/// Load a catalog document.
///
/// `.json` files are parsed as JSON; everything else as YAML.
///
/// # Errors
///
/// Returns [`CatalintError::DocumentLoad`] if the file cannot be read or
/// parsed, or if the YAML uses constructs with no JSON equivalent.
pub fn load_document(path: &Path) -> Result<Value, CatalintError> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| CatalintError::DocumentLoad {
        path: display.clone(),
        reason: format!("cannot read file: {e}"),
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if ext == "json" {
        return serde_json::from_str(&content).map_err(|e| CatalintError::DocumentLoad {
            path: display,
            reason: format!("invalid JSON: {e}"),
        });
    }

    let yaml: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|e| CatalintError::DocumentLoad {
            path: display.clone(),
            reason: format!("invalid YAML: {e}"),
        })?;
    yaml_to_json_value(&yaml).map_err(|reason| CatalintError::DocumentLoad {
        path: display,
        reason: format!("YAML-to-JSON conversion failed: {reason}"),
    })
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yml") | Some("yaml")
    )
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Scalar map keys are stringified, so a catalog written as `0: {...}`
/// becomes `{"0": {...}}`. Tags are dropped. Non-scalar keys and
/// non-finite floats have no JSON form and are rejected.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn yaml_catalog_converts_with_integer_keys() {
        let yaml_str = r#"
0:
  transformations:
    - namespace: example
      site:
        - nonexistent-site
"#;
        let yaml: serde_yaml::Value = serde_yaml::from_str(yaml_str).unwrap();
        let json = yaml_to_json_value(&yaml).unwrap();
        assert_eq!(json["0"]["transformations"][0]["namespace"], "example");
        assert_eq!(json["0"]["transformations"][0]["site"][0], "nonexistent-site");
    }

    #[test]
    fn yaml_scalars_convert() {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str("count: 42\nenabled: true\nratio: 0.5\nnothing: ~\n").unwrap();
        let json = yaml_to_json_value(&yaml).unwrap();
        assert_eq!(json["count"], 42);
        assert_eq!(json["enabled"], true);
        assert_eq!(json["ratio"], 0.5);
        assert!(json["nothing"].is_null());
    }

    #[test]
    fn yaml_nan_is_rejected() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("x: .nan\n").unwrap();
        let err = yaml_to_json_value(&yaml).unwrap_err();
        assert!(err.contains("float"));
    }

    #[test]
    fn yaml_sequence_key_is_rejected() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("? [a, b]\n: value\n").unwrap();
        assert!(yaml_to_json_value(&yaml).is_err());
    }

    #[test]
    fn load_schema_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = write_file(dir.path(), "s.json", r#"{"type": "object"}"#);
        let yaml_path = write_file(dir.path(), "s.yml", "type: object\n");
        assert_eq!(load_schema(&json_path).unwrap(), load_schema(&yaml_path).unwrap());
    }

    #[test]
    fn load_schema_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "bad.json", "{not json");
        let err = load_schema(&path).unwrap_err();
        assert!(matches!(err, CatalintError::SchemaLoad { .. }));
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn load_schema_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_schema(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CatalintError::SchemaLoad { .. }));
    }

    #[test]
    fn load_document_defaults_to_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "sites", "site:\n  - name: local\n");
        let doc = load_document(&path).unwrap();
        assert_eq!(doc["site"][0]["name"], "local");
    }

    #[test]
    fn load_document_reports_bad_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "bad.yml", "a: [unclosed\n");
        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, CatalintError::DocumentLoad { .. }));
    }
}
