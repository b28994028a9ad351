/// Loader: reads a JSON-serialized program tree into a `CompileUnit`.
///
/// The node set is closed, so an unknown `kind` tag is rejected here,
/// before anything reaches the emitter.
use std::path::{Path, PathBuf};

use crate::ast::CompileUnit;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid program tree: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid generator options: {0}")]
    Options(#[source] serde_json::Error),
}

/// Load a compile unit from a JSON string.
pub fn load_compile_unit(json: &str) -> Result<CompileUnit, LoadError> {
    let unit: CompileUnit = serde_json::from_str(json)?;
    tracing::debug!(namespaces = unit.namespaces.len(), "loaded program tree");
    Ok(unit)
}

/// Load a compile unit from a JSON file.
pub fn load_compile_unit_file(path: &Path) -> Result<CompileUnit, LoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_compile_unit(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Member, TypeKind};
    use serde_json::json;

    #[test]
    fn test_load_empty_unit() {
        let unit = load_compile_unit("{}").unwrap();
        assert!(unit.namespaces.is_empty());
        assert!(unit.assembly_custom_attributes.is_empty());
    }

    #[test]
    fn test_load_namespace_with_class_and_method() {
        let tree = json!({
            "namespaces": [{
                "name": "N",
                "types": [{
                    "name": "C",
                    "members": [
                        {"kind": "method", "name": "M", "attributes": {"access": "public"}}
                    ]
                }]
            }]
        });
        let unit = load_compile_unit(&tree.to_string()).unwrap();
        let ty = &unit.namespaces[0].types[0];
        assert_eq!(ty.name, "C");
        assert_eq!(ty.kind, TypeKind::Class);
        match &ty.members[0] {
            Member::Method(m) => assert_eq!(m.name, "M"),
            other => panic!("expected method, got {}", other.kind()),
        }
    }

    #[test]
    fn test_load_nested_type_kind() {
        let tree = json!({
            "namespaces": [{
                "name": "N",
                "types": [{
                    "name": "Outer",
                    "members": [
                        {"kind": "nested_type", "name": "Inner", "type_kind": "struct"}
                    ]
                }]
            }]
        });
        let unit = load_compile_unit(&tree.to_string()).unwrap();
        match &unit.namespaces[0].types[0].members[0] {
            Member::NestedType(inner) => assert_eq!(inner.kind, TypeKind::Struct),
            other => panic!("expected nested type, got {}", other.kind()),
        }
    }

    #[test]
    fn test_unknown_member_kind_is_fatal() {
        let tree = json!({
            "namespaces": [{"name": "N", "types": [{"name": "C", "members": [{"kind": "indexer"}]}]}]
        });
        let err = load_compile_unit(&tree.to_string()).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
        assert!(err.to_string().contains("indexer"));
    }

    #[test]
    fn test_missing_required_child_is_fatal() {
        // a cast without the expression being cast
        let tree = json!({
            "namespaces": [{"name": "N", "types": [{"name": "C", "members": [{
                "kind": "field",
                "name": "f",
                "field_type": {"base_type": "System.Int32"},
                "init_expression": {"kind": "cast", "target_type": {"base_type": "System.Int32"}}
            }]}]}]
        });
        let err = load_compile_unit(&tree.to_string()).unwrap_err();
        assert!(err.to_string().contains("expression"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_compile_unit_file(Path::new("/no/such/tree.json")).unwrap_err();
        assert!(err.to_string().starts_with("cannot read /no/such/tree.json"));
    }
}
