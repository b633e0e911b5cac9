//! Maps file type names to their definitions, rejecting a malformed catalog
//! up front rather than discovering a duplicate mid-run.

use std::collections::HashMap;
use std::path::Path;

use crate::error::TopmarkError;
use crate::file_type::FileType;

#[derive(Debug, Clone, Default)]
pub struct FileTypeRegistry {
    by_name: HashMap<&'static str, FileType>,
}

impl FileTypeRegistry {
    /// Builds a registry from `types`, failing on an empty or duplicate name.
    pub fn build(types: Vec<FileType>) -> Result<Self, TopmarkError> {
        let mut by_name = HashMap::with_capacity(types.len());
        for file_type in types {
            if file_type.name.is_empty() {
                return Err(TopmarkError::invalid_configuration("file type has empty name"));
            }
            if by_name.contains_key(file_type.name) {
                return Err(TopmarkError::invalid_configuration(format!(
                    "duplicate file type name: '{}'",
                    file_type.name
                )));
            }
            by_name.insert(file_type.name, file_type);
        }
        Ok(Self { by_name })
    }

    pub fn get(&self, name: &str) -> Option<&FileType> {
        self.by_name.get(name)
    }

    /// Picks the single best-matching file type for `path`, by
    /// [`FileType::match_score`], breaking ties by ascending name so the
    /// choice is deterministic regardless of registration or hash-map order.
    pub fn resolve(&self, path: &Path) -> Option<&FileType> {
        self.by_name
            .values()
            .filter_map(|ft| ft.match_score(path).map(|score| (score, ft)))
            .max_by(|(score_a, ft_a), (score_b, ft_b)| {
                score_a.cmp(score_b).then_with(|| ft_b.name.cmp(ft_a.name))
            })
            .map(|(_, ft)| ft)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileType> {
        self.by_name.values()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn resolve_prefers_higher_specificity() {
        let by_ext = FileType::builder("by-ext").extensions(&[".yaml"]).build();
        let by_name = FileType::builder("by-name").filenames(&["config.yaml"]).build();
        let registry = FileTypeRegistry::build(vec![by_ext, by_name]).unwrap();

        let resolved = registry.resolve(&PathBuf::from("config.yaml")).unwrap();
        assert_eq!(resolved.name, "by-name");
    }

    #[test]
    fn resolve_breaks_ties_by_ascending_name() {
        let zebra = FileType::builder("zebra").extensions(&[".txt"]).build();
        let alpha = FileType::builder("alpha").extensions(&[".txt"]).build();
        let registry = FileTypeRegistry::build(vec![zebra, alpha]).unwrap();

        let resolved = registry.resolve(&PathBuf::from("notes.txt")).unwrap();
        assert_eq!(resolved.name, "alpha");
    }

    #[test]
    fn resolve_returns_none_for_unrecognized_path() {
        let rs = FileType::builder("rust").extensions(&[".rs"]).build();
        let registry = FileTypeRegistry::build(vec![rs]).unwrap();
        assert!(registry.resolve(&PathBuf::from("unknown.xyz")).is_none());
    }
}
