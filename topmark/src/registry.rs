//! Binds each registered [`FileType`] to a concrete [`HeaderProcessor`].
//!
//! Kept separate from `topmark_domain::FileTypeRegistry`: the domain
//! registry only knows `CommentSyntax` (data), while this one owns the
//! processor *implementations*, which live in this crate.

use std::collections::HashMap;
use std::sync::Arc;

use topmark_domain::{CommentSyntax, FileTypeRegistry};

use crate::processors::block_comment::BlockCommentProcessor;
use crate::processors::line_comment::LineCommentProcessor;
use crate::processors::xml::XmlPrologProcessor;
use crate::processors::HeaderProcessor;

#[derive(Clone, Default)]
pub struct ProcessorRegistry {
    by_type_name: HashMap<&'static str, Arc<dyn HeaderProcessor>>,
}

impl ProcessorRegistry {
    /// Builds one processor instance per file type in `file_types` whose
    /// `comment_syntax` isn't `CommentSyntax::None`, keyed by the file
    /// type's name.
    pub fn from_file_types(file_types: &FileTypeRegistry) -> Self {
        let mut by_type_name = HashMap::new();
        for file_type in file_types.iter() {
            let processor: Option<Arc<dyn HeaderProcessor>> = match file_type.comment_syntax {
                CommentSyntax::Line { prefix } => Some(Arc::new(LineCommentProcessor { prefix })),
                CommentSyntax::Block { start, end, line_prefix } => {
                    Some(Arc::new(BlockCommentProcessor { start, end, line_prefix }))
                }
                CommentSyntax::XmlProlog => Some(Arc::new(XmlPrologProcessor)),
                CommentSyntax::None => None,
            };
            if let Some(processor) = processor {
                by_type_name.insert(file_type.name, processor);
            }
        }
        Self { by_type_name }
    }

    pub fn get(&self, file_type_name: &str) -> Option<&Arc<dyn HeaderProcessor>> {
        self.by_type_name.get(file_type_name)
    }

    pub fn len(&self) -> usize {
        self.by_type_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topmark_domain::builtins;

    #[test]
    fn registers_a_processor_for_every_non_skipped_builtin() {
        let file_types = FileTypeRegistry::build(builtins::catalog()).unwrap();
        let processors = ProcessorRegistry::from_file_types(&file_types);
        for file_type in file_types.iter() {
            if file_type.skip_processing {
                continue;
            }
            assert!(
                processors.get(file_type.name).is_some(),
                "missing processor for {}",
                file_type.name
            );
        }
    }
}
