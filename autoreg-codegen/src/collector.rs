use tracing::trace;

use crate::declaration::{Declaration, Document};

/// Selects the declarations that carry at least one attribute, in document order
/// and then in declaration order within a document.
///
/// Attributes aren't interpreted here: this is a cheap syntactic pre-filter,
/// so the resolver only runs on declarations that can possibly produce bindings.
#[must_use]
pub fn collect_candidates<D>(documents: &[Document<D>]) -> Vec<&D>
where
    D: Declaration,
{
    let candidates = documents
        .iter()
        .flat_map(|document| document.declarations.iter())
        .filter(|declaration| declaration.has_attributes())
        .collect::<Vec<_>>();

    trace!(documents = documents.len(), candidates = candidates.len(), "Candidates collected");

    candidates
}
