use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::Serialize;

use crate::error::CoreError;
use crate::models::code::{Code, CodeId};

/// Immutable snapshot of the billable codes available to a session.
///
/// Codes are held behind `Arc` so that selections can refer to catalog
/// entries without copying them. The snapshot is never mutated after it is
/// built; a fresh catalog replaces it wholesale.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    codes: Vec<Arc<Code>>,
    #[serde(skip)]
    by_id: BTreeMap<CodeId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate code ids and codes that list
    /// the same modifier twice.
    pub fn new(codes: Vec<Code>) -> Result<Self, CoreError> {
        let mut by_id = BTreeMap::new();
        for (index, code) in codes.iter().enumerate() {
            if by_id.insert(code.id, index).is_some() {
                return Err(CoreError::DuplicateCode(code.id));
            }
            let mut seen = BTreeSet::new();
            for modifier in &code.modifiers {
                if !seen.insert(modifier.id) {
                    return Err(CoreError::DuplicateModifier {
                        code: code.id,
                        modifier: modifier.id,
                    });
                }
            }
        }

        Ok(Self {
            codes: codes.into_iter().map(Arc::new).collect(),
            by_id,
        })
    }

    pub fn get(&self, id: CodeId) -> Option<&Arc<Code>> {
        self.by_id.get(&id).map(|&index| &self.codes[index])
    }

    /// All codes, in the order the source listed them.
    pub fn codes(&self) -> &[Arc<Code>] {
        &self.codes
    }

    pub fn first(&self) -> Option<&Arc<Code>> {
        self.codes.first()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
