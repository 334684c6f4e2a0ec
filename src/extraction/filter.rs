use std::collections::HashSet;

use super::types::ClinicalEntity;

/// Keep entities that carry a SNOMED code, dropping repeated surface text.
///
/// Single order-preserving pass. An entity is kept iff its code is non-blank
/// after trimming and its `text` has not been kept already; the first kept
/// occurrence wins, later duplicates are dropped regardless of their own code.
pub fn filter_entities(entities: Vec<ClinicalEntity>) -> Vec<ClinicalEntity> {
    let mut seen_texts: HashSet<String> = HashSet::new();
    let mut kept = Vec::new();

    for entity in entities {
        if entity.has_snomed_code() && !seen_texts.contains(&entity.text) {
            seen_texts.insert(entity.text.clone());
            kept.push(entity);
        }
    }

    kept
}
