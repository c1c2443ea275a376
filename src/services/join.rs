use std::collections::HashMap;
use std::hash::Hash;

/// Enriches each base record with its lookup counterpart, joined by key.
///
/// The lookup set is indexed once per call; duplicate lookup keys are
/// last-wins, mirroring the overwrite semantics of indexing by key (a known
/// looseness, kept as-is). A base record whose key has no lookup counterpart
/// is merged with `fallback` instead of being dropped, so the output always
/// has exactly one entry per base record, in base order. An empty lookup set
/// enriches everything with the fallback.
pub fn enrich<'a, B, L, K, E>(
    base: &'a [B],
    lookup: &'a [L],
    key_of: impl Fn(&B) -> K,
    id_of: impl Fn(&L) -> K,
    fallback: &'a L,
    merge: impl Fn(&'a B, &'a L) -> E,
) -> Vec<E>
where
    K: Eq + Hash,
{
    let mut index: HashMap<K, &L> = HashMap::with_capacity(lookup.len());
    for record in lookup {
        index.insert(id_of(record), record);
    }

    base.iter()
        .map(|record| {
            let joined = index.get(&key_of(record)).copied().unwrap_or(fallback);
            merge(record, joined)
        })
        .collect()
}
