//! Default strategy names.

use std::collections::HashSet;

/// `"{model}-{exchange}"`, the base for a new strategy's name.
pub fn default_strategy_name(model_display_name: &str, exchange_label: &str) -> String {
    format!("{model_display_name}-{exchange_label}")
}

/// First of `base`, `base-1`, `base-2`, ... not already taken.
pub fn unique_strategy_name<S: AsRef<str>>(base: &str, existing: &[S]) -> String {
    let taken: HashSet<&str> = existing.iter().map(AsRef::as_ref).collect();
    if !taken.contains(base) {
        return base.to_string();
    }

    let mut suffix: u64 = 1;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        suffix += 1;
    }
}
