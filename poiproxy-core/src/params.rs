//! Optional request parameters.
//!
//! HTTP resources declare which optional parameters they understand by
//! implementing [`OptionalParams`]; extraction then picks those out of the
//! incoming query map in declaration order.

use crate::model::Param;
use std::collections::HashMap;
use std::hash::BuildHasher;

/// A resource that understands a fixed set of optional parameters.
pub trait OptionalParams {
    /// Names of the recognised optional parameters, in the order they should
    /// be reported.
    fn optional_param_names(&self) -> &[&'static str];

    /// Picks the declared parameters present in `params`.
    fn extract_params<S: BuildHasher>(&self, params: &HashMap<String, String, S>) -> Vec<Param> {
        extract_params(self.optional_param_names(), params)
    }
}

/// Returns the `(name, value)` pairs of `names` found in `params`.
///
/// Order follows `names`. Undeclared keys are ignored and declared names
/// missing from `params` are skipped.
pub fn extract_params<N, S>(names: &[N], params: &HashMap<String, String, S>) -> Vec<Param>
where
    N: AsRef<str>,
    S: BuildHasher,
{
    names
        .iter()
        .filter_map(|name| {
            let name = name.as_ref();
            params.get(name).map(|value| Param::new(name, value.as_str()))
        })
        .collect()
}
