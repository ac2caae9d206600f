//! Non-finite float cleanup
//!
//! JSON has no representation for NaN or infinity. Records may hold such
//! values in memory; [`Sanitize`] replaces them with `None` immediately before
//! a payload is serialized. The pass recurses through sequences and maps and
//! is idempotent.

use crate::normalize::job::CanonicalJob;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

pub trait Sanitize {
    /// Replaces every non-finite float reachable from `self` with `None`
    fn sanitize(&mut self);
}

impl Sanitize for Option<f64> {
    fn sanitize(&mut self) {
        if self.is_some_and(|f| !f.is_finite()) {
            *self = None;
        }
    }
}

impl<T: Sanitize> Sanitize for Vec<T> {
    fn sanitize(&mut self) {
        self.as_mut_slice().sanitize();
    }
}

impl<T: Sanitize> Sanitize for [T] {
    fn sanitize(&mut self) {
        for item in self.iter_mut() {
            item.sanitize();
        }
    }
}

impl<K: Ord, V: Sanitize> Sanitize for BTreeMap<K, V> {
    fn sanitize(&mut self) {
        for value in self.values_mut() {
            value.sanitize();
        }
    }
}

impl<K: Eq + Hash, V: Sanitize> Sanitize for HashMap<K, V> {
    fn sanitize(&mut self) {
        for value in self.values_mut() {
            value.sanitize();
        }
    }
}

impl Sanitize for CanonicalJob {
    fn sanitize(&mut self) {
        self.latitude.sanitize();
        self.longitude.sanitize();
    }
}
