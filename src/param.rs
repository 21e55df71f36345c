//! Solver parameters as seen by the expression engine
//!
//! Expressions refer to free variables either through an opaque [`ParamHandle`]
//! (resolved by a [`ParamStore`] at evaluation time) or through an already
//! resolved [`Param`] record shared with the store.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque identifier of a free scalar parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ParamHandle(pub u32);

impl ParamHandle {
    /// Raw numeric id
    #[inline]
    pub fn id(self) -> u32 {
        self.0
    }
}

impl From<u32> for ParamHandle {
    fn from(v: u32) -> Self {
        ParamHandle(v)
    }
}

impl fmt::Display for ParamHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// A resolved parameter record
///
/// The value lives in an atomic so a store can update it between solver
/// iterations while expressions holding the record keep reading the current value.
pub struct Param {
    handle: ParamHandle,
    bits: AtomicU64,
}

impl Param {
    pub fn new(handle: ParamHandle, value: f64) -> Self {
        Param {
            handle,
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    #[inline]
    pub fn handle(&self) -> ParamHandle {
        self.handle
    }

    /// Current value
    #[inline]
    pub fn value(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set_value(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Param")
            .field("handle", &self.handle)
            .field("value", &self.value())
            .finish()
    }
}

// Records are identified by their handle
impl PartialEq for Param {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

/// Source of parameter values consumed by evaluation
///
/// The engine never mutates parameter state through this trait. Whatever
/// `lookup` returns (including NaN for an unknown handle) is passed through.
pub trait ParamStore {
    /// Current value of the parameter
    fn lookup(&self, handle: ParamHandle) -> f64;

    /// Shared record for the parameter, if the store keeps one
    fn resolve_direct(&self, handle: ParamHandle) -> Option<Arc<Param>>;
}

impl<S: ParamStore + ?Sized> ParamStore for &S {
    fn lookup(&self, handle: ParamHandle) -> f64 {
        (**self).lookup(handle)
    }

    fn resolve_direct(&self, handle: ParamHandle) -> Option<Arc<Param>> {
        (**self).resolve_direct(handle)
    }
}

/// In-memory parameter store
///
/// # Example
/// ```
/// use param_expr::{Expr, ParamHandle, ParamTable};
///
/// let mut table = ParamTable::new();
/// let x = ParamHandle(1);
/// table.insert(x, 3.0);
///
/// let expr = Expr::param(x) * Expr::param(x);
/// assert_eq!(expr.eval(&table), 9.0);
/// ```
#[derive(Debug, Default)]
pub struct ParamTable {
    params: FxHashMap<ParamHandle, Arc<Param>>,
}

impl ParamTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter or overwrite the value of an existing one
    ///
    /// Existing records are updated in place so resolved expressions see the change.
    pub fn insert(&mut self, handle: ParamHandle, value: f64) -> Arc<Param> {
        let param = self
            .params
            .entry(handle)
            .or_insert_with(|| Arc::new(Param::new(handle, value)));
        param.set_value(value);
        Arc::clone(param)
    }

    /// Update the value of an existing parameter; returns false if unknown
    pub fn set(&self, handle: ParamHandle, value: f64) -> bool {
        match self.params.get(&handle) {
            Some(param) => {
                param.set_value(value);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, handle: ParamHandle) -> Option<f64> {
        self.params.get(&handle).map(|p| p.value())
    }

    pub fn contains(&self, handle: ParamHandle) -> bool {
        self.params.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Handles in ascending order
    pub fn handles(&self) -> Vec<ParamHandle> {
        let mut handles: Vec<ParamHandle> = self.params.keys().copied().collect();
        handles.sort_unstable();
        handles
    }
}

impl ParamStore for ParamTable {
    fn lookup(&self, handle: ParamHandle) -> f64 {
        match self.params.get(&handle) {
            Some(param) => param.value(),
            None => {
                tracing::warn!(%handle, "lookup of unknown parameter");
                f64::NAN
            }
        }
    }

    fn resolve_direct(&self, handle: ParamHandle) -> Option<Arc<Param>> {
        self.params.get(&handle).cloned()
    }
}

impl FromIterator<(ParamHandle, f64)> for ParamTable {
    fn from_iter<I: IntoIterator<Item = (ParamHandle, f64)>>(iter: I) -> Self {
        let mut table = ParamTable::new();
        for (handle, value) in iter {
            table.insert(handle, value);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_display_is_hex() {
        assert_eq!(ParamHandle(0x1a).to_string(), "0000001a");
        assert_eq!(ParamHandle(0xdead_beef).to_string(), "deadbeef");
    }

    #[test]
    fn test_insert_updates_shared_record() {
        let mut table = ParamTable::new();
        let first = table.insert(ParamHandle(7), 1.5);
        let second = table.insert(ParamHandle(7), -2.0);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.value(), -2.0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_set_unknown_handle() {
        let table = ParamTable::new();
        assert!(!table.set(ParamHandle(3), 1.0));
        assert!(table.lookup(ParamHandle(3)).is_nan());
        assert!(table.resolve_direct(ParamHandle(3)).is_none());
    }

    #[test]
    fn test_from_iter_and_handles() {
        let table: ParamTable = [(ParamHandle(5), 1.0), (ParamHandle(2), 4.0)]
            .into_iter()
            .collect();
        assert_eq!(table.handles(), vec![ParamHandle(2), ParamHandle(5)]);
        assert_eq!(table.get(ParamHandle(2)), Some(4.0));
    }
}
