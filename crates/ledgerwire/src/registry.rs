//! Schema registry mapping descriptors to decoding plans.

use std::collections::{HashMap, HashSet};

use crate::descriptor::TypeDescriptor;
use crate::error::{DecodeError, FieldPath};
use crate::schema::{DecodingPlan, FieldKind};

/// Maps a [`TypeDescriptor`] to the [`DecodingPlan`] describing its wire
/// layout.
///
/// The registry is an explicitly constructed object: populate it once at
/// initialization, then share it immutably. Decoding takes `&SchemaRegistry`,
/// so concurrent decode calls on independent buffers need no locking.
///
/// # Example
///
/// ```
/// use ledgerwire::{DecodingPlan, PrimitiveKind, SchemaRegistry, TypeDescriptor};
///
/// let mut registry = SchemaRegistry::new();
/// let descriptor = TypeDescriptor::new("t:Point");
/// let plan = DecodingPlan::new()
///     .field("x", PrimitiveKind::I32)
///     .field("y", PrimitiveKind::I32);
/// registry.register(descriptor.clone(), plan).unwrap();
/// assert!(registry.resolve(&descriptor).is_ok());
/// ```
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    plans: HashMap<TypeDescriptor, DecodingPlan>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `descriptor` to `plan`.
    ///
    /// Re-registering an identical plan is a no-op. A different plan under an
    /// existing descriptor fails with [`DecodeError::DuplicateSchema`]. A plan
    /// whose inline composites reach back to `descriptor` through the already
    /// registered plans fails with [`DecodeError::RecursiveSchema`]; opaque
    /// blobs are the only legal boundary for self-referential records.
    pub fn register(
        &mut self,
        descriptor: TypeDescriptor,
        plan: DecodingPlan,
    ) -> Result<(), DecodeError> {
        if let Some(existing) = self.plans.get(&descriptor) {
            if *existing == plan {
                return Ok(());
            }
            return Err(DecodeError::DuplicateSchema { descriptor });
        }
        self.check_inline_cycle(&descriptor, &plan)?;
        self.plans.insert(descriptor, plan);
        Ok(())
    }

    /// Looks up the plan for `descriptor`.
    pub fn resolve(&self, descriptor: &TypeDescriptor) -> Result<&DecodingPlan, DecodeError> {
        self.get(descriptor).ok_or_else(|| DecodeError::UnknownSchema {
            descriptor: descriptor.clone(),
            path: FieldPath::root(),
        })
    }

    pub fn get(&self, descriptor: &TypeDescriptor) -> Option<&DecodingPlan> {
        self.plans.get(descriptor)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Walks inline composite references from `plan` through registered plans.
    /// Any path back to `descriptor` means unbounded recursive expansion at
    /// decode time. Cycles are always caught when their closing edge is
    /// registered, so checking reachability of the new descriptor suffices.
    fn check_inline_cycle(
        &self,
        descriptor: &TypeDescriptor,
        plan: &DecodingPlan,
    ) -> Result<(), DecodeError> {
        let mut seen: HashSet<&TypeDescriptor> = HashSet::new();
        let mut work: Vec<&TypeDescriptor> = Vec::new();
        for spec in plan.fields() {
            collect_inline_refs(&spec.kind, &mut work);
        }
        while let Some(next) = work.pop() {
            if next == descriptor {
                return Err(DecodeError::RecursiveSchema {
                    descriptor: descriptor.clone(),
                });
            }
            if !seen.insert(next) {
                continue;
            }
            if let Some(nested) = self.plans.get(next) {
                for spec in nested.fields() {
                    collect_inline_refs(&spec.kind, &mut work);
                }
            }
        }
        Ok(())
    }
}

/// Collects composite descriptors referenced by `kind`, looking through
/// sequences. Blobs are not followed: they defer decoding and therefore
/// bound recursion.
fn collect_inline_refs<'p>(kind: &'p FieldKind, out: &mut Vec<&'p TypeDescriptor>) {
    match kind {
        FieldKind::Composite { descriptor, .. } => out.push(descriptor),
        FieldKind::Sequence(element) => collect_inline_refs(element, out),
        FieldKind::Primitive(_) | FieldKind::Blob => {}
    }
}
