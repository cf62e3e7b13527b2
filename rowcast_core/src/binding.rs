//! Field bindings: the per-column unit of work the mapper executes.

use crate::convert::ConverterRegistry;
use crate::row::TupleRow;
use crate::ConvertError;

/// The application closure stored in a binding: extract the labeled column
/// from the row through the registry and store it into the target.
pub type BindFn<T> = Box<
    dyn Fn(&mut T, &dyn TupleRow, &ConverterRegistry, &str) -> Result<(), ConvertError>
        + Send
        + Sync,
>;

/// One field's mapping: a column label plus the closure that populates the
/// field from that column.
pub struct FieldBinding<T> {
    pub(crate) label: String,
    pub(crate) field: &'static str,
    pub(crate) apply: BindFn<T>,
}

impl<T> FieldBinding<T> {
    /// The column label this binding reads.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The target field name, for diagnostics.
    pub fn field(&self) -> &'static str {
        self.field
    }
}

/// An ordered collection of bindings with label-keyed overwrite.
///
/// Inserting a binding whose label is already present replaces the earlier
/// one in place, keeping its position. Generated impls merge embedded
/// types before binding their own fields, so the outermost definition of a
/// label always wins.
pub struct BindingSet<T> {
    entries: Vec<FieldBinding<T>>,
}

impl<T> Default for BindingSet<T> {
    fn default() -> Self {
        BindingSet {
            entries: Vec::new(),
        }
    }
}

impl<T> BindingSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a binding, overwriting any earlier binding with the same
    /// label.
    pub fn bind(&mut self, label: impl Into<String>, field: &'static str, apply: BindFn<T>) {
        self.insert(FieldBinding {
            label: label.into(),
            field,
            apply,
        });
    }

    /// Lift every binding of an embedded mappable type into this set by
    /// composing it with a projection to the embedded field. Merged
    /// bindings take part in the same label-keyed overwrite as direct
    /// ones.
    ///
    /// The composed closure captures `project`, whose type names both `T`
    /// and `S`, so storing it as a [`BindFn<T>`] requires both to be
    /// `'static`.
    pub fn merge<S>(&mut self, sub: BindingSet<S>, project: fn(&mut T) -> &mut S)
    where
        T: 'static,
        S: 'static,
    {
        for binding in sub.entries {
            let FieldBinding {
                label,
                field,
                apply,
            } = binding;
            self.insert(FieldBinding {
                label,
                field,
                apply: Box::new(move |target, row, converters, label| {
                    apply(project(target), row, converters, label)
                }),
            });
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate bindings in their effective order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldBinding<T>> {
        self.entries.iter()
    }

    fn insert(&mut self, binding: FieldBinding<T>) {
        match self.entries.iter_mut().find(|b| b.label == binding.label) {
            Some(existing) => *existing = binding,
            None => self.entries.push(binding),
        }
    }
}
