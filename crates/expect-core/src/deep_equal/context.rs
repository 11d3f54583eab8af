//! Per-call comparison state.

use crate::deep_equal::model::{Diff, DiffEntry};
use crate::deep_equal::options::Options;
use crate::deep_equal::path::{render_path, FieldPattern, Segment};
use crate::deep_equal::value::{address, Reflect, Type};
use crate::errors::ExError;
use std::collections::{BTreeSet, HashSet};

/// Configuration plus traversal state for one top-level comparison.
///
/// Created fresh by every [`compare`](crate::deep_equal::compare) call and
/// consumed by it.
pub(crate) struct DiffContext {
    float_precision: usize,
    nil_slices_are_empty: bool,
    nil_maps_are_empty: bool,
    exclude_unexported_fields: bool,
    excluded_types: BTreeSet<Type>,
    excluded_field_paths: Vec<FieldPattern>,

    visited_expected: HashSet<(usize, Type)>,
    current_path: Vec<Segment>,
    diff: Diff,
}

impl DiffContext {
    /// Compile `options` into a fresh context.
    ///
    /// # Errors
    ///
    /// `InvalidFieldPath` if any excluded field path pattern is malformed.
    pub(crate) fn new(options: &Options) -> Result<Self, ExError> {
        let excluded_field_paths = options
            .excluded_field_paths
            .iter()
            .map(|pattern| FieldPattern::parse(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            float_precision: options.float_precision,
            nil_slices_are_empty: options.nil_slices_are_empty,
            nil_maps_are_empty: options.nil_maps_are_empty,
            exclude_unexported_fields: options.exclude_unexported_fields,
            excluded_types: options.excluded_types.clone(),
            excluded_field_paths,
            visited_expected: HashSet::new(),
            current_path: Vec::new(),
            diff: Diff::new(),
        })
    }

    /// Context for deciding whether two map keys are equal: same float and
    /// nil policies, no exclusions, and fresh traversal state.
    pub(crate) fn for_keys(&self) -> Self {
        Self {
            float_precision: self.float_precision,
            nil_slices_are_empty: self.nil_slices_are_empty,
            nil_maps_are_empty: self.nil_maps_are_empty,
            exclude_unexported_fields: false,
            excluded_types: BTreeSet::new(),
            excluded_field_paths: Vec::new(),
            visited_expected: HashSet::new(),
            current_path: Vec::new(),
            diff: Diff::new(),
        }
    }

    pub(crate) fn nil_slices_are_empty(&self) -> bool {
        self.nil_slices_are_empty
    }

    pub(crate) fn nil_maps_are_empty(&self) -> bool {
        self.nil_maps_are_empty
    }

    pub(crate) fn exclude_unexported_fields(&self) -> bool {
        self.exclude_unexported_fields
    }

    pub(crate) fn has_excluded_types(&self) -> bool {
        !self.excluded_types.is_empty()
    }

    pub(crate) fn is_excluded_type(&self, ty: &Type) -> bool {
        self.excluded_types.contains(ty)
    }

    pub(crate) fn format_float(&self, value: f64) -> String {
        format!("{:.*}", self.float_precision, value)
    }

    /// Mark an expected-side node as visited. Returns `false` if it already was.
    pub(crate) fn visit(&mut self, want: &dyn Reflect, ty: &Type) -> bool {
        self.visited_expected.insert((address(want), ty.clone()))
    }

    pub(crate) fn push_path(&mut self, segment: Segment) {
        self.current_path.push(segment);
    }

    pub(crate) fn pop_path(&mut self) {
        self.current_path.pop();
    }

    /// Whether the current location matches an excluded field path.
    pub(crate) fn is_excluded_path(&self) -> bool {
        self.excluded_field_paths
            .iter()
            .any(|pattern| pattern.matches(&self.current_path))
    }

    pub(crate) fn path(&self) -> String {
        render_path(&self.current_path)
    }

    pub(crate) fn add_diff(&mut self, want: impl Into<String>, got: impl Into<String>) {
        let path = self.path();
        self.diff.push(DiffEntry::new(path, want, got));
    }

    pub(crate) fn into_diff(self) -> Diff {
        self.diff
    }
}
