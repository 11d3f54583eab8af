//! Recursive structural comparison.
//!
//! Traversal is depth-first and pre-order. Every divergence becomes one
//! [`DiffEntry`](crate::deep_equal::DiffEntry) and stops the descent into
//! that branch only; the rest of the structure is still compared.

use crate::deep_equal::context::DiffContext;
use crate::deep_equal::model::{Diff, MISSING_INDEX, MISSING_KEY, NIL_MAP, NIL_SLICE, UNWANTED_INDEX};
use crate::deep_equal::options::Options;
use crate::deep_equal::path::Segment;
use crate::deep_equal::render::{render, KeyOrder, NIL};
use crate::deep_equal::value::{Field, Kind, MapView, Reflect, SliceView, Type, Value};
use crate::errors::{ExError, ExErrorKind};
use std::collections::BTreeMap;

/// Compare `want` against `got` and return every difference found.
///
/// An empty [`Diff`] means the values are equal under `options`.
///
/// # Errors
///
/// - `InvalidFieldPath` if an excluded field path pattern is malformed.
///   Nothing is traversed in that case.
/// - `UnsupportedKind` if the traversal reaches a value without a
///   comparison rule (an opaque value).
/// - `KindMismatch` if a `Reflect` implementation reports different kinds
///   or field counts for the same type.
pub fn compare(want: &dyn Reflect, got: &dyn Reflect, options: &Options) -> Result<Diff, ExError> {
    let mut ctx = DiffContext::new(options)?;
    determine(&mut ctx, Some(want), Some(got))?;
    Ok(ctx.into_diff())
}

/// A value that is actually there, paired with its reflection.
fn present(value: Option<&dyn Reflect>) -> Option<(&dyn Reflect, Value<'_>)> {
    let value = value?;
    let reflected = value.reflect();
    if reflected.is_nil() {
        None
    } else {
        Some((value, reflected))
    }
}

fn determine(
    ctx: &mut DiffContext,
    want: Option<&dyn Reflect>,
    got: Option<&dyn Reflect>,
) -> Result<(), ExError> {
    let want = present(want);
    let got = present(got);

    // Absent values have no identity and are never marked.
    if let Some((value, reflected)) = &want {
        if !ctx.visit(*value, reflected.ty()) {
            return Ok(());
        }
    }

    let ((want, want_value), (got, got_value)) = match (want, got) {
        (None, None) => return Ok(()),
        (None, Some((got, _))) => {
            ctx.add_diff(NIL, render(got));
            return Ok(());
        }
        (Some((want, _)), None) => {
            ctx.add_diff(render(want), NIL);
            return Ok(());
        }
        (Some(want), Some(got)) => (want, got),
    };

    if want_value.ty() != got_value.ty() {
        ctx.add_diff(want_value.ty().to_string(), got_value.ty().to_string());
        return Ok(());
    }

    let (ty, want_kind) = want_value.into_parts();
    let (_, got_kind) = got_value.into_parts();

    if matches!(want_kind, Kind::Opaque) || matches!(got_kind, Kind::Opaque) {
        return Err(ExError::new(ExErrorKind::UnsupportedKind)
            .with_op("compare")
            .with_path(ctx.path())
            .with_type_name(ty.to_string())
            .with_message("no comparison rule for an opaque value"));
    }

    if is_indirect(&want_kind) || is_indirect(&got_kind) {
        return determine(ctx, follow(want, &want_kind), follow(got, &got_kind));
    }

    match (want_kind, got_kind) {
        (Kind::Struct(want_fields), Kind::Struct(got_fields)) => {
            compare_structs(ctx, &ty, &want_fields, &got_fields)
        }
        (Kind::Map(want_view), Kind::Map(got_view)) => {
            compare_maps(ctx, (want, want_view), (got, got_view))
        }
        (Kind::Slice(want_view), Kind::Slice(got_view)) => {
            compare_slices(ctx, (want, want_view), (got, got_view))
        }
        // The length is part of the array type, so both sides have it.
        (Kind::Array(want_items), Kind::Array(got_items)) => {
            compare_elements(ctx, &want_items, &got_items)
        }
        (Kind::Float(w), Kind::Float(g)) => {
            let (w, g) = (ctx.format_float(w), ctx.format_float(g));
            if w != g {
                ctx.add_diff(w, g);
            }
            Ok(())
        }
        (Kind::Bool(w), Kind::Bool(g)) => {
            add_diff_if_unequal(ctx, w, g);
            Ok(())
        }
        (Kind::Int(w), Kind::Int(g)) => {
            add_diff_if_unequal(ctx, w, g);
            Ok(())
        }
        (Kind::Uint(w), Kind::Uint(g)) => {
            add_diff_if_unequal(ctx, w, g);
            Ok(())
        }
        (Kind::Str(w), Kind::Str(g)) => {
            add_diff_if_unequal(ctx, w, g);
            Ok(())
        }
        (want_kind, got_kind) => Err(ExError::new(ExErrorKind::KindMismatch)
            .with_op("compare")
            .with_path(ctx.path())
            .with_type_name(ty.to_string())
            .with_message(format!(
                "reflected kinds differ: {} vs {}",
                want_kind.name(),
                got_kind.name()
            ))),
    }
}

fn is_indirect(kind: &Kind<'_>) -> bool {
    matches!(kind, Kind::Pointer(_) | Kind::Boxed(_))
}

/// Unwrap one level of indirection; `None` for a null target.
fn follow<'a>(value: &'a dyn Reflect, kind: &'a Kind<'_>) -> Option<&'a dyn Reflect> {
    match kind {
        Kind::Pointer(target) | Kind::Boxed(target) => target.as_ref().map(|t| t.get()),
        _ => Some(value),
    }
}

fn add_diff_if_unequal<T: PartialEq + ToString>(ctx: &mut DiffContext, want: T, got: T) {
    if want != got {
        ctx.add_diff(want.to_string(), got.to_string());
    }
}

/// Push `segment`, run `step` unless the new location is excluded, pop.
fn descend(
    ctx: &mut DiffContext,
    segment: Segment,
    step: impl FnOnce(&mut DiffContext) -> Result<(), ExError>,
) -> Result<(), ExError> {
    ctx.push_path(segment);
    let result = if ctx.is_excluded_path() {
        Ok(())
    } else {
        step(ctx)
    };
    ctx.pop_path();
    result
}

fn compare_structs(
    ctx: &mut DiffContext,
    ty: &Type,
    want: &[Field<'_>],
    got: &[Field<'_>],
) -> Result<(), ExError> {
    if want.len() != got.len() {
        return Err(ExError::new(ExErrorKind::KindMismatch)
            .with_op("compare")
            .with_path(ctx.path())
            .with_type_name(ty.to_string())
            .with_message(format!(
                "reflected field counts differ: {} vs {}",
                want.len(),
                got.len()
            )));
    }

    for (want_field, got_field) in want.iter().zip(got) {
        if !want_field.exported && ctx.exclude_unexported_fields() {
            continue;
        }
        if ctx.has_excluded_types() && ctx.is_excluded_type(want_field.value.reflect().ty()) {
            continue;
        }
        descend(ctx, Segment::Field(want_field.name), |ctx| {
            determine(ctx, Some(want_field.value), Some(got_field.value))
        })?;
    }
    Ok(())
}

fn compare_maps(
    ctx: &mut DiffContext,
    (want, want_view): (&dyn Reflect, Option<MapView<'_>>),
    (got, got_view): (&dyn Reflect, Option<MapView<'_>>),
) -> Result<(), ExError> {
    if !ctx.nil_maps_are_empty() && want_view.is_none() != got_view.is_none() {
        if want_view.is_none() {
            ctx.add_diff(NIL_MAP, render(got));
        } else {
            ctx.add_diff(render(want), NIL_MAP);
        }
        return Ok(());
    }

    let want_entries = map_entries(want_view.as_ref());
    let got_entries = map_entries(got_view.as_ref());

    if want_entries.is_empty() && got_entries.is_empty() {
        return Ok(());
    }
    if let (Some(w), Some(g)) = (&want_view, &got_view) {
        if w.entries.len() == g.entries.len() && w.storage == g.storage {
            return Ok(());
        }
    }

    let mut got_by_text: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (index, entry) in got_entries.iter().enumerate() {
        got_by_text.entry(entry.text.as_str()).or_default().push(index);
    }

    let mut matched = vec![false; got_entries.len()];
    for want_entry in &want_entries {
        let found = find_key(ctx, want_entry, &got_entries, &got_by_text, &matched)?;
        if let Some(index) = found {
            matched[index] = true;
        }
        let got_value = found.map(|index| got_entries[index].value);
        descend(ctx, Segment::Key(want_entry.text.clone()), |ctx| match got_value {
            Some(got_value) => determine(ctx, Some(want_entry.value), Some(got_value)),
            None => {
                ctx.add_diff(render(want_entry.value), MISSING_KEY);
                Ok(())
            }
        })?;
    }

    for (got_entry, _) in got_entries.iter().zip(&matched).filter(|(_, m)| !**m) {
        descend(ctx, Segment::Key(got_entry.text.clone()), |ctx| {
            ctx.add_diff(MISSING_KEY, render(got_entry.value));
            Ok(())
        })?;
    }
    Ok(())
}

struct MapEntry<'a> {
    order: KeyOrder,
    /// Rendered key, used for the `[key]` path segment
    text: String,
    key: &'a dyn Reflect,
    value: &'a dyn Reflect,
}

/// Map entries in visiting order.
fn map_entries<'a>(view: Option<&MapView<'a>>) -> Vec<MapEntry<'a>> {
    let mut entries: Vec<MapEntry<'a>> = view
        .map(|view| {
            view.entries
                .iter()
                .map(|(key, value)| {
                    let text = render(*key);
                    MapEntry {
                        order: KeyOrder::of(*key, &text),
                        text,
                        key: *key,
                        value: *value,
                    }
                })
                .collect()
        })
        .unwrap_or_default();
    entries.sort_by(|a, b| a.order.cmp(&b.order));
    entries
}

/// Index of the unmatched `got` entry whose key equals `want`'s key.
///
/// Keys with the same rendered text are tried first; text alone never
/// decides, since distinct keys can render alike and equal keys holding
/// pointers render as different addresses.
fn find_key(
    ctx: &DiffContext,
    want: &MapEntry<'_>,
    got: &[MapEntry<'_>],
    got_by_text: &BTreeMap<&str, Vec<usize>>,
    matched: &[bool],
) -> Result<Option<usize>, ExError> {
    let same_text = got_by_text
        .get(want.text.as_str())
        .map(Vec::as_slice)
        .unwrap_or_default();
    for &index in same_text {
        if !matched[index] && keys_equal(ctx, want.key, got[index].key)? {
            return Ok(Some(index));
        }
    }
    for (index, entry) in got.iter().enumerate() {
        if matched[index] || entry.text == want.text {
            continue;
        }
        if keys_equal(ctx, want.key, entry.key)? {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

fn keys_equal(ctx: &DiffContext, want: &dyn Reflect, got: &dyn Reflect) -> Result<bool, ExError> {
    let mut scratch = ctx.for_keys();
    determine(&mut scratch, Some(want), Some(got))?;
    Ok(scratch.into_diff().is_empty())
}

fn compare_slices(
    ctx: &mut DiffContext,
    (want, want_view): (&dyn Reflect, Option<SliceView<'_>>),
    (got, got_view): (&dyn Reflect, Option<SliceView<'_>>),
) -> Result<(), ExError> {
    if !ctx.nil_slices_are_empty() && want_view.is_none() != got_view.is_none() {
        if want_view.is_none() {
            ctx.add_diff(NIL_SLICE, render(got));
        } else {
            ctx.add_diff(render(want), NIL_SLICE);
        }
        return Ok(());
    }

    if let (Some(w), Some(g)) = (&want_view, &got_view) {
        if w.items.len() == g.items.len() && w.storage == g.storage {
            return Ok(());
        }
    }

    let want_items = want_view.map(|view| view.items).unwrap_or_default();
    let got_items = got_view.map(|view| view.items).unwrap_or_default();
    compare_elements(ctx, &want_items, &got_items)
}

fn compare_elements(
    ctx: &mut DiffContext,
    want: &[&dyn Reflect],
    got: &[&dyn Reflect],
) -> Result<(), ExError> {
    for index in 0..want.len().max(got.len()) {
        let pair = (want.get(index).copied(), got.get(index).copied());
        descend(ctx, Segment::Index(index), |ctx| match pair {
            (Some(w), Some(g)) => determine(ctx, Some(w), Some(g)),
            (Some(w), None) => {
                ctx.add_diff(render(w), MISSING_INDEX);
                Ok(())
            }
            (None, Some(g)) => {
                ctx.add_diff(UNWANTED_INDEX, render(g));
                Ok(())
            }
            (None, None) => Ok(()),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deep_equal::value::Nil;

    fn diff(want: &dyn Reflect, got: &dyn Reflect) -> Diff {
        compare(want, got, &Options::default()).unwrap()
    }

    #[test]
    fn test_scalars() {
        assert!(diff(&1i32, &1i32).is_empty());
        assert!(diff(&"a", &"a").is_empty());
        assert_eq!(diff(&true, &false).entries()[0].got, "false");
    }

    #[test]
    fn test_nil_pair() {
        assert!(diff(&Nil, &Nil).is_empty());
        let d = diff(&"", &Nil);
        assert_eq!(d.len(), 1);
        assert_eq!(d.entries()[0].got, "<nil>");
    }

    #[test]
    fn test_option_unwraps_at_same_depth() {
        let d = diff(&Some(1), &Some(2));
        assert_eq!(d.len(), 1);
        assert_eq!(d.entries()[0].path, "");
        assert_eq!(d.entries()[0].want, "1");

        let d = diff(&Some(1), &None::<i32>);
        assert_eq!(d.entries()[0].got, "<nil>");
    }
}
