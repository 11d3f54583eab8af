//! Text rendering of values for diff entries.
//!
//! Scalars render plain and strings raw. Collections and structs render in
//! a compact `[a b]` / `map[k:v]` / `{a b}` style. A top-level pointer shows
//! its target as `&...`; pointers below the top level render as addresses,
//! which also keeps rendering of cyclic data finite.

use crate::deep_equal::value::{address, Kind, Reflect};

/// Placeholder for an absent value.
pub const NIL: &str = "<nil>";

/// Visiting order of map keys: integers by value, before every other key,
/// which is ordered by its rendered text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum KeyOrder {
    Number(i128),
    Text(String),
}

impl KeyOrder {
    pub(crate) fn of(key: &dyn Reflect, text: &str) -> Self {
        match key.reflect().kind() {
            Kind::Int(i) => KeyOrder::Number(i128::from(*i)),
            Kind::Uint(u) => KeyOrder::Number(i128::from(*u)),
            _ => KeyOrder::Text(text.to_string()),
        }
    }
}

/// Render a value.
pub fn render(value: &dyn Reflect) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

fn write_value(out: &mut String, value: &dyn Reflect, depth: usize) {
    match value.reflect().into_parts().1 {
        Kind::Nil => out.push_str(NIL),
        Kind::Bool(b) => out.push_str(&b.to_string()),
        Kind::Int(i) => out.push_str(&i.to_string()),
        Kind::Uint(u) => out.push_str(&u.to_string()),
        Kind::Float(f) => out.push_str(&f.to_string()),
        Kind::Str(s) => out.push_str(s),
        Kind::Struct(fields) => {
            out.push('{');
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_value(out, field.value, depth + 1);
            }
            out.push('}');
        }
        Kind::Map(None) => out.push_str("map[]"),
        Kind::Map(Some(view)) => {
            let mut entries: Vec<(KeyOrder, String, &dyn Reflect)> = view
                .entries
                .iter()
                .map(|(k, v)| {
                    let text = render(*k);
                    (KeyOrder::of(*k, &text), text, *v)
                })
                .collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));

            out.push_str("map[");
            for (i, (_, key, v)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                out.push_str(key);
                out.push(':');
                write_value(out, *v, depth + 1);
            }
            out.push(']');
        }
        Kind::Slice(None) => out.push_str("[]"),
        Kind::Slice(Some(view)) => write_items(out, &view.items, depth),
        Kind::Array(items) => write_items(out, &items, depth),
        Kind::Pointer(None) => out.push_str(NIL),
        Kind::Pointer(Some(target)) if depth == 0 => {
            out.push('&');
            write_value(out, target.get(), depth + 1);
        }
        Kind::Pointer(Some(target)) => {
            out.push_str(&format!("{:#x}", address(target.get())));
        }
        Kind::Boxed(None) => out.push_str(NIL),
        Kind::Boxed(Some(target)) => write_value(out, target.get(), depth),
        Kind::Opaque => {
            out.push('<');
            out.push_str(&value.reflect().ty().to_string());
            out.push('>');
        }
    }
}

fn write_items(out: &mut String, items: &[&dyn Reflect], depth: usize) {
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write_value(out, *item, depth + 1);
    }
    out.push(']');
}
