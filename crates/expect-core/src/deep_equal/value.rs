//! Value model consumed by the comparison engine.
//!
//! A value enters the engine through [`Reflect`], which exposes a shallow,
//! borrowed [`Value`]: its [`Type`] and its [`Kind`]. Children are handed out
//! as `&dyn Reflect` and only reflected when the engine descends into them,
//! which is what lets cyclic structures be traversed at all.

use std::cell::{Ref, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::rc::{Rc, Weak};
use std::sync::Arc;

/// Runtime type descriptor.
///
/// Two values can only be equal when their descriptors are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Type {
    Bool,
    Int(&'static str),
    Uint(&'static str),
    Float(&'static str),
    String,
    /// Dynamically sized sequence (`Vec<T>`, `&[T]`)
    Slice(Box<Type>),
    /// Fixed-length array; the length is part of the type
    Array(Box<Type>, usize),
    /// Map container name, key type, value type
    Map(&'static str, Box<Type>, Box<Type>),
    Struct(&'static str),
    /// Generic struct and its type arguments
    Generic(&'static str, Vec<Type>),
    /// Pointer wrapper name (`Box`, `Rc`, `Arc`, `Weak`, `&`) and target type
    Pointer(&'static str, Box<Type>),
    Option(Box<Type>),
    /// Interior-mutable wrapper (`RefCell<T>`)
    Cell(Box<Type>),
    /// Boxed value whose concrete type is only known at runtime
    Interface(&'static str),
    Opaque(&'static str),
}

impl Type {
    /// Shorthand for `T::static_type()`.
    pub fn of<T: Reflect>() -> Type {
        T::static_type()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => write!(f, "bool"),
            Type::Int(name) | Type::Uint(name) | Type::Float(name) => write!(f, "{}", name),
            Type::String => write!(f, "String"),
            Type::Slice(elem) => write!(f, "Vec<{}>", elem),
            Type::Array(elem, len) => write!(f, "[{}; {}]", elem, len),
            Type::Map(container, key, value) => write!(f, "{}<{}, {}>", container, key, value),
            Type::Struct(name) | Type::Interface(name) | Type::Opaque(name) => {
                write!(f, "{}", name)
            }
            Type::Generic(name, args) => {
                write!(f, "{}<", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ">")
            }
            Type::Pointer("&", target) => write!(f, "&{}", target),
            Type::Pointer(wrapper, target) => write!(f, "{}<{}>", wrapper, target),
            Type::Option(inner) => write!(f, "Option<{}>", inner),
            Type::Cell(inner) => write!(f, "RefCell<{}>", inner),
        }
    }
}

/// The target of an indirection.
pub enum Target<'a> {
    Ref(&'a dyn Reflect),
    /// Shared borrow held for as long as the engine looks at the target
    Cell(Ref<'a, dyn Reflect + 'a>),
    /// Upgraded weak reference
    Shared(Rc<dyn Reflect + 'a>),
}

impl<'a> Target<'a> {
    pub fn get(&self) -> &dyn Reflect {
        match self {
            Target::Ref(value) => *value,
            Target::Cell(value) => &**value,
            Target::Shared(value) => &**value,
        }
    }
}

/// A struct field in declaration order.
pub struct Field<'a> {
    pub name: &'static str,
    pub exported: bool,
    pub value: &'a dyn Reflect,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, exported: bool, value: &'a dyn Reflect) -> Self {
        Self {
            name,
            exported,
            value,
        }
    }
}

/// Elements of a non-nil slice.
pub struct SliceView<'a> {
    /// Address of the backing storage, used for the same-storage fast path
    pub storage: usize,
    pub items: Vec<&'a dyn Reflect>,
}

/// Entries of a non-nil map.
pub struct MapView<'a> {
    /// Address of the map itself, used for the same-storage fast path
    pub storage: usize,
    pub entries: Vec<(&'a dyn Reflect, &'a dyn Reflect)>,
}

/// Closed set of value kinds the engine knows how to compare.
pub enum Kind<'a> {
    /// No value at all
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(&'a str),
    Struct(Vec<Field<'a>>),
    /// `None` is a nil map
    Map(Option<MapView<'a>>),
    /// `None` is a nil slice
    Slice(Option<SliceView<'a>>),
    Array(Vec<&'a dyn Reflect>),
    /// Reference with its own identity (`Box`, `Rc`, `Arc`, `Weak`, `&`)
    Pointer(Option<Target<'a>>),
    /// Transparent wrapper (`Option`, `RefCell`, `Box<dyn Reflect>`)
    Boxed(Option<Target<'a>>),
    /// A value without a comparison rule
    Opaque,
}

impl<'a> Kind<'a> {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Nil => "nil",
            Kind::Bool(_) => "bool",
            Kind::Int(_) => "int",
            Kind::Uint(_) => "uint",
            Kind::Float(_) => "float",
            Kind::Str(_) => "string",
            Kind::Struct(_) => "struct",
            Kind::Map(_) => "map",
            Kind::Slice(_) => "slice",
            Kind::Array(_) => "array",
            Kind::Pointer(_) => "pointer",
            Kind::Boxed(_) => "boxed",
            Kind::Opaque => "opaque",
        }
    }
}

/// Shallow view of a value: its type and kind.
pub struct Value<'a> {
    ty: Type,
    kind: Kind<'a>,
}

impl<'a> Value<'a> {
    pub fn new(ty: Type, kind: Kind<'a>) -> Self {
        Self { ty, kind }
    }

    pub fn nil() -> Self {
        Self::new(Type::Opaque("nil"), Kind::Nil)
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn kind(&self) -> &Kind<'a> {
        &self.kind
    }

    pub fn is_nil(&self) -> bool {
        matches!(self.kind, Kind::Nil)
    }

    pub fn into_parts(self) -> (Type, Kind<'a>) {
        (self.ty, self.kind)
    }
}

/// Exposes a value to the comparison engine.
///
/// User structs implement this with [`reflect_struct!`](crate::reflect_struct).
pub trait Reflect {
    /// Type descriptor of `Self`, available without an instance.
    fn static_type() -> Type
    where
        Self: Sized;

    fn reflect(&self) -> Value<'_>;
}

/// Address of the reflected object, the identity half of a visited key.
pub(crate) fn address(value: &dyn Reflect) -> usize {
    value as *const _ as *const () as usize
}

/// Marker for an absent value, the analogue of an untyped `nil`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Nil;

impl Reflect for Nil {
    fn static_type() -> Type {
        Type::Opaque("nil")
    }

    fn reflect(&self) -> Value<'_> {
        Value::nil()
    }
}

impl Reflect for bool {
    fn static_type() -> Type {
        Type::Bool
    }

    fn reflect(&self) -> Value<'_> {
        Value::new(Type::Bool, Kind::Bool(*self))
    }
}

macro_rules! reflect_int {
    ($variant:ident, $kind:ident, $as:ty, $($t:ty),*) => {
        $(
            impl Reflect for $t {
                fn static_type() -> Type {
                    Type::$variant(stringify!($t))
                }

                fn reflect(&self) -> Value<'_> {
                    Value::new(Self::static_type(), Kind::$kind(*self as $as))
                }
            }
        )*
    };
}

reflect_int!(Int, Int, i64, i8, i16, i32, i64, isize);
reflect_int!(Uint, Uint, u64, u8, u16, u32, u64, usize);

impl Reflect for f32 {
    fn static_type() -> Type {
        Type::Float("f32")
    }

    fn reflect(&self) -> Value<'_> {
        Value::new(Self::static_type(), Kind::Float(f64::from(*self)))
    }
}

impl Reflect for f64 {
    fn static_type() -> Type {
        Type::Float("f64")
    }

    fn reflect(&self) -> Value<'_> {
        Value::new(Self::static_type(), Kind::Float(*self))
    }
}

impl Reflect for String {
    fn static_type() -> Type {
        Type::String
    }

    fn reflect(&self) -> Value<'_> {
        Value::new(Type::String, Kind::Str(self.as_str()))
    }
}

impl Reflect for &str {
    fn static_type() -> Type {
        Type::String
    }

    fn reflect(&self) -> Value<'_> {
        Value::new(Type::String, Kind::Str(self))
    }
}

fn slice_view<T: Reflect>(items: &[T]) -> SliceView<'_> {
    SliceView {
        storage: items.as_ptr() as usize,
        items: items.iter().map(|item| item as &dyn Reflect).collect(),
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn static_type() -> Type {
        Type::Slice(Box::new(T::static_type()))
    }

    fn reflect(&self) -> Value<'_> {
        Value::new(Self::static_type(), Kind::Slice(Some(slice_view(self))))
    }
}

impl<T: Reflect> Reflect for &[T] {
    fn static_type() -> Type {
        Type::Slice(Box::new(T::static_type()))
    }

    fn reflect(&self) -> Value<'_> {
        Value::new(Self::static_type(), Kind::Slice(Some(slice_view(self))))
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn static_type() -> Type {
        Type::Array(Box::new(T::static_type()), N)
    }

    fn reflect(&self) -> Value<'_> {
        let items = self.iter().map(|item| item as &dyn Reflect).collect();
        Value::new(Self::static_type(), Kind::Array(items))
    }
}

impl<K: Reflect, V: Reflect, S: BuildHasher> Reflect for HashMap<K, V, S> {
    fn static_type() -> Type {
        Type::Map(
            "HashMap",
            Box::new(K::static_type()),
            Box::new(V::static_type()),
        )
    }

    fn reflect(&self) -> Value<'_> {
        let view = MapView {
            storage: self as *const Self as usize,
            entries: self
                .iter()
                .map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect))
                .collect(),
        };
        Value::new(Self::static_type(), Kind::Map(Some(view)))
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn static_type() -> Type {
        Type::Map(
            "BTreeMap",
            Box::new(K::static_type()),
            Box::new(V::static_type()),
        )
    }

    fn reflect(&self) -> Value<'_> {
        let view = MapView {
            storage: self as *const Self as usize,
            entries: self
                .iter()
                .map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect))
                .collect(),
        };
        Value::new(Self::static_type(), Kind::Map(Some(view)))
    }
}

/// `Option<Vec<_>>` and `Option<map>` are nil-able collections; every other
/// `Option` is a transparent wrapper whose `None` is an absent value.
impl<T: Reflect> Reflect for Option<T> {
    fn static_type() -> Type {
        match T::static_type() {
            collection @ (Type::Slice(_) | Type::Map(..)) => collection,
            inner => Type::Option(Box::new(inner)),
        }
    }

    fn reflect(&self) -> Value<'_> {
        let ty = Self::static_type();
        match self {
            Some(inner) if matches!(ty, Type::Slice(_) | Type::Map(..)) => inner.reflect(),
            None if matches!(ty, Type::Slice(_)) => Value::new(ty, Kind::Slice(None)),
            None if matches!(ty, Type::Map(..)) => Value::new(ty, Kind::Map(None)),
            _ => {
                let target = self.as_ref().map(|v| Target::Ref(v as &dyn Reflect));
                Value::new(ty, Kind::Boxed(target))
            }
        }
    }
}

macro_rules! reflect_pointer {
    ($wrapper:ident, $name:expr) => {
        impl<T: Reflect> Reflect for $wrapper<T> {
            fn static_type() -> Type {
                Type::Pointer($name, Box::new(T::static_type()))
            }

            fn reflect(&self) -> Value<'_> {
                let target: &dyn Reflect = &**self;
                Value::new(Self::static_type(), Kind::Pointer(Some(Target::Ref(target))))
            }
        }
    };
}

reflect_pointer!(Box, "Box");
reflect_pointer!(Rc, "Rc");
reflect_pointer!(Arc, "Arc");

impl<T: Reflect> Reflect for &T {
    fn static_type() -> Type {
        Type::Pointer("&", Box::new(T::static_type()))
    }

    fn reflect(&self) -> Value<'_> {
        let target: &dyn Reflect = *self;
        Value::new(Self::static_type(), Kind::Pointer(Some(Target::Ref(target))))
    }
}

impl<T: Reflect> Reflect for Weak<T> {
    fn static_type() -> Type {
        Type::Pointer("Weak", Box::new(T::static_type()))
    }

    fn reflect(&self) -> Value<'_> {
        let target = self.upgrade().map(|strong| {
            let shared: Rc<dyn Reflect + '_> = strong;
            Target::Shared(shared)
        });
        Value::new(Self::static_type(), Kind::Pointer(target))
    }
}

fn as_dyn<'a, T: Reflect + 'a>(value: &T) -> &(dyn Reflect + 'a) {
    value
}

impl<T: Reflect> Reflect for RefCell<T> {
    fn static_type() -> Type {
        Type::Cell(Box::new(T::static_type()))
    }

    fn reflect(&self) -> Value<'_> {
        match self.try_borrow() {
            Ok(inner) => {
                let inner = Ref::map(inner, as_dyn::<T>);
                Value::new(Self::static_type(), Kind::Boxed(Some(Target::Cell(inner))))
            }
            // Mutably borrowed elsewhere; there is nothing safe to look at.
            Err(_) => Value::new(Self::static_type(), Kind::Opaque),
        }
    }
}

impl Reflect for Box<dyn Reflect> {
    fn static_type() -> Type {
        Type::Interface("Box<dyn Reflect>")
    }

    fn reflect(&self) -> Value<'_> {
        let target: &dyn Reflect = &**self;
        Value::new(Self::static_type(), Kind::Boxed(Some(Target::Ref(target))))
    }
}

/// Implements [`Reflect`] for a struct by listing its fields in
/// declaration order. Fields marked `pub` are exported.
///
/// Type parameters are listed after the name and must implement
/// [`Reflect`]. Tuple structs and structs with lifetime parameters need a
/// hand-written implementation.
///
/// ```
/// use expect_core::deep_equal::Type;
/// use expect_core::reflect_struct;
///
/// struct Account {
///     pub owner: String,
///     balance: i64,
/// }
///
/// reflect_struct!(Account { pub owner, balance });
///
/// struct Pair<A, B> {
///     pub left: A,
///     pub right: B,
/// }
///
/// reflect_struct!(Pair<A, B> { pub left, pub right });
///
/// assert_eq!(Type::of::<Pair<i32, String>>().to_string(), "Pair<i32, String>");
/// # let _ = Account { owner: String::new(), balance: 0 }.balance;
/// # let _ = Pair { left: 1, right: 2 }.left;
/// ```
#[macro_export]
macro_rules! reflect_struct {
    ($ty:ident { $($vis:vis $field:ident),* $(,)? }) => {
        impl $crate::deep_equal::Reflect for $ty {
            fn static_type() -> $crate::deep_equal::Type {
                $crate::deep_equal::Type::Struct(stringify!($ty))
            }

            $crate::reflect_struct!(@reflect { $(($field, !stringify!($vis).is_empty())),* });
        }
    };
    ($ty:ident < $($param:ident),+ $(,)? > { $($vis:vis $field:ident),* $(,)? }) => {
        impl<$($param: $crate::deep_equal::Reflect),+> $crate::deep_equal::Reflect for $ty<$($param),+> {
            fn static_type() -> $crate::deep_equal::Type {
                $crate::deep_equal::Type::Generic(
                    stringify!($ty),
                    vec![$(<$param as $crate::deep_equal::Reflect>::static_type()),+],
                )
            }

            $crate::reflect_struct!(@reflect { $(($field, !stringify!($vis).is_empty())),* });
        }
    };
    (@reflect { $(($field:ident, $exported:expr)),* }) => {
        fn reflect(&self) -> $crate::deep_equal::Value<'_> {
            $crate::deep_equal::Value::new(
                <Self as $crate::deep_equal::Reflect>::static_type(),
                $crate::deep_equal::Kind::Struct(vec![
                    $(
                        $crate::deep_equal::Field::new(stringify!($field), $exported, &self.$field),
                    )*
                ]),
            )
        }
    };
}
