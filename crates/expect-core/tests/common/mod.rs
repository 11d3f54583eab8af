use expect_core::deep_equal::{Kind, Reflect, Type, Value};
use expect_core::reflect_struct;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One exported and one unexported field
#[allow(dead_code)]
#[derive(Debug, Default, Clone)]
pub struct SomeStruct {
    pub a: String,
    b: i32,
}

reflect_struct!(SomeStruct { pub a, b });

#[allow(dead_code)]
pub fn some_struct(a: &str, b: i32) -> SomeStruct {
    SomeStruct { a: a.to_string(), b }
}

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct Timestamp {
    pub secs: i64,
}

reflect_struct!(Timestamp { pub secs });

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Event {
    pub name: String,
    pub at: Timestamp,
}

reflect_struct!(Event { pub name, pub at });

#[allow(dead_code)]
pub fn event(name: &str, secs: i64) -> Event {
    Event {
        name: name.to_string(),
        at: Timestamp { secs },
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Nested {
    pub nested_field: String,
}

reflect_struct!(Nested { pub nested_field });

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Root {
    pub string_field: String,
    pub slice_field: Vec<Nested>,
    pub map_field: HashMap<String, String>,
}

reflect_struct!(Root { pub string_field, pub slice_field, pub map_field });

#[allow(dead_code)]
pub fn root(nested: &str, spam: &str) -> Root {
    let mut map_field = HashMap::new();
    map_field.insert("foo".to_string(), "bar".to_string());
    map_field.insert("spam".to_string(), spam.to_string());
    Root {
        string_field: "a".to_string(),
        slice_field: vec![Nested {
            nested_field: nested.to_string(),
        }],
        map_field,
    }
}

/// Singly linked node; `next` may point back into the list
#[allow(dead_code)]
#[derive(Debug)]
pub struct Node {
    pub value: i32,
    pub next: Option<Rc<RefCell<Node>>>,
}

reflect_struct!(Node { pub value, pub next });

#[allow(dead_code)]
pub fn node(value: i32) -> Rc<RefCell<Node>> {
    Rc::new(RefCell::new(Node { value, next: None }))
}

/// A node whose `next` points to itself
#[allow(dead_code)]
pub fn self_loop(value: i32) -> Rc<RefCell<Node>> {
    let n = node(value);
    n.borrow_mut().next = Some(Rc::clone(&n));
    n
}

/// Breaks the reference cycle so test nodes are freed
#[allow(dead_code)]
pub fn unlink(n: &Rc<RefCell<Node>>) {
    n.borrow_mut().next = None;
}

/// A value the engine has no rule for
#[allow(dead_code)]
#[derive(Debug)]
pub struct FileHandle(pub i32);

impl Reflect for FileHandle {
    fn static_type() -> Type {
        Type::Opaque("FileHandle")
    }

    fn reflect(&self) -> Value<'_> {
        Value::new(Self::static_type(), Kind::Opaque)
    }
}
