//! Iterator values.
//!
//! Built-in iterators are positional: the source collection sits behind an
//! `Arc`, and [`IteratorValue::next`] returns the entry together with a new
//! iterator advanced by one, so cloning an iterator is cheap and never
//! disturbs another holder's position.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

use super::Value;

/// One step of an iteration.
///
/// For lists and strings `key` is the index and `value` the item; for maps
/// `key` is the map key and `value` the stored value; sets yield only keys.
#[derive(Clone, Debug, PartialEq)]
pub struct IterEntry {
    pub key: Value,
    pub value: Option<Value>,
}

impl IterEntry {
    pub fn new(key: Value, value: Option<Value>) -> Self {
        IterEntry { key, value }
    }

    /// The value if present, else the key.
    pub fn primary(&self) -> &Value {
        self.value.as_ref().unwrap_or(&self.key)
    }
}

/// Host-supplied iteration source.
///
/// Custom iterators are stateful: every clone of the wrapping
/// [`IteratorValue`] shares one cursor.
pub trait ValueIterator: Send {
    fn next_entry(&mut self) -> Option<IterEntry>;
}

#[derive(Clone)]
pub enum IteratorValue {
    List {
        items: Arc<Vec<Value>>,
        pos: usize,
    },
    /// Map entries collected in key order when the iterator is created.
    Map {
        entries: Arc<Vec<(Arc<str>, Value)>>,
        pos: usize,
    },
    Set {
        items: Arc<Vec<Value>>,
        pos: usize,
    },
    /// `index` counts characters; `byte_pos` is where the next one starts.
    Str {
        data: Arc<str>,
        byte_pos: usize,
        index: i64,
    },
    Custom(Arc<Mutex<Box<dyn ValueIterator>>>),
}

impl IteratorValue {
    /// Advance, returning the entry and the iterator positioned after it.
    pub fn next(&self) -> (Option<IterEntry>, IteratorValue) {
        match self {
            IteratorValue::List { items, pos } => match items.get(*pos) {
                Some(item) => (
                    Some(IterEntry::new(position_key(*pos), Some(item.clone()))),
                    IteratorValue::List {
                        items: Arc::clone(items),
                        pos: pos + 1,
                    },
                ),
                None => (None, self.clone()),
            },

            IteratorValue::Map { entries, pos } => match entries.get(*pos) {
                Some((key, value)) => (
                    Some(IterEntry::new(
                        Value::Str(Arc::clone(key)),
                        Some(value.clone()),
                    )),
                    IteratorValue::Map {
                        entries: Arc::clone(entries),
                        pos: pos + 1,
                    },
                ),
                None => (None, self.clone()),
            },

            IteratorValue::Set { items, pos } => match items.get(*pos) {
                Some(item) => (
                    Some(IterEntry::new(item.clone(), None)),
                    IteratorValue::Set {
                        items: Arc::clone(items),
                        pos: pos + 1,
                    },
                ),
                None => (None, self.clone()),
            },

            IteratorValue::Str {
                data,
                byte_pos,
                index,
            } => match data.get(*byte_pos..).and_then(|rest| rest.chars().next()) {
                Some(ch) => (
                    Some(IterEntry::new(
                        Value::Int(*index),
                        Some(Value::string(ch.to_string())),
                    )),
                    IteratorValue::Str {
                        data: Arc::clone(data),
                        byte_pos: byte_pos + ch.len_utf8(),
                        index: index + 1,
                    },
                ),
                None => (None, self.clone()),
            },

            IteratorValue::Custom(source) => (source.lock().next_entry(), self.clone()),
        }
    }

    pub fn from_list(items: Arc<Vec<Value>>) -> Self {
        IteratorValue::List { items, pos: 0 }
    }

    pub fn from_map(entries: Vec<(Arc<str>, Value)>) -> Self {
        IteratorValue::Map {
            entries: Arc::new(entries),
            pos: 0,
        }
    }

    pub fn from_set(items: Vec<Value>) -> Self {
        IteratorValue::Set {
            items: Arc::new(items),
            pos: 0,
        }
    }

    pub fn from_string(data: Arc<str>) -> Self {
        IteratorValue::Str {
            data,
            byte_pos: 0,
            index: 0,
        }
    }

    pub fn custom(source: impl ValueIterator + 'static) -> Self {
        IteratorValue::Custom(Arc::new(Mutex::new(Box::new(source))))
    }

    /// Drain the remaining entries.
    pub fn collect_entries(&self) -> Vec<IterEntry> {
        let mut entries = Vec::new();
        let mut current = self.clone();
        loop {
            let (entry, rest) = current.next();
            match entry {
                Some(entry) => entries.push(entry),
                None => return entries,
            }
            current = rest;
        }
    }
}

fn position_key(pos: usize) -> Value {
    Value::Int(i64::try_from(pos).unwrap_or(i64::MAX))
}

impl fmt::Debug for IteratorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IteratorValue::List { items, pos } => f
                .debug_struct("List")
                .field("len", &items.len())
                .field("pos", pos)
                .finish(),
            IteratorValue::Map { entries, pos } => f
                .debug_struct("Map")
                .field("len", &entries.len())
                .field("pos", pos)
                .finish(),
            IteratorValue::Set { items, pos } => f
                .debug_struct("Set")
                .field("len", &items.len())
                .field("pos", pos)
                .finish(),
            IteratorValue::Str { byte_pos, .. } => {
                f.debug_struct("Str").field("byte_pos", byte_pos).finish()
            }
            IteratorValue::Custom(_) => f.write_str("Custom"),
        }
    }
}
