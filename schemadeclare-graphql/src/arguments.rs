// Per-call argument bags

use async_graphql::dynamic::ObjectAccessor;
use async_graphql::Value;
use indexmap::IndexMap;

/// One entry of an [`ArgumentBag`]
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Explicitly marked as never supplied, distinct from a present null
    Unset,
    Value(Value),
}

/// Named argument values supplied for one invocation
///
/// An absent bag (`None` where an `Option<&ArgumentBag>` is taken) means no
/// arguments were supplied at all, which is not the same as an empty bag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentBag {
    entries: IndexMap<String, Argument>,
}

impl ArgumentBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a value
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Builder-style insert of the unset sentinel
    pub fn with_unset(mut self, name: impl Into<String>) -> Self {
        self.insert_unset(name);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries
            .insert(name.into(), Argument::Value(value.into()));
    }

    pub fn insert_unset(&mut self, name: impl Into<String>) {
        self.entries.insert(name.into(), Argument::Unset);
    }

    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.entries.get(name)
    }

    /// The supplied value; `None` for missing and unset entries
    pub fn value(&self, name: &str) -> Option<&Value> {
        match self.entries.get(name) {
            Some(Argument::Value(value)) => Some(value),
            _ => None,
        }
    }

    pub fn is_unset(&self, name: &str) -> bool {
        matches!(self.entries.get(name), Some(Argument::Unset))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Argument)> {
        self.entries.iter().map(|(name, arg)| (name.as_str(), arg))
    }

    /// Build a bag from a JSON object, e.g. request variables
    ///
    /// Returns `None` for anything but an object.
    pub fn from_json(json: serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Object(map) => Some(
                map.into_iter()
                    .map(|(name, value)| (name, Value::from_json(value).unwrap_or(Value::Null)))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Bag for the arguments the engine supplied to a field
    ///
    /// No supplied arguments means an absent bag.
    pub fn from_accessor(args: &ObjectAccessor<'_>) -> Option<Self> {
        if args.is_empty() {
            return None;
        }
        Some(
            args.iter()
                .map(|(name, value)| (name.to_string(), value.as_value().clone()))
                .collect(),
        )
    }
}

impl FromIterator<(String, Value)> for ArgumentBag {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name, Argument::Value(value)))
                .collect(),
        }
    }
}

impl FromIterator<(String, Argument)> for ArgumentBag {
    fn from_iter<I: IntoIterator<Item = (String, Argument)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
