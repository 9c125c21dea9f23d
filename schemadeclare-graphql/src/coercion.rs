// Coercion of supplied argument values to declared parameter types

use crate::{ArgumentBag, BindingError};
use async_graphql::dynamic::TypeRef;
use async_graphql::{Name, Value};

/// Type-aware value coercion, keyed by argument name and declared type
///
/// Implementations look the argument up themselves; an argument missing from
/// the bag coerces to `Value::Null`.
pub trait ArgumentCoercion: Send + Sync {
    fn coerce(&self, bag: &ArgumentBag, name: &str, ty: &TypeRef) -> Result<Value, BindingError>;
}

/// GraphQL input coercion for the built-in scalars
///
/// - `Int` takes integral numbers within the 32-bit range
/// - `Float` takes any number
/// - `ID` takes strings and integers, always producing a string
/// - a single value given for a list type becomes a one-element list
/// - enums, input objects and custom scalars pass through unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct InputCoercion;

impl ArgumentCoercion for InputCoercion {
    fn coerce(&self, bag: &ArgumentBag, name: &str, ty: &TypeRef) -> Result<Value, BindingError> {
        match bag.value(name) {
            Some(value) => coerce_value(name, ty, value.clone()),
            None => Ok(Value::Null),
        }
    }
}

fn coerce_value(name: &str, ty: &TypeRef, value: Value) -> Result<Value, BindingError> {
    match ty {
        TypeRef::NonNull(inner) => {
            if matches!(value, Value::Null) {
                return Err(BindingError::new(name, ty, "null given for a non-null type"));
            }
            coerce_value(name, inner, value)
        }
        TypeRef::List(inner) => match value {
            Value::Null => Ok(Value::Null),
            Value::List(items) => items
                .into_iter()
                .map(|item| coerce_value(name, inner, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            single => Ok(Value::List(vec![coerce_value(name, inner, single)?])),
        },
        TypeRef::Named(type_name) => match value {
            Value::Null => Ok(Value::Null),
            value => coerce_named(name, type_name, value),
        },
    }
}

fn coerce_named(name: &str, type_name: &str, value: Value) -> Result<Value, BindingError> {
    let mismatch = |found: &Value| {
        BindingError::new(name, type_name, format!("cannot use {} as {}", found, type_name))
    };

    match type_name {
        TypeRef::INT => match &value {
            Value::Number(n) if n.as_i64().is_some_and(|i| i32::try_from(i).is_ok()) => Ok(value),
            other => Err(mismatch(other)),
        },
        TypeRef::FLOAT => match &value {
            Value::Number(_) => Ok(value),
            other => Err(mismatch(other)),
        },
        TypeRef::STRING => match &value {
            Value::String(_) => Ok(value),
            other => Err(mismatch(other)),
        },
        TypeRef::BOOLEAN => match &value {
            Value::Boolean(_) => Ok(value),
            other => Err(mismatch(other)),
        },
        TypeRef::ID => match value {
            Value::String(_) => Ok(value),
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok(Value::String(n.to_string())),
            other => Err(mismatch(&other)),
        },
        // Enum literals arrive as names; hand them over as strings
        _ => match value {
            Value::Enum(variant) => Ok(Value::String(Name::as_str(&variant).to_string())),
            value => Ok(value),
        },
    }
}
