// Caller-facing argument naming

use heck::ToLowerCamelCase;
use serde::Deserialize;
use std::sync::Arc;

/// Maps a handler parameter name to the argument name callers use
///
/// Any `Fn(&str) -> String` closure is a policy as well.
pub trait NamingPolicy: Send + Sync {
    fn argument_name(&self, parameter: &str) -> String;
}

/// Lowercases the first character only: `UserId` becomes `userId`, `userID`
/// stays `userID`
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerCamelCase;

impl NamingPolicy for LowerCamelCase {
    fn argument_name(&self, parameter: &str) -> String {
        let mut chars = parameter.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Splits words and rejoins them in lower camel case: `user_id`, `UserID`
/// and `HTTPStatus` become `userId`, `userId` and `httpStatus`
#[derive(Debug, Clone, Copy, Default)]
pub struct CamelWords;

impl NamingPolicy for CamelWords {
    fn argument_name(&self, parameter: &str) -> String {
        parameter.to_lower_camel_case()
    }
}

/// Parameter names are used as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl NamingPolicy for Verbatim {
    fn argument_name(&self, parameter: &str) -> String {
        parameter.to_string()
    }
}

impl<F> NamingPolicy for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn argument_name(&self, parameter: &str) -> String {
        self(parameter)
    }
}

/// Configurable choice of naming policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingConvention {
    #[default]
    Camel,
    CamelWords,
    Verbatim,
}

impl NamingConvention {
    pub fn policy(self) -> Arc<dyn NamingPolicy> {
        match self {
            NamingConvention::Camel => Arc::new(LowerCamelCase),
            NamingConvention::CamelWords => Arc::new(CamelWords),
            NamingConvention::Verbatim => Arc::new(Verbatim),
        }
    }
}
