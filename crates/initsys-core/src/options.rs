use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Once};

use derivative::Derivative;

pub type WaitFn = Arc<dyn Fn() + Send + Sync + 'static>;

#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub enum OptionValue {
    String(String),
    Bool(bool),
    Int(i64),
    Wait(#[derivative(Debug = "ignore")] WaitFn),
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Int(value.into())
    }
}

/// Backend-specific knobs keyed by name.
///
/// Values are typed on read: a value stored under a key with a different type than the one
/// requested reads as the supplied default.
#[derive(Clone, Debug, Default)]
pub struct Options(HashMap<String, OptionValue>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn with_wait_fn(mut self, key: impl Into<String>, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.0.insert(key.into(), OptionValue::Wait(Arc::new(f)));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn string(&self, key: &str, default: &str) -> String {
        match self.0.get(key) {
            Some(OptionValue::String(value)) => value.clone(),
            _ => default.to_owned(),
        }
    }

    pub fn bool(&self, key: &str, default: bool) -> bool {
        match self.0.get(key) {
            Some(OptionValue::Bool(value)) => *value,
            _ => default,
        }
    }

    pub fn int(&self, key: &str, default: i64) -> i64 {
        match self.0.get(key) {
            Some(OptionValue::Int(value)) => *value,
            _ => default,
        }
    }

    pub fn wait_fn(&self, key: &str) -> Option<WaitFn> {
        match self.0.get(key) {
            Some(OptionValue::Wait(f)) => Some(f.clone()),
            _ => None,
        }
    }

    /// Wraps the wait function stored under `key` (or `default` when none is configured)
    /// so that it runs at most once no matter how many times the wrapper is called.
    pub fn single_shot(&self, key: &str, default: impl Fn() + Send + Sync + 'static) -> SingleShot {
        let f = self.wait_fn(key).unwrap_or_else(|| Arc::new(default));
        SingleShot {
            f,
            once: Once::new(),
        }
    }
}

pub struct SingleShot {
    f: WaitFn,
    once: Once,
}

impl SingleShot {
    /// Blocks the caller until the wrapped function returns. Later calls return immediately.
    pub fn call(&self) {
        self.once.call_once(|| (self.f)());
    }

    pub fn has_run(&self) -> bool {
        self.once.is_completed()
    }
}

impl fmt::Debug for SingleShot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleShot")
            .field("has_run", &self.has_run())
            .finish()
    }
}

#[cfg(test)]
#[path = "./options_test.rs"]
mod options_test;
