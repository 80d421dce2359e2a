//! Typed access to entry values.
//!
//! Every value is stored as a single trimmed line of text. Reading converts through
//! [`IniValue`] and falls back to a caller supplied default when the text is empty or does not
//! parse. The `try_*` family additionally writes that default back, repairing the entry.

use crate::document::EntryMut;
use crate::node::{single_line, KeyValue};

/// Conversion between a Rust value and the text of an INI value.
pub trait IniValue: Sized {
    /// Parse trimmed, non-empty value text.
    fn from_ini(raw: &str) -> Option<Self>;
    /// Canonical text written when storing this value.
    fn to_ini(&self) -> String;
}

impl IniValue for bool {
    /// `true`/`false` in any case, otherwise an integer compared against zero.
    fn from_ini(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("true") {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            raw.parse::<i64>().ok().map(|n| n != 0)
        }
    }

    fn to_ini(&self) -> String {
        String::from(if *self { "true" } else { "false" })
    }
}

impl IniValue for String {
    fn from_ini(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }

    fn to_ini(&self) -> String {
        self.clone()
    }
}

macro_rules! impl_ini_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IniValue for $ty {
                fn from_ini(raw: &str) -> Option<Self> {
                    raw.parse().ok()
                }

                fn to_ini(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_ini_number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl KeyValue {
    #[must_use]
    /// Parse the value, or `None` if it is empty or does not parse.
    pub fn parse<T: IniValue>(&self) -> Option<T> {
        if self.value.is_empty() {
            return None;
        }
        T::from_ini(&self.value)
    }

    #[must_use]
    /// Parse the value, returning `default` if it is empty or does not parse.
    pub fn get_or<T: IniValue>(&self, default: T) -> T {
        self.parse().unwrap_or(default)
    }

    #[must_use]
    /// The raw value, or `default` if it is empty.
    pub fn get_str_or<'a>(&'a self, default: &'a str) -> &'a str {
        if self.value.is_empty() {
            default
        } else {
            &self.value
        }
    }
}

impl EntryMut<'_> {
    #[must_use]
    /// Parse the value without modifying it; see [`KeyValue::get_or`].
    pub fn get_or<T: IniValue>(&self, default: T) -> T {
        self.kv().get_or(default)
    }

    /// Parse the value, or store `default` in canonical form and return it.
    ///
    /// A stored default marks the document dirty. A value that already parses is left as
    /// written, so a boolean stored as `1` stays `1`.
    pub fn try_or<T: IniValue>(&mut self, default: T) -> T {
        if let Some(value) = self.kv().parse() {
            return value;
        }
        self.set(&default);
        default
    }

    /// The raw value, storing `default` first if the value is empty.
    pub fn try_str_or(&mut self, default: &str) -> String {
        if self.kv().is_empty() {
            self.set_value(default);
        }
        self.value().to_string()
    }

    /// Store a typed value in its canonical text form.
    pub fn set<T: IniValue>(&mut self, value: &T) {
        self.set_value(&value.to_ini());
    }

    /// Store text cut at the first line break and trimmed. The document is marked dirty only
    /// if the stored value changes.
    pub fn set_value(&mut self, value: &str) {
        self.store(single_line(value).to_string());
    }
}

#[cfg(test)]
#[path = "tests/value.rs"]
mod tests;
