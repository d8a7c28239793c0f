//! Typed coercion of raw config strings.
//!
//! Every getter on [`crate::ConfigStore`] funnels through [`ConfigValue`]: the
//! raw string is looked up once, then coerced with [`ConfigValue::coerce`].
//! Coercion is strict. The whole value must parse, integers must fit their
//! type and floats must be finite.

/// How a lookup reacts when the key is absent or can not be coerced.
#[derive(Clone, Debug, PartialEq)]
pub enum Lookup<T> {
    /// Absence sets the store's error flag.
    Required,
    /// Absence is silent; the type's not-found value is returned.
    Optional,
    /// Absence is silent; the given value is returned instead.
    Fallback(T),
}

impl<T> Lookup<T> {
    pub fn is_required(&self) -> bool {
        matches!(self, Lookup::Required)
    }
}

impl<T: ConfigValue> Lookup<T> {
    /// The value handed back when the lookup comes up empty.
    pub fn into_default(self) -> T {
        match self {
            Lookup::Fallback(value) => value,
            Lookup::Required | Lookup::Optional => T::not_found(),
        }
    }
}

pub trait ConfigValue: Sized {
    /// Human readable name used in diagnostics.
    const KIND: &'static str;

    /// Value returned alongside `false` when nothing usable was found.
    fn not_found() -> Self;

    fn coerce(raw: &str) -> Option<Self>;
}

impl ConfigValue for String {
    const KIND: &'static str = "string";

    fn not_found() -> Self {
        String::new()
    }

    fn coerce(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

macro_rules! integer_value {
    ($ty:ty, $kind:literal, $missing:expr) => {
        impl ConfigValue for $ty {
            const KIND: &'static str = $kind;

            fn not_found() -> Self {
                $missing
            }

            // FromStr on integers rejects overflow, trailing garbage and a
            // sign on unsigned types.
            fn coerce(raw: &str) -> Option<Self> {
                raw.parse::<$ty>().ok()
            }
        }
    };
}

integer_value!(i32, "integer", -1);
integer_value!(u32, "unsigned integer", 0);
integer_value!(i64, "long", 0);

macro_rules! float_value {
    ($ty:ty, $kind:literal) => {
        impl ConfigValue for $ty {
            const KIND: &'static str = $kind;

            fn not_found() -> Self {
                0.0
            }

            fn coerce(raw: &str) -> Option<Self> {
                raw.parse::<$ty>().ok().filter(|v| v.is_finite())
            }
        }
    };
}

float_value!(f32, "float");
float_value!(f64, "double");

impl ConfigValue for bool {
    const KIND: &'static str = "boolean";

    fn not_found() -> Self {
        false
    }

    fn coerce(raw: &str) -> Option<Self> {
        raw.parse::<bool>().ok()
    }
}
