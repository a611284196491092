/// Build [`Fields`](crate::Fields) from `key => value` pairs.
///
/// Keys are anything convertible into a `String`,
/// values anything convertible into a json [`Value`](crate::Value).
///
/// ```
/// use errstack::{Value, fields};
///
/// let fields = fields! {
///     "user" => "alice",
///     "attempt" => 3,
///     "retry" => false,
///     "tags" => vec!["a", "b"],
/// };
/// assert_eq!(fields["attempt"], Value::from(3));
/// assert!(fields! {}.is_empty());
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(
            fields.insert(::std::string::String::from($key), $crate::Value::from($value));
        )+
        fields
    }};
}
