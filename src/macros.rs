/// Builds a [`Document`](crate::Document) from a MINION-shaped literal.
///
/// Strings, lists and maps nest arbitrarily; `null` produces a `Null`
/// placeholder (which cannot be dumped). Map keys must be string literals
/// and unique.
///
/// # Examples
///
/// ```rust
/// use minion::minion;
///
/// let doc = minion!({
///     "name": "Alice",
///     "tags": ["admin", "dev"],
/// });
/// assert_eq!(
///     doc.dump(None).unwrap(),
///     r#"{"name":"Alice","tags":["admin","dev"]}"#
/// );
/// ```
///
/// # Panics
///
/// Panics if a map literal repeats a key.
#[macro_export]
macro_rules! minion {
    ($($tt:tt)+) => {{
        let mut builder = $crate::DocumentBuilder::new();
        let root = $crate::minion_internal!(builder, $($tt)+);
        builder.finish(root)
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! minion_internal {
    ($builder:ident, null) => {
        $builder.null()
    };

    ($builder:ident, [ $($elem:tt),* $(,)? ]) => {{
        let items = ::std::vec![ $( $crate::minion_internal!($builder, $elem) ),* ];
        $builder.list(items)
    }};

    ($builder:ident, { $($key:literal : $value:tt),* $(,)? }) => {{
        let entries = ::std::vec![
            $( ($key.to_string(), $crate::minion_internal!($builder, $value)) ),*
        ];
        $builder.map(entries).expect("duplicate map key in minion! literal")
    }};

    ($builder:ident, $text:expr) => {
        $builder.string($text)
    };
}
