/// Builds a [`Value`](crate::Value) with Knot-like syntax.
///
/// ```rust
/// use serde_knot::{knot, Value};
///
/// assert_eq!(knot!(true), Value::Boolean(true));
/// assert_eq!(knot!(25), Value::Number(25.0));
/// assert_eq!(
///     knot!([1, "a", false]),
///     Value::Collection(vec![Value::Number(1.0), Value::from("a"), Value::Boolean(false)])
/// );
/// ```
#[macro_export]
macro_rules! knot {
    (true) => {
        $crate::Value::Boolean(true)
    };

    (false) => {
        $crate::Value::Boolean(false)
    };

    ([]) => {
        $crate::Value::Collection(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Collection(vec![$($crate::knot!($elem)),*])
    };

    (- $n:literal) => {
        $crate::Value::Number(-($n as f64))
    };

    ($n:literal) => {
        $crate::Value::from($n)
    };

    ($e:expr) => {
        $crate::Value::from($e)
    };
}
