/// Asserts the expression is `None`, panicking with the `Some` value otherwise.
#[macro_export]
macro_rules! assert_none {
    ($e:expr) => {
        match $e {
            None => {}
            Some(v) => panic!("expected `None`; actual=Some({:?})", v),
        }
    };
}

/// Unwraps a `Some`.
#[macro_export]
macro_rules! assert_some {
    ($e:expr) => {
        match $e {
            Some(v) => v,
            None => panic!("expected `Some`; actual=None"),
        }
    };
}
