/// Fails the build when `$cond` is false. Can be used any number of times per module.
macro_rules! static_assert {
    ($cond:expr, $msg:expr) => {
        const _: () = assert!($cond, $msg);
    };
    ($cond:expr) => {
        static_assert!($cond, concat!("Static assertion failed: ", stringify!($cond)));
    };
}

pub(crate) use static_assert;
