/// Shared logging entry point for this crate and `virtual-list-adapter`.
///
/// Expands to a `tracing` event under the given target when the `tracing` feature is enabled,
/// and to nothing otherwise.
#[doc(hidden)]
#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! __log {
    ($level:ident, $target:literal, $($tt:tt)*) => {
        $crate::__tracing::$level!(target: $target, $($tt)*)
    };
}

#[doc(hidden)]
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! __log {
    ($($tt:tt)*) => {};
}

macro_rules! ltrace {
    ($($tt:tt)*) => {
        $crate::__log!(trace, "virtual_list", $($tt)*)
    };
}

macro_rules! ldebug {
    ($($tt:tt)*) => {
        $crate::__log!(debug, "virtual_list", $($tt)*)
    };
}

macro_rules! lwarn {
    ($($tt:tt)*) => {
        $crate::__log!(warn, "virtual_list", $($tt)*)
    };
}
