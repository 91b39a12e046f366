macro_rules! atrace {
    ($($tt:tt)*) => {
        virtual_list::__log!(trace, "virtual_list_adapter", $($tt)*)
    };
}

macro_rules! adebug {
    ($($tt:tt)*) => {
        virtual_list::__log!(debug, "virtual_list_adapter", $($tt)*)
    };
}

macro_rules! awarn {
    ($($tt:tt)*) => {
        virtual_list::__log!(warn, "virtual_list_adapter", $($tt)*)
    };
}
