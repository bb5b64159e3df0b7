/// Declares lazily-constructed, process-wide instances.
///
/// Two forms are accepted.
///
/// A `static` backed by [`LazyShared`](crate::LazyShared):
///
/// ```rust
/// use solo::singleton;
///
/// singleton! {
///     /// Primes below twenty, computed on first use.
///     pub static PRIMES: Vec<u32> = (2..20).filter(|n| (2..*n).all(|d| n % d != 0)).collect();
/// }
///
/// assert_eq!(PRIMES.get_instance()[..3], [2, 3, 5]);
/// ```
///
/// An accessor on the type itself, backed by a function-local static. The
/// type keeps a private constructor, so the accessor is the only way to reach
/// an instance:
///
/// ```rust
/// use solo::singleton;
///
/// pub struct Registry {
///     names: Vec<&'static str>,
/// }
///
/// impl Registry {
///     fn new() -> Self {
///         Self { names: vec!["alpha", "beta"] }
///     }
/// }
///
/// singleton! {
///     impl Registry {
///         pub fn instance() = Registry::new();
///     }
/// }
///
/// assert!(std::ptr::eq(Registry::instance(), Registry::instance()));
/// assert_eq!(Registry::instance().names.len(), 2);
/// ```
#[macro_export]
macro_rules! singleton {
    (
        impl $ty:ty {
            $(#[$meta:meta])*
            $vis:vis fn $accessor:ident() = $init:expr;
        }
    ) => {
        impl $ty {
            $(#[$meta])*
            $vis fn $accessor() -> &'static $ty {
                static INSTANCE: $crate::LazyShared<$ty> = $crate::LazyShared::new(|| $init);
                INSTANCE.get_instance()
            }
        }
    };
    (
        $(
            $(#[$meta:meta])*
            $vis:vis static $name:ident : $ty:ty = $init:expr;
        )+
    ) => {
        $(
            $(#[$meta])*
            $vis static $name: $crate::LazyShared<$ty> = $crate::LazyShared::new(|| $init);
        )+
    };
}
