//! Declarative macros for settings declarations
//!
//! `param_enum!` declares an enum stored as explicit string tokens and
//! `params!` builds a [`ParameterBag`](crate::params::ParameterBag) literal.

/// Declares an enum whose variants are stored as explicit tokens
///
/// ```
/// buildparams::param_enum! {
///     /// Merge policy
///     pub enum MergePolicy {
///         FastForward => "fastForward",
///         AlwaysMerge => "alwaysCreateMergeCommit",
///     }
/// }
///
/// use buildparams::params::ParamEnum;
/// assert_eq!(MergePolicy::TOKENS, &["fastForward", "alwaysCreateMergeCommit"]);
/// assert_eq!(MergePolicy::AlwaysMerge.to_string(), "alwaysCreateMergeCommit");
/// ```
#[macro_export]
macro_rules! param_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $token:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $crate::params::ParamEnum for $name {
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];
            const TOKENS: &'static [&'static str] = &[$($token),+];
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let token = match self {
                    $(Self::$variant => $token,)+
                };
                f.write_str(token)
            }
        }
    };
}

/// Creates a parameter bag from `key => value` pairs
#[macro_export]
macro_rules! params {
    () => {
        $crate::params::ParameterBag::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut bag = $crate::params::ParameterBag::new();
        $(bag.set($key, $value);)+
        bag
    }};
}
