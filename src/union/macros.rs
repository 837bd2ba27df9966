//! The `define_union!` macro.

/// Declares a closed sum type together with its dispatch operations.
///
/// Each case carries exactly one payload whose type is a generic parameter
/// of the union, and is numbered with its 1-based case index. The macro
/// generates:
///
/// - the `enum` itself, deriving `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`,
///   `PartialOrd`, `Ord` and `Hash` (all conditional on the payload types);
/// - a `const fn` constructor per case, named after the case in snake case;
/// - `index`, `CASES`, `is_<case>`, `<case>_ref`, `into_<case>` and `as_ref`;
/// - `fold`, the exhaustive dispatch taking one handler per case;
/// - `partial`, returning a `<Name>Partial` dispatcher that accepts handlers
///   for any subset of the cases.
///
/// `Output`, `Handler`, `Fallback` and `F<Case>` are used as generic
/// parameter names by the generated items and cannot name a payload.
///
/// # Examples
///
/// ```rust
/// use casematch::define_union;
///
/// define_union! {
///     /// A traffic light signal.
///     pub enum Signal {
///         /// Stop, with the remaining seconds.
///         Red(S) = 1,
///         /// Prepare, with a message.
///         Amber(M) = 2,
///         /// Go.
///         Green(G) = 3,
///     }
/// }
///
/// let signal: Signal<u32, &str, ()> = Signal::amber("slow down");
/// assert_eq!(signal.index(), 2);
/// assert_eq!(Signal::<u32, &str, ()>::CASES, 3);
///
/// let text = signal.fold(
///     |seconds| format!("stop for {seconds}s"),
///     |message| message.to_string(),
///     |()| "go".to_string(),
/// );
/// assert_eq!(text, "slow down");
///
/// let seconds: u32 = Signal::<u32, &str, ()>::green(()).partial().red(|s| s).or_default();
/// assert_eq!(seconds, 0);
/// ```
#[macro_export]
macro_rules! define_union {
    (@one $index:literal) => {
        1
    };
    (
        $(#[$meta:meta])*
        $visibility:vis enum $name:ident {
            $(
                $(#[$case_meta:meta])*
                $case:ident($param:ident) = $index:literal
            ),+ $(,)?
        }
    ) => {
        $crate::paste::paste! {
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
            $visibility enum $name<$($param),+> {
                $(
                    $(#[$case_meta])*
                    $case($param),
                )+
            }

            impl<$($param),+> $name<$($param),+> {
                /// The number of cases of this union.
                pub const CASES: usize = 0 $(+ $crate::define_union!(@one $index))+;

                $(
                    #[doc = "Constructs a value with the `" $case "` case active."]
                    #[inline]
                    pub const fn [<$case:snake>](value: $param) -> Self {
                        Self::$case(value)
                    }

                    #[doc = "Returns `true` if the `" $case "` case is active."]
                    #[inline]
                    pub const fn [<is_ $case:snake>](&self) -> bool {
                        matches!(self, Self::$case(_))
                    }

                    #[doc = "Returns a reference to the `" $case "` payload if that case is active."]
                    #[inline]
                    #[allow(unreachable_patterns)]
                    pub const fn [<$case:snake _ref>](&self) -> Option<&$param> {
                        match self {
                            Self::$case(value) => Some(value),
                            _ => None,
                        }
                    }

                    #[doc = "Consumes the union, returning the `" $case "` payload if that case is active."]
                    #[inline]
                    #[allow(unreachable_patterns)]
                    pub fn [<into_ $case:snake>](self) -> Option<$param> {
                        match self {
                            Self::$case(value) => Some(value),
                            _ => None,
                        }
                    }
                )+

                /// Returns the 1-based index of the active case.
                #[inline]
                pub const fn index(&self) -> usize {
                    match self {
                        $(Self::$case(_) => $index,)+
                    }
                }

                /// Borrows the active payload, keeping the active case.
                #[inline]
                pub const fn as_ref(&self) -> $name<$(&$param),+> {
                    match self {
                        $(Self::$case(value) => $name::$case(value),)+
                    }
                }

                /// Applies the handler of the active case to its payload.
                ///
                /// Every handler must be supplied and exactly one of them is
                /// invoked. Side-effecting dispatch uses handlers returning `()`.
                #[inline]
                pub fn fold<Output, $([<F $case>]),+>(self, $([<on_ $case:snake>]: [<F $case>]),+) -> Output
                where
                    $([<F $case>]: FnOnce($param) -> Output,)+
                {
                    match self {
                        $(Self::$case(value) => [<on_ $case:snake>](value),)+
                    }
                }

                /// Starts a permissive dispatch where handlers may be omitted.
                ///
                /// See the returned dispatcher for how an unhandled case is
                /// resolved.
                #[inline]
                pub const fn partial<Output>(self) -> [<$name Partial>]<$($param,)+ Output> {
                    [<$name Partial>] { state: Err(self) }
                }
            }

            #[doc = "A permissive dispatcher over [`" $name "`], created by `" $name "::partial`."]
            ///
            /// Handlers are registered per case and may be omitted. The first
            /// handler registered for the active case is invoked immediately;
            /// handlers for other cases are never invoked. When the active case
            /// has no handler, the finishing operation decides the outcome.
            #[derive(Debug)]
            #[must_use = "a partial dispatch yields nothing until it is finished"]
            $visibility struct [<$name Partial>]<$($param,)+ Output> {
                state: Result<Output, $name<$($param),+>>,
            }

            impl<$($param,)+ Output> [<$name Partial>]<$($param,)+ Output> {
                $(
                    #[doc = "Registers the handler for the `" $case "` case."]
                    #[inline]
                    pub fn [<$case:snake>]<Handler>(self, handler: Handler) -> Self
                    where
                        Handler: FnOnce($param) -> Output,
                    {
                        match self.state {
                            Err($name::$case(value)) => Self { state: Ok(handler(value)) },
                            state => Self { state },
                        }
                    }
                )+

                /// Returns `true` if a handler for the active case has run.
                #[inline]
                pub const fn is_handled(&self) -> bool {
                    self.state.is_ok()
                }

                /// Returns the handler result, or `Output::default()` if the
                /// active case had no handler.
                ///
                /// This fallback is intentional: an omitted handler is not an
                /// error in permissive dispatch.
                pub fn or_default(self) -> Output
                where
                    Output: Default,
                {
                    match self.state {
                        Ok(result) => result,
                        Err(union) => {
                            $crate::union::report_unhandled(stringify!($name), union.index());
                            Output::default()
                        }
                    }
                }

                /// Returns the handler result, or applies `fallback` to the
                /// unhandled union.
                pub fn or_else<Fallback>(self, fallback: Fallback) -> Output
                where
                    Fallback: FnOnce($name<$($param),+>) -> Output,
                {
                    self.state.unwrap_or_else(fallback)
                }

                /// Returns the handler result, or `MatchError::UnhandledCase`
                /// if the active case had no handler.
                ///
                /// # Errors
                ///
                /// Fails when no handler was registered for the active case.
                pub fn try_finish(self) -> Result<Output, $crate::error::MatchError> {
                    self.state.map_err(|union| $crate::error::MatchError::UnhandledCase {
                        union: stringify!($name),
                        case: union.index(),
                    })
                }
            }
        }
    };
}
