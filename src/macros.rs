#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: $crate::__private::Lazy<$crate::__private::Regex> =
            $crate::__private::Lazy::new(|| $crate::__private::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// A [`Pattern`](crate::Pattern) from a regex literal, compiled once per call site.
///
/// ```
/// use gateboard::{Gate, pattern};
///
/// let gate = Gate::new("A").with_callsign(pattern!(r"^ACA\d+"));
/// assert!(gate.constraints.callsign.unwrap().matches("ACA12"));
/// ```
#[macro_export]
macro_rules! pattern {
    ($pat:literal) => {
        $crate::Pattern::new($pat, $crate::regex!($pat).clone())
    };
}

/// Constraint and passthrough builders shared by `Gate` and `Terminal`.
macro_rules! candidate_builders {
    ($ty:ty) => {
        impl $ty {
            pub fn with_callsign(mut self, pattern: $crate::Pattern) -> Self {
                self.constraints.callsign = Some(pattern);
                self
            }

            pub fn with_aircraft(mut self, pattern: $crate::Pattern) -> Self {
                self.constraints.aircraft_short = Some(pattern);
                self
            }

            pub fn with_domestic(mut self, domestic: bool) -> Self {
                self.constraints.domestic = Some(domestic);
                self
            }

            pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
                self.extra.insert(key.into(), value.into());
                self
            }
        }
    };
}
