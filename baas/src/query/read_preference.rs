use crate::common::READ_PREFERENCE_SECONDARY_PREFERRED;

/// Replica selection hint sent with a query.
///
/// # Variants
/// - `Primary`: read from the primary node. This is the server default, so it
///   is never sent.
/// - `SecondaryPreferred`: read from a secondary when one is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReadPreference {
    #[default]
    Primary,
    SecondaryPreferred,
}

impl ReadPreference {
    /// Wire token of this preference; empty for [ReadPreference::Primary].
    pub fn as_param(&self) -> &'static str {
        match self {
            ReadPreference::Primary => "",
            ReadPreference::SecondaryPreferred => READ_PREFERENCE_SECONDARY_PREFERRED,
        }
    }
}
