use serde::{Deserialize, Serialize};

const FREE_CANCELLATION: &str = "free_cancellation";
const NON_REFUNDABLE: &str = "non_refundable";

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelPolicy {
    #[default]
    FreeCancellation,
    NonRefundable,
}

impl CancelPolicy {
    /// Maps canonical, legacy and localized spellings. Blank means free cancellation.
    pub fn from_alias(value: &str) -> Option<Self> {
        match value.trim() {
            "" | FREE_CANCELLATION | "free" | "free_cancel" | "免费取消" => {
                Some(Self::FreeCancellation)
            }
            NON_REFUNDABLE | "no_refund" | "不可取消" => Some(Self::NonRefundable),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FreeCancellation => FREE_CANCELLATION,
            Self::NonRefundable => NON_REFUNDABLE,
        }
    }

    pub fn is_refundable(&self) -> bool {
        matches!(self, Self::FreeCancellation)
    }
}
