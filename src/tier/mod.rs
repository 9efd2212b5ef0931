use crate::api::ApiError;
use crate::form::EntityKind;
use crate::shared::ids::FeatureName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Subscription quota for one feature, as reported by the billing backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierLimit {
    pub feature_name: FeatureName,
    pub create_limit: i64,
    pub create_usage: i64,
    #[serde(default)]
    pub update_limit: i64,
    #[serde(default)]
    pub update_usage: i64,
}

impl TierLimit {
    pub fn new(feature_name: FeatureName, create_limit: i64, create_usage: i64) -> Self {
        Self {
            feature_name,
            create_limit,
            create_usage,
            update_limit: 0,
            update_usage: 0,
        }
    }

    pub fn with_update(mut self, update_limit: i64, update_usage: i64) -> Self {
        self.update_limit = update_limit;
        self.update_usage = update_usage;
        self
    }

    pub fn remaining_create(&self) -> usize {
        clamp_remaining(self.create_limit, self.create_usage)
    }

    pub fn remaining_update(&self) -> usize {
        clamp_remaining(self.update_limit, self.update_usage)
    }
}

fn clamp_remaining(limit: i64, usage: i64) -> usize {
    usize::try_from(limit.saturating_sub(usage)).unwrap_or(0)
}

pub trait TierLimitProvider {
    fn tier_limit(&mut self, feature: &FeatureName) -> Result<TierLimit, ApiError>;
}

/// Fetches the quota that governs `kind`.
pub fn tier_limit_for(
    provider: &mut dyn TierLimitProvider,
    kind: EntityKind,
) -> Result<TierLimit, ApiError> {
    let feature = FeatureName::parse(kind.feature_name()).map_err(ApiError::Request)?;
    provider.tier_limit(&feature)
}

/// Fixed quotas, for offline use and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticTierLimits {
    limits: BTreeMap<FeatureName, TierLimit>,
}

impl StaticTierLimits {
    pub fn insert(&mut self, limit: TierLimit) {
        self.limits.insert(limit.feature_name.clone(), limit);
    }
}

impl FromIterator<TierLimit> for StaticTierLimits {
    fn from_iter<I: IntoIterator<Item = TierLimit>>(iter: I) -> Self {
        let mut limits = Self::default();
        for limit in iter {
            limits.insert(limit);
        }
        limits
    }
}

impl TierLimitProvider for StaticTierLimits {
    fn tier_limit(&mut self, feature: &FeatureName) -> Result<TierLimit, ApiError> {
        self.limits
            .get(feature.as_str())
            .cloned()
            .ok_or_else(|| ApiError::UnknownFeature(feature.to_string()))
    }
}
