mod config;
mod context;
mod rules;

pub use config::RelevanceConfig;
pub use context::{SignalWindow, UserContext, RECENT_SIGNAL_CAP};

use chrono::NaiveDate;

use super::catalog::{RankedService, ServiceCatalogEntry};

/// Stateless ranker ordering the service catalog by relevance to a user
/// context at a point in time.
#[derive(Debug, Clone, Default)]
pub struct RelevanceRanker {
    config: RelevanceConfig,
}

impl RelevanceRanker {
    pub fn new(config: RelevanceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RelevanceConfig {
        &self.config
    }

    /// Scores every catalog entry and returns the full catalog reordered by
    /// descending relevance. Ranking never filters: the output is always a
    /// permutation of the input, and an empty catalog yields an empty list.
    ///
    /// The sort is stable, so services with equal scores keep their catalog
    /// order.
    pub fn rank(
        &self,
        catalog: &[ServiceCatalogEntry],
        context: &UserContext,
        as_of: NaiveDate,
    ) -> Vec<RankedService> {
        let mut ranked: Vec<RankedService> = catalog
            .iter()
            .map(|service| RankedService {
                relevance_score: rules::relevance_score(service, context, as_of, &self.config),
                service: service.clone(),
            })
            .collect();

        ranked.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
        ranked
    }
}
