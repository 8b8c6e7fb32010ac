//! Evaluation orchestration: walks the item tree in the fixed audit order,
//! resolves every applicable criterion, and assembles the report.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::audit::{self, AuditDocument};
use crate::bundle::ReferenceBundle;
use crate::config::{EngineConfig, EvaluationOptions};
use crate::error::EngineResult;
use crate::method::MethodRegistry;
use crate::model::item::EvaluationItem;
use crate::resolver;
use crate::stats::Statistics;

/// Everything one evaluation produces: the annotated item tree, the folded
/// statistics, and the audit document when the request asked for one.
#[derive(Debug)]
pub struct EvaluationReport {
    pub tree: EvaluationItem,
    pub statistics: Statistics,
    pub audit: Option<AuditDocument>,
}

/// The evaluation engine. Holds only engine-lifetime state (the method
/// registry and configuration); all request state travels through call
/// arguments, so one evaluator can serve concurrent requests.
pub struct Evaluator {
    registry: Arc<MethodRegistry>,
    config: EngineConfig,
}

impl Evaluator {
    pub fn new(registry: Arc<MethodRegistry>) -> Self {
        Self::with_config(registry, EngineConfig::default())
    }

    pub fn with_config(registry: Arc<MethodRegistry>, config: EngineConfig) -> Self {
        Self { registry, config }
    }

    /// Evaluate one parsed message tree against the request's reference
    /// bundle.
    ///
    /// The walk order is part of the observable contract: classes by
    /// entity display name, elements by sequence, attributes by display
    /// name, criteria by sequence, and root-level criteria once after all
    /// classes. Any configuration or implementation fault aborts the whole
    /// request; no partial report is returned.
    #[instrument(
        skip_all,
        fields(rubric = %bundle.rubric.name, model = %bundle.model.version)
    )]
    pub async fn evaluate(
        &self,
        mut tree: EvaluationItem,
        bundle: &ReferenceBundle,
        options: &EvaluationOptions,
    ) -> EngineResult<EvaluationReport> {
        tree.sort_for_walk();

        for class_item in &mut tree.children {
            self.evaluate_item(class_item, bundle).await?;
            for element_item in &mut class_item.children {
                self.evaluate_item(element_item, bundle).await?;
                for attribute_item in &mut element_item.children {
                    self.evaluate_item(attribute_item, bundle).await?;
                }
            }
        }
        // Root-level criteria run once, after all classes.
        self.evaluate_item(&mut tree, bundle).await?;

        let statistics = Statistics::collect(&tree);
        let audit = if options.render_audit {
            Some(audit::render(&tree, &statistics, bundle))
        } else {
            None
        };
        debug!(
            score = statistics.message.score(),
            weighted_score = statistics.message.weighted_score(),
            "evaluation complete"
        );
        Ok(EvaluationReport {
            tree,
            statistics,
            audit,
        })
    }

    async fn evaluate_item(
        &self,
        item: &mut EvaluationItem,
        bundle: &ReferenceBundle,
    ) -> EngineResult<()> {
        for criterion in bundle.rubric.criteria_for(&item.entity.mnemonic) {
            let produced = resolver::resolve(
                item.entity.as_ref(),
                item.data.as_ref(),
                &item.path,
                criterion,
                bundle,
                &self.registry,
                self.config.max_chain_depth,
            )
            .await?;
            item.results.extend(produced);
        }
        Ok(())
    }
}
